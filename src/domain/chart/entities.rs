use super::reconcile::{BarReconciler, ChartSurface, ReconcileReport};
use super::services::{ChartFrame, compute_frame};
use super::value_objects::ChartDimensions;
use crate::domain::errors::AppResult;
use crate::domain::logging::LogComponent;
use crate::domain::timeline::{Timeline, Timestamp};
use crate::log_debug;

/// Aggregate - owns the chart render state and its drawing surface
pub struct ChartUpdater<S: ChartSurface> {
    dimensions: ChartDimensions,
    utc_offset_minutes: i32,
    surface: S,
    bars: BarReconciler<S::Handle>,
    last_frame: Option<ChartFrame>,
}

impl<S: ChartSurface> ChartUpdater<S> {
    pub fn new(dimensions: ChartDimensions, surface: S) -> Self {
        Self {
            dimensions,
            utc_offset_minutes: 0,
            surface,
            bars: BarReconciler::new(),
            last_frame: None,
        }
    }

    /// Offset used when labelling the time axis on later updates
    pub fn set_utc_offset(&mut self, minutes: i32) {
        self.utc_offset_minutes = minutes;
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// Redraw the chart for `timeline` as seen at `now`.
    pub fn update(&mut self, timeline: &Timeline, now: Timestamp) -> AppResult<ReconcileReport> {
        let frame = compute_frame(&self.dimensions, timeline, now, self.utc_offset_minutes);

        self.surface.draw_axes(&self.dimensions, &frame.axes)?;
        let report = self.bars.reconcile(&mut self.surface, &frame.bars)?;
        self.surface.commit()?;

        log_debug!(
            LogComponent::Domain("ChartUpdater"),
            "{} bars (+{} -{}), bar width {}px, y max {}",
            frame.bars.len(),
            report.entered,
            report.exited,
            frame.bar_width,
            frame.y.domain.1
        );

        self.last_frame = Some(frame);
        Ok(report)
    }

    pub fn dimensions(&self) -> &ChartDimensions {
        &self.dimensions
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn last_frame(&self) -> Option<&ChartFrame> {
        self.last_frame.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn bars(&self) -> &BarReconciler<S::Handle> {
        &self.bars
    }
}

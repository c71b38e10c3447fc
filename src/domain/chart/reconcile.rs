use std::collections::BTreeMap;

use super::value_objects::{Axes, BarGeometry, ChartDimensions};
use crate::domain::errors::AppResult;

/// Drawing target for the chart.
///
/// Bars are bound by array position: the reconciler decides which indices
/// enter, update or exit and the surface owns the visual handles.
pub trait ChartSurface {
    type Handle;

    /// Create the visual element for a new index
    fn enter(&mut self, index: usize) -> AppResult<Self::Handle>;

    /// Move an existing element to its new target geometry
    fn update(&mut self, handle: &mut Self::Handle, bar: &BarGeometry) -> AppResult<()>;

    /// Remove an element whose index no longer exists
    fn exit(&mut self, handle: Self::Handle) -> AppResult<()>;

    fn draw_axes(&mut self, dimensions: &ChartDimensions, axes: &Axes) -> AppResult<()>;

    /// Called once per update after every bar has been updated
    fn commit(&mut self) -> AppResult<()> {
        Ok(())
    }
}

/// Counts from one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Index-keyed binding between bars and their visual handles
#[derive(Debug)]
pub struct BarReconciler<H> {
    bound: BTreeMap<usize, H>,
}

impl<H> Default for BarReconciler<H> {
    fn default() -> Self {
        Self { bound: BTreeMap::new() }
    }
}

impl<H> BarReconciler<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn handle(&self, index: usize) -> Option<&H> {
        self.bound.get(&index)
    }

    /// Bring the bound handles in line with `bars`.
    ///
    /// Stale indices are removed first, then missing ones created, then every
    /// bar receives its geometry.
    pub fn reconcile<S>(&mut self, surface: &mut S, bars: &[BarGeometry]) -> AppResult<ReconcileReport>
    where
        S: ChartSurface<Handle = H>,
    {
        let mut report = ReconcileReport::default();

        for (_, handle) in self.bound.split_off(&bars.len()) {
            surface.exit(handle)?;
            report.exited += 1;
        }

        for bar in bars {
            let handle = match self.bound.entry(bar.index) {
                std::collections::btree_map::Entry::Occupied(entry) => entry.into_mut(),
                std::collections::btree_map::Entry::Vacant(entry) => {
                    report.entered += 1;
                    entry.insert(surface.enter(bar.index)?)
                }
            };
            surface.update(handle, bar)?;
            report.updated += 1;
        }

        Ok(report)
    }
}

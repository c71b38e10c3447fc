use std::cell::{Cell, RefCell};

use crate::domain::{
    chart::{ChartSurface, ChartUpdater, ReconcileReport},
    errors::{AppError, AppResult},
    logging::{LogComponent, LogLevel, get_logger},
    time::TimeProvider,
    timeline::{Timeline, Timestamp},
};
use crate::{log_debug, log_warn};

/// Fixed polling cadence
pub const UPDATE_INTERVAL_MS: u32 = 15_000;

/// One successful response from the status endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    /// Server-rendered HTML fragment for the status display
    pub display: String,
    pub timeline: Timeline,
}

/// Where snapshots come from
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    async fn fetch_status(&self) -> AppResult<StatusSnapshot>;

    fn endpoint(&self) -> &str;
}

/// The status label and display fragment on the page
pub trait StatusIndicator {
    fn set_visible(&self, visible: bool);

    fn replace_display(&self, html: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Updated(ReconcileReport),
    Failed(AppError),
}

impl PollOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, PollOutcome::Updated(_))
    }
}

/// Use case - one poll tick against the status endpoint
pub struct StatusPoller<Src, Ind, Surf>
where
    Surf: ChartSurface,
{
    source: Src,
    indicator: Ind,
    chart: RefCell<ChartUpdater<Surf>>,
    clock: Box<dyn TimeProvider>,
    in_flight: Cell<usize>,
}

impl<Src, Ind, Surf> StatusPoller<Src, Ind, Surf>
where
    Src: StatusSource,
    Ind: StatusIndicator,
    Surf: ChartSurface,
{
    pub fn new(source: Src, indicator: Ind, chart: ChartUpdater<Surf>, clock: Box<dyn TimeProvider>) -> Self {
        Self {
            source,
            indicator,
            chart: RefCell::new(chart),
            clock,
            in_flight: Cell::new(0),
        }
    }

    /// Draw the server-rendered timeline and reveal the status label
    pub fn render_initial(&self, timeline: &Timeline) -> AppResult<ReconcileReport> {
        let report = self.apply_timeline(timeline)?;
        self.indicator.set_visible(true);
        Ok(report)
    }

    /// Hide the label, fetch once, then redraw and reveal it again.
    ///
    /// Errors never escape: they are logged and the label stays hidden until
    /// a later tick succeeds.
    pub async fn poll_once(&self) -> PollOutcome {
        if self.in_flight.get() > 0 {
            log_warn!(
                LogComponent::Application("Poller"),
                "previous poll still pending ({} in flight)",
                self.in_flight.get()
            );
        }

        self.indicator.set_visible(false);
        self.in_flight.set(self.in_flight.get() + 1);
        let fetched = self.source.fetch_status().await;
        self.in_flight.set(self.in_flight.get() - 1);

        let result = fetched.and_then(|snapshot| {
            self.indicator.replace_display(&snapshot.display);
            self.apply_timeline(&snapshot.timeline)
        });

        match result {
            Ok(report) => {
                self.indicator.set_visible(true);
                log_debug!(LogComponent::Application("Poller"), "status refreshed");
                PollOutcome::Updated(report)
            }
            Err(error) => {
                get_logger().log_with_metadata(
                    LogLevel::Error,
                    LogComponent::Application("Poller"),
                    &error.to_string(),
                    self.source.endpoint(),
                );
                PollOutcome::Failed(error)
            }
        }
    }

    fn apply_timeline(&self, timeline: &Timeline) -> AppResult<ReconcileReport> {
        let now = Timestamp::from_millis(self.clock.now_millis());
        let mut chart = self.chart.borrow_mut();
        // the offset moves across DST changes
        chart.set_utc_offset(self.clock.utc_offset_minutes());
        chart.update(timeline, now)
    }

    pub fn chart(&self) -> std::cell::Ref<'_, ChartUpdater<Surf>> {
        self.chart.borrow()
    }

    pub fn indicator(&self) -> &Ind {
        &self.indicator
    }

    pub fn source(&self) -> &Src {
        &self.source
    }
}

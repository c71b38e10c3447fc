#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use tweet_timeline_wasm::application::{StatusIndicator, StatusSnapshot, StatusSource};
use tweet_timeline_wasm::domain::chart::{Axes, BarGeometry, ChartDimensions, ChartSurface, ChartUpdater};
use tweet_timeline_wasm::domain::errors::{AppError, AppResult, FetchFailure};
use tweet_timeline_wasm::domain::time::TimeProvider;
use tweet_timeline_wasm::domain::timeline::{MINUTE_MS, TimePoint, Timeline, Timestamp};

/// 2024-01-01T00:00:00Z
pub const T0: i64 = 1_704_067_200_000;

pub fn minute(n: i64) -> Timestamp {
    Timestamp::from_millis(T0 + n * MINUTE_MS)
}

pub fn timeline(counts: &[u64]) -> Timeline {
    let points = counts
        .iter()
        .enumerate()
        .map(|(i, &tweets)| TimePoint::new(minute(i as i64), tweets))
        .collect();
    Timeline::new(points).unwrap()
}

/// Surface that records what the chart asked it to draw
#[derive(Default)]
pub struct RecordingSurface {
    pub alive: BTreeMap<u32, Option<BarGeometry>>,
    next_id: u32,
    pub entered: usize,
    pub exited: usize,
    pub axes: Option<Axes>,
    pub commits: usize,
}

impl RecordingSurface {
    pub fn filling_count(&self) -> usize {
        self.alive.values().flatten().filter(|bar| bar.filling).count()
    }

    pub fn geometry(&self, id: u32) -> Option<&BarGeometry> {
        self.alive.get(&id).and_then(|bar| bar.as_ref())
    }
}

impl ChartSurface for RecordingSurface {
    type Handle = u32;

    fn enter(&mut self, _index: usize) -> AppResult<u32> {
        let id = self.next_id;
        self.next_id += 1;
        self.entered += 1;
        self.alive.insert(id, None);
        Ok(id)
    }

    fn update(&mut self, handle: &mut u32, bar: &BarGeometry) -> AppResult<()> {
        self.alive.insert(*handle, Some(bar.clone()));
        Ok(())
    }

    fn exit(&mut self, handle: u32) -> AppResult<()> {
        self.exited += 1;
        self.alive.remove(&handle);
        Ok(())
    }

    fn draw_axes(&mut self, _dimensions: &ChartDimensions, axes: &Axes) -> AppResult<()> {
        self.axes = Some(axes.clone());
        Ok(())
    }

    fn commit(&mut self) -> AppResult<()> {
        self.commits += 1;
        Ok(())
    }
}

pub fn recording_chart(width: u32) -> ChartUpdater<RecordingSurface> {
    ChartUpdater::new(ChartDimensions::new(width, 250), RecordingSurface::default())
}

/// Serves queued responses in order; an empty queue is a network failure
#[derive(Default)]
pub struct ScriptedSource {
    responses: RefCell<VecDeque<AppResult<StatusSnapshot>>>,
    pub calls: Cell<usize>,
}

impl ScriptedSource {
    pub fn push_ok(&self, display: &str, timeline: Timeline) {
        self.responses
            .borrow_mut()
            .push_back(Ok(StatusSnapshot { display: display.to_string(), timeline }));
    }

    pub fn push_err(&self, error: AppError) {
        self.responses.borrow_mut().push_back(Err(error));
    }
}

impl StatusSource for ScriptedSource {
    async fn fetch_status(&self) -> AppResult<StatusSnapshot> {
        self.calls.set(self.calls.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchFailure::Network("connection refused".to_string()).into()))
    }

    fn endpoint(&self) -> &str {
        "/stream/update/"
    }
}

/// Indicator that remembers every change
#[derive(Default)]
pub struct RecordingIndicator {
    pub visible: Cell<bool>,
    pub history: RefCell<Vec<bool>>,
    pub displays: RefCell<Vec<String>>,
}

impl StatusIndicator for RecordingIndicator {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
        self.history.borrow_mut().push(visible);
    }

    fn replace_display(&self, html: &str) {
        self.displays.borrow_mut().push(html.to_string());
    }
}

/// Clock whose time and offset the test can move
#[derive(Clone, Default)]
pub struct AdjustableClock {
    pub now_millis: Rc<Cell<i64>>,
    pub utc_offset_minutes: Rc<Cell<i32>>,
}

impl TimeProvider for AdjustableClock {
    fn now_millis(&self) -> i64 {
        self.now_millis.get()
    }

    fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes.get()
    }
}

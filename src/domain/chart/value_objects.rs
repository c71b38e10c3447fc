use chrono::{DateTime, FixedOffset};
use strum::AsRefStr;

use crate::domain::timeline::{MINUTE_MS, Timestamp};

/// Gap kept between the y axis and the first bar
pub const LEFT_INSET_PX: f64 = 22.0;
/// Bar widths snap down to multiples of this
pub const BAR_WIDTH_STEP: i64 = 20;
pub const DEFAULT_CHART_HEIGHT: u32 = 250;
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Value Object - outer chart margins in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 5.0, right: 20.0, bottom: 30.0, left: 50.0 }
    }
}

/// Value Object - fixed pixel size of the chart, set once at mount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl ChartDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, margin: Margin::default() }
    }

    /// Width available to bars
    pub fn plot_width(&self) -> f64 {
        (self.width as f64 - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height available to bars
    pub fn plot_height(&self) -> f64 {
        (self.height as f64 - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// Value Object - linear mapping from a numeric domain to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Integer ticks on a 1/2/5 × 10^k grid, roughly `count` of them.
    ///
    /// Only non-negative values are produced; ticks that would not fit in
    /// `u64` are dropped.
    pub fn integer_ticks(&self, count: usize) -> Vec<u64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let step = nice_step((hi - lo) / count.max(1) as f64).max(1.0) as u64;
        let first = (lo.max(0.0) / step as f64).ceil() as u64;
        let last = (hi.max(0.0) / step as f64).floor() as u64;
        (first..=last)
            .map_while(|i| i.checked_mul(step))
            .collect()
    }
}

/// Round a raw step to 1, 2, 5 or 10 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Value Object - spacing of time ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInterval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    ThreeHours,
    SixHours,
    TwelveHours,
    OneDay,
}

impl TickInterval {
    const ALL: [TickInterval; 9] = [
        TickInterval::OneMinute,
        TickInterval::FiveMinutes,
        TickInterval::FifteenMinutes,
        TickInterval::ThirtyMinutes,
        TickInterval::OneHour,
        TickInterval::ThreeHours,
        TickInterval::SixHours,
        TickInterval::TwelveHours,
        TickInterval::OneDay,
    ];

    pub fn millis(&self) -> i64 {
        let minutes = match self {
            TickInterval::OneMinute => 1,
            TickInterval::FiveMinutes => 5,
            TickInterval::FifteenMinutes => 15,
            TickInterval::ThirtyMinutes => 30,
            TickInterval::OneHour => 60,
            TickInterval::ThreeHours => 180,
            TickInterval::SixHours => 360,
            TickInterval::TwelveHours => 720,
            TickInterval::OneDay => 1440,
        };
        minutes * MINUTE_MS
    }

    /// Smallest interval yielding at most `count` ticks over `span_ms`
    pub fn for_span(span_ms: i64, count: usize) -> Self {
        let target = span_ms / count.max(1) as i64;
        Self::ALL
            .into_iter()
            .find(|interval| interval.millis() >= target)
            .unwrap_or(TickInterval::OneDay)
    }

    fn label_format(&self) -> &'static str {
        match self {
            TickInterval::OneDay => "%b %d",
            _ => "%H:%M",
        }
    }
}

/// Value Object - time mapping for the x axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: (Timestamp, Timestamp),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (Timestamp, Timestamp), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, time: Timestamp) -> f64 {
        LinearScale::new(
            (self.domain.0.value() as f64, self.domain.1.value() as f64),
            self.range,
        )
        .scale(time.value() as f64)
    }

    /// Ticks aligned to local wall-clock boundaries
    pub fn ticks(&self, count: usize, utc_offset_minutes: i32) -> Vec<AxisTick> {
        let (start, end) = (self.domain.0.value(), self.domain.1.value());
        let interval = TickInterval::for_span(end - start, count);
        // spans beyond `count` days step by several days at a time
        let stride = ((end - start) as f64 / count.max(1) as f64 / interval.millis() as f64)
            .ceil()
            .max(1.0) as i64;
        let step = interval.millis() * stride;
        let offset_ms = utc_offset_minutes as i64 * MINUTE_MS;
        let Some(zone) = FixedOffset::east_opt(utc_offset_minutes * 60) else {
            return Vec::new();
        };

        let local_start = start + offset_ms;
        let mut tick = local_start + (step - local_start.rem_euclid(step)) % step - offset_ms;
        let mut ticks = Vec::new();
        while tick <= end {
            let time = Timestamp::from_millis(tick);
            let label = DateTime::from_timestamp_millis(tick)
                .map(|dt| dt.with_timezone(&zone).format(interval.label_format()).to_string())
                .unwrap_or_default();
            ticks.push(AxisTick { position: self.scale(time), label });
            tick += step;
        }
        ticks
    }
}

/// Value Object - one labelled tick, position in plot pixels
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Both axes for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

/// CSS classes the chart applies to SVG nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum ChartClass {
    #[strum(serialize = "filling")]
    Filling,
    #[strum(serialize = "bars")]
    Bars,
    #[strum(serialize = "x axis")]
    XAxis,
    #[strum(serialize = "y axis")]
    YAxis,
    #[strum(serialize = "tick")]
    Tick,
    #[strum(serialize = "domain")]
    Domain,
}

/// Animated vertical extent of a bar and its label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarExtent {
    pub y: f64,
    pub height: f64,
    pub label_y: f64,
}

impl BarExtent {
    /// Zero-height bar sitting on the x axis
    pub fn baseline(plot_height: f64) -> Self {
        Self { y: plot_height, height: 0.0, label_y: plot_height + 3.0 }
    }
}

/// Value Object - target geometry of one bar
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub index: usize,
    pub time: Timestamp,
    pub tweets: u64,
    /// Left edge, applied as a group translate
    pub x: f64,
    pub rect_width: f64,
    pub label_x: f64,
    pub label: String,
    pub extent: BarExtent,
    pub filling: bool,
}

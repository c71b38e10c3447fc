use super::value_objects::{
    AxisTick, Axes, BAR_WIDTH_STEP, BarExtent, BarGeometry, ChartDimensions, DEFAULT_TICK_COUNT,
    LEFT_INSET_PX, LinearScale, TimeScale,
};
use crate::domain::timeline::{Timeline, Timestamp};

/// Everything needed to draw one update of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub x: TimeScale,
    pub y: LinearScale,
    pub bar_width: u32,
    pub axes: Axes,
    pub bars: Vec<BarGeometry>,
}

impl ChartFrame {
    pub fn x_domain(&self) -> (Timestamp, Timestamp) {
        self.x.domain
    }

    pub fn y_domain(&self) -> (f64, f64) {
        self.y.domain
    }
}

/// Bar width for a window of `minutes_shown` minutes.
///
/// Floors to whole pixels, then snaps down to a multiple of 20 with a
/// 1 px minimum. Windows shorter than a minute count as one minute.
pub fn bar_width_for(plot_width: f64, minutes_shown: f64) -> u32 {
    let minutes = if minutes_shown.is_finite() { minutes_shown.max(1.0) } else { 1.0 };
    let available = (plot_width - LEFT_INSET_PX).max(0.0);
    let width = (available / minutes).floor() as i64;
    (width - width % BAR_WIDTH_STEP).max(1) as u32
}

/// Upper y bound; an all-zero timeline still gets a `[0, 1]` domain
pub fn y_upper_bound(max_tweets: u64) -> f64 {
    max_tweets.max(1) as f64
}

/// Lay out scales, axes and bars for `timeline` as seen at `now`.
pub fn compute_frame(
    dimensions: &ChartDimensions,
    timeline: &Timeline,
    now: Timestamp,
    utc_offset_minutes: i32,
) -> ChartFrame {
    let now = now.truncate_to_minute();
    let (earliest, latest) = timeline.extent();
    let plot_width = dimensions.plot_width();
    let plot_height = dimensions.plot_height();

    let bar_width = bar_width_for(plot_width, now.minutes_since(earliest));
    let half_bar = bar_width as f64 / 2.0;

    let x = TimeScale::new(
        (earliest, latest.max(now)),
        (half_bar + LEFT_INSET_PX, plot_width),
    );
    let y = LinearScale::new((0.0, y_upper_bound(timeline.max_tweets())), (plot_height, 0.0));

    let axes = Axes {
        x_ticks: x.ticks(DEFAULT_TICK_COUNT, utc_offset_minutes),
        y_ticks: y
            .integer_ticks(DEFAULT_TICK_COUNT)
            .into_iter()
            .map(|value| AxisTick { position: y.scale(value as f64), label: value.to_string() })
            .collect(),
    };

    let last_index = timeline.len() - 1;
    let bars = timeline
        .points()
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let top = y.scale(point.tweets as f64);
            BarGeometry {
                index,
                time: point.time,
                tweets: point.tweets,
                x: x.scale(point.time) - half_bar,
                rect_width: bar_width as f64 - 1.0,
                label_x: half_bar,
                label: point.tweets.to_string(),
                extent: BarExtent { y: top, height: plot_height - top, label_y: top + 3.0 },
                filling: index == last_index,
            }
        })
        .collect();

    ChartFrame { x, y, bar_width, axes, bars }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_width_snaps_to_twenty() {
        assert_eq!(bar_width_for(730.0, 2.0), 340);
        assert_eq!(bar_width_for(730.0, 20.0), 20);
        assert_eq!(bar_width_for(730.0, 60.0), 1);
    }

    #[test]
    fn bar_width_guards_short_and_negative_windows() {
        assert_eq!(bar_width_for(730.0, 0.0), bar_width_for(730.0, 1.0));
        assert_eq!(bar_width_for(730.0, -3.0), 700);
        assert_eq!(bar_width_for(10.0, 1.0), 1);
        assert_eq!(bar_width_for(730.0, f64::NAN), 700);
    }

    #[test]
    fn zero_counts_keep_unit_domain() {
        assert_eq!(y_upper_bound(0), 1.0);
        assert_eq!(y_upper_bound(7), 7.0);
    }
}

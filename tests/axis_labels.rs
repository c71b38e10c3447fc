mod common;

use common::{minute, recording_chart, timeline};
use tweet_timeline_wasm::domain::chart::{DEFAULT_TICK_COUNT, TimeScale};

fn labels(ticks: &[tweet_timeline_wasm::domain::chart::AxisTick]) -> Vec<&str> {
    ticks.iter().map(|tick| tick.label.as_str()).collect()
}

#[test]
fn two_hour_window_in_utc_plus_one() {
    let scale = TimeScale::new((minute(0), minute(120)), (0.0, 700.0));
    let ticks = scale.ticks(DEFAULT_TICK_COUNT, 60);

    insta::assert_debug_snapshot!(labels(&ticks), @r###"
    [
        "01:00",
        "01:15",
        "01:30",
        "01:45",
        "02:00",
        "02:15",
        "02:30",
        "02:45",
        "03:00",
    ]
    "###);
    assert_eq!(ticks.first().map(|t| t.position), Some(0.0));
    assert_eq!(ticks.last().map(|t| t.position), Some(700.0));
}

#[test]
fn y_axis_steps_by_five_up_to_max() {
    let mut chart = recording_chart(800);
    chart.update(&timeline(&[12, 37, 20]), minute(3)).unwrap();
    let axes = chart.surface().axes.clone().unwrap();

    insta::assert_debug_snapshot!(labels(&axes.y_ticks), @r###"
    [
        "0",
        "5",
        "10",
        "15",
        "20",
        "25",
        "30",
        "35",
    ]
    "###);
}

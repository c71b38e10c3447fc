mod common;

use common::{T0, minute, recording_chart, timeline};
use tweet_timeline_wasm::domain::chart::ReconcileReport;
use tweet_timeline_wasm::domain::timeline::{TimePoint, Timeline, Timestamp};

#[test]
fn two_bucket_scenario() {
    let data = Timeline::parse(
        [("2024-01-01T00:00:00Z", 5), ("2024-01-01T00:01:00Z", 12)],
        0,
    )
    .unwrap();
    let mut chart = recording_chart(800);

    let report = chart.update(&data, minute(2)).unwrap();

    assert_eq!(report, ReconcileReport { entered: 2, updated: 2, exited: 0 });
    assert_eq!(chart.bar_count(), 2);
    assert_eq!(chart.surface().alive.len(), 2);

    let frame = chart.last_frame().unwrap();
    assert_eq!(frame.y_domain(), (0.0, 12.0));
    assert_eq!(frame.x_domain(), (minute(0), minute(2)));
    // (800 - 70 - 22) / 2 = 354 -> 340
    assert_eq!(frame.bar_width, 340);

    assert!(!frame.bars[0].filling);
    assert!(frame.bars[1].filling);
    assert_eq!(chart.surface().filling_count(), 1);
}

#[test]
fn shrinking_timeline_removes_stale_bars() {
    let mut chart = recording_chart(800);
    chart.update(&timeline(&[1, 2, 3, 4, 5]), minute(5)).unwrap();
    let report = chart.update(&timeline(&[7, 8]), minute(2)).unwrap();

    assert_eq!(report.exited, 3);
    assert_eq!(report.entered, 0);
    assert_eq!(chart.bar_count(), 2);
    assert_eq!(chart.surface().alive.len(), 2);
    assert_eq!(chart.surface().exited, 3);
}

#[test]
fn growing_timeline_moves_filling_marker() {
    let mut chart = recording_chart(800);
    chart.update(&timeline(&[1, 2]), minute(2)).unwrap();
    let first_last = *chart.bars().handle(1).unwrap();

    chart.update(&timeline(&[1, 2, 9]), minute(3)).unwrap();

    assert_eq!(chart.bar_count(), 3);
    assert_eq!(chart.surface().entered, 3);
    assert!(!chart.surface().geometry(first_last).unwrap().filling);
    let newest = *chart.bars().handle(2).unwrap();
    assert!(chart.surface().geometry(newest).unwrap().filling);
    assert_eq!(chart.surface().filling_count(), 1);
}

#[test]
fn x_domain_keeps_latest_bucket_when_now_lags() {
    let mut chart = recording_chart(800);
    chart.update(&timeline(&[3, 4, 5]), minute(1)).unwrap();
    assert_eq!(chart.last_frame().unwrap().x_domain().1, minute(2));
}

#[test]
fn now_is_truncated_to_the_minute() {
    let mut chart = recording_chart(800);
    let now = Timestamp::from_millis(minute(4).value() + 42_317);
    chart.update(&timeline(&[3, 4]), now).unwrap();
    assert_eq!(chart.last_frame().unwrap().x_domain().1, minute(4));
}

#[test]
fn all_zero_counts_clamp_y_domain() {
    let mut chart = recording_chart(800);
    chart.update(&timeline(&[0, 0, 0]), minute(3)).unwrap();
    let frame = chart.last_frame().unwrap();
    assert_eq!(frame.y_domain(), (0.0, 1.0));
    assert!(frame.bars.iter().all(|bar| bar.extent.height == 0.0));
}

#[test]
fn single_bucket_uses_one_minute_window() {
    let mut chart = recording_chart(800);
    let single = Timeline::new(vec![TimePoint::new(Timestamp::from_millis(T0), 4)]).unwrap();
    chart.update(&single, Timestamp::from_millis(T0)).unwrap();

    let frame = chart.last_frame().unwrap();
    assert_eq!(frame.bar_width, 700);
    assert_eq!(chart.bar_count(), 1);
    assert!(frame.bars[0].filling);
}

#[test]
fn bars_are_centred_on_their_bucket() {
    let mut chart = recording_chart(800);
    chart.update(&timeline(&[5, 12]), minute(2)).unwrap();
    let frame = chart.last_frame().unwrap();

    for bar in &frame.bars {
        let centre = bar.x + frame.bar_width as f64 / 2.0;
        assert!((centre - frame.x.scale(bar.time)).abs() < 1e-9);
        assert_eq!(bar.rect_width, frame.bar_width as f64 - 1.0);
        assert_eq!(bar.label, bar.tweets.to_string());
    }
    // the tallest bar reaches the top of the plot
    assert_eq!(frame.bars[1].extent.y, 0.0);
    assert_eq!(frame.bars[1].extent.height, 215.0);
}

#[test]
fn counts_near_u64_max_still_draw() {
    let mut chart = recording_chart(800);
    let report = chart.update(&timeline(&[1, 10_000_000_000_000_000_000]), minute(2)).unwrap();

    assert_eq!(report.entered, 2);
    let frame = chart.last_frame().unwrap();
    assert_eq!(frame.y_domain().1, 1e19);
    assert_eq!(frame.bars[1].extent.y, 0.0);
    let labels: Vec<_> = frame.axes.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels.first(), Some(&"0"));
    assert_eq!(labels.last(), Some(&"10000000000000000000"));
}

#[test]
fn axes_are_redrawn_each_update() {
    let mut chart = recording_chart(800);
    chart.update(&timeline(&[5, 12]), minute(2)).unwrap();
    chart.update(&timeline(&[5, 12, 20]), minute(3)).unwrap();

    assert_eq!(chart.surface().commits, 2);
    let axes = chart.surface().axes.as_ref().unwrap();
    assert_eq!(axes.y_ticks.first().map(|t| t.label.as_str()), Some("0"));
    assert_eq!(axes.y_ticks.last().map(|t| t.label.as_str()), Some("20"));
    assert_eq!(axes.x_ticks.len(), 4);
}

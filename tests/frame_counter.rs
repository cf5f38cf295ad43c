use std::time::Duration;
use tumble::utils::FrameCounter;

#[test]
fn empty_counter_reports_zero() {
    let counter = FrameCounter::default();
    assert_eq!(counter.mean_delta_time(), 0.0);
    assert_eq!(counter.fps(), 0);
    assert_eq!(counter.total_frames(), 0);
}

#[test]
fn mean_over_recent_frames() {
    let mut counter = FrameCounter::default();
    for _ in 0..100 {
        counter.new_frame(1.0);
    }
    for _ in 0..60 {
        counter.new_frame_from_delta(Duration::from_micros(15_625));
    }

    assert_eq!(counter.mean_delta_time(), 1.0 / 64.0);
    assert_eq!(counter.fps(), 64);
    assert_eq!(counter.total_frames(), 160);
}

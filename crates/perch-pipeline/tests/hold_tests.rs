use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use perch_base::{Clock, Tensor};
use perch_pipeline::HoldController;

#[derive(Clone)]
struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    fn new() -> Self {
        ManualClock {
            now: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    fn advance_to(&self, ms: u64) {
        self.now.set(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn monotonic(&self) -> Duration {
        self.now.get()
    }
}

fn frame(value: u8) -> Tensor<u8> {
    Tensor::new(vec![2, 2, 3], vec![value; 12]).unwrap()
}

fn controller(clock: &ManualClock) -> HoldController<ManualClock> {
    HoldController::new(clock.clone(), vec![2, 2, 3]).unwrap()
}

#[test]
fn test_starts_live() {
    let clock = ManualClock::new();
    let mut hold = controller(&clock);
    assert!(hold.frozen_frame().is_none());
}

#[test]
fn test_detection_freezes_a_snapshot() {
    let clock = ManualClock::new();
    let mut hold = controller(&clock);

    hold.on_detection(&frame(7));
    let frozen = hold.frozen_frame().unwrap();
    assert_eq!(frozen.shape, vec![2, 2, 3]);
    assert!(frozen.data.iter().all(|&b| b == 7));
}

#[test]
fn test_hold_expires_strictly_after_the_window() {
    let clock = ManualClock::new();
    let mut hold = controller(&clock);
    hold.on_detection(&frame(7));

    clock.advance_to(2999);
    assert!(hold.frozen_frame().is_some());

    clock.advance_to(3000);
    assert!(hold.frozen_frame().is_some());

    clock.advance_to(3001);
    assert!(hold.frozen_frame().is_none());

    clock.advance_to(10_000);
    assert!(hold.frozen_frame().is_none());
}

#[test]
fn test_new_detection_restarts_the_window() {
    let clock = ManualClock::new();
    let mut hold = controller(&clock);

    hold.on_detection(&frame(7));
    clock.advance_to(2000);
    hold.on_detection(&frame(9));

    clock.advance_to(4500);
    let frozen = hold.frozen_frame().unwrap();
    assert!(frozen.data.iter().all(|&b| b == 9));

    clock.advance_to(5002);
    assert!(hold.frozen_frame().is_none());
}

#[test]
fn test_custom_hold_window() {
    let clock = ManualClock::new();
    let mut hold = controller(&clock).with_hold(Duration::from_millis(100));
    assert_eq!(hold.hold(), Duration::from_millis(100));

    hold.on_detection(&frame(1));
    clock.advance_to(100);
    assert!(hold.frozen_frame().is_some());
    clock.advance_to(101);
    assert!(hold.frozen_frame().is_none());
}

#[test]
fn test_snapshot_tracks_frame_shape() {
    let clock = ManualClock::new();
    let mut hold = controller(&clock);

    let small = Tensor::new(vec![1, 2, 3], vec![4; 6]).unwrap();
    hold.on_detection(&small);

    let frozen = hold.frozen_frame().unwrap();
    assert_eq!(frozen.shape, vec![1, 2, 3]);
    assert_eq!(frozen.data.len(), 6);
}

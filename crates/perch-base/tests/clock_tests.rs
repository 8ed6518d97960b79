use std::time::Duration;

use perch_base::{Clock, SystemClock};

#[test]
fn test_system_clock_monotonic() {
    let clock = SystemClock::new();
    let a = clock.monotonic();
    let b = clock.monotonic();
    assert!(b >= a);
}

#[test]
fn test_system_clock_starts_near_zero() {
    let clock = SystemClock::new();
    assert!(clock.monotonic() < Duration::from_secs(1));
}

#[test]
fn test_clock_trait_object() {
    let clock: Box<dyn Clock> = Box::new(SystemClock::new());
    let a = clock.monotonic();
    assert!(clock.monotonic() >= a);
}

use portal_types::{wall_millis, MonotonicClock};

#[test]
fn new_clock_has_no_reading() {
    let clock = MonotonicClock::new();
    assert_eq!(clock.last(), 0);
}

#[test]
fn tick_uses_wall_time_when_ahead() {
    let clock = MonotonicClock::new();
    assert_eq!(clock.tick_at(1_000), 1_000);
    assert_eq!(clock.tick_at(2_000), 2_000);
    assert_eq!(clock.last(), 2_000);
}

#[test]
fn tick_bumps_on_same_millisecond() {
    let clock = MonotonicClock::new();
    assert_eq!(clock.tick_at(1_000), 1_000);
    assert_eq!(clock.tick_at(1_000), 1_001);
    assert_eq!(clock.tick_at(1_000), 1_002);
}

#[test]
fn tick_never_goes_backwards() {
    let clock = MonotonicClock::new();
    clock.tick_at(5_000);
    // System clock stepped back
    assert_eq!(clock.tick_at(4_000), 5_001);
    // Wall time catches up again
    assert_eq!(clock.tick_at(9_000), 9_000);
}

#[test]
fn real_ticks_are_strictly_increasing() {
    let clock = MonotonicClock::new();
    let mut prev = clock.tick();
    for _ in 0..1_000 {
        let next = clock.tick();
        assert!(next > prev);
        prev = next;
    }
}

#[test]
fn wall_millis_is_after_2020() {
    // 2020-01-01T00:00:00Z
    assert!(wall_millis() > 1_577_836_800_000);
}

use orrery_scene::{TICK_PRESETS, TickLadder, WorldClock};
use proptest::prelude::*;

proptest! {
    // Ticks depend only on the total time fed in, not on how it was split
    #[test]
    fn chunking_invariant(
        tick_length in prop::sample::select(TICK_PRESETS.to_vec()),
        parts in prop::collection::vec(1u32..1000, 1..50),
    ) {
        // millisecond frames sum exactly in f64
        let mut chunked = WorldClock::new(tick_length);
        let mut total_ms = 0u64;
        for &ms in &parts {
            chunked.advance(ms as f64 / 1000.0);
            total_ms += ms as u64;
        }
        let scaled = tick_length * total_ms as f64 / 1000.0;
        let expected = (scaled + 0.5).floor() as u64;
        let diff = chunked.tick().abs_diff(expected);
        // only a rounding tie can differ, and only by one
        prop_assert!(diff <= 1, "chunked {} expected {}", chunked.tick(), expected);
        let carried = chunked.tick() as f64 + chunked.accumulator();
        prop_assert!((carried - scaled).abs() <= 1e-9 * scaled.max(1.0));
    }

    #[test]
    fn tick_never_decreases(
        tick_length in 0.0f64..1.0e6,
        frames in prop::collection::vec(-1.0f64..1.0, 1..100),
    ) {
        let mut clock = WorldClock::new(tick_length);
        let mut last = 0;
        for dt in frames {
            clock.advance(dt);
            prop_assert!(clock.tick() >= last);
            last = clock.tick();
        }
    }

    #[test]
    fn ladder_moves_monotonically(current in 0.5f64..4.0e9) {
        if let Some(up) = TickLadder::faster(current) {
            prop_assert!(up > current);
        }
        if let Some(down) = TickLadder::slower(current) {
            prop_assert!(down < current);
        }
    }
}

#[test]
fn ten_tenths_equal_one_second() {
    for &len in TICK_PRESETS.iter() {
        let mut a = WorldClock::new(len);
        for _ in 0..10 {
            a.advance(0.1);
        }
        let mut b = WorldClock::new(len);
        b.advance(1.0);
        assert_eq!(a.tick(), b.tick(), "tick length {len}");
    }
}

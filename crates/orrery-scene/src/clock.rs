/// Simulated seconds per real second offered by the time controls, ascending.
pub const TICK_PRESETS: [f64; 34] = [
    1.0,
    2.0,
    5.0,
    10.0,
    20.0,
    40.0,
    60.0, // 1 minute
    120.0,
    300.0,
    600.0,
    1200.0,
    1800.0,
    2700.0,
    3600.0, // 1 hour
    7200.0,
    14400.0,
    21600.0,
    43200.0,
    86400.0, // 1 day
    172800.0,
    432000.0,
    604800.0,
    1209600.0,
    2592000.0, // 30 days
    5270400.0,
    7884000.0,
    15768000.0,
    31536000.0, // 1 year
    63072000.0,
    157680000.0,
    315360000.0,
    630720000.0,
    1576800000.0,
    3153600000.0, // 100 years
];

/// Navigation over [`TICK_PRESETS`]. Stepping past either end yields `None`.
pub struct TickLadder;

impl TickLadder {
    /// Next preset strictly above `current`.
    pub fn faster(current: f64) -> Option<f64> {
        TICK_PRESETS.iter().copied().find(|&p| p > current)
    }

    /// Next preset strictly below `current`.
    pub fn slower(current: f64) -> Option<f64> {
        TICK_PRESETS.iter().rev().copied().find(|&p| p < current)
    }
}

/// Human label for a rate in simulated seconds per real second, e.g. `"1.2 hours"`.
pub fn describe_rate(seconds: f64) -> String {
    const UNITS: [(f64, &str); 4] = [
        (60.0, "minutes"),
        (60.0, "hours"),
        (24.0, "days"),
        (365.0, "years"),
    ];
    let mut value = seconds;
    let mut unit = "seconds";
    for (div, name) in UNITS {
        if value < div {
            break;
        }
        value /= div;
        unit = name;
    }
    format!("{:.1} {}", value, unit)
}

/// Discrete simulation time. One tick is one simulated second.
///
/// Real frame time is scaled by `tick_length` and rounded into whole ticks; the
/// rounding remainder is carried, so `tick + accumulator` always equals the total
/// scaled time fed in and the resulting tick does not depend on frame chunking.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldClock {
    tick: u64,
    tick_length: f64,
    accumulator: f64,
}

impl WorldClock {
    pub fn new(tick_length: f64) -> Self {
        Self::starting_at(0, tick_length)
    }

    pub fn starting_at(tick: u64, tick_length: f64) -> Self {
        Self {
            tick,
            tick_length,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn tick_length(&self) -> f64 {
        self.tick_length
    }

    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Only affects future accumulation; `tick` is never rewritten.
    pub fn set_tick_length(&mut self, tick_length: f64) {
        self.tick_length = tick_length;
    }

    /// Feeds `real_dt` seconds of wall-clock time. Returns the number of ticks advanced.
    ///
    /// Negative or non-finite deltas are ignored, keeping `tick` monotonic.
    pub fn advance(&mut self, real_dt: f64) -> u64 {
        let delta = self.tick_length * real_dt;
        if !delta.is_finite() || delta < 0.0 {
            return 0;
        }
        let total = delta + self.accumulator;
        let whole = (total + 0.5).floor();
        if whole < 1.0 {
            self.accumulator = total;
            return 0;
        }
        self.accumulator = total - whole;
        let ticks = whole as u64;
        self.tick = self.tick.saturating_add(ticks);
        log::trace!(target: "clock", "advanced {} ticks to {}", ticks, self.tick);
        ticks
    }

    /// Moves to the next faster preset. Returns false at the top of the ladder.
    pub fn faster(&mut self) -> bool {
        match TickLadder::faster(self.tick_length) {
            Some(next) => {
                self.tick_length = next;
                log::info!(target: "clock", "time rate {}/s", describe_rate(next));
                true
            }
            None => false,
        }
    }

    /// Moves to the next slower preset. Returns false at the bottom of the ladder.
    pub fn slower(&mut self) -> bool {
        match TickLadder::slower(self.tick_length) {
            Some(next) => {
                self.tick_length = next;
                log::info!(target: "clock", "time rate {}/s", describe_rate(next));
                true
            }
            None => false,
        }
    }
}

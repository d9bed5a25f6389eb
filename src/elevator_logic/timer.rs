/// Countdown driven by simulated time instead of the wall clock.
///
/// The controller feeds it the `dt` of every tick. Advancing is a single subtraction,
/// so one large `dt` only ever expires the phase that is currently running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    remaining: f64,
}

/// Timer that has already run out.
pub fn new() -> Timer {
    Timer { remaining: 0.0 }
}

impl Timer {
    /// Restarts the countdown at `duration` seconds.
    pub fn timer_start(&mut self, duration: f64) {
        self.remaining = duration;
    }

    /// Sets the remaining time to zero.
    pub fn timer_stop(&mut self) {
        self.remaining = 0.0;
    }

    /// Subtracts `dt` and reports whether the countdown has run out.
    pub fn timer_advance(&mut self, dt: f64) -> bool {
        self.remaining -= dt;
        self.timer_timeouted()
    }

    /// `true` once the remaining time is zero or below.
    pub fn timer_timeouted(&self) -> bool {
        self.remaining <= 0.0
    }
}

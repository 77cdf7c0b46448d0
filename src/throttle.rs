//! Throttle - Leading-edge rate limiter
//!
//! A call is admitted at most once per window. Calls that arrive while the
//! window is closed are dropped, not queued: nothing runs when the window
//! reopens unless a new call arrives.
//!
//! Time is passed in explicitly (milliseconds, e.g. `performance.now()`).

/// Leading-edge throttle.
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: f64,
    last_fired: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: f64::from(window_ms),
            last_fired: None,
        }
    }

    /// Returns `true` if a call at `now` should run, and starts a new window.
    pub fn try_fire(&mut self, now: f64) -> bool {
        match self.last_fired {
            Some(last) if now - last < self.window_ms => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }

    /// Run `f` if admitted at `now`.
    pub fn run<R>(&mut self, now: f64, f: impl FnOnce() -> R) -> Option<R> {
        self.try_fire(now).then(f)
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }
}

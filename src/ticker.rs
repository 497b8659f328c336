use std::time::Duration;

use tracing::debug;

/// Default time between generations while running.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Run/pause state of the periodic step timer.
///
/// The driver feeds it elapsed time and gets back how many generations are due. There is only
/// ever one timer: running while already running changes nothing, and pausing drops whatever
/// time had built up so no step fires after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    running: bool,

    /// Time accumulated towards the next step
    elapsed: Duration,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Ticker {
    /// A paused ticker. A zero interval is treated as 1ms.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            running: false,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) {
        if self.running {
            return;
        }

        debug!(interval_ms = self.interval.as_millis() as u64, "running");
        self.running = true;
    }

    pub fn pause(&mut self) {
        if !self.running {
            return;
        }

        debug!("paused");
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.run();
        }
    }

    /// Account for `dt` of wall time and return the number of steps now due. Always 0 while
    /// paused.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        self.elapsed += dt;

        let mut steps = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            steps += 1;
        }

        steps
    }
}

//! Fixed-step tick scheduler
//!
//! Converts variable frame deltas into a whole number of fixed ticks.
//! Leftover time carries into the next frame; backlog past the substep cap
//! is dropped so a stalled frame cannot trigger a spiral of catch-up ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::{ConfigError, positive};

/// Longest frame delta accepted, in seconds
const MAX_FRAME_DT: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct TickClock {
    period: f64,
    accumulator: f64,
    max_substeps: u32,
    running: bool,
}

impl TickClock {
    /// Clock ticking every `period` seconds
    pub fn new(period: f64) -> Result<Self, ConfigError> {
        let period = positive(period, ConfigError::InvalidTickPeriod)?;
        Ok(Self {
            period,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
            running: true,
        })
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Feed a frame delta; returns how many ticks to run now
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.period && ticks < self.max_substeps {
            self.accumulator -= self.period;
            ticks += 1;
        }
        if self.accumulator >= self.period {
            log::warn!(
                "Dropping {:.1} ticks of backlog",
                self.accumulator / self.period
            );
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Stop scheduling ticks and forget any pending time
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self {
            period: SIM_DT,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
            running: true,
        }
    }
}

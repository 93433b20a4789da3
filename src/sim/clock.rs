//! Fixed timestep accumulator
//!
//! Converts variable wall-clock frame deltas into a whole number of fixed
//! ticks. Frames arriving after a long gap (tab suspended, debugger pause)
//! are dropped rather than caught up.

use crate::consts::{STALE_FRAME_MS, TICK_MS};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedClock {
    /// Timestamp of the previous update; None until the first frame after a resync
    last_time_ms: Option<f64>,
    accumulator_ms: f64,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a monotonic timestamp; returns how many ticks to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time_ms.replace(now_ms) else {
            return 0;
        };

        let delta = now_ms - last;
        if delta > STALE_FRAME_MS {
            log::debug!("Dropping stale frame ({:.1}ms gap)", delta);
            return 0;
        }
        // Non-monotonic timestamps contribute nothing
        self.accumulator_ms += delta.max(0.0);

        let mut ticks = 0;
        while self.accumulator_ms >= TICK_MS {
            self.accumulator_ms -= TICK_MS;
            ticks += 1;
        }
        ticks
    }

    /// Forget timing history; the next `advance` only sets the baseline
    pub fn resync(&mut self) {
        self.last_time_ms = None;
        self.accumulator_ms = 0.0;
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }
}

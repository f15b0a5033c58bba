//! Fixed timestep accumulator
//!
//! Frame callbacks arrive at whatever rate the display runs; the simulation
//! always steps at `SIM_DT`.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Add a frame's elapsed seconds and return how many steps to run.
    ///
    /// Long stalls (tab switches) are capped so the game never fast-forwards;
    /// time that exceeds the substep budget is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt.min(MAX_FRAME_DT);
        }

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < self.max_substeps {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == self.max_substeps && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Forget pending time (after a pause or a lock)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

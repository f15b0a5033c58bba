//! Level progression: resets, advancing, and the password lock
//!
//! Phase transitions:
//! - Playing --caught--> Playing (full reset, same level)
//! - Playing --goal--> Locked (next level, or wrap to 1 after the last)
//! - Locked --correct password--> Playing (soft reset)

use super::camera;
use super::state::{Chaser, GameEvent, GamePhase, Player, SimulationState, Viewport};
use crate::consts::*;

/// Result of a password attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordOutcome {
    /// Correct; the level is playing
    Accepted,
    /// Wrong; nothing changed, prompt again
    Rejected,
    /// Nothing is locked
    NotLocked,
}

impl SimulationState {
    /// Lay out the current level for the current viewport (soft reset).
    ///
    /// Replaces platforms, goal, world width and chaser speed wholesale.
    /// Returns false, leaving everything untouched, if the level table has
    /// no entry for `current_level`.
    pub fn apply_layout(&mut self) -> bool {
        let Some(def) = self.levels.get(self.current_level) else {
            log::warn!(
                "No definition for level {} ({} levels); layout skipped",
                self.current_level,
                self.levels.len()
            );
            return false;
        };

        let layout = def.layout(self.viewport.height);
        self.platforms = layout.platforms;
        self.goal = layout.goal;
        self.world_width = layout.world_width;
        self.chaser.speed = layout.chaser_speed;
        true
    }

    /// Restart the current level from scratch (full reset).
    ///
    /// Does not touch the phase.
    pub fn reset_level(&mut self) {
        self.apply_layout();
        self.chaser = Chaser::new(self.chaser.speed);
        self.camera.x = 0.0;
        self.player = Player::spawn(SPAWN_X, self.viewport.height - SPAWN_HEIGHT);
        log::info!(
            "Level {} reset: world {}px, chaser speed {}",
            self.current_level,
            self.world_width,
            self.chaser.speed
        );
    }

    /// The wall caught the player
    pub fn capture(&mut self) {
        log::info!("Caught on level {} at x={:.1}", self.current_level, self.player.x);
        self.emit(GameEvent::Captured {
            level: self.current_level,
        });
        self.reset_level();
    }

    /// The goal was reached: move to the next level and lock it
    pub fn advance_level(&mut self) {
        let finished = self.current_level;
        self.emit(GameEvent::GoalReached { level: finished });

        let mut next = finished + 1;
        if next > self.levels.len() {
            log::info!("Campaign complete after level {}", finished);
            self.emit(GameEvent::CampaignComplete);
            next = 1;
        }
        self.current_level = next;
        self.reset_level();
        self.lock();
    }

    /// Freeze the simulation behind the password prompt
    pub fn lock(&mut self) {
        if self.phase == GamePhase::Locked {
            return;
        }
        self.phase = GamePhase::Locked;

        let title = self.level_title();
        let story = self.level().and_then(|def| def.story.clone());
        log::info!("Locked on {}", title);
        self.emit(GameEvent::LevelLocked {
            level: self.current_level,
            title,
            story,
        });
    }

    /// Resume play with a soft reset. Returns false if nothing was locked.
    pub fn unlock(&mut self) -> bool {
        if self.phase != GamePhase::Locked {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.apply_layout();
        self.emit(GameEvent::Unlocked {
            level: self.current_level,
        });
        true
    }

    /// Check an answer against the locked level's password.
    ///
    /// The attempt is trimmed and uppercased, then compared exactly.
    pub fn submit_password(&mut self, attempt: &str) -> PasswordOutcome {
        if self.phase != GamePhase::Locked {
            return PasswordOutcome::NotLocked;
        }

        let normalized = attempt.trim().to_uppercase();
        let correct = self
            .level()
            .is_some_and(|def| def.password == normalized);

        if correct {
            self.unlock();
            PasswordOutcome::Accepted
        } else {
            log::warn!("Wrong password for level {}", self.current_level);
            PasswordOutcome::Rejected
        }
    }

    /// The viewport changed size; re-place everything that depends on it
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.apply_layout();
        // No tick runs while locked, so clamp here
        let max = camera::max_offset(self.world_width, self.viewport.width);
        self.camera.x = self.camera.x.clamp(0.0, max);
    }
}

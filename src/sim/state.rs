//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one owned `SimulationState`.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{LevelDef, LevelTable, Texture};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running
    Playing,
    /// Frozen behind the password prompt
    Locked,
}

/// Something the host should react to, emitted during a tick or transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The wall caught the player; the level restarted
    Captured { level: usize },
    /// The player touched the goal of `level`
    GoalReached { level: usize },
    /// Simulation froze; show the password prompt for `level`
    LevelLocked {
        level: usize,
        title: String,
        story: Option<String>,
    },
    /// The last level was cleared and play wrapped back to level 1
    CampaignComplete,
    /// Correct password; `level` is now playing
    Unlocked { level: usize },
}

/// Drawable area, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player-controlled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    /// Horizontal speed per step
    pub speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_power: f32,
    /// Added to `vy` every step
    pub gravity: f32,
    /// Standing on the floor or a platform
    pub grounded: bool,
}

impl Player {
    /// A motionless, airborne player at (x, y)
    pub fn spawn(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vx: 0.0,
            vy: 0.0,
            speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,
            gravity: PLAYER_GRAVITY,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A static platform laid out for the current level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub texture: Texture,
    /// Flat color used when no texture is available
    pub color: [f32; 4],
}

/// Level-completion zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
}

/// The advancing wall of death
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chaser {
    /// Left side of the wall
    pub x: f32,
    /// Visual width
    pub width: f32,
    /// Rightward advance per step
    pub speed: f32,
}

impl Chaser {
    pub fn new(speed: f32) -> Self {
        Self {
            x: CHASER_START_X,
            width: CHASER_WIDTH,
            speed,
        }
    }

    /// Anything left of this x is dead
    #[inline]
    pub fn hazard_edge(&self) -> f32 {
        self.x + self.width
    }

    pub fn advance(&mut self) {
        self.x += self.speed;
    }
}

/// Horizontal scroll offset into the world
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Level content, in play order
    pub levels: LevelTable,
    /// 1-based index into `levels`
    pub current_level: usize,
    pub phase: GamePhase,
    pub viewport: Viewport,
    /// `finish_x` plus margin; the camera never shows past it
    pub world_width: f32,
    pub player: Player,
    pub camera: Camera,
    pub chaser: Chaser,
    pub goal: Goal,
    /// Active platforms, in authored order
    pub platforms: Vec<Platform>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events not yet consumed by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SimulationState {
    /// Start a run on level 1
    pub fn new(levels: LevelTable, viewport: Viewport) -> Self {
        let mut state = Self {
            levels,
            current_level: 1,
            phase: GamePhase::Playing,
            viewport,
            world_width: viewport.width,
            player: Player::spawn(SPAWN_X, viewport.height - SPAWN_HEIGHT),
            camera: Camera::default(),
            chaser: Chaser::new(0.0),
            goal: Goal {
                rect: Rect::new(0.0, 0.0, GOAL_WIDTH, GOAL_HEIGHT),
            },
            platforms: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
        };

        state.reset_level();

        state
    }

    /// Definition of the level being played, if the table has one
    pub fn level(&self) -> Option<&LevelDef> {
        self.levels.get(self.current_level)
    }

    /// Display title of the current level
    pub fn level_title(&self) -> String {
        self.level()
            .map(|def| def.title.clone())
            .unwrap_or_else(|| format!("Level {}", self.current_level))
    }

    pub fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawn_defaults() {
        let player = Player::spawn(100.0, 400.0);
        assert_eq!(player.rect(), Rect::new(100.0, 400.0, 40.0, 40.0));
        assert_eq!(player.jump_power, -15.0);
        assert!(!player.grounded);
    }

    #[test]
    fn test_chaser_edge_and_advance() {
        let mut chaser = Chaser::new(2.0);
        assert_eq!(chaser.hazard_edge(), -160.0);
        chaser.advance();
        assert_eq!(chaser.x, -198.0);
        assert_eq!(chaser.hazard_edge(), -158.0);
    }

    #[test]
    fn test_new_state_starts_on_level_one() {
        let state = SimulationState::new(LevelTable::sample(), Viewport::new(800.0, 600.0));
        assert_eq!(state.current_level, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.x, SPAWN_X);
        assert_eq!(state.player.y, 400.0);
        assert!(!state.platforms.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = SimulationState::new(LevelTable::sample(), Viewport::new(800.0, 600.0));
        state.emit(GameEvent::CampaignComplete);
        assert_eq!(state.drain_events(), vec![GameEvent::CampaignComplete]);
        assert!(state.drain_events().is_empty());
    }
}

//! Input resolution
//!
//! Keyboard and on-screen touch buttons are independent boolean sources; each
//! step they are folded into a single `TickInput`.

use serde::{Deserialize, Serialize};

/// Raw held-button state, written by event handlers between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub touch_left: bool,
    pub touch_right: bool,
    pub touch_jump: bool,
}

impl InputState {
    /// Apply a keyboard `KeyboardEvent.code`. Returns false for unbound keys.
    pub fn set_key(&mut self, code: &str, pressed: bool) -> bool {
        match code {
            "ArrowLeft" => self.left = pressed,
            "ArrowRight" => self.right = pressed,
            "ArrowUp" => self.up = pressed,
            _ => return false,
        }
        true
    }

    /// Release everything (focus loss, level lock)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Horizontal intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    /// -1, 0 or +1
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub direction: Direction,
    /// Jump held this step; only acts when grounded
    pub jump: bool,
}

impl TickInput {
    pub const IDLE: Self = Self {
        direction: Direction::None,
        jump: false,
    };
}

/// Fold both input sources into one intent.
///
/// Left wins when left and right are both held.
pub fn resolve(input: &InputState) -> TickInput {
    let direction = if input.left || input.touch_left {
        Direction::Left
    } else if input.right || input.touch_right {
        Direction::Right
    } else {
        Direction::None
    };

    TickInput {
        direction,
        jump: input.up || input.touch_jump,
    }
}

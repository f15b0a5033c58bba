//! Wall Run - A side-scrolling escape from the wall of death
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, physics, collisions, progression)
//! - `renderer`: WebGPU rendering behind the `Renderer` trait
//! - `settings`: Runtime configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// Physics values are per-step quantities tuned for 60 steps per second.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the physics is tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Player geometry and tunables
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_POWER: f32 = -15.0;
    pub const PLAYER_GRAVITY: f32 = 0.8;
    /// Spawn x, and spawn height above the floor
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_HEIGHT: f32 = 200.0;

    /// Chaser (wall of death)
    pub const CHASER_WIDTH: f32 = 40.0;
    pub const CHASER_START_X: f32 = -200.0;

    /// Goal geometry
    pub const GOAL_WIDTH: f32 = 50.0;
    pub const GOAL_HEIGHT: f32 = 100.0;

    /// Extra world beyond the finish line
    pub const WORLD_MARGIN: f32 = 500.0;
    /// Camera starts scrolling once the player passes this fraction of the viewport
    pub const CAMERA_DEAD_ZONE: f32 = 0.3;

    /// Vertical spacing of the three-tier platform staircase
    pub const PLATFORM_TIER_STEP: f32 = 120.0;
    pub const PLATFORM_TIERS: usize = 3;
    /// Landing band below a platform top, added to the current fall speed
    pub const LANDING_TOLERANCE: f32 = 10.0;
}

/// Parse a `#rrggbb` hex string into linear RGBA
pub fn hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?, 1.0])
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (platforms in authored order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod clock;
pub mod collision;
pub mod input;
pub mod level;
pub mod physics;
pub mod progression;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use clock::FixedTimestep;
pub use collision::Rect;
pub use input::{Direction, InputState, TickInput, resolve};
pub use level::{LevelDef, LevelError, LevelTable, PlatformTemplate, Texture};
pub use progression::PasswordOutcome;
pub use snapshot::{RenderSnapshot, palette};
pub use state::{Camera, Chaser, GameEvent, GamePhase, Goal, Platform, Player, SimulationState, Viewport};
pub use tick::tick;

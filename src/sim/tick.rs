//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! step; the order of the stages below is part of the game's behavior.

use super::camera;
use super::collision::{caught_by, land_on, lands_on, resolve_floor};
use super::input::TickInput;
use super::physics;
use super::state::{GamePhase, SimulationState};

/// Advance the game state by one fixed step
pub fn tick(state: &mut SimulationState, input: &TickInput) {
    // Locked levels are frozen, not just hidden
    if state.phase == GamePhase::Locked {
        return;
    }

    state.time_ticks += 1;

    // Forces, then the horizontal axis
    physics::apply_forces(&mut state.player, input);
    physics::integrate_x(&mut state.player);

    // Camera follows before bounds so the left wall is the scrolled edge
    camera::follow(
        &mut state.camera,
        &state.player,
        state.viewport.width,
        state.world_width,
    );
    camera::constrain_player(&mut state.player, &state.camera, state.world_width);

    // Vertical axis
    physics::integrate_y(&mut state.player);
    state.player.grounded = resolve_floor(&mut state.player, state.viewport.height);

    for platform in &state.platforms {
        if lands_on(&state.player, &platform.rect) {
            land_on(&mut state.player, &platform.rect);
            state.player.grounded = true;
        }
    }

    state.chaser.advance();

    // Capture is checked first; a reset player is then tested against the goal
    if caught_by(&state.player, state.chaser.hazard_edge()) {
        state.capture();
    }

    if state.player.rect().intersects(&state.goal.rect) {
        state.advance_level();
    }
}

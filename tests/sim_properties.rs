//! Property tests for the simulation invariants

use proptest::prelude::*;

use wall_run::sim::{
    Direction, GamePhase, LevelTable, SimulationState, TickInput, Viewport, camera, tick,
};

fn new_state(width: f32, height: f32) -> SimulationState {
    SimulationState::new(
        LevelTable::builtin().expect("built-in levels"),
        Viewport::new(width, height),
    )
}

fn tick_input() -> impl Strategy<Value = TickInput> {
    (
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::None),
            Just(Direction::Right)
        ],
        any::<bool>(),
    )
        .prop_map(|(direction, jump)| TickInput { direction, jump })
}

proptest! {
    #[test]
    fn prop_player_and_camera_stay_in_bounds(
        inputs in prop::collection::vec(tick_input(), 1..600),
        width in 640.0f32..1920.0,
        height in 480.0f32..1080.0,
    ) {
        let mut state = new_state(width, height);

        for input in &inputs {
            tick(&mut state, input);

            let max_cam = camera::max_offset(state.world_width, state.viewport.width);
            prop_assert!(state.camera.x >= 0.0);
            prop_assert!(state.camera.x <= max_cam);

            prop_assert!(state.player.x >= state.camera.x);
            prop_assert!(state.player.x <= state.world_width - state.player.width);

            // Nothing sinks through the floor
            prop_assert!(state.player.y + state.player.height <= state.viewport.height);
        }
    }

    #[test]
    fn prop_airborne_vy_grows_by_gravity(
        inputs in prop::collection::vec(tick_input(), 1..400),
    ) {
        let mut state = new_state(800.0, 600.0);

        for input in &inputs {
            let before = state.player.clone();
            tick(&mut state, input);
            let events = state.drain_events();

            let jumped = input.jump && before.grounded;
            if events.is_empty() && !state.player.grounded && !jumped {
                prop_assert_eq!(state.player.vy, before.vy + before.gravity);
            }
            if events.is_empty() && jumped {
                // Jump overrides gravity for the step it happens on
                prop_assert_eq!(state.player.vy, before.jump_power);
            }
        }
    }

    #[test]
    fn prop_reset_is_idempotent(
        inputs in prop::collection::vec(tick_input(), 0..300),
    ) {
        let mut state = new_state(1024.0, 768.0);
        for input in &inputs {
            tick(&mut state, input);
        }
        if state.phase == GamePhase::Locked {
            state.unlock();
        }

        state.reset_level();
        let once = (
            state.player.clone(),
            state.camera,
            state.chaser,
            state.goal,
            state.platforms.clone(),
            state.world_width,
        );

        state.reset_level();
        let twice = (
            state.player.clone(),
            state.camera,
            state.chaser,
            state.goal,
            state.platforms.clone(),
            state.world_width,
        );

        prop_assert_eq!(once, twice);
        prop_assert_eq!(state.camera.x, 0.0);
        prop_assert!(state.chaser.x < 0.0);
    }

    #[test]
    fn prop_locked_state_never_moves(
        inputs in prop::collection::vec(tick_input(), 1..100),
    ) {
        let mut state = new_state(800.0, 600.0);
        state.lock();
        let player = state.player.clone();
        let ticks = state.time_ticks;

        for input in &inputs {
            tick(&mut state, input);
        }

        prop_assert_eq!(state.player, player);
        prop_assert_eq!(state.time_ticks, ticks);
    }
}

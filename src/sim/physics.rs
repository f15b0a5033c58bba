//! Player integration
//!
//! Axes are integrated separately: the caller resolves horizontal bounds
//! between `integrate_x` and `integrate_y`.

use super::input::TickInput;
use super::state::Player;

/// Set horizontal velocity from intent, apply gravity, and start a jump if
/// one is requested while grounded.
///
/// Gravity is unbounded; there is no terminal velocity.
pub fn apply_forces(player: &mut Player, input: &TickInput) {
    player.vx = input.direction.sign() * player.speed;
    player.vy += player.gravity;

    if input.jump && player.grounded {
        player.vy = player.jump_power;
        player.grounded = false;
    }
}

#[inline]
pub fn integrate_x(player: &mut Player) {
    player.x += player.vx;
}

#[inline]
pub fn integrate_y(player: &mut Player) {
    player.y += player.vy;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Direction;

    #[test]
    fn test_gravity_accumulates() {
        let mut player = Player::spawn(0.0, 0.0);
        for step in 1..=10 {
            let before = player.vy;
            apply_forces(&mut player, &TickInput::IDLE);
            assert_eq!(player.vy, before + player.gravity, "step {step}");
        }
    }

    #[test]
    fn test_jump_requires_ground() {
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        let mut airborne = Player::spawn(0.0, 0.0);
        apply_forces(&mut airborne, &jump);
        assert_eq!(airborne.vy, airborne.gravity);

        let mut grounded = Player::spawn(0.0, 0.0);
        grounded.grounded = true;
        apply_forces(&mut grounded, &jump);
        assert_eq!(grounded.vy, grounded.jump_power);
        assert!(!grounded.grounded);
    }

    #[test]
    fn test_direction_sets_vx() {
        let mut player = Player::spawn(0.0, 0.0);
        apply_forces(
            &mut player,
            &TickInput {
                direction: Direction::Left,
                jump: false,
            },
        );
        assert_eq!(player.vx, -player.speed);
        integrate_x(&mut player);
        assert_eq!(player.x, -player.speed);

        apply_forces(&mut player, &TickInput::IDLE);
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn test_integrate_y() {
        let mut player = Player::spawn(0.0, 100.0);
        player.vy = -15.0;
        integrate_y(&mut player);
        assert_eq!(player.y, 85.0);
    }
}

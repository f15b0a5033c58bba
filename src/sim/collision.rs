//! Axis-aligned collision detection and response
//!
//! Everything in the world is a rectangle. Screen coordinates: +y points down,
//! so a rectangle's "top" is its smallest y.

use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::LANDING_TOLERANCE;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal spans overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Standard AABB overlap test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.y < other.bottom() && self.bottom() > other.y
    }
}

/// Floor contact: snaps the player onto the viewport floor.
///
/// Returns whether the player is resting on the floor. The caller treats a
/// miss as "not grounded" before platforms get their chance.
pub fn resolve_floor(player: &mut Player, floor_y: f32) -> bool {
    if player.y + player.height > floor_y {
        player.y = floor_y - player.height;
        player.vy = 0.0;
        true
    } else {
        false
    }
}

/// Whether a falling player lands on `platform` this step.
///
/// The landing band `[top, top + vy + tolerance]` grows with fall speed so a
/// fast drop cannot skip through a thin platform, and requiring `vy >= 0`
/// lets the player jump up through platforms from below.
pub fn lands_on(player: &Player, platform: &Rect) -> bool {
    if player.vy < 0.0 || !player.rect().overlaps_x(platform) {
        return false;
    }
    let bottom = player.y + player.height;
    bottom >= platform.y && bottom <= platform.y + player.vy + LANDING_TOLERANCE
}

/// Snap the player's feet onto a platform top
pub fn land_on(player: &mut Player, platform: &Rect) {
    player.y = platform.y - player.height;
    player.vy = 0.0;
}

/// Whether the player has been swallowed by the wall.
///
/// The hazard is everything left of `hazard_edge`.
#[inline]
pub fn caught_by(player: &Player, hazard_edge: f32) -> bool {
    player.x < hazard_edge
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32, vy: f32) -> Player {
        let mut player = Player::spawn(x, y);
        player.vy = vy;
        player
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges only
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Disjoint on y but overlapping on x
        assert!(a.overlaps_x(&Rect::new(2.0, 50.0, 2.0, 2.0)));
        assert!(!a.intersects(&Rect::new(2.0, 50.0, 2.0, 2.0)));
    }

    #[test]
    fn test_floor_snaps_and_stops() {
        let mut player = player_at(100.0, 575.0, 12.0);
        assert!(resolve_floor(&mut player, 600.0));
        assert_eq!(player.y, 560.0);
        assert_eq!(player.vy, 0.0);

        let mut airborne = player_at(100.0, 300.0, 3.0);
        assert!(!resolve_floor(&mut airborne, 600.0));
        assert_eq!(airborne.y, 300.0);
        assert_eq!(airborne.vy, 3.0);
    }

    #[test]
    fn test_lands_on_within_band() {
        let platform = Rect::new(80.0, 400.0, 200.0, 20.0);

        // Feet 5px into the platform while falling at 4px/step: band is [400, 414]
        let player = player_at(100.0, 365.0, 4.0);
        assert!(lands_on(&player, &platform));

        // Feet exactly on top, standing still
        let player = player_at(100.0, 360.0, 0.0);
        assert!(lands_on(&player, &platform));

        // Too deep for the current fall speed
        let player = player_at(100.0, 380.0, 4.0);
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_fast_fall_widens_band() {
        let platform = Rect::new(80.0, 400.0, 200.0, 20.0);
        // 25px deep, but falling at 20px/step: band is [400, 430]
        let player = player_at(100.0, 385.0, 20.0);
        assert!(lands_on(&player, &platform));
    }

    #[test]
    fn test_rising_player_passes_through() {
        let platform = Rect::new(80.0, 400.0, 200.0, 20.0);
        let player = player_at(100.0, 365.0, -6.0);
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_no_landing_without_horizontal_overlap() {
        let platform = Rect::new(80.0, 400.0, 200.0, 20.0);
        // Player spans [280, 320): right edge of platform is 280, no overlap
        let player = player_at(280.0, 365.0, 4.0);
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_land_on_snaps_feet() {
        let platform = Rect::new(80.0, 400.0, 200.0, 20.0);
        let mut player = player_at(100.0, 368.0, 9.0);
        land_on(&mut player, &platform);
        assert_eq!(player.y + player.height, 400.0);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_caught_by_edge() {
        let player = player_at(100.0, 0.0, 0.0);
        assert!(!caught_by(&player, 100.0));
        assert!(caught_by(&player, 100.5));
    }
}

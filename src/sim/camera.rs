//! Dead-zone camera and horizontal bounds
//!
//! The camera only ever scrolls right on its own; the player can never walk
//! back past its left edge.

use super::state::{Camera, Player};
use crate::consts::CAMERA_DEAD_ZONE;

/// Largest camera offset for a world/viewport pair (0 if the world is narrower)
#[inline]
pub fn max_offset(world_width: f32, viewport_width: f32) -> f32 {
    (world_width - viewport_width).max(0.0)
}

/// Scroll right once the player passes the dead-zone threshold, then clamp.
pub fn follow(camera: &mut Camera, player: &Player, viewport_width: f32, world_width: f32) {
    let threshold = CAMERA_DEAD_ZONE * viewport_width;
    if player.x > camera.x + threshold {
        camera.x = player.x - threshold;
    }
    camera.x = camera.x.clamp(0.0, max_offset(world_width, viewport_width));
}

/// Keep the player between the camera's left edge and the world's right edge.
///
/// Hitting the left edge kills horizontal velocity; the right edge only clamps.
pub fn constrain_player(player: &mut Player, camera: &Camera, world_width: f32) {
    if player.x < camera.x {
        player.x = camera.x;
        player.vx = 0.0;
    }
    if player.x + player.width > world_width {
        player.x = world_width - player.width;
    }
}

//! Scene geometry: turns a snapshot into colored triangles
//!
//! Output positions are screen pixels (camera already applied, +y down).
//! Conversion to clip space happens in the pipeline.

use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, Rect, RenderSnapshot};

/// How a snapshot should be dressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStyle {
    pub high_contrast: bool,
    /// Darken the frozen scene behind the password prompt
    pub dim_when_locked: bool,
}

/// Two triangles covering a screen-space rectangle
pub fn quad(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x1, y1) = (x + width, y + height);
    [
        Vertex::new(x, y, color),
        Vertex::new(x, y1, color),
        Vertex::new(x1, y, color),
        Vertex::new(x1, y, color),
        Vertex::new(x, y1, color),
        Vertex::new(x1, y1, color),
    ]
}

/// A world rectangle seen through the camera, or nothing if fully off-screen
fn world_quad(rect: &Rect, camera_x: f32, view_width: f32, color: [f32; 4]) -> Option<[Vertex; 6]> {
    let x = rect.x - camera_x;
    if x + rect.width < 0.0 || x > view_width {
        return None;
    }
    Some(quad(x, rect.y, rect.width, rect.height, color))
}

/// Background color for a style
pub fn background(style: SceneStyle) -> [f32; 4] {
    if style.high_contrast {
        colors::HC_BACKGROUND
    } else {
        crate::sim::palette::BACKGROUND
    }
}

/// Build the triangles for one frame, back to front
pub fn scene(snapshot: &RenderSnapshot, style: SceneStyle) -> Vec<Vertex> {
    let view_w = snapshot.viewport.width;
    let view_h = snapshot.viewport.height;
    let cam = snapshot.camera_x;

    let mut vertices = Vec::with_capacity((snapshot.platforms.len() + 5) * 6);

    for platform in &snapshot.platforms {
        let color = if style.high_contrast {
            colors::HC_PLATFORM
        } else {
            platform.color
        };
        if let Some(q) = world_quad(&platform.rect, cam, view_w, color) {
            vertices.extend_from_slice(&q);
        }
    }

    if let Some(q) = world_quad(&snapshot.goal.rect, cam, view_w, snapshot.goal.color) {
        vertices.extend_from_slice(&q);
    }
    if let Some(q) = world_quad(&snapshot.player.rect, cam, view_w, snapshot.player.color) {
        vertices.extend_from_slice(&q);
    }

    // The wall: shadow over the swallowed region, then the wall itself
    let chaser = &snapshot.chaser;
    let shadow_right = chaser.x - cam;
    if shadow_right > 0.0 {
        vertices.extend_from_slice(&quad(
            0.0,
            0.0,
            shadow_right.min(view_w),
            view_h,
            colors::CHASER_SHADOW,
        ));
    }
    let wall = Rect::new(chaser.x, 0.0, chaser.width, view_h);
    if let Some(q) = world_quad(&wall, cam, view_w, chaser.color) {
        vertices.extend_from_slice(&q);
    }

    if style.dim_when_locked && snapshot.phase == GamePhase::Locked {
        vertices.extend_from_slice(&quad(0.0, 0.0, view_w, view_h, colors::LOCK_DIM));
    }

    vertices
}

/// Screen pixels to normalized device coordinates for a viewport
#[inline]
pub fn screen_to_ndc(x: f32, y: f32, view_width: f32, view_height: f32) -> [f32; 2] {
    [x / view_width * 2.0 - 1.0, 1.0 - y / view_height * 2.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{LevelTable, SimulationState, Viewport};

    fn snapshot() -> RenderSnapshot {
        let levels = LevelTable::builtin().unwrap();
        let state = SimulationState::new(levels, Viewport::new(800.0, 600.0));
        RenderSnapshot::capture(&state)
    }

    #[test]
    fn test_quad_covers_rect() {
        let q = quad(10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        let xs: Vec<f32> = q.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = q.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_offscreen_culled() {
        let mut snap = snapshot();
        let on_screen = snap
            .platforms
            .iter()
            .filter(|p| p.rect.x < 800.0)
            .count();
        // Player + on-screen platforms; goal and wall are off-screen at start
        assert_eq!(scene(&snap, SceneStyle::default()).len(), (on_screen + 1) * 6);

        // Scrolling the camera moves everything left
        snap.camera_x = 100.0;
        let player_x = snap.player.rect.x;
        let verts = scene(&snap, SceneStyle::default());
        assert!(verts.iter().any(|v| v.position[0] == player_x - 100.0));
    }

    #[test]
    fn test_lock_dims_unless_disabled() {
        let mut snap = snapshot();
        snap.phase = GamePhase::Locked;
        let plain = scene(&snap, SceneStyle::default()).len();
        let dimmed = scene(
            &snap,
            SceneStyle {
                dim_when_locked: true,
                ..Default::default()
            },
        );
        assert_eq!(dimmed.len(), plain + 6);
        assert_eq!(dimmed.last().unwrap().color, colors::LOCK_DIM);
    }

    #[test]
    fn test_high_contrast_platforms() {
        let snap = snapshot();
        let verts = scene(
            &snap,
            SceneStyle {
                high_contrast: true,
                ..Default::default()
            },
        );
        assert_eq!(verts[0].color, colors::HC_PLATFORM);
        assert_eq!(
            background(SceneStyle {
                high_contrast: true,
                ..Default::default()
            }),
            colors::HC_BACKGROUND
        );
    }

    #[test]
    fn test_chaser_shadow_when_visible() {
        let mut snap = snapshot();
        snap.chaser.x = 200.0;
        let verts = scene(&snap, SceneStyle::default());
        assert!(verts.iter().any(|v| v.color == colors::CHASER_SHADOW));
        assert!(verts.iter().any(|v| v.color == snap.chaser.color));
    }

    #[test]
    fn test_screen_to_ndc() {
        assert_eq!(screen_to_ndc(0.0, 0.0, 800.0, 600.0), [-1.0, 1.0]);
        assert_eq!(screen_to_ndc(800.0, 600.0, 800.0, 600.0), [1.0, -1.0]);
        assert_eq!(screen_to_ndc(400.0, 300.0, 800.0, 600.0), [0.0, 0.0]);
    }
}

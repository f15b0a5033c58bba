//! Read-only view of one frame, handed to renderers and the HUD

use serde::Serialize;

use super::collision::Rect;
use super::state::{GamePhase, SimulationState, Viewport};

/// Flat colors for everything that isn't a platform
pub mod palette {
    /// `#00ffcc`
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 0.8, 1.0];
    pub const GOAL: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const CHASER: [f32; 4] = [0.86, 0.08, 0.16, 0.9];
    /// `#222`
    pub const BACKGROUND: [f32; 4] = [0.133, 0.133, 0.133, 1.0];
}

/// A colored rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectView {
    pub rect: Rect,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChaserView {
    pub x: f32,
    pub width: f32,
    pub color: [f32; 4],
}

/// Everything needed to draw a frame, detached from the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub viewport: Viewport,
    pub camera_x: f32,
    pub player: RectView,
    pub platforms: Vec<RectView>,
    pub goal: RectView,
    pub chaser: ChaserView,
    pub phase: GamePhase,
    pub level: usize,
    pub title: String,
    pub story: Option<String>,
}

impl RenderSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        Self {
            viewport: state.viewport,
            camera_x: state.camera.x,
            player: RectView {
                rect: state.player.rect(),
                color: palette::PLAYER,
            },
            platforms: state
                .platforms
                .iter()
                .map(|p| RectView {
                    rect: p.rect,
                    color: p.color,
                })
                .collect(),
            goal: RectView {
                rect: state.goal.rect,
                color: palette::GOAL,
            },
            chaser: ChaserView {
                x: state.chaser.x,
                width: state.chaser.width,
                color: palette::CHASER,
            },
            phase: state.phase,
            level: state.current_level,
            title: state.level_title(),
            story: state.level().and_then(|def| def.story.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelTable;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = SimulationState::new(LevelTable::sample(), Viewport::new(800.0, 600.0));
        state.camera.x = 42.0;
        let snapshot = RenderSnapshot::capture(&state);

        assert_eq!(snapshot.camera_x, 42.0);
        assert_eq!(snapshot.player.rect, state.player.rect());
        assert_eq!(snapshot.platforms.len(), state.platforms.len());
        assert_eq!(snapshot.goal.rect, state.goal.rect);
        assert_eq!(snapshot.chaser.x, -200.0);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.title, "Level 1");
        assert_eq!(snapshot.story, None);
        assert_eq!(snapshot.phase, GamePhase::Playing);
    }

    #[test]
    fn test_capture_serializes() {
        let state = SimulationState::new(LevelTable::sample(), Viewport::new(800.0, 600.0));
        let json = serde_json::to_string(&RenderSnapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}

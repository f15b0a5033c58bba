//! Level definitions and layout
//!
//! Levels are authored as data (`assets/levels.json`) and laid out against
//! the current viewport height whenever a level starts or the window resizes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Goal, Platform};
use crate::consts::*;
use crate::hex_color;

/// Built-in campaign
const BUILTIN_LEVELS: &str = include_str!("../../assets/levels.json");

/// Cosmetic surface tag for platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Texture {
    Grass,
    #[default]
    Stone,
    Metal,
    Crystal,
}

impl Texture {
    /// Flat color drawn in place of the texture
    pub fn fallback_color(&self) -> [f32; 4] {
        match self {
            Texture::Grass => [0.3, 0.69, 0.31, 1.0],
            Texture::Stone => [0.47, 0.47, 0.5, 1.0],
            Texture::Metal => [0.62, 0.66, 0.72, 1.0],
            Texture::Crystal => [0.55, 0.4, 0.9, 1.0],
        }
    }
}

fn default_platform_height() -> f32 {
    20.0
}

/// A platform as authored; its height on screen is decided by layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTemplate {
    pub x: f32,
    pub width: f32,
    #[serde(default = "default_platform_height")]
    pub height: f32,
    #[serde(default)]
    pub texture: Texture,
    /// Optional `#rrggbb` override for the fallback color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One hand-authored level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub title: String,
    /// Narrative shown with the password prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    /// Uppercase answer that unlocks this level
    pub password: String,
    /// World x of the goal
    pub finish_x: f32,
    /// Chaser advance per step
    pub chaser_speed: f32,
    pub platforms: Vec<PlatformTemplate>,
}

/// Everything about a level that depends on the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub platforms: Vec<Platform>,
    pub goal: Goal,
    pub world_width: f32,
    pub chaser_speed: f32,
}

impl LevelDef {
    /// Place this level for a viewport of the given height.
    ///
    /// Platforms alternate over three tiers counted up from the floor
    /// (`index % 3 + 1` steps of `PLATFORM_TIER_STEP`), regardless of any
    /// height the author had in mind.
    pub fn layout(&self, viewport_height: f32) -> Layout {
        let platforms = self
            .platforms
            .iter()
            .enumerate()
            .map(|(index, template)| {
                let tier = (index % PLATFORM_TIERS + 1) as f32;
                let y = viewport_height - tier * PLATFORM_TIER_STEP;
                Platform {
                    rect: Rect::new(template.x, y, template.width, template.height),
                    texture: template.texture,
                    color: template
                        .color
                        .as_deref()
                        .and_then(hex_color)
                        .unwrap_or_else(|| template.texture.fallback_color()),
                }
            })
            .collect();

        Layout {
            platforms,
            goal: Goal {
                rect: Rect::new(
                    self.finish_x,
                    viewport_height - GOAL_HEIGHT,
                    GOAL_WIDTH,
                    GOAL_HEIGHT,
                ),
            },
            world_width: self.finish_x + WORLD_MARGIN,
            chaser_speed: self.chaser_speed,
        }
    }
}

/// Problems with authored level data
#[derive(Debug)]
pub enum LevelError {
    Parse(serde_json::Error),
    Empty,
    InvalidPassword { level: usize },
    InvalidFinish { level: usize },
    InvalidSpeed { level: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "level data is not valid JSON: {e}"),
            Self::Empty => write!(f, "level table has no levels"),
            Self::InvalidPassword { level } => {
                write!(f, "level {level}: password must be non-empty uppercase")
            }
            Self::InvalidFinish { level } => {
                write!(f, "level {level}: finish_x must be a positive number")
            }
            Self::InvalidSpeed { level } => {
                write!(f, "level {level}: chaser_speed must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Ordered, 1-indexed level sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<LevelDef>,
}

impl LevelTable {
    /// Build a table, rejecting content the game could not play
    pub fn new(levels: Vec<LevelDef>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, def) in levels.iter().enumerate() {
            let level = i + 1;
            if def.password.is_empty() || def.password != def.password.to_uppercase() {
                return Err(LevelError::InvalidPassword { level });
            }
            if !def.finish_x.is_finite() || def.finish_x <= 0.0 {
                return Err(LevelError::InvalidFinish { level });
            }
            if !def.chaser_speed.is_finite() || def.chaser_speed < 0.0 {
                return Err(LevelError::InvalidSpeed { level });
            }
        }
        Ok(Self { levels })
    }

    /// Parse and validate a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelDef> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The campaign shipped with the game
    pub fn builtin() -> Result<Self, LevelError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    /// Level by 1-based index
    pub fn get(&self, level: usize) -> Option<&LevelDef> {
        level.checked_sub(1).and_then(|i| self.levels.get(i))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Two short levels for unit tests
    #[cfg(test)]
    pub(crate) fn sample() -> Self {
        let platform = |x: f32| PlatformTemplate {
            x,
            width: 200.0,
            height: 20.0,
            texture: Texture::Stone,
            color: None,
        };
        Self::new(vec![
            LevelDef {
                title: "Level 1".to_string(),
                story: None,
                password: "START".to_string(),
                finish_x: 1500.0,
                chaser_speed: 2.0,
                platforms: vec![platform(300.0), platform(600.0), platform(900.0)],
            },
            LevelDef {
                title: "Level 2".to_string(),
                story: Some("The wall remembers.".to_string()),
                password: "ECHO".to_string(),
                finish_x: 2000.0,
                chaser_speed: 2.5,
                platforms: vec![platform(400.0), platform(800.0)],
            },
        ])
        .expect("sample levels are valid")
    }
}

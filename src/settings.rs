//! Game settings and preferences
//!
//! Read once at startup from an inline JSON block in the page; never written.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Show the on-screen left/right/jump buttons
    pub show_touch_controls: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Simulation ===
    /// Upper bound on simulation steps per rendered frame
    pub max_substeps: u32,

    // === Accessibility ===
    /// Reduced motion (no dimming flash when a level locks)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_touch_controls: true,
            show_fps: false,

            max_substeps: MAX_SUBSTEPS,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Element holding the JSON settings block
    const ELEMENT_ID: &'static str = "settings";
    /// Native override for the same JSON
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "WALL_RUN_SETTINGS";

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.max_substeps = settings.max_substeps.clamp(1, 32);
        Ok(settings)
    }

    /// Load settings from `<script id="settings" type="application/json">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from page");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: `WALL_RUN_SETTINGS` environment variable, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_env_value(std::env::var(Self::ENV_VAR).ok().as_deref())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed {}: {}", Self::ENV_VAR, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

//! Game settings and tuning
//!
//! Physics constants scale with the vertical resolution so level geometry
//! (also built from screen fractions) feels the same at every size.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How strictly level definitions are checked at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Every configuration error aborts the load
    Strict,
    /// Bad enemy bindings are logged and the enemy frozen; other errors still abort
    Lenient,
}

impl Default for ValidationMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ValidationMode::Lenient
        } else {
            ValidationMode::Strict
        }
    }
}

/// Which occlusion test decides sun exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExposureMethod {
    /// Fan of rays from the sun to the ground line, nearest hit wins
    #[default]
    RayFan,
    /// Single segment from the sun to the player's centre
    Segment,
}

/// Named physics parameters (pixels, seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_force: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
}

impl PhysicsConfig {
    /// Derive every parameter from the vertical resolution
    pub fn for_height(screen_height: f32) -> Self {
        Self {
            gravity: screen_height * GRAVITY_RATIO,
            jump_force: screen_height * JUMP_FORCE_RATIO,
            player_speed: screen_height * PLAYER_SPEED_RATIO,
            enemy_speed: screen_height * ENEMY_SPEED_RATIO,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::for_height(DEFAULT_SCREEN_HEIGHT)
    }
}

/// Sunlight and burn tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub method: ExposureMethod,
    /// Spacing of gameplay rays along the ground line
    pub ray_spacing: f32,
    /// Spacing of the drawn light rays
    pub visual_ray_spacing: f32,
    /// Ray targets extend this far beyond each screen edge
    pub fan_margin: f32,
    /// Hit points lost per second of exposure
    pub burn_rate: f32,
    /// Seconds between burn cues
    pub burn_cue_interval: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            method: ExposureMethod::RayFan,
            ray_spacing: RAY_SPACING,
            visual_ray_spacing: VISUAL_RAY_SPACING,
            fan_margin: FAN_MARGIN,
            burn_rate: BURN_RATE,
            burn_cue_interval: BURN_CUE_INTERVAL,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,

    pub validation: ValidationMode,
    pub sun: SunConfig,
    /// Minimum seconds between day/night toggles (0 = none)
    pub toggle_cooldown: f32,
    /// Show invisible platforms in the frame view
    pub debug_draw: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            validation: ValidationMode::default(),
            sun: SunConfig::default(),
            toggle_cooldown: 0.0,
            debug_draw: false,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.7,
        }
    }
}

impl Settings {
    /// Physics derived from the current vertical resolution
    pub fn physics(&self) -> PhysicsConfig {
        PhysicsConfig::for_height(self.screen_height)
    }

    /// Parse a JSON settings document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }
}

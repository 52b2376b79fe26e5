//! Jasmin - a day/night platformer core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, patrols, sunlight, level flow)
//! - `audio`: Routes simulation events to sound/music triggers
//! - `settings`: Resolution-scaled physics and sunlight configuration

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{ExposureMethod, PhysicsConfig, Settings, SunConfig, ValidationMode};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by [`crate::sim::FrameClock`]
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest `dt` a single tick will accept
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Reference resolution
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1280.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 800.0;

    /// Physics, as fractions of the vertical resolution (per second)
    pub const GRAVITY_RATIO: f32 = 1.25; // ~1000 at 800p
    pub const JUMP_FORCE_RATIO: f32 = 0.75; // ~600 at 800p
    pub const PLAYER_SPEED_RATIO: f32 = 0.45; // ~360 at 800p
    pub const ENEMY_SPEED_RATIO: f32 = 0.20; // ~160 at 800p

    /// Entity sizes, as fractions of the vertical resolution
    pub const PLAYER_SIZE_RATIO: f32 = 0.12;
    pub const SPIDER_SIZE_RATIO: f32 = 0.10;
    pub const ROACH_SIZE_RATIO: f32 = 0.25;

    /// Player health
    pub const PLAYER_MAX_HP: f32 = 5.0;
    /// Damage from touching an active enemy (kills outright)
    pub const ENEMY_CONTACT_DAMAGE: f32 = 5.0;
    /// Mushroom bounce, as a multiple of jump force
    pub const MUSHROOM_BOUNCE: f32 = 1.2;

    /// Flower sinks this far at night
    pub const FLOWER_NIGHT_DROP: f32 = 200.0;
    /// Exponential approach rate of the flower toward its target (1/s)
    pub const FLOWER_RATE: f32 = 5.0;
    /// Feet within this band of a moving flower top ride along with it
    pub const CARRY_TOLERANCE: f32 = 10.0;
    /// Feet within this band below a cloud top land on the cloud
    pub const CLOUD_RIDE_BAND: f32 = 15.0;

    /// Spider ground check: distance ahead of the leading foot
    pub const SPIDER_LOOKAHEAD: f32 = 1.0;
    /// Spider ground check: distance below the feet
    pub const SPIDER_GROUND_DEPTH: f32 = 2.0;

    /// Burn damage per second of exposure
    pub const BURN_RATE: f32 = 1.0;
    /// Seconds between burn cues (fire particles, burn sound)
    pub const BURN_CUE_INTERVAL: f32 = 0.25;
    /// Horizontal spacing of gameplay sun rays at the ground line
    pub const RAY_SPACING: f32 = 30.0;
    /// Horizontal spacing of the drawn light rays
    pub const VISUAL_RAY_SPACING: f32 = 40.0;
    /// Ray targets extend this far past each side of the screen
    pub const FAN_MARGIN: f32 = 200.0;
    /// Drawn rays continue this far past the obstacle that stops them
    pub const RAY_OVERSHOOT: f32 = 20.0;

    /// Sprite sheets
    pub const PLAYER_WALK_FRAMES: u32 = 6;
    pub const PLAYER_WALK_FRAME_TIME: f32 = 0.1;
    pub const SPIDER_FRAMES: u32 = 2;
    pub const SPIDER_FRAME_TIME: f32 = 0.2;
    pub const FLOWER_FRAMES: u32 = 6;
    pub const FLOWER_FRAME_TIME: f32 = 0.15;

    /// Alpha for platforms that are drawn but not currently solid
    pub const DIM_ALPHA: f32 = 0.3;
}

/// Move `current` toward `target` by the fraction `rate * dt` of the gap.
///
/// Returns the applied delta.
#[inline]
pub fn approach(current: &mut f32, target: f32, rate: f32, dt: f32) -> f32 {
    let delta = (target - *current) * (rate * dt).min(1.0);
    *current += delta;
    delta
}

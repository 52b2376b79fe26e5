//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! audio backends:
//! - The caller supplies `dt` (clamped) or drives it through [`FrameClock`]
//! - The day/night flag is owned by [`GameState`] and passed down by parameter
//! - Seeded RNG only (fire particles)
//! - Side effects leave as [`GameEvent`]s

pub mod cloud;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod geom;
pub mod level;
pub mod particles;
pub mod platform;
pub mod player;
pub mod state;
pub mod sunlight;
pub mod tick;
pub mod view;

pub use cloud::Cloud;
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Animation, Entity};
pub use geom::{Ray, Rect, segment_intersects_rect};
pub use level::{
    EnemyDef, LevelDef, LevelError, LevelMusic, PlatformDef, campaign, levels_from_file, levels_from_json,
};
pub use particles::{FireParticles, Particle};
pub use platform::{Platform, PlatformKind};
pub use player::{Facing, Player, PlayerInput, PlayerState};
pub use state::{GameEvent, GamePhase, GameState};
pub use sunlight::{BurnState, LightRay, RayFan, is_exposed, light_rays, sun_obstacles};
pub use tick::{FrameClock, TickInput, tick};
pub use view::FrameView;

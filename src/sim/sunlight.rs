//! Sunlight exposure and burn damage
//!
//! The sun is a point light. Every daytime frame a fan of rays is cast from
//! it toward the ground line; the player burns if any ray reaches the player
//! before it reaches an obstacle. Obstacles are the currently solid
//! platforms plus every cloud. Nothing is cached between frames: the player,
//! clouds and flowers all move, and any movement invalidates every ray.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cloud::Cloud;
use super::geom::{Ray, Rect, segment_intersects_rect};
use super::platform::Platform;
use crate::consts::RAY_OVERSHOOT;
use crate::settings::{ExposureMethod, SunConfig};

/// Rectangles that cast shadows this frame
pub fn sun_obstacles(platforms: &[Platform], clouds: &[Cloud], is_day: bool) -> Vec<Rect> {
    platforms
        .iter()
        .filter(|p| p.is_solid(is_day))
        .map(|p| p.rect)
        .chain(clouds.iter().map(|c| c.rect))
        .collect()
}

/// Target line for the ray fan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayFan {
    /// Y of the ground line the rays aim at
    pub ground_y: f32,
    pub width: f32,
    /// Targets extend this far beyond both screen edges
    pub margin: f32,
    /// Horizontal distance between targets
    pub spacing: f32,
}

impl RayFan {
    pub fn new(width: f32, ground_y: f32, margin: f32, spacing: f32) -> Self {
        Self {
            ground_y,
            width,
            margin,
            spacing,
        }
    }

    /// Target points from `-margin` to `width + margin`, left to right
    pub fn targets(&self) -> impl Iterator<Item = Vec2> + '_ {
        let spacing = self.spacing.max(1.0);
        let span = (self.width + 2.0 * self.margin).max(0.0);
        let count = (span / spacing).floor() as u32;
        (0..=count).map(move |i| Vec2::new(-self.margin + i as f32 * spacing, self.ground_y))
    }
}

/// Outcome of tracing one ray
#[derive(Debug, Clone, Copy, PartialEq)]
struct Trace {
    /// Distance to the nearest hit (player or obstacle), infinite on a miss
    nearest: f32,
    hits_player: bool,
}

/// The player is lit by `ray` unless an obstacle is hit strictly nearer
fn trace(ray: &Ray, player: &Rect, obstacles: &[Rect]) -> Trace {
    let obstacle = obstacles
        .iter()
        .filter_map(|o| ray.cast(o))
        .fold(f32::INFINITY, f32::min);

    match ray.cast(player) {
        Some(d) if d <= obstacle => Trace {
            nearest: d,
            hits_player: true,
        },
        _ => Trace {
            nearest: obstacle,
            hits_player: false,
        },
    }
}

/// Ray-fan exposure: any ray whose nearest hit is the player exposes them
pub fn ray_fan_exposure(sun: Vec2, player: &Rect, obstacles: &[Rect], fan: &RayFan) -> bool {
    if obstacles.is_empty() {
        return true;
    }
    fan.targets()
        .filter_map(|target| Ray::towards(sun, target))
        .any(|ray| trace(&ray, player, obstacles).hits_player)
}

/// Segment exposure: exposed iff no obstacle crosses the line sun -> player
pub fn segment_exposure(sun: Vec2, player_center: Vec2, obstacles: &[Rect]) -> bool {
    !obstacles
        .iter()
        .any(|o| segment_intersects_rect(sun, player_center, o))
}

/// Exposure using the configured method
pub fn is_exposed(
    method: ExposureMethod,
    sun: Vec2,
    player: &Rect,
    obstacles: &[Rect],
    fan: &RayFan,
) -> bool {
    match method {
        ExposureMethod::RayFan => ray_fan_exposure(sun, player, obstacles, fan),
        ExposureMethod::Segment => segment_exposure(sun, player.center(), obstacles),
    }
}

/// A drawn light ray
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightRay {
    pub start: Vec2,
    pub end: Vec2,
    pub hits_player: bool,
}

/// Light rays for the presentation layer. Blocked rays stop a little past
/// the obstacle; rays reaching the player stop on the player.
pub fn light_rays(sun: Vec2, player: &Rect, obstacles: &[Rect], fan: &RayFan) -> Vec<LightRay> {
    fan.targets()
        .filter_map(|target| Ray::towards(sun, target).map(|ray| (ray, target)))
        .map(|(ray, target)| {
            let hit = trace(&ray, player, obstacles);
            let end = if hit.hits_player {
                ray.at(hit.nearest)
            } else if hit.nearest.is_finite() {
                ray.at(hit.nearest + RAY_OVERSHOOT)
            } else {
                target
            };
            LightRay {
                start: sun,
                end,
                hits_player: hit.hits_player,
            }
        })
        .collect()
}

/// Damage and feedback produced by one burn update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BurnOutcome {
    pub damage: f32,
    /// Time to emit a burn cue (particles, sound)
    pub cue: bool,
}

/// Accumulated sunburn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BurnState {
    /// Exposure result of the latest frame
    pub exposed: bool,
    /// Taking burn damage right now
    pub burning: bool,
    /// Seconds until the next cue
    pub cue_timer: f32,
    /// Damage dealt since the level was loaded
    pub total: f32,
}

impl BurnState {
    /// Burn while exposed in daylight; any other frame stops burning at once
    pub fn update(&mut self, exposed: bool, is_day: bool, dt: f32, config: &SunConfig) -> BurnOutcome {
        self.exposed = exposed && is_day;
        if !self.exposed {
            self.stop();
            return BurnOutcome::default();
        }

        if !self.burning {
            self.burning = true;
            self.cue_timer = 0.0;
        }

        let damage = config.burn_rate * dt;
        self.total += damage;

        self.cue_timer -= dt;
        let cue = self.cue_timer <= 0.0;
        if cue {
            self.cue_timer = (self.cue_timer + config.burn_cue_interval).max(0.0);
        }

        BurnOutcome { damage, cue }
    }

    /// Drop any in-progress burn feedback
    pub fn stop(&mut self) {
        self.burning = false;
        self.cue_timer = 0.0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

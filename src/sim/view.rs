//! Read-only per-frame snapshot for the presentation layer
//!
//! Everything a renderer or HUD needs, already resolved for the current
//! day/night phase. Sprite handles stay with the renderer; views only carry
//! frame indices.

use glam::Vec2;
use serde::Serialize;

use super::enemy::EnemyKind;
use super::entity::Animation;
use super::geom::Rect;
use super::particles::Particle;
use super::platform::{Platform, PlatformKind};
use super::player::Facing;
use super::state::{GamePhase, GameState};
use super::sunlight::{LightRay, light_rays, sun_obstacles};
use crate::consts::DIM_ALPHA;

#[derive(Debug, Clone, Serialize)]
pub struct ActorView {
    /// Drawn rectangle (top-left + size)
    pub rect: Rect,
    pub facing: Facing,
    pub frame: u32,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub actor: ActorView,
    pub hp: f32,
    pub max_hp: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    #[serde(flatten)]
    pub actor: ActorView,
    pub kind: EnemyKind,
    /// Enemies are only drawn while they roam
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub rect: Rect,
    pub kind: PlatformKind,
    pub solid: bool,
    /// 1.0 solid, dimmed when present but not solid, 0.0 hidden
    pub alpha: f32,
    /// Sprite frame (flowers sway)
    pub frame: u32,
}

impl PlatformView {
    fn new(platform: &Platform, is_day: bool, debug_draw: bool, flower: &Animation) -> Self {
        let solid = platform.is_solid(is_day);
        let alpha = match platform.kind {
            PlatformKind::Invisible if debug_draw => DIM_ALPHA,
            PlatformKind::Invisible => 0.0,
            PlatformKind::Normal | PlatformKind::Flower | PlatformKind::Mushroom => {
                if solid {
                    1.0
                } else {
                    DIM_ALPHA
                }
            }
        };
        let frame = match platform.kind {
            PlatformKind::Flower => flower.frame,
            PlatformKind::Normal | PlatformKind::Mushroom | PlatformKind::Invisible => 0,
        };
        Self {
            rect: platform.rect,
            kind: platform.kind,
            solid,
            alpha,
            frame,
        }
    }
}

/// A fire particle resolved to its colour stage
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    /// 0 yellow, 1 red, 2 fading maroon
    pub stage: u8,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            radius: p.radius,
            stage: p.stage(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SunView {
    pub pos: Vec2,
    /// Drawn light rays (day only)
    pub rays: Vec<LightRay>,
    pub exposed: bool,
    pub burning: bool,
    /// Damage taken from sunlight this level
    pub burn_total: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub level_index: usize,
    pub level_count: usize,
    pub level_name: String,
    pub is_day: bool,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub platforms: Vec<PlatformView>,
    pub clouds: Vec<Rect>,
    pub exit_zone: Rect,
    pub sun: SunView,
    pub fire: Vec<ParticleView>,
    pub debug_draw: bool,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let is_day = state.is_day;
        let player = &state.player;
        let player_rect = player.rect();

        let rays = if is_day {
            let obstacles = sun_obstacles(&state.platforms, &state.clouds, is_day);
            let fan = state.ray_fan(state.settings.sun.visual_ray_spacing);
            light_rays(state.sun(), &player_rect, &obstacles, &fan)
        } else {
            Vec::new()
        };

        let enemies = state
            .enemies
            .iter()
            .map(|e| EnemyView {
                actor: ActorView {
                    rect: e.rect(),
                    facing: if e.patrol_right { Facing::Right } else { Facing::Left },
                    frame: e.body.anim.frame,
                    alive: true,
                },
                kind: e.kind,
                visible: e.is_active(is_day),
            })
            .collect();

        Self {
            level_index: state.level_index,
            level_count: state.level_count(),
            level_name: state.level().name.clone(),
            is_day,
            phase: state.phase,
            player: PlayerView {
                actor: ActorView {
                    rect: player_rect,
                    facing: player.facing,
                    frame: player.body.anim.frame,
                    alive: !player.is_dead(),
                },
                hp: player.hp,
                max_hp: player.max_hp,
            },
            enemies,
            platforms: state
                .platforms
                .iter()
                .map(|p| PlatformView::new(p, is_day, state.settings.debug_draw, &state.flower_anim))
                .collect(),
            clouds: state.clouds.iter().map(|c| c.rect).collect(),
            exit_zone: state.level().exit_zone,
            sun: SunView {
                pos: state.sun(),
                rays,
                exposed: state.burn.exposed,
                burning: state.burn.burning,
                burn_total: state.burn.total,
            },
            fire: state.fire.particles.iter().map(ParticleView::from).collect(),
            debug_draw: state.settings.debug_draw,
        }
    }
}

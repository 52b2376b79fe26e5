//! Level definitions, load-time validation and the built-in campaign
//!
//! A [`LevelDef`] is immutable configuration. Loading a level copies its
//! platforms, enemies and clouds into the live [`GameState`](super::GameState),
//! so a restart always starts from the definition.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cloud::Cloud;
use super::enemy::{Enemy, EnemyKind};
use super::geom::Rect;
use super::platform::{Platform, PlatformKind};
use crate::settings::{PhysicsConfig, ValidationMode};

/// Configuration errors found while loading levels
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("no levels to play")]
    NoLevels,

    #[error("level '{level}' has non-positive size {width}x{height}")]
    DegenerateSize { level: String, width: f32, height: f32 },

    #[error("level '{level}' has no platforms")]
    NoPlatforms { level: String },

    #[error("level '{level}': platform {index} has non-positive size {width}x{height}")]
    DegeneratePlatform {
        level: String,
        index: usize,
        width: f32,
        height: f32,
    },

    #[error(
        "level '{level}': enemy {enemy} is bound to platform {platform}, but the level has {count} platforms"
    )]
    EnemyPlatformOutOfRange {
        level: String,
        enemy: usize,
        platform: usize,
        count: usize,
    },

    #[error("level '{level}': sun at {sun} lies on the ray target line y={ground_y}, sun rays would have zero length")]
    DegenerateSun { level: String, sun: Vec2, ground_y: f32 },

    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
}

/// A platform as written in level data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformDef {
    pub rect: Rect,
    #[serde(default)]
    pub kind: PlatformKind,
}

impl PlatformDef {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: PlatformKind) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind,
        }
    }
}

/// An enemy spawn as written in level data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    /// Feet anchor
    pub pos: Vec2,
    /// Index of the platform the enemy patrols
    pub platform: usize,
    #[serde(default)]
    pub patrol_right: bool,
    /// Side length override; defaults to the kind's share of the screen height
    #[serde(default)]
    pub size: Option<f32>,
}

/// Music track ids for the audio layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMusic {
    pub day: String,
    pub night: String,
}

/// Static description of one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    /// Playfield size; the sun's rays aim at the bottom edge
    pub size: Vec2,
    /// Player feet position on (re)load
    pub spawn: Vec2,
    pub sun: Vec2,
    /// Touching this advances to the next level
    pub exit_zone: Rect,
    #[serde(default = "default_true")]
    pub starts_day: bool,
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    #[serde(default)]
    pub clouds: Vec<Cloud>,
    pub music: LevelMusic,
}

fn default_true() -> bool {
    true
}

impl LevelDef {
    /// Check the definition. In lenient mode, bad enemy bindings are returned
    /// (to be frozen) instead of failing the load.
    pub fn validate(&self, mode: ValidationMode) -> Result<Vec<usize>, LevelError> {
        // Player size, ray fan width and ground line all scale from this
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(LevelError::DegenerateSize {
                level: self.name.clone(),
                width: self.size.x,
                height: self.size.y,
            });
        }

        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms {
                level: self.name.clone(),
            });
        }

        if let Some((index, p)) = self
            .platforms
            .iter()
            .enumerate()
            .find(|(_, p)| p.rect.is_degenerate())
        {
            return Err(LevelError::DegeneratePlatform {
                level: self.name.clone(),
                index,
                width: p.rect.size.x,
                height: p.rect.size.y,
            });
        }

        if (self.sun.y - self.size.y).abs() <= f32::EPSILON {
            return Err(LevelError::DegenerateSun {
                level: self.name.clone(),
                sun: self.sun,
                ground_y: self.size.y,
            });
        }

        let mut frozen = Vec::new();
        for (enemy, def) in self.enemies.iter().enumerate() {
            if def.platform < self.platforms.len() {
                continue;
            }
            let err = LevelError::EnemyPlatformOutOfRange {
                level: self.name.clone(),
                enemy,
                platform: def.platform,
                count: self.platforms.len(),
            };
            match mode {
                ValidationMode::Strict => return Err(err),
                ValidationMode::Lenient => {
                    log::warn!("{err}; enemy frozen");
                    frozen.push(enemy);
                }
            }
        }
        Ok(frozen)
    }

    /// Fresh platforms at their initial positions
    pub fn build_platforms(&self) -> Vec<Platform> {
        self.platforms
            .iter()
            .map(|p| Platform::new(p.rect, p.kind))
            .collect()
    }

    /// Fresh enemies; indices in `frozen` start frozen
    pub fn spawn_enemies(&self, physics: &PhysicsConfig, frozen: &[usize]) -> Vec<Enemy> {
        self.enemies
            .iter()
            .enumerate()
            .map(|(i, def)| {
                let side = def.size.unwrap_or(self.size.y * def.kind.size_ratio());
                let speed = match def.kind {
                    EnemyKind::Roach => 0.0,
                    EnemyKind::Spider => physics.enemy_speed,
                };
                let mut enemy = Enemy::new(
                    def.kind,
                    def.pos,
                    Vec2::splat(side),
                    def.patrol_right,
                    def.platform,
                    speed,
                );
                enemy.frozen = frozen.contains(&i);
                enemy
            })
            .collect()
    }
}

/// Parse a JSON array of level definitions
pub fn levels_from_json(json: &str) -> Result<Vec<LevelDef>, LevelError> {
    let levels: Vec<LevelDef> = serde_json::from_str(json)?;
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }
    Ok(levels)
}

/// Read a JSON level file
pub fn levels_from_file(path: &Path) -> Result<Vec<LevelDef>, LevelError> {
    let json = std::fs::read_to_string(path)?;
    let levels = levels_from_json(&json)?;
    log::info!("Loaded {} levels from {}", levels.len(), path.display());
    Ok(levels)
}

/// Invisible side walls plus a fallback floor under the playfield.
/// No ceiling: suns and clouds above the screen must still reach it.
fn bounds(w: f32, h: f32) -> [PlatformDef; 3] {
    use PlatformKind::Invisible;
    [
        PlatformDef::new(-20.0, 0.0, 20.0, h, Invisible),
        PlatformDef::new(w, 0.0, 20.0, h, Invisible),
        PlatformDef::new(0.0, h, w, 20.0, Invisible),
    ]
}

fn music(n: u32) -> LevelMusic {
    LevelMusic {
        day: format!("level{n}_day"),
        night: format!("level{n}_night"),
    }
}

/// The built-in three-level campaign, laid out for a `w` x `h` screen
pub fn campaign(w: f32, h: f32) -> Vec<LevelDef> {
    use PlatformKind::*;

    // Level 1: ledges either side of a night-time mushroom
    let mut platforms = vec![PlatformDef::new(0.0, h * 0.9375, w, h * 0.0625, Normal)];
    platforms.extend(bounds(w, h));
    platforms.extend([
        PlatformDef::new(w * 0.57, h * 0.5, w * 0.43, 30.0, Normal),
        PlatformDef::new(0.0, h * 0.5, w * 0.23, 30.0, Normal),
        PlatformDef::new(w * 0.31, h * 0.84, w * 0.08, h * 0.125, Mushroom),
    ]);
    let first = LevelDef {
        name: "Garden".into(),
        size: Vec2::new(w, h),
        spawn: Vec2::new(w * 0.85, h * 0.75),
        sun: Vec2::new(w / 2.0, 50.0),
        exit_zone: Rect::new(50.0, h * 0.5 - 65.0, 100.0, 50.0),
        starts_day: true,
        platforms,
        enemies: Vec::new(),
        clouds: Vec::new(),
        music: music(1),
    };

    // Level 2: steps up to a guarded island, a flower shortcut by day
    let mut platforms = vec![PlatformDef::new(0.0, h * 0.9375, w, h * 0.0625, Normal)];
    platforms.extend(bounds(w, h));
    platforms.extend([
        PlatformDef::new(w * 0.5 - 75.0, h * 0.65, 150.0, 30.0, Flower),
        PlatformDef::new(w * 0.15, h * 0.85, 150.0, 30.0, Normal),
        PlatformDef::new(w * 0.31, h * 0.75, 150.0, 30.0, Normal),
        PlatformDef::new(w * 0.69, h * 0.6, w * 0.23, 30.0, Normal),
        PlatformDef::new(w * 0.80, h * 0.45, 150.0, 30.0, Normal),
        PlatformDef::new(w * 0.55, h * 0.35, 150.0, 30.0, Normal),
        PlatformDef::new(w * 0.5 + 50.0, h * 0.25, 150.0, 30.0, Normal),
        PlatformDef::new(w * 0.5 - 200.0, h * 0.15, 400.0, 30.0, Normal),
    ]);
    let second = LevelDef {
        name: "Greenhouse".into(),
        size: Vec2::new(w, h),
        spawn: Vec2::new(50.0, h * 0.75),
        sun: Vec2::new(w - 100.0, 100.0),
        exit_zone: Rect::new(w * 0.5 - 50.0, h * 0.15 - 20.0, 100.0, 50.0),
        starts_day: false,
        platforms,
        enemies: vec![
            EnemyDef {
                kind: EnemyKind::Roach,
                pos: Vec2::new(w * 0.31 + 75.0, h * 0.75),
                platform: 6,
                patrol_right: true,
                size: None,
            },
            EnemyDef {
                kind: EnemyKind::Spider,
                pos: Vec2::new(w * 0.5, h * 0.15),
                platform: 11,
                patrol_right: true,
                size: None,
            },
        ],
        clouds: Vec::new(),
        music: music(2),
    };

    // Level 3: drifting clouds under a high sun
    let sx = w / 1280.0;
    let sy = h / 800.0;
    let mut platforms = vec![
        PlatformDef::new(0.0, 400.0 * sy, 450.0 * sx, 50.0 * sy, Normal),
        PlatformDef::new(600.0 * sx, 600.0 * sy, 100.0 * sx, 100.0 * sy, Flower),
        PlatformDef::new(800.0 * sx, 450.0 * sy, 200.0 * sx, 50.0 * sy, Normal),
        PlatformDef::new(1000.0 * sx, 300.0 * sy, 200.0 * sx, 50.0 * sy, Normal),
        PlatformDef::new(0.0, h - 70.0 * sy, w, 50.0 * sy, Invisible),
    ];
    platforms.extend(bounds(w, h));
    let third = LevelDef {
        name: "Rooftop".into(),
        size: Vec2::new(w, h),
        spawn: Vec2::new(100.0 * sx, 600.0 * sy),
        sun: Vec2::new(w - 50.0 * sx, -1000.0 * sy),
        exit_zone: Rect::new(25.0 * sx, 200.0 * sy, 100.0 * sx, 50.0 * sy),
        starts_day: true,
        platforms,
        enemies: vec![EnemyDef {
            kind: EnemyKind::Spider,
            pos: Vec2::new(900.0 * sx, 450.0 * sy),
            platform: 2,
            patrol_right: false,
            size: None,
        }],
        clouds: vec![
            Cloud::new(
                Rect::new(100.0 * sx, -50.0 * sy, 150.0 * sx, 40.0 * sy),
                75.0 * sx,
                200.0 * sx,
                800.0 * sx,
                true,
            ),
            Cloud::new(
                Rect::new(w, -50.0 * sy, 150.0 * sx, 40.0 * sy),
                75.0 * sx,
                -100.0 * sx,
                900.0 * sx,
                false,
            ),
        ],
        music: music(3),
    };

    vec![first, second, third]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> LevelDef {
        LevelDef {
            name: "tiny".into(),
            size: Vec2::new(400.0, 300.0),
            spawn: Vec2::new(100.0, 100.0),
            sun: Vec2::new(200.0, -50.0),
            exit_zone: Rect::new(350.0, 0.0, 50.0, 50.0),
            starts_day: true,
            platforms: vec![PlatformDef::new(0.0, 250.0, 400.0, 50.0, PlatformKind::Normal)],
            enemies: vec![EnemyDef {
                kind: EnemyKind::Spider,
                pos: Vec2::new(200.0, 250.0),
                platform: 0,
                patrol_right: true,
                size: Some(20.0),
            }],
            clouds: Vec::new(),
            music: music(9),
        }
    }

    #[test]
    fn test_campaign_is_valid_in_strict_mode() {
        for level in campaign(1280.0, 800.0) {
            let frozen = level.validate(ValidationMode::Strict).unwrap();
            assert!(frozen.is_empty(), "{}", level.name);
        }
        for level in campaign(800.0, 600.0) {
            assert!(level.validate(ValidationMode::Strict).is_ok());
        }
    }

    #[test]
    fn test_enemy_out_of_range_strict_is_fatal() {
        let mut level = tiny();
        level.enemies[0].platform = 3;
        let err = level.validate(ValidationMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            LevelError::EnemyPlatformOutOfRange { platform: 3, count: 1, .. }
        ));
    }

    #[test]
    fn test_enemy_out_of_range_lenient_freezes() {
        let mut level = tiny();
        level.enemies[0].platform = 3;
        let frozen = level.validate(ValidationMode::Lenient).unwrap();
        assert_eq!(frozen, vec![0]);
        let enemies = level.spawn_enemies(&PhysicsConfig::default(), &frozen);
        assert!(enemies[0].frozen);
    }

    #[test]
    fn test_no_platforms_is_fatal_in_both_modes() {
        let mut level = tiny();
        level.platforms.clear();
        assert!(matches!(
            level.validate(ValidationMode::Lenient),
            Err(LevelError::NoPlatforms { .. })
        ));
    }

    #[test]
    fn test_degenerate_platform_rejected() {
        let mut level = tiny();
        level.platforms.push(PlatformDef::new(0.0, 0.0, 0.0, 10.0, PlatformKind::Normal));
        assert!(matches!(
            level.validate(ValidationMode::Strict),
            Err(LevelError::DegeneratePlatform { index: 1, .. })
        ));
    }

    #[test]
    fn test_non_positive_level_size_rejected() {
        let mut level = tiny();
        level.size.y = 0.0;
        assert!(matches!(
            level.validate(ValidationMode::Strict),
            Err(LevelError::DegenerateSize { height, .. }) if height == 0.0
        ));

        let mut level = tiny();
        level.size.x = -400.0;
        assert!(matches!(
            level.validate(ValidationMode::Lenient),
            Err(LevelError::DegenerateSize { .. })
        ));
    }

    #[test]
    fn test_sun_on_ground_line_rejected() {
        let mut level = tiny();
        level.sun = Vec2::new(10.0, 300.0);
        assert!(matches!(
            level.validate(ValidationMode::Strict),
            Err(LevelError::DegenerateSun { .. })
        ));
    }

    #[test]
    fn test_spawned_enemy_uses_physics_speed_and_size() {
        let level = tiny();
        let physics = PhysicsConfig::default();
        let enemies = level.spawn_enemies(&physics, &[]);
        assert_eq!(enemies[0].speed, physics.enemy_speed);
        assert_eq!(enemies[0].body.size, Vec2::splat(20.0));
        assert!(!enemies[0].frozen);
    }

    #[test]
    fn test_levels_round_trip_through_json() {
        let json = serde_json::to_string(&campaign(1280.0, 800.0)).unwrap();
        let levels = levels_from_json(&json).unwrap();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[1].enemies.len(), 2);
        assert!(!levels[1].starts_day);
    }

    #[test]
    fn test_empty_level_list_rejected() {
        assert!(matches!(levels_from_json("[]"), Err(LevelError::NoLevels)));
        assert!(matches!(levels_from_json("{"), Err(LevelError::Parse(_))));
        assert!(matches!(
            levels_from_file(Path::new("/nonexistent/levels.json")),
            Err(LevelError::Io(_))
        ));
    }
}

//! Game state and level flow
//!
//! `GameState` owns everything that changes while playing: the day flag, the
//! live copies of the current level's platforms, enemies and clouds, the
//! player, burn bookkeeping and the outgoing event queue.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cloud::Cloud;
use super::enemy::Enemy;
use super::entity::Animation;
use super::level::{LevelDef, LevelError, campaign};
use super::particles::FireParticles;
use super::platform::Platform;
use super::player::Player;
use super::sunlight::{BurnState, RayFan};
use crate::consts::*;
use crate::settings::{PhysicsConfig, Settings};

/// Seed for the burn particle stream
pub const FIRE_SEED: u64 = 0x5EED_F1A3;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// The player died; waiting for restart
    GameOver,
    /// Every level cleared
    Won,
}

/// Things the presentation and audio layers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level was (re)loaded
    LevelChanged { index: usize, is_day: bool },
    /// The player reached the exit of level `index`
    LevelCompleted { index: usize },
    /// The last level was cleared
    CampaignCompleted,
    PlayerDied,
    /// Day/night flipped
    PhaseChanged { is_day: bool },
    Paused,
    Resumed,
    Jumped,
    /// Launched by a mushroom
    Bounced,
    /// An active enemy touched the player
    EnemyContact,
    /// Periodic sunburn feedback
    BurnCue,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Derived from the vertical resolution
    pub physics: PhysicsConfig,
    pub levels: Vec<LevelDef>,
    pub level_index: usize,
    pub is_day: bool,
    pub phase: GamePhase,
    pub player: Player,
    /// Live copies, rebuilt from the definition on every load
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub clouds: Vec<Cloud>,
    pub burn: BurnState,
    pub fire: FireParticles,
    /// Shared sway cycle for flower platforms
    pub flower_anim: Animation,
    /// Seconds until the day/night toggle is allowed again
    pub toggle_timer: f32,
    /// Seconds played in the current level
    pub level_time: f32,
    /// Enemy indices frozen by lenient validation, per level
    frozen: Vec<Vec<usize>>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Validate every level up front, then load the first one
    pub fn new(levels: Vec<LevelDef>, settings: Settings) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        let frozen = levels
            .iter()
            .map(|level| level.validate(settings.validation))
            .collect::<Result<Vec<_>, _>>()?;

        let physics = settings.physics();
        let first = &levels[0];
        let player = Player::new(first.spawn, first.size.y);

        let mut state = Self {
            settings,
            physics,
            levels,
            level_index: 0,
            is_day: true,
            phase: GamePhase::Playing,
            player,
            platforms: Vec::new(),
            enemies: Vec::new(),
            clouds: Vec::new(),
            burn: BurnState::default(),
            fire: FireParticles::new(FIRE_SEED),
            flower_anim: Animation::new(FLOWER_FRAMES, FLOWER_FRAME_TIME),
            toggle_timer: 0.0,
            level_time: 0.0,
            frozen,
            events: Vec::new(),
        };
        state.load_level(0);
        Ok(state)
    }

    /// The built-in campaign laid out for the configured resolution
    pub fn with_campaign(settings: Settings) -> Result<Self, LevelError> {
        let levels = campaign(settings.screen_width, settings.screen_height);
        Self::new(levels, settings)
    }

    /// Definition of the level being played
    pub fn level(&self) -> &LevelDef {
        &self.levels[self.level_index]
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn sun(&self) -> Vec2 {
        self.level().sun
    }

    /// Ray fan aimed at the current level's ground line
    pub fn ray_fan(&self, spacing: f32) -> RayFan {
        let size = self.level().size;
        RayFan::new(size.x, size.y, self.settings.sun.fan_margin, spacing)
    }

    /// Rebuild everything from level `index`. Returns false if there is no such level.
    pub fn load_level(&mut self, index: usize) -> bool {
        let Some(def) = self.levels.get(index) else {
            log::warn!("No level {index} (have {})", self.levels.len());
            return false;
        };
        let frozen = self.frozen.get(index).map(Vec::as_slice).unwrap_or(&[]);

        self.platforms = def.build_platforms();
        self.enemies = def.spawn_enemies(&self.physics, frozen);
        self.clouds = def.clouds.clone();
        self.player = Player::new(def.spawn, def.size.y);
        self.is_day = def.starts_day;

        log::info!(
            "Loaded level {} '{}' ({} platforms, {} enemies, {} clouds, {})",
            index + 1,
            def.name,
            self.platforms.len(),
            self.enemies.len(),
            self.clouds.len(),
            if self.is_day { "day" } else { "night" }
        );

        self.level_index = index;
        self.phase = GamePhase::Playing;
        self.burn.reset();
        self.fire.clear();
        self.flower_anim.reset();
        self.toggle_timer = 0.0;
        self.level_time = 0.0;
        self.emit(GameEvent::LevelChanged {
            index,
            is_day: self.is_day,
        });
        true
    }

    /// Reload the current level, or the first one after a win
    pub fn restart(&mut self) {
        let index = if self.phase == GamePhase::Won {
            0
        } else {
            self.level_index
        };
        log::info!("Restarting at level {}", index + 1);
        self.load_level(index);
    }

    /// Flip day and night. Returns false while the toggle cooldown runs.
    pub fn toggle_day_night(&mut self) -> bool {
        if self.toggle_timer > 0.0 {
            log::debug!("Day/night toggle on cooldown ({:.2}s)", self.toggle_timer);
            return false;
        }
        self.is_day = !self.is_day;
        self.toggle_timer = self.settings.toggle_cooldown;

        // Burn feedback and patrol cycles restart in the new phase
        self.burn.stop();
        for enemy in &mut self.enemies {
            enemy.body.anim.reset();
        }

        log::info!("It is now {}", if self.is_day { "day" } else { "night" });
        self.emit(GameEvent::PhaseChanged { is_day: self.is_day });
        true
    }

    /// Leave the current level through its exit
    pub fn complete_level(&mut self) {
        let index = self.level_index;
        self.emit(GameEvent::LevelCompleted { index });
        if index + 1 < self.levels.len() {
            self.load_level(index + 1);
        } else {
            log::info!("Campaign complete after {} levels", self.levels.len());
            self.phase = GamePhase::Won;
            self.burn.stop();
            self.emit(GameEvent::CampaignCompleted);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.emit(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.emit(GameEvent::Resumed);
            }
            GamePhase::GameOver | GamePhase::Won => {}
        }
    }

    /// Queue an event for the caller
    pub fn emit(&mut self, event: GameEvent) {
        log::debug!("Event: {event:?}");
        self.events.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

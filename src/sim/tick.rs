//! Per-frame simulation step
//!
//! Order matters: exposure is computed only after the player's position is
//! final for the frame.

use super::player::PlayerInput;
use super::state::{GameEvent, GamePhase, GameState};
use super::sunlight::{is_exposed, sun_obstacles};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Flip day and night
    pub toggle_day_night: bool,
    /// Pause toggle
    pub pause: bool,
    /// Reload the current level (or the campaign after a win)
    pub restart: bool,
    /// Skip to next level (debug/testing)
    pub skip_level: bool,
    /// Show invisible platforms
    pub toggle_debug: bool,
}

impl TickInput {
    fn movement(&self) -> PlayerInput {
        PlayerInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    if input.toggle_debug {
        state.settings.debug_draw = !state.settings.debug_draw;
    }

    if input.restart {
        state.restart();
        return;
    }

    if input.pause {
        state.toggle_pause();
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.skip_level {
        log::info!("Skipping level {}", state.level_index + 1);
        state.complete_level();
        return;
    }

    state.level_time += dt;
    state.toggle_timer = (state.toggle_timer - dt).max(0.0);
    if input.toggle_day_night {
        state.toggle_day_night();
    }
    let is_day = state.is_day;

    // Flowers ease toward their phase height; only a solid one carries its rider
    state.flower_anim.advance(dt);
    for platform in &mut state.platforms {
        let before = platform.rect;
        let dy = platform.animate(is_day, dt);
        if platform.is_solid(is_day) {
            state.player.carry(&before, dy);
        }
    }

    let step = state
        .player
        .update(&input.movement(), dt, &state.platforms, is_day, &state.physics);
    if step.jumped {
        state.emit(GameEvent::Jumped);
    }
    if step.bounced {
        state.emit(GameEvent::Bounced);
    }

    for cloud in &mut state.clouds {
        let dx = cloud.update(dt);
        state.player.ride_cloud(cloud, dx);
    }

    // Enemies roam and bite only at night
    if !is_day {
        let width = state.level().size.x;
        for enemy in &mut state.enemies {
            enemy.update(dt, &state.platforms, width);
        }
        if state.player.touch_enemies(&state.enemies, is_day) {
            state.emit(GameEvent::EnemyContact);
        }
    }

    let exposed = is_day && {
        let obstacles = sun_obstacles(&state.platforms, &state.clouds, is_day);
        let fan = state.ray_fan(state.settings.sun.ray_spacing);
        is_exposed(
            state.settings.sun.method,
            state.sun(),
            &state.player.rect(),
            &obstacles,
            &fan,
        )
    };
    let burn = state.burn.update(exposed, is_day, dt, &state.settings.sun);
    if burn.damage > 0.0 {
        state.player.take_damage(burn.damage);
    }
    if burn.cue {
        state.fire.emit(state.player.rect().center());
        state.emit(GameEvent::BurnCue);
    }
    state.fire.update(dt);

    if state.player.is_dead() {
        log::info!("Player died on level {}", state.level_index + 1);
        state.phase = GamePhase::GameOver;
        state.burn.stop();
        state.emit(GameEvent::PlayerDied);
        return;
    }

    if state.player.rect().overlaps(&state.level().exit_zone) {
        log::info!("Reached the exit of level {}", state.level_index + 1);
        state.complete_level();
    }
}

/// Fixed-step driver: accumulates frame time and reports how many
/// `SIM_DT` ticks to run, at most `MAX_SUBSTEPS` per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `frame_dt` seconds; returns the number of ticks due.
    /// Time beyond the substep cap is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Forget accumulated time (after a pause or level load)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

//! Audio cue routing
//!
//! The simulation never touches audio hardware. It queues [`GameEvent`]s;
//! [`AudioDirector`] turns them into one-shot effects and music switches on
//! whatever [`AudioSink`] the host provides.

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Mushroom launch
    Bounce,
    /// Sizzle while the sun burns the player
    Burn,
    /// Enemy contact
    Hurt,
    /// Player died
    Death,
    /// Exit reached
    LevelComplete,
    /// Last level cleared
    Win,
    /// Day/night flip
    Toggle,
}

impl SoundEffect {
    /// Asset id for the host's sound bank
    pub fn id(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Bounce => "bounce",
            SoundEffect::Burn => "burn",
            SoundEffect::Hurt => "hurt",
            SoundEffect::Death => "death",
            SoundEffect::LevelComplete => "level_complete",
            SoundEffect::Win => "win",
            SoundEffect::Toggle => "toggle",
        }
    }
}

/// Playback backend supplied by the host
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    /// Start (or switch to) a looping music stream
    fn play_music(&mut self, track: &str, volume: f32);
    fn stop_music(&mut self);
}

/// Headless sink that only logs
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} @ {volume:.2}", effect.id());
    }

    fn play_music(&mut self, track: &str, volume: f32) {
        log::info!("music -> {track} @ {volume:.2}");
    }

    fn stop_music(&mut self) {
        log::info!("music stopped");
    }
}

/// Maps game events to sink calls and tracks the current music stream
#[derive(Debug)]
pub struct AudioDirector {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    current_track: Option<String>,
}

impl AudioDirector {
    pub fn new(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: false,
            current_track: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current_track.as_deref()
    }

    fn effect_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn effect(&self, sink: &mut dyn AudioSink, effect: SoundEffect) {
        let vol = self.effect_volume();
        if vol > 0.0 {
            sink.play_effect(effect, vol);
        }
    }

    /// Switch to the current level's day or night track
    fn switch_music(&mut self, sink: &mut dyn AudioSink, state: &GameState, is_day: bool) {
        let music = &state.level().music;
        let track = if is_day { &music.day } else { &music.night };
        if self.current_track.as_deref() == Some(track.as_str()) {
            return;
        }
        sink.play_music(track, self.music_level());
        self.current_track = Some(track.clone());
    }

    fn stop(&mut self, sink: &mut dyn AudioSink) {
        if self.current_track.take().is_some() {
            sink.stop_music();
        }
    }

    /// Route one frame's events. `state` supplies the current level's tracks.
    pub fn dispatch(&mut self, events: &[GameEvent], state: &GameState, sink: &mut dyn AudioSink) {
        for event in events {
            match *event {
                GameEvent::LevelChanged { is_day, .. } => self.switch_music(sink, state, is_day),
                GameEvent::PhaseChanged { is_day } => {
                    self.effect(sink, SoundEffect::Toggle);
                    self.switch_music(sink, state, is_day);
                }
                GameEvent::LevelCompleted { .. } => self.effect(sink, SoundEffect::LevelComplete),
                GameEvent::CampaignCompleted => {
                    self.stop(sink);
                    self.effect(sink, SoundEffect::Win);
                }
                GameEvent::PlayerDied => {
                    self.stop(sink);
                    self.effect(sink, SoundEffect::Death);
                }
                GameEvent::Jumped => self.effect(sink, SoundEffect::Jump),
                GameEvent::Bounced => self.effect(sink, SoundEffect::Bounce),
                GameEvent::EnemyContact => self.effect(sink, SoundEffect::Hurt),
                GameEvent::BurnCue => self.effect(sink, SoundEffect::Burn),
                GameEvent::Paused | GameEvent::Resumed => {}
            }
        }
    }
}

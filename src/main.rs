//! Jasmin headless runner
//!
//! Plays a short scripted session through the fixed-step clock, routes the
//! resulting events to a logging audio sink and prints the final frame view
//! as JSON.
//!
//! Usage: `jasmin [settings.json] [levels.json]`

use std::path::Path;
use std::process::ExitCode;

use jasmin::Settings;
use jasmin::audio::{AudioDirector, LogAudio};
use jasmin::consts::SIM_DT;
use jasmin::sim::{FrameClock, FrameView, GameEvent, GameState, LevelError, TickInput, levels_from_file, tick};

/// Scripted input for frame `n` (at 60 fps)
fn scripted_input(frame: u32) -> TickInput {
    let second = frame / 60;
    TickInput {
        left: (1..3).contains(&second),
        right: (4..5).contains(&second),
        jump: frame % 90 == 45,
        toggle_day_night: frame == 5 * 60,
        ..Default::default()
    }
}

fn build_state(settings: Settings, levels_path: Option<&str>) -> Result<GameState, LevelError> {
    match levels_path {
        Some(path) => GameState::new(levels_from_file(Path::new(path))?, settings),
        None => GameState::with_campaign(settings),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Jasmin (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let levels_path = args.next();

    let mut director = AudioDirector::new(&settings);
    let mut state = match build_state(settings, levels_path.as_deref()) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to load levels: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut sink = LogAudio;
    let mut clock = FrameClock::new();

    let mut frame = 0;
    while frame < 8 * 60 {
        for _ in 0..clock.advance(SIM_DT) {
            tick(&mut state, &scripted_input(frame), SIM_DT);
            frame += 1;
        }

        let events = state.drain_events();
        for event in &events {
            if matches!(event, GameEvent::PlayerDied | GameEvent::LevelCompleted { .. }) {
                log::info!("frame {frame}: {event:?}");
            }
        }
        director.dispatch(&events, &state, &mut sink);
    }

    log::info!(
        "Finished on level {} ({:?}), hp {:.2}/{:.0}",
        state.level_index + 1,
        state.phase,
        state.player.hp,
        state.player.max_hp
    );

    match serde_json::to_string_pretty(&FrameView::capture(&state)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize frame view: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() -> ExitCode {
    // Hosts embed the library directly; there is no headless runner on the web
    ExitCode::SUCCESS
}

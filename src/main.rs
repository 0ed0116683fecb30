//! Nova Strike entry point
//!
//! Headless demo run: a scripted autopilot drives the simulation for a few
//! thousand steps and logs the outcome. Rendering frontends consume the
//! library crate instead of this binary.

use std::path::Path;

use glam::Vec2;

use nova_strike::audio::{Mixer, NullSink};
use nova_strike::consts::*;
use nova_strike::settings::Settings;
use nova_strike::sim::{Difficulty, GameEvent, GamePhase, GameState, TickInput, tick};

const DEMO_SEED: u64 = 0xC0FFEE;
const DEMO_STEPS: u32 = 3600;

fn main() {
    env_logger::init();
    log::info!("Nova Strike (headless demo) starting...");

    let settings = Settings::load_from(Path::new("settings.json"));
    let mut mixer = Mixer::new(NullSink);
    mixer.set_master_volume(settings.master_volume);
    mixer.set_sfx_volume(settings.sfx_volume);

    let mut state = GameState::new(DEMO_SEED);
    state.open_difficulty_select();
    state.start_game(Difficulty::Normal);

    let mut input = TickInput::default();
    for step in 0..DEMO_STEPS {
        autopilot(&state, &mut input, step);
        tick(&mut state, &input, STEP_DT_MS);
        input.fire = false;

        for event in state.take_events() {
            match event {
                GameEvent::Sound(cue) => mixer.play(cue),
                GameEvent::AchievementUnlocked(id) => {
                    log::info!("[{}] {}", id.key(), id.description());
                }
                GameEvent::LevelUp(level) => log::info!("Autopilot reached level {level}"),
                GameEvent::GameOver { score } => {
                    log::info!("Autopilot shot down at {score} points");
                }
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let unlocked = state.achievements.iter().filter(|a| a.unlocked).count();
    log::info!(
        "Demo over: score {}, level {}, {unlocked} achievement(s) unlocked",
        state.score,
        state.level
    );
}

/// Chase the lowest enemy's column from a safe row and fire on a cadence.
fn autopilot(state: &GameState, input: &mut TickInput, step: u32) {
    let target = state
        .enemies
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| Vec2::new(e.pos.x + e.size.x / 2.0, WORLD_HEIGHT - 120.0));

    input.aim = target;
    input.fire = step % 6 == 0;
}

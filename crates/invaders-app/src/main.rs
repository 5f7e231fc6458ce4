use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use invaders_app::config::AppConfig;
use invaders_app::game_loop::spawn_game_loop;
use invaders_app::persistence::JsonHighScoreStore;
use invaders_app::state::AppState;
use invaders_core::commands::PlayerCommand;
use invaders_sim::collaborators::{NullScene, SilentAudio};

fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(env_filter)
        .init();
}

/// Reads one JSON `PlayerCommand` per line and forwards it to the loop.
/// Stops at end of input or once the loop has gone away.
fn spawn_stdin_reader(state: Arc<AppState>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("starfall-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" {
                    if let Err(err) = state.shutdown() {
                        warn!(error = %err, "could not request shutdown");
                    }
                    break;
                }
                match serde_json::from_str::<PlayerCommand>(line) {
                    Ok(command) => {
                        if let Err(err) = state.send(command) {
                            warn!(error = %err, "dropping command");
                            break;
                        }
                    }
                    Err(err) => warn!(error = %err, line, "bad command line"),
                }
            }
        })?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    info!(
        high_score_path = %config.high_score_path.display(),
        tick_rate = config.tick_rate,
        "starting starfall"
    );

    let state = Arc::new(AppState::new());
    let store = JsonHighScoreStore::new(config.high_score_path.clone());
    let (tx, handle) = spawn_game_loop(
        config,
        NullScene::new(),
        SilentAudio,
        store,
        state.latest_snapshot.clone(),
    )
    .context("spawning game loop")?;
    state.attach(tx)?;

    spawn_stdin_reader(state.clone()).context("spawning input reader")?;

    let exit = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    if let Some(snapshot) = state.snapshot()? {
        info!(
            ?exit,
            score = snapshot.score,
            high_score = snapshot.high_score,
            level = snapshot.level,
            "session ended"
        );
    }
    Ok(())
}

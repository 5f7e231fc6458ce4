//! Game loop thread: runs the simulation engine at the configured rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via an `mpsc` channel; snapshots are stored in
//! shared state for polling. The engine is fed measured wall-clock time, so
//! a late frame advances timers by the real gap.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use invaders_core::state::HudSnapshot;
use invaders_sim::collaborators::{AudioSink, HighScoreStore, Scene};
use invaders_sim::engine::SimulationEngine;

use crate::config::AppConfig;
use crate::state::GameLoopCommand;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    GameOver,
    Shutdown,
    Disconnected,
    TimeLimit,
}

/// Splits loop wall-clock time into whole-millisecond engine steps.
///
/// Steps are measured against the loop start, so the sub-millisecond part
/// of each frame carries into the next step instead of being dropped.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    sent_ms: u64,
}

impl FrameClock {
    pub fn new(start: Instant) -> Self {
        Self { start, sent_ms: 0 }
    }

    /// Milliseconds to hand the engine for a tick observed at `now`.
    pub fn step(&mut self, now: Instant) -> u64 {
        let total_ms = now.saturating_duration_since(self.start).as_millis() as u64;
        let step = total_ms.saturating_sub(self.sent_ms);
        self.sent_ms += step;
        step
    }

    /// Total milliseconds handed out so far.
    pub fn sent_ms(&self) -> u64 {
        self.sent_ms
    }
}

/// Nominal duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawn the game loop in a new thread with the given collaborators.
///
/// Returns the command sender and a handle yielding the exit reason.
pub fn spawn_game_loop<S, A, H>(
    config: AppConfig,
    scene: S,
    audio: A,
    store: H,
    latest_snapshot: Arc<Mutex<Option<HudSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopExit>)>
where
    S: Scene + Send + 'static,
    A: AudioSink + Send + 'static,
    H: HighScoreStore + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("starfall-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(config.sim.clone(), scene, audio, store);
            run_game_loop(&mut engine, &config, cmd_rx, &latest_snapshot)
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until game over, `Shutdown`, channel disconnect or
/// the configured time limit.
pub fn run_game_loop<S: Scene, A: AudioSink, H: HighScoreStore>(
    engine: &mut SimulationEngine<S, A, H>,
    config: &AppConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<HudSnapshot>>,
) -> LoopExit {
    let frame = tick_duration(config.tick_rate);
    let started = Instant::now();
    let deadline = config
        .max_runtime_secs
        .map(|secs| started + Duration::from_secs(secs));
    let mut clock = FrameClock::new(started);
    let mut next_tick_time = started + frame;

    info!(tick_rate = config.tick_rate, "game loop started");

    let exit = loop {
        // 1. Drain all pending commands
        let mut stop = None;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    stop = Some(LoopExit::Shutdown);
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    stop = Some(LoopExit::Disconnected);
                    break;
                }
            }
        }
        if let Some(exit) = stop {
            break exit;
        }

        // 2. Advance by the measured frame time
        let now = Instant::now();
        let snapshot = engine.advance(clock.step(now));
        let game_over = snapshot.is_game_over;

        // 3. Publish for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if game_over {
            break LoopExit::GameOver;
        }
        if deadline.is_some_and(|deadline| now >= deadline) {
            break LoopExit::TimeLimit;
        }

        // 4. Sleep until the next tick
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > frame * 2 {
            debug!("game loop fell behind, resetting schedule");
            next_tick_time = now;
        }
        next_tick_time += frame;
    };

    info!(?exit, "game loop stopped");
    exit
}

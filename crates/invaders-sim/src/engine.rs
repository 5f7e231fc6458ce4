//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the world and the three collaborators, processes
//! player commands, runs all systems in a fixed order and produces
//! `HudSnapshot`s. Completely headless: the scene, audio and high-score
//! store are traits, so tests drive it with recording doubles.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use invaders_core::commands::{Action, PlayerCommand};
use invaders_core::constants::*;
use invaders_core::enums::PlayerSlot;
use invaders_core::events::GameEvent;
use invaders_core::state::HudSnapshot;
use invaders_core::types::SimTime;

use crate::collaborators::{AudioSink, HighScoreStore, Scene};
use crate::session::SessionState;
use crate::systems;
use crate::world::World;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub starting_lives: u32,
    /// Countdown seconds per level.
    pub round_secs: u32,
    pub star_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_lives: STARTING_LIVES,
            round_secs: ROUND_SECS,
            star_count: STAR_COUNT,
        }
    }
}

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine<S, A, H> {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    scene: S,
    audio: A,
    store: H,
    /// Game-over bookkeeping already ran for this session.
    finished: bool,
}

impl<S: Scene, A: AudioSink, H: HighScoreStore> SimulationEngine<S, A, H> {
    /// Create an engine and set up the first session: ships, starfield and
    /// the first wave. A failing high-score store is logged and treated as
    /// having no record.
    pub fn new(config: SimConfig, mut scene: S, audio: A, mut store: H) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let high_score = match store.load_high_score() {
            Ok(best) => best.unwrap_or(0),
            Err(err) => {
                warn!(error = %err, "could not load high score");
                0
            }
        };

        let world = world_setup::setup_world(&mut scene, &mut rng, &config, high_score);
        info!(high_score, seed = ?config.seed, "session started");

        Self {
            world,
            time: SimTime::default(),
            config,
            rng,
            command_queue: VecDeque::new(),
            scene,
            audio,
            store,
            finished: false,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Shorthand for queuing a key edge.
    pub fn set_action(&mut self, player: PlayerSlot, action: Action, pressed: bool) {
        self.queue_command(PlayerCommand::SetAction {
            player,
            action,
            pressed,
        });
    }

    /// Advance by one nominal frame.
    pub fn tick(&mut self) -> HudSnapshot {
        self.advance(NOMINAL_FRAME_MS)
    }

    /// Advance by one tick that took `elapsed_ms` of wall-clock time.
    ///
    /// Once the game is over nothing runs and nothing is rendered until a
    /// `NewGame` command arrives.
    pub fn advance(&mut self, elapsed_ms: u64) -> HudSnapshot {
        self.process_commands();

        if self.world.session.is_game_over {
            return self.snapshot();
        }

        self.time.advance(elapsed_ms);
        let now = self.time.now_ms;

        systems::timers::run_scheduled(&mut self.world, &mut self.scene, now);
        systems::director::advance_if_due(
            &mut self.world,
            &mut self.scene,
            &mut self.audio,
            &mut self.rng,
            now,
        );

        if !self.world.session.is_paused {
            self.run_systems(now);
        }

        if self.world.session.is_game_over {
            self.finish_game();
        }

        systems::render_sync::run(&self.world, &mut self.scene);
        self.snapshot()
    }

    /// Run every system in pipeline order. Stops at the first stage that
    /// ends the game.
    fn run_systems(&mut self, now: u64) {
        let world = &mut self.world;
        let scene = &mut self.scene;
        let audio = &mut self.audio;
        let rng = &mut self.rng;

        systems::timers::run_modifiers(world, now);
        systems::timers::run_countdown(world, now);
        if world.session.is_game_over {
            return;
        }

        systems::environment::update_camera_shake(world, rng);
        systems::environment::drift_stars(world, rng);
        systems::environment::age_effects(world, scene);
        systems::environment::update_power_ups(world, scene, now);

        systems::ships::run_movement(world);
        systems::ships::update_crosshairs(world);
        systems::abilities::run(world, now);
        systems::shooting::run(world, scene, audio, now);

        systems::projectiles::advance_player_bullets(world, scene);
        systems::projectiles::enemy_fire(world, scene, audio, rng);

        systems::combat::enemy_bullets_vs_player_bullets(world, scene, audio, rng);
        systems::combat::enemy_bullets_vs_ships(world, scene, audio, now);
        if world.session.is_game_over {
            return;
        }

        systems::enemies::run(world, scene);
        systems::combat::player_bullets_vs_enemies(world, scene, audio, rng, now);
        systems::director::check_wave_clear(world, audio, now);
    }

    /// Game-over bookkeeping, once per session: cancel every pending
    /// effect, silence the alarm and persist a beaten high score.
    fn finish_game(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        self.world.scheduler.cancel_all();
        self.world.session.stop_alarm(&mut self.audio);
        self.world.session.is_invincible = false;
        for ship in self.world.ships.iter_mut() {
            ship.visible = true;
        }

        let session = &mut self.world.session;
        let new_high_score = session.score > session.high_score;
        if new_high_score {
            session.high_score = session.score;
            if let Err(err) = self.store.save_high_score(session.score) {
                warn!(error = %err, score = session.score, "could not save high score");
            }
        }

        info!(score = session.score, level = session.level, new_high_score, "game over");
        self.world.events.push(GameEvent::GameOver {
            final_score: session.score,
            new_high_score,
        });
    }

    /// Discard the session and start a fresh one, keeping the high score.
    pub fn new_game(&mut self) {
        let high_score = self.world.session.high_score;
        self.world.teardown(&mut self.scene);
        self.world =
            world_setup::setup_world(&mut self.scene, &mut self.rng, &self.config, high_score);
        self.time = SimTime::default();
        self.finished = false;
        info!(high_score, "new game");
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetAction {
                player,
                action,
                pressed,
            } => self.world.input.set(player, action, pressed),
            PlayerCommand::NewGame => self.new_game(),
        }
    }

    fn snapshot(&mut self) -> HudSnapshot {
        let events = std::mem::take(&mut self.world.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, events)
    }

    /// Whether the session is still being played.
    pub fn is_running(&self) -> bool {
        !self.world.session.is_game_over
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn session(&self) -> &SessionState {
        &self.world.session
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    /// Mutable world and scene together, for tests that stage entities.
    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut World, &mut S) {
        (&mut self.world, &mut self.scene)
    }
}

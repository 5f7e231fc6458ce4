//! Tests for the simulation engine, the per-tick systems and the death,
//! wave and game-over pipelines.

use std::collections::{HashMap, HashSet};

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use invaders_core::commands::{Action, PlayerCommand};
use invaders_core::components::PowerUp;
use invaders_core::constants::*;
use invaders_core::enums::*;
use invaders_core::events::GameEvent;
use invaders_core::state::HudSnapshot;
use invaders_core::types::{Color, Vec2, Vec3, VisualHandle};

use crate::collaborators::{
    AudioSink, HighScoreStore, MemoryHighScoreStore, NullScene, PersistenceError, Scene,
    SilentAudio, SpawnState,
};
use crate::engine::{SimConfig, SimulationEngine};
use crate::session::Cooldowns;
use crate::systems::{abilities, combat, enemies, environment, projectiles, ships, timers};
use crate::world::World;
use crate::world_setup::{self, spawn_enemy, spawn_enemy_bullet, spawn_player_bullet};

// ---- Recording doubles ----

#[derive(Debug, Default)]
struct RecordingScene {
    next: u64,
    live: HashSet<VisualHandle>,
    parents: HashMap<VisualHandle, VisualHandle>,
    despawned: Vec<VisualHandle>,
    stray_despawns: usize,
    tints: Vec<(VisualHandle, Color)>,
    renders: u64,
}

impl Scene for RecordingScene {
    fn spawn(&mut self, _kind: VisualKind, init: &SpawnState) -> VisualHandle {
        self.next += 1;
        let handle = VisualHandle(self.next);
        self.live.insert(handle);
        if let Some(parent) = init.parent {
            self.parents.insert(handle, parent);
        }
        handle
    }

    fn despawn(&mut self, handle: VisualHandle) {
        if !self.live.remove(&handle) {
            self.stray_despawns += 1;
            return;
        }
        self.despawned.push(handle);
        let children: Vec<VisualHandle> = self
            .parents
            .iter()
            .filter(|(_, parent)| **parent == handle)
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.parents.remove(&child);
            self.live.remove(&child);
        }
    }

    fn set_transform(&mut self, _: VisualHandle, _: Vec3, _: Vec3, _: f32) {}

    fn set_visible(&mut self, _: VisualHandle, _: bool) {}

    fn set_tint(&mut self, handle: VisualHandle, color: Color) {
        self.tints.push((handle, color));
    }

    fn set_opacity(&mut self, _: VisualHandle, _: f32) {}

    fn set_camera_shake(&mut self, _: Vec2) {}

    fn render(&mut self) {
        self.renders += 1;
    }
}

#[derive(Debug, Default)]
struct RecordingAudio {
    shots: u32,
    explosions: Vec<EnemyVariant>,
    level_completes: u32,
    alarm_starts: u32,
    alarm_stops: u32,
}

impl AudioSink for RecordingAudio {
    fn play_shoot(&mut self) {
        self.shots += 1;
    }
    fn play_explosion(&mut self, variant: EnemyVariant) {
        self.explosions.push(variant);
    }
    fn play_level_complete(&mut self) {
        self.level_completes += 1;
    }
    fn start_alarm_loop(&mut self) {
        self.alarm_starts += 1;
    }
    fn stop_alarm_loop(&mut self) {
        self.alarm_stops += 1;
    }
}

#[derive(Debug, Default)]
struct RecordingStore {
    best: Option<u64>,
    saves: Vec<u64>,
    fail: bool,
}

impl HighScoreStore for RecordingStore {
    fn load_high_score(&mut self) -> Result<Option<u64>, PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Unavailable("storage offline".into()));
        }
        Ok(self.best)
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Unavailable("storage offline".into()));
        }
        self.saves.push(score);
        self.best = Some(score);
        Ok(())
    }
}

type TestEngine = SimulationEngine<RecordingScene, RecordingAudio, RecordingStore>;

const STARS: usize = 4;

fn test_config() -> SimConfig {
    SimConfig {
        seed: Some(7),
        star_count: STARS,
        ..Default::default()
    }
}

fn make_engine_with(config: SimConfig, store: RecordingStore) -> TestEngine {
    SimulationEngine::new(
        config,
        RecordingScene::default(),
        RecordingAudio::default(),
        store,
    )
}

fn make_engine() -> TestEngine {
    make_engine_with(test_config(), RecordingStore::default())
}

/// A world with the first wave removed, for staging exact scenarios.
fn make_empty_world() -> (World, RecordingScene, RecordingAudio, ChaCha8Rng) {
    let mut scene = RecordingScene::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut world = world_setup::setup_world(&mut scene, &mut rng, &test_config(), 0);
    world.enemies.clear(&mut scene);
    world.events.clear();
    (world, scene, RecordingAudio::default(), rng)
}

fn stage_enemy(world: &mut World, scene: &mut RecordingScene, variant: EnemyVariant, position: Vec3) {
    let enemy = spawn_enemy(scene, variant, Formation::Wall, position, Color::WHITE);
    world.enemies.push(enemy);
}

fn stage_player_bullet(world: &mut World, scene: &mut RecordingScene, position: Vec3) {
    spawn_player_bullet(
        &mut world.player_bullets,
        scene,
        PlayerSlot::One,
        ShotKind::Bolt,
        position,
    );
}

fn run_ticks(engine: &mut TestEngine, count: usize) -> Vec<HudSnapshot> {
    (0..count).map(|_| engine.tick()).collect()
}

fn count_events(snapshots: &[HudSnapshot], pred: impl Fn(&GameEvent) -> bool) -> usize {
    snapshots
        .iter()
        .flat_map(|snap| snap.events.iter())
        .filter(|event| pred(event))
        .count()
}

// ---- Session setup ----

#[test]
fn test_first_wave_is_fifteen_normal_enemies() {
    let mut engine = make_engine();
    let world = engine.world();

    assert_eq!(world.enemies.len(), 15);
    assert!(world
        .enemies
        .iter()
        .all(|enemy| enemy.variant == EnemyVariant::Normal && enemy.health == 1));
    assert!(world
        .enemies
        .iter()
        .all(|enemy| enemy.formation == Formation::Circle));
    for enemy in world.enemies.iter() {
        assert_relative_eq!(enemy.position.z, -45.0);
    }

    let snap = engine.tick();
    assert_eq!(snap.lives, 3);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.wave, 1);
    assert_eq!(snap.time_left, 60);
    assert_eq!(snap.multiplier, 1);
    assert!(snap.events.iter().any(|event| matches!(
        event,
        GameEvent::WaveStarted {
            enemy_count: 15,
            ..
        }
    )));
}

#[test]
fn test_scene_holds_one_visual_per_entity_part() {
    let engine = make_engine();
    // Each ship: hull, shield, two crosshairs. Each enemy: root and body.
    assert_eq!(engine.scene().live.len(), 2 * 4 + STARS + 15 * 2);
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = make_engine();
    let mut engine_b = make_engine();
    for engine in [&mut engine_a, &mut engine_b] {
        engine.set_action(PlayerSlot::One, Action::Fire, true);
        engine.set_action(PlayerSlot::Two, Action::MoveLeft, true);
    }

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with the same seed");
    }
}

// ---- Scoring ----

#[test]
fn test_chained_kills_score_ten_ten_twenty() {
    let (mut world, mut scene, mut audio, mut rng) = make_empty_world();

    for (i, now) in [0_u64, 500, 1000].into_iter().enumerate() {
        let position = Vec3::new(i as f32 * 5.0, 0.0, -10.0);
        stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, position);
        stage_player_bullet(&mut world, &mut scene, position);
        combat::player_bullets_vs_enemies(&mut world, &mut scene, &mut audio, &mut rng, now);
    }

    let deltas: Vec<u64> = world
        .events
        .iter()
        .filter_map(|event| match event {
            GameEvent::ScoreChanged { delta, .. } => Some(*delta),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec![10, 10, 20]);
    assert_eq!(world.session.score, 40);
    assert_eq!(world.session.combo.combo, 3);
    assert_eq!(audio.explosions.len(), 3);
    assert!(world.enemies.is_empty());
    assert!(world.player_bullets.is_empty());
}

#[test]
fn test_combo_idle_reset_fires_after_window() {
    let (mut world, mut scene, mut audio, mut rng) = make_empty_world();
    stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, Vec3::new(0.0, 0.0, -10.0));
    stage_player_bullet(&mut world, &mut scene, Vec3::new(0.0, 0.0, -10.0));
    combat::player_bullets_vs_enemies(&mut world, &mut scene, &mut audio, &mut rng, 100);
    assert_eq!(world.session.combo.combo, 1);

    timers::run_scheduled(&mut world, &mut scene, 100 + COMBO_WINDOW_MS - 1);
    assert_eq!(world.session.combo.combo, 1);
    timers::run_scheduled(&mut world, &mut scene, 100 + COMBO_WINDOW_MS);
    assert_eq!(world.session.combo.combo, 0);
    assert_eq!(world.session.combo.multiplier, 1);
}

#[test]
fn test_damaged_enemy_flashes_then_reverts() {
    let (mut world, mut scene, mut audio, mut rng) = make_empty_world();
    let position = Vec3::new(0.0, 0.0, -10.0);
    stage_enemy(&mut world, &mut scene, EnemyVariant::Tank, position);
    stage_player_bullet(&mut world, &mut scene, position);

    combat::player_bullets_vs_enemies(&mut world, &mut scene, &mut audio, &mut rng, 0);

    let enemy = world.enemies.get(0).unwrap().clone();
    assert_eq!(enemy.health, 2);
    assert!(enemy.alive);
    assert_eq!(world.session.score, 0);
    assert_eq!(scene.tints.last(), Some(&(enemy.body, Color::RED)));

    timers::run_scheduled(&mut world, &mut scene, HIT_FLASH_MS);
    assert_eq!(scene.tints.last(), Some(&(enemy.body, enemy.color)));
}

#[test]
fn test_bullet_stops_at_first_hit_newest_enemy_first() {
    let (mut world, mut scene, mut audio, mut rng) = make_empty_world();
    let position = Vec3::new(0.0, 0.0, -10.0);
    stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, position);
    stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, position);
    let older = world.enemies.get(0).unwrap().visual;
    stage_player_bullet(&mut world, &mut scene, position);

    combat::player_bullets_vs_enemies(&mut world, &mut scene, &mut audio, &mut rng, 0);

    assert_eq!(world.enemies.len(), 1);
    assert_eq!(world.enemies.get(0).unwrap().visual, older);
    assert_eq!(world.session.score, 10);
}

// ---- Ship hits ----

#[test]
fn test_shield_absorbs_hit_before_lives() {
    let (mut world, mut scene, mut audio, _rng) = make_empty_world();
    world.session.shield_charges = 1;
    let ship = world.ship(PlayerSlot::One).position;

    spawn_enemy_bullet(&mut world.enemy_bullets, &mut scene, ship);
    combat::enemy_bullets_vs_ships(&mut world, &mut scene, &mut audio, 0);

    assert_eq!(world.session.shield_charges, 0);
    assert_eq!(world.session.lives, 3);
    assert!(!world.session.is_invincible);
    assert!(world.enemy_bullets.is_empty());
    assert_relative_eq!(world.session.camera_shake, SHAKE_SHIP_HIT);

    world.session.combo.combo = 4;
    spawn_enemy_bullet(&mut world.enemy_bullets, &mut scene, ship);
    combat::enemy_bullets_vs_ships(&mut world, &mut scene, &mut audio, 0);

    assert_eq!(world.session.lives, 2);
    assert_eq!(world.session.combo.combo, 0);
    assert!(world.session.is_invincible);
    assert!(world.events.contains(&GameEvent::LifeLost {
        lives_left: 2,
        cause: LifeLossCause::ShipHit
    }));
}

#[test]
fn test_invincibility_flickers_for_two_seconds() {
    let (mut world, mut scene, mut audio, _rng) = make_empty_world();
    let ship = world.ship(PlayerSlot::One).position;
    spawn_enemy_bullet(&mut world.enemy_bullets, &mut scene, ship);
    combat::enemy_bullets_vs_ships(&mut world, &mut scene, &mut audio, 0);
    assert!(world.session.is_invincible);

    // Bullets pass through while invincible.
    spawn_enemy_bullet(&mut world.enemy_bullets, &mut scene, ship);
    combat::enemy_bullets_vs_ships(&mut world, &mut scene, &mut audio, 0);
    assert_eq!(world.session.lives, 2);
    assert_eq!(world.enemy_bullets.len(), 1);

    timers::run_scheduled(&mut world, &mut scene, FLICKER_STEP_MS);
    assert!(!world.ship(PlayerSlot::One).visible);

    let last_step = FLICKER_STEP_MS * FLICKER_STEPS as u64;
    let mut now = FLICKER_STEP_MS;
    while now < last_step - FLICKER_STEP_MS {
        now += FLICKER_STEP_MS;
        timers::run_scheduled(&mut world, &mut scene, now);
    }
    assert!(world.session.is_invincible);

    timers::run_scheduled(&mut world, &mut scene, last_step);
    assert!(!world.session.is_invincible);
    assert!(world.ships.iter().all(|ship| ship.visible));
    assert_eq!(world.scheduler.pending(), 0);
}

// ---- Enemy bullets ----

#[test]
fn test_enemy_bullet_takes_two_hits() {
    let (mut world, mut scene, mut audio, mut rng) = make_empty_world();
    spawn_enemy_bullet(&mut world.enemy_bullets, &mut scene, Vec3::new(0.0, 0.0, -10.0));

    // The enemy bullet advances 0.4 before testing.
    stage_player_bullet(&mut world, &mut scene, Vec3::new(0.0, 0.0, -9.6));
    combat::enemy_bullets_vs_player_bullets(&mut world, &mut scene, &mut audio, &mut rng);
    assert_eq!(world.enemy_bullets.len(), 1);
    assert_eq!(world.enemy_bullets.get(0).unwrap().health, 1);
    assert!(world.player_bullets.is_empty());

    stage_player_bullet(&mut world, &mut scene, Vec3::new(0.0, 0.0, -9.2));
    combat::enemy_bullets_vs_player_bullets(&mut world, &mut scene, &mut audio, &mut rng);
    assert!(world.enemy_bullets.is_empty());
    assert_eq!(world.particles.len(), EXPLOSION_PARTICLES);
}

#[test]
fn test_enemy_fire_gated_by_level_and_single_bullet() {
    let (mut world, mut scene, mut audio, mut rng) = make_empty_world();
    for col in 0..15 {
        stage_enemy(
            &mut world,
            &mut scene,
            EnemyVariant::Normal,
            Vec3::new(col as f32, 0.0, -40.0),
        );
    }

    for _ in 0..2000 {
        projectiles::enemy_fire(&mut world, &mut scene, &mut audio, &mut rng);
    }
    assert!(world.enemy_bullets.is_empty(), "no return fire at level 1");

    world.session.level = 2;
    for _ in 0..2000 {
        projectiles::enemy_fire(&mut world, &mut scene, &mut audio, &mut rng);
    }
    assert_eq!(world.enemy_bullets.len(), 1);
    assert_eq!(world.enemy_bullets.get(0).unwrap().health, ENEMY_BULLET_HEALTH);
    assert!(world.session.alarm_active);
    assert_eq!(audio.alarm_starts, 1);
}

#[test]
fn test_alarm_stops_when_last_enemy_bullet_leaves() {
    let (mut world, mut scene, mut audio, _rng) = make_empty_world();
    world.session.start_alarm(&mut audio);
    spawn_enemy_bullet(&mut world.enemy_bullets, &mut scene, Vec3::new(9.0, 9.0, 15.5));

    combat::enemy_bullets_vs_ships(&mut world, &mut scene, &mut audio, 0);

    assert!(world.enemy_bullets.is_empty());
    assert!(!world.session.alarm_active);
    assert_eq!(audio.alarm_stops, 1);
}

// ---- Enemies ----

#[test]
fn test_breach_drops_enemy_without_penalty() {
    let (mut world, mut scene, _audio, _rng) = make_empty_world();
    stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, Vec3::new(0.0, 0.0, BREACH_Z - 0.001));

    enemies::run(&mut world, &mut scene);

    assert!(world.enemies.is_empty());
    assert_eq!(world.session.lives, 3);
    assert_eq!(world.session.score, 0);
    assert!(world.events.contains(&GameEvent::EnemyBreached {
        variant: EnemyVariant::Normal
    }));
}

#[test]
fn test_crosshairs_follow_nearest_enemy() {
    let (mut world, mut scene, _audio, _rng) = make_empty_world();
    ships::update_crosshairs(&mut world);
    assert_relative_eq!(world.ship(PlayerSlot::One).aim_z, CROSSHAIR_DEFAULT_Z);

    stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, Vec3::new(0.0, 0.0, -30.0));
    stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, Vec3::new(0.0, 0.0, -12.0));
    ships::update_crosshairs(&mut world);
    assert_relative_eq!(world.ship(PlayerSlot::Two).aim_z, -12.0);
}

#[test]
fn test_crosshairs_aim_before_enemies_move_or_die() {
    let mut engine = make_engine();
    {
        let (world, scene) = engine.parts_mut();
        world.enemies.clear(scene);
        stage_enemy(world, scene, EnemyVariant::Normal, Vec3::new(0.0, 0.0, -10.0));
        stage_enemy(world, scene, EnemyVariant::Normal, Vec3::new(5.0, 0.0, -30.0));
        stage_player_bullet(world, scene, Vec3::new(0.0, 0.0, -10.0));
    }

    let snap = engine.tick();

    assert_eq!(snap.score, 10, "the near enemy dies in this tick's combat pass");
    assert_eq!(engine.world().enemies.len(), 1);
    for slot in PlayerSlot::ALL {
        assert_relative_eq!(engine.world().ship(slot).aim_z, -10.0);
    }
}

#[test]
fn test_ship_movement_is_clamped() {
    let (mut world, _scene, _audio, _rng) = make_empty_world();
    world.input.set(PlayerSlot::One, Action::MoveLeft, true);
    world.input.set(PlayerSlot::Two, Action::MoveUp, true);
    for _ in 0..500 {
        ships::run_movement(&mut world);
    }
    let one = world.ship(PlayerSlot::One).position;
    let two = world.ship(PlayerSlot::Two).position;
    assert!(one.x >= -SHIP_BOUND_X - SHIP_SPEED && one.x <= -SHIP_BOUND_X + SHIP_SPEED);
    assert!(two.y <= SHIP_BOUND_Y + SHIP_SPEED && two.y >= SHIP_BOUND_Y - SHIP_SPEED);
}

// ---- Abilities ----

#[test]
fn test_bomb_zeroes_health_then_combat_pass_kills() {
    let (mut world, mut scene, mut audio, mut rng) = make_empty_world();
    for (x, z) in [(0.0, -20.0), (3.0, -10.0), (6.0, -30.0), (9.0, -40.0), (12.0, -55.0)] {
        stage_enemy(&mut world, &mut scene, EnemyVariant::Normal, Vec3::new(x, 0.0, z));
    }
    let full_health = world.enemies.get(0).unwrap().health;
    world.input.set(PlayerSlot::One, Action::Bomb, true);

    abilities::run(&mut world, 0);

    let healths: Vec<u32> = world.enemies.iter().map(|enemy| enemy.health).collect();
    assert_eq!(healths, vec![0, 0, full_health, full_health, full_health]);
    assert!(world.enemies.iter().all(|enemy| enemy.alive), "reward resolves in the combat pass");
    assert_eq!(world.session.score, 0);
    assert_relative_eq!(world.session.camera_shake, SHAKE_BOMB);
    assert!(!world.input.is_held(PlayerSlot::One, Action::Bomb));

    combat::player_bullets_vs_enemies(&mut world, &mut scene, &mut audio, &mut rng, 0);

    assert_eq!(world.enemies.len(), 3);
    assert!(world.enemies.iter().all(|enemy| enemy.position.z <= BOMB_MIN_Z));
    assert_eq!(world.session.score, 20);
    assert_eq!(audio.explosions.len(), 2);

    // Cooldown blocks a second press.
    world.input.set(PlayerSlot::One, Action::Bomb, true);
    world.enemies.get_mut(0).unwrap().position.z = -10.0;
    abilities::run(&mut world, 16);
    assert_eq!(world.enemies.get(0).unwrap().health, full_health);
}

#[test]
fn test_player_two_abilities_are_ignored() {
    let (mut world, _scene, _audio, _rng) = make_empty_world();
    world.input.set(PlayerSlot::Two, Action::Dash, true);
    abilities::run(&mut world, 0);
    assert_relative_eq!(world.ship(PlayerSlot::Two).position.z, 0.0);
    assert!(world.session.cooldowns.is_ready(Ability::Dash));
}

#[test]
fn test_dash_reverts_and_flag_self_clears() {
    let mut engine = make_engine();
    engine.set_action(PlayerSlot::One, Action::Dash, true);

    engine.tick();
    assert_relative_eq!(engine.world().ship(PlayerSlot::One).position.z, -DASH_DISTANCE);
    assert!(!engine.world().input.is_held(PlayerSlot::One, Action::Dash));

    let snap = run_ticks(&mut engine, 20).pop().unwrap();
    assert_relative_eq!(engine.world().ship(PlayerSlot::One).position.z, 0.0);
    assert_eq!(snap.cooldowns.dash, 5);
}

#[test]
fn test_slow_time_holds_then_recovers() {
    let mut engine = make_engine();
    engine.set_action(PlayerSlot::One, Action::SlowTime, true);

    engine.tick();
    assert_relative_eq!(engine.session().time_scale, SLOW_TIME_SCALE);

    // Tick 300 lands at 4800 ms, still inside the hold.
    run_ticks(&mut engine, 299);
    assert_relative_eq!(engine.session().time_scale, SLOW_TIME_SCALE);

    run_ticks(&mut engine, 20);
    let scale = engine.session().time_scale;
    assert!(scale > SLOW_TIME_SCALE && scale < 1.0, "ramping, got {scale}");

    run_ticks(&mut engine, 100);
    assert_relative_eq!(engine.session().time_scale, 1.0);
}

#[test]
fn test_cooldown_view_rounds_up_to_seconds() {
    let mut cooldowns = Cooldowns::default();
    cooldowns.start(Ability::Dash);
    cooldowns.tick(999.0);
    let view = cooldowns.view();
    assert_eq!(view.dash, 5);
    assert_eq!(view.slow, 0);

    cooldowns.tick(10_000.0);
    assert_eq!(cooldowns.view().dash, 0);
    assert!(cooldowns.is_ready(Ability::Dash));
}

// ---- Power-ups ----

fn stage_power_up(world: &mut World, scene: &mut RecordingScene, kind: PowerUpKind) {
    let position = world.ship(PlayerSlot::Two).position;
    let visual = scene.spawn(VisualKind::PowerUp(kind), &SpawnState::at(position));
    world.power_ups.push(PowerUp {
        visual,
        kind,
        position,
        spin: 0.0,
        active: true,
    });
}

#[test]
fn test_powerup_pickup_overwrites_and_expires() {
    let (mut world, mut scene, _audio, _rng) = make_empty_world();

    stage_power_up(&mut world, &mut scene, PowerUpKind::Rapid);
    environment::update_power_ups(&mut world, &mut scene, 1_000);
    assert!(world.session.has_powerup(PowerUpKind::Rapid));

    stage_power_up(&mut world, &mut scene, PowerUpKind::Spread);
    environment::update_power_ups(&mut world, &mut scene, 2_000);
    assert!(world.session.has_powerup(PowerUpKind::Spread));
    assert!(world.power_ups.is_empty());

    stage_power_up(&mut world, &mut scene, PowerUpKind::Shield);
    environment::update_power_ups(&mut world, &mut scene, 3_000);
    assert_eq!(world.session.shield_charges, SHIELD_CHARGES_PER_PICKUP);
    assert!(world.session.has_powerup(PowerUpKind::Spread), "shield never uses the slot");

    timers::run_modifiers(&mut world, 2_000 + POWERUP_DURATION_MS);
    assert!(world.session.active_powerup.is_some());
    timers::run_modifiers(&mut world, 2_001 + POWERUP_DURATION_MS);
    assert!(world.session.active_powerup.is_none());
    assert!(world.events.contains(&GameEvent::PowerUpExpired {
        kind: PowerUpKind::Spread
    }));
    assert!(world.events.contains(&GameEvent::PowerUpCollected {
        kind: PowerUpKind::Rapid,
        player: PlayerSlot::Two
    }));
}

#[test]
fn test_spread_fires_three_bolts() {
    let mut engine = make_engine();
    {
        let (world, _scene) = engine.parts_mut();
        world.session.active_powerup = Some(crate::session::ActivePowerUp {
            kind: PowerUpKind::Spread,
            expires_at_ms: 60_000,
        });
    }
    engine.set_action(PlayerSlot::One, Action::Fire, true);
    engine.tick();

    assert_eq!(engine.world().player_bullets.len(), 3);
    assert_eq!(engine.world().muzzle_flashes.len(), 3);
    assert_eq!(engine.audio().shots, 1);
}

// ---- Waves ----

#[test]
fn test_wave_clear_awards_bonus_once_then_advances() {
    let mut engine = make_engine();
    {
        let (world, _scene) = engine.parts_mut();
        for enemy in world.enemies.iter_mut() {
            enemy.alive = false;
        }
    }

    let first = engine.tick();
    assert_eq!(first.score, 60 * TIME_BONUS_PER_SEC);
    assert_eq!(first.wave_phase, WavePhase::Transitioning);
    assert!(first.is_paused);

    let renders_before = engine.scene().renders;
    let paused = run_ticks(&mut engine, 100);
    assert_eq!(engine.scene().renders, renders_before + 100, "paused ticks still render");
    assert!(paused.iter().all(|snap| snap.score == first.score));
    assert_eq!(engine.audio().level_completes, 1);

    let resumed = run_ticks(&mut engine, 30);
    let all: Vec<HudSnapshot> = std::iter::once(first).chain(paused).chain(resumed).collect();
    assert_eq!(
        count_events(&all, |event| matches!(event, GameEvent::WaveCleared { .. })),
        1
    );
    assert_eq!(engine.session().wave, 2);
    assert_eq!(engine.session().wave_phase, WavePhase::Active);
    assert!(!engine.session().is_paused);
    assert_eq!(engine.world().enemies.len(), 15);
    assert!(engine
        .world()
        .enemies
        .iter()
        .all(|enemy| enemy.formation == Formation::V));
}

#[test]
fn test_third_wave_clear_advances_level() {
    let mut engine = make_engine();
    {
        let (world, _scene) = engine.parts_mut();
        world.session.wave = 3;
        world.session.time_left = 12;
        for enemy in world.enemies.iter_mut() {
            enemy.alive = false;
        }
    }

    run_ticks(&mut engine, 130);

    let session = engine.session();
    assert_eq!(session.level, 2);
    assert_eq!(session.wave, 1);
    assert_eq!(session.time_left, 60);
    assert_eq!(session.score, 12 * TIME_BONUS_PER_SEC);
    assert_eq!(engine.world().enemies.len(), 4 * 6);
}

// ---- Countdown & game over ----

#[test]
fn test_countdown_expiry_restarts_round() {
    let mut engine = make_engine_with(
        SimConfig {
            round_secs: 1,
            ..test_config()
        },
        RecordingStore::default(),
    );
    {
        let (world, _scene) = engine.parts_mut();
        world.session.combo.combo = 2;
    }

    let snaps = run_ticks(&mut engine, 70);

    assert_eq!(engine.session().lives, 2);
    assert_eq!(engine.session().time_left, 1);
    assert_eq!(engine.session().combo.combo, 2, "timeout leaves the combo alone");
    assert!(!engine.session().is_invincible);
    assert_eq!(
        count_events(&snaps, |event| matches!(
            event,
            GameEvent::LifeLost {
                cause: LifeLossCause::TimeExpired,
                ..
            }
        )),
        1
    );
}

#[test]
fn test_game_over_saves_once_and_stops_ticking() {
    let mut engine = make_engine_with(
        SimConfig {
            round_secs: 1,
            starting_lives: 1,
            ..test_config()
        },
        RecordingStore {
            best: Some(30),
            ..Default::default()
        },
    );
    {
        let (world, _scene) = engine.parts_mut();
        world.session.score = 50;
    }

    let snaps = run_ticks(&mut engine, 70);
    assert!(!engine.is_running());
    assert_eq!(engine.store().saves, vec![50]);
    assert_eq!(
        count_events(&snaps, |event| matches!(
            event,
            GameEvent::GameOver {
                final_score: 50,
                new_high_score: true
            }
        )),
        1
    );

    let renders = engine.scene().renders;
    let tick = engine.time().tick;
    let after = run_ticks(&mut engine, 50);
    assert_eq!(engine.scene().renders, renders);
    assert_eq!(engine.time().tick, tick);
    assert_eq!(engine.store().saves, vec![50]);
    assert!(after.iter().all(|snap| snap.is_game_over && snap.high_score == 50));
}

#[test]
fn test_lower_score_is_not_saved() {
    let mut engine = make_engine_with(
        SimConfig {
            round_secs: 1,
            starting_lives: 1,
            ..test_config()
        },
        RecordingStore {
            best: Some(500),
            ..Default::default()
        },
    );
    run_ticks(&mut engine, 70);
    assert!(!engine.is_running());
    assert!(engine.store().saves.is_empty());
    assert_eq!(engine.session().high_score, 500);
}

#[test]
fn test_failing_store_does_not_interrupt_play() {
    let mut engine = make_engine_with(
        SimConfig {
            round_secs: 1,
            starting_lives: 1,
            ..test_config()
        },
        RecordingStore {
            fail: true,
            ..Default::default()
        },
    );
    assert_eq!(engine.session().high_score, 0);
    {
        let (world, _scene) = engine.parts_mut();
        world.session.score = 10;
    }

    let snap = run_ticks(&mut engine, 70).pop().unwrap();

    assert!(snap.is_game_over);
    assert_eq!(snap.high_score, 10);
    assert!(engine.store().saves.is_empty());
}

#[test]
fn test_new_game_resets_session_and_keeps_high_score() {
    let mut engine = make_engine_with(
        SimConfig {
            round_secs: 1,
            starting_lives: 1,
            ..test_config()
        },
        RecordingStore::default(),
    );
    {
        let (world, _scene) = engine.parts_mut();
        world.session.score = 80;
    }
    run_ticks(&mut engine, 70);
    assert!(!engine.is_running());

    engine.queue_command(PlayerCommand::NewGame);
    let snap = engine.tick();

    assert!(!snap.is_game_over);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.high_score, 80);
    assert_eq!(snap.lives, 1);
    assert_eq!(engine.scene().live.len(), 2 * 4 + STARS + 15 * 2);
    assert_eq!(engine.scene().stray_despawns, 0);
}

// ---- Lifecycle invariants ----

#[test]
fn test_every_visual_despawned_at_most_once() {
    let mut engine = make_engine();
    engine.set_action(PlayerSlot::One, Action::Fire, true);
    engine.set_action(PlayerSlot::Two, Action::Fire, true);
    engine.set_action(PlayerSlot::Two, Action::MoveRight, true);

    let snaps = run_ticks(&mut engine, 600);

    let scene = engine.scene();
    assert_eq!(scene.stray_despawns, 0);
    let unique: HashSet<VisualHandle> = scene.despawned.iter().copied().collect();
    assert_eq!(unique.len(), scene.despawned.len());
    assert!(!scene.despawned.is_empty(), "bullets should have left the field");

    let scores: Vec<u64> = snaps.iter().map(|snap| snap.score).collect();
    assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]), "score never decreases");
}

fn assert_registries_compacted(world: &World, tick: usize) {
    assert_eq!(world.enemies.len(), world.enemies.live_count(), "enemies at tick {tick}");
    assert_eq!(
        world.player_bullets.len(),
        world.player_bullets.live_count(),
        "player bullets at tick {tick}"
    );
    assert_eq!(
        world.enemy_bullets.len(),
        world.enemy_bullets.live_count(),
        "enemy bullets at tick {tick}"
    );
    assert_eq!(world.power_ups.len(), world.power_ups.live_count(), "power-ups at tick {tick}");
    assert_eq!(world.particles.len(), world.particles.live_count(), "particles at tick {tick}");
    assert_eq!(
        world.muzzle_flashes.len(),
        world.muzzle_flashes.live_count(),
        "muzzle flashes at tick {tick}"
    );
}

#[test]
fn test_no_dead_entries_survive_a_tick() {
    let mut engine = make_engine();
    {
        // Level 2 so enemy bullets are in play too, plus targets in the
        // wing guns' lanes.
        let (world, scene) = engine.parts_mut();
        world.session.level = 2;
        for x in [-4.5, 0.5, -0.5, 4.5] {
            stage_enemy(world, scene, EnemyVariant::Normal, Vec3::new(x, 0.0, -20.0));
        }
    }
    engine.set_action(PlayerSlot::One, Action::Fire, true);
    engine.set_action(PlayerSlot::Two, Action::Fire, true);

    let mut saw_particles = false;
    for tick in 0..900 {
        engine.tick();
        assert_registries_compacted(engine.world(), tick);
        saw_particles |= !engine.world().particles.is_empty();
        if !engine.is_running() {
            break;
        }
    }
    assert!(saw_particles, "some enemy should have been destroyed");
}

#[test]
fn test_null_scene_counts_root_visuals_only() {
    let mut engine = SimulationEngine::new(
        test_config(),
        NullScene::new(),
        SilentAudio,
        MemoryHighScoreStore::default(),
    );
    // Each ship: hull and two crosshairs. Each enemy: one root.
    let roots = 2 * 3 + STARS + 15;
    assert_eq!(engine.scene().live_visuals(), roots);

    engine.set_action(PlayerSlot::One, Action::Fire, true);
    for _ in 0..120 {
        engine.tick();
    }
    assert_eq!(engine.scene().frames_rendered(), 120);

    engine.new_game();
    assert_eq!(engine.scene().live_visuals(), roots);
}

#[test]
fn test_fire_interval_limits_volleys() {
    let mut engine = make_engine();
    engine.set_action(PlayerSlot::One, Action::Fire, true);

    // 64 ticks of 16 ms = 1024 ms; a volley needs strictly more than 250 ms.
    run_ticks(&mut engine, 64);

    assert_eq!(engine.audio().shots, 4);
}

//! Simulation constants and tuning parameters.
//!
//! Distances are scene units, per-tick speeds assume the nominal 60 Hz
//! frame, durations are wall-clock milliseconds.

/// Target tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Fixed cooldown decrement per frame (ms), scaled by the time-scale.
pub const FRAME_MS: f32 = 16.0;

/// Nominal frame duration handed to the engine when no measured time exists.
pub const NOMINAL_FRAME_MS: u64 = 16;

// --- Session ---

pub const STARTING_LIVES: u32 = 3;

/// Countdown seconds per level.
pub const ROUND_SECS: u32 = 60;

/// Countdown decrement interval (ms).
pub const COUNTDOWN_STEP_MS: u64 = 1000;

pub const WAVES_PER_LEVEL: u32 = 3;

/// Pause between a cleared wave and the next spawn (ms).
pub const WAVE_TRANSITION_MS: u64 = 2000;

/// Points per remaining countdown second on wave clear.
pub const TIME_BONUS_PER_SEC: u64 = 5;

// --- Scoring ---

pub const KILL_POINTS: u64 = 10;

/// Window inside which consecutive kills extend the combo (ms).
pub const COMBO_WINDOW_MS: u64 = 2000;

/// Kills per multiplier step.
pub const COMBO_STEP: u32 = 3;

pub const MAX_MULTIPLIER: u32 = 5;

// --- Ships ---

pub const SHIP_SPEED: f32 = 0.15;
pub const SHIP_BOUND_X: f32 = 10.0;
pub const SHIP_BOUND_Y: f32 = 8.0;
pub const SHIP_ONE_START_X: f32 = -2.0;
pub const SHIP_TWO_START_X: f32 = 2.0;

/// Lateral offset of the wing guns and crosshairs.
pub const WING_OFFSET: f32 = 2.5;

/// Crosshair depth when no enemy is alive.
pub const CROSSHAIR_DEFAULT_Z: f32 = -100.0;

// --- Shooting ---

pub const FIRE_INTERVAL_MS: u64 = 250;
pub const RAPID_FIRE_INTERVAL_MS: u64 = 100;
pub const SPREAD_OFFSET: f32 = 1.5;
pub const MUZZLE_OFFSET_Z: f32 = 1.0;
pub const LASER_OFFSET_Z: f32 = 25.0;
pub const LASER_LIFETIME_TICKS: u32 = 10;
pub const MUZZLE_FLASH_LIFETIME_TICKS: u32 = 5;

pub const PLAYER_BULLET_SPEED: f32 = 0.6;
pub const PLAYER_BULLET_MIN_Z: f32 = -60.0;

pub const ENEMY_BULLET_SPEED: f32 = 0.4;
pub const ENEMY_BULLET_HEALTH: u32 = 2;
pub const ENEMY_FIRE_MIN_LEVEL: u32 = 2;
/// Per-enemy, per-level, per-tick chance to open fire.
pub const ENEMY_FIRE_CHANCE_PER_LEVEL: f32 = 0.001;

/// Depth past which bullets, power-ups and stars leave the play field.
pub const NEAR_FIELD_Z: f32 = 15.0;

// --- Collision thresholds ---

pub const BULLET_ENEMY_HIT_RADIUS: f32 = 1.5;
pub const BULLET_BULLET_HIT_RADIUS: f32 = 1.0;
pub const BULLET_SHIP_HIT_RADIUS: f32 = 2.0;
pub const POWERUP_PICKUP_RADIUS: f32 = 1.5;

/// Depth at which an enemy passes the defense line and is dropped.
pub const BREACH_Z: f32 = 20.0;

// --- Enemies ---

pub const ENEMY_BASE_ROWS: u32 = 3;
pub const ENEMY_BASE_COLS: u32 = 5;
pub const ENEMY_GRID_SPACING: f32 = 2.5;
pub const ENEMY_START_Z: f32 = -40.0;
pub const ENEMY_START_Z_PER_LEVEL: f32 = 5.0;
pub const ENEMY_BASE_SPEED: f32 = 0.015;
pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.005;
pub const ENEMY_SPIN_RATE: f32 = 0.01;

pub const CIRCLE_RADIUS: f32 = 10.0;
pub const CIRCLE_PHASE_RATE: f32 = 0.02;
pub const V_LIFT_PER_COL: f32 = 1.5;
pub const ZIGZAG_PHASE_RATE: f32 = 0.05;
pub const ZIGZAG_AMPLITUDE: f32 = 3.0;

pub const SCOUT_MIN_LEVEL: u32 = 3;
pub const SCOUT_CHANCE: f32 = 0.2;
pub const TANK_MIN_LEVEL: u32 = 5;
pub const TANK_CHANCE: f32 = 0.15;
pub const ZIGZAG_MIN_LEVEL: u32 = 7;
pub const ZIGZAG_CHANCE: f32 = 0.1;

/// How long a damaged enemy body stays tinted red (ms).
pub const HIT_FLASH_MS: u64 = 100;

// --- Power-ups ---

pub const POWERUP_DROP_CHANCE: f64 = 0.3;
pub const POWERUP_DRIFT: f32 = 0.1;
pub const POWERUP_SPIN_RATE: f32 = 0.05;
pub const POWERUP_DURATION_MS: u64 = 10_000;
pub const SHIELD_CHARGES_PER_PICKUP: u32 = 3;

// --- Abilities ---

pub const DASH_DISTANCE: f32 = 5.0;
pub const DASH_REVERT_MS: u64 = 200;
pub const DASH_COOLDOWN_MS: f32 = 5000.0;

pub const SLOW_TIME_SCALE: f32 = 0.3;
pub const SLOW_TIME_DURATION_MS: u64 = 5000;
pub const SLOW_TIME_COOLDOWN_MS: f32 = 15_000.0;
/// Time-scale recovery per tick once the forced slow period ends.
pub const TIME_SCALE_RECOVERY: f32 = 0.01;

/// Enemies closer than this depth are caught by the bomb.
pub const BOMB_MIN_Z: f32 = -30.0;
pub const BOMB_COOLDOWN_MS: f32 = 20_000.0;

// --- Invincibility ---

pub const FLICKER_STEP_MS: u64 = 200;
pub const FLICKER_STEPS: u32 = 10;

// --- Screen shake ---

pub const SHAKE_KILL: f32 = 0.2;
pub const SHAKE_SHIP_HIT: f32 = 0.5;
pub const SHAKE_BOMB: f32 = 1.0;
pub const SHAKE_DECAY: f32 = 0.9;
pub const SHAKE_CUTOFF: f32 = 0.01;

// --- Effects ---

pub const EXPLOSION_PARTICLES: usize = 8;
pub const PARTICLE_LIFETIME_TICKS: u32 = 60;
/// Particle velocity spread per axis (full width).
pub const PARTICLE_SPREAD: f32 = 0.3;
pub const PARTICLE_MAX_SPIN: f32 = 0.2;

pub const STAR_COUNT: usize = 200;
pub const STAR_DRIFT: f32 = 0.2;
pub const STAR_MIN_RADIUS: f32 = 15.0;
pub const STAR_RADIUS_SPREAD: f32 = 30.0;
pub const STAR_FAR_Z: f32 = -20.0;
pub const STAR_DEPTH_SPREAD: f32 = 100.0;

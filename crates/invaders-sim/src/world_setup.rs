//! Entity spawn factories for setting up the simulation world.
//!
//! Every factory asks the scene for the visual first and stores the
//! returned handle on the record it pushes.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use invaders_core::components::*;
use invaders_core::constants::*;
use invaders_core::enums::*;
use invaders_core::events::GameEvent;
use invaders_core::types::{Color, Lifetime, Vec3};
use invaders_formations::layout::{anchor, formation_for_wave, start_z, GridSize};
use invaders_formations::profiles::{enemy_color, get_profile, roll_variant};

use crate::collaborators::{Scene, SpawnState};
use crate::engine::SimConfig;
use crate::input::InputState;
use crate::registry::Registry;
use crate::scheduler::Scheduler;
use crate::session::SessionState;
use crate::world::World;

/// Build a fresh world: both ships, the starfield and the first wave.
pub fn setup_world(
    scene: &mut dyn Scene,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    high_score: u64,
) -> World {
    let ships = [
        spawn_ship(scene, PlayerSlot::One),
        spawn_ship(scene, PlayerSlot::Two),
    ];

    let mut world = World {
        ships,
        enemies: Registry::new(),
        player_bullets: Registry::new(),
        enemy_bullets: Registry::new(),
        particles: Registry::new(),
        muzzle_flashes: Registry::new(),
        power_ups: Registry::new(),
        stars: Registry::new(),
        session: SessionState::new(config, high_score),
        input: InputState::default(),
        scheduler: Scheduler::new(),
        events: Vec::new(),
    };

    spawn_starfield(&mut world.stars, scene, rng, config.star_count);
    spawn_wave(&mut world, scene, rng);
    world
}

/// Spawn a ship with its shield bubble and both crosshairs.
pub fn spawn_ship(scene: &mut dyn Scene, slot: PlayerSlot) -> Ship {
    let start_x = match slot {
        PlayerSlot::One => SHIP_ONE_START_X,
        PlayerSlot::Two => SHIP_TWO_START_X,
    };
    let position = Vec3::new(start_x, 0.0, 0.0);
    let visual = scene.spawn(VisualKind::Ship(slot), &SpawnState::at(position));
    let shield_visual = scene.spawn(
        VisualKind::Shield(slot),
        &SpawnState::at(Vec3::ZERO).child_of(visual),
    );
    let aim = Vec3::new(start_x, 0.0, CROSSHAIR_DEFAULT_Z);
    let crosshair_left = scene.spawn(
        VisualKind::Crosshair(slot, CrosshairSide::Left),
        &SpawnState::at(aim - Vec3::X * WING_OFFSET),
    );
    let crosshair_right = scene.spawn(
        VisualKind::Crosshair(slot, CrosshairSide::Right),
        &SpawnState::at(aim + Vec3::X * WING_OFFSET),
    );
    scene.set_visible(shield_visual, false);

    Ship {
        slot,
        visual,
        shield_visual,
        crosshair_left,
        crosshair_right,
        position,
        aim_z: CROSSHAIR_DEFAULT_Z,
        visible: true,
    }
}

/// Random point in the star shell: radius 15..45 around the z axis,
/// depth -20..-120.
pub fn random_star_position(rng: &mut ChaCha8Rng) -> Vec3 {
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let radius = STAR_MIN_RADIUS + rng.gen::<f32>() * STAR_RADIUS_SPREAD;
    Vec3::new(
        angle.cos() * radius,
        angle.sin() * radius,
        STAR_FAR_Z - rng.gen::<f32>() * STAR_DEPTH_SPREAD,
    )
}

pub fn spawn_starfield(
    stars: &mut Registry<Star>,
    scene: &mut dyn Scene,
    rng: &mut ChaCha8Rng,
    count: usize,
) {
    for _ in 0..count {
        let position = random_star_position(rng);
        let visual = scene.spawn(VisualKind::Star, &SpawnState::at(position));
        stars.push(Star { visual, position });
    }
}

/// Spawn the wave for the session's current level and wave number.
/// Returns the number of enemies spawned.
pub fn spawn_wave(world: &mut World, scene: &mut dyn Scene, rng: &mut ChaCha8Rng) -> usize {
    let level = world.session.level;
    let wave = world.session.wave;
    let formation = formation_for_wave(wave);
    let grid = GridSize::for_level(level);
    let z = start_z(level);

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let variant = roll_variant(level, rng.gen::<f32>());
            let spot = anchor(formation, row, col, grid);
            let enemy = spawn_enemy(
                scene,
                variant,
                formation,
                Vec3::new(spot.x, spot.y, z),
                enemy_color(variant, level, row),
            );
            world.enemies.push(enemy);
        }
    }

    let count = grid.count();
    debug!(level, wave, ?formation, count, "wave spawned");
    world.events.push(GameEvent::WaveStarted {
        level,
        wave,
        formation,
        enemy_count: count,
    });
    count
}

/// Spawn one enemy at `position`, which is also its anchor.
pub fn spawn_enemy(
    scene: &mut dyn Scene,
    variant: EnemyVariant,
    formation: Formation,
    position: Vec3,
    color: Color,
) -> Enemy {
    let profile = get_profile(variant);
    let init = SpawnState::at(position)
        .with_scale(profile.scale)
        .with_color(color);
    let visual = scene.spawn(VisualKind::Enemy(variant), &init);
    let body = scene.spawn(
        VisualKind::EnemyBody,
        &SpawnState::at(Vec3::ZERO).with_color(color).child_of(visual),
    );

    Enemy {
        visual,
        body,
        variant,
        formation,
        position,
        rotation: Vec3::ZERO,
        scale: profile.scale,
        health: profile.health,
        max_health: profile.health,
        speed_multiplier: profile.speed_multiplier,
        color,
        anchor: position.truncate(),
        zigzag_phase: 0.0,
        circle_phase: 0.0,
        alive: true,
    }
}

/// A player shot. Lasers carry a fixed lifetime; bolts live until they
/// leave the field or hit.
pub fn spawn_player_bullet(
    bullets: &mut Registry<Bullet>,
    scene: &mut dyn Scene,
    player: PlayerSlot,
    shot: ShotKind,
    position: Vec3,
) {
    let kind = match shot {
        ShotKind::Bolt => VisualKind::PlayerBullet,
        ShotKind::Laser => VisualKind::LaserBeam,
    };
    let visual = scene.spawn(kind, &SpawnState::at(position));
    bullets.push(Bullet {
        visual,
        owner: BulletOwner::Player(player),
        shot,
        position,
        health: 1,
        lifetime: (shot == ShotKind::Laser).then(|| Lifetime::new(LASER_LIFETIME_TICKS)),
        active: true,
    });
}

pub fn spawn_enemy_bullet(bullets: &mut Registry<Bullet>, scene: &mut dyn Scene, position: Vec3) {
    let visual = scene.spawn(
        VisualKind::EnemyBullet,
        &SpawnState::at(position).with_color(Color::RED),
    );
    bullets.push(Bullet {
        visual,
        owner: BulletOwner::Enemy,
        shot: ShotKind::Bolt,
        position,
        health: ENEMY_BULLET_HEALTH,
        lifetime: None,
        active: true,
    });
}

pub fn spawn_muzzle_flash(flashes: &mut Registry<MuzzleFlash>, scene: &mut dyn Scene, position: Vec3) {
    let visual = scene.spawn(
        VisualKind::MuzzleFlash,
        &SpawnState::at(position).with_color(Color::YELLOW),
    );
    flashes.push(MuzzleFlash {
        visual,
        position,
        life: Lifetime::new(MUZZLE_FLASH_LIFETIME_TICKS),
    });
}

/// Burst of `EXPLOSION_PARTICLES` debris cubes in `color`.
pub fn spawn_explosion(
    particles: &mut Registry<Particle>,
    scene: &mut dyn Scene,
    rng: &mut ChaCha8Rng,
    position: Vec3,
    color: Color,
) {
    let half = PARTICLE_SPREAD / 2.0;
    for _ in 0..EXPLOSION_PARTICLES {
        let visual = scene.spawn(
            VisualKind::Particle,
            &SpawnState::at(position).with_color(color),
        );
        let velocity = Vec3::new(
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
        );
        let spin = Vec3::new(
            rng.gen_range(0.0..PARTICLE_MAX_SPIN),
            rng.gen_range(0.0..PARTICLE_MAX_SPIN),
            0.0,
        );
        particles.push(Particle {
            visual,
            position,
            velocity,
            rotation: Vec3::ZERO,
            spin,
            life: Lifetime::new(PARTICLE_LIFETIME_TICKS),
        });
    }
}

/// Roll the drop chance and, on success, spawn a pickup of a uniformly
/// random kind at `position`.
pub fn maybe_drop_power_up(
    power_ups: &mut Registry<PowerUp>,
    scene: &mut dyn Scene,
    rng: &mut ChaCha8Rng,
    position: Vec3,
) -> Option<PowerUpKind> {
    if !rng.gen_bool(POWERUP_DROP_CHANCE) {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
    let visual = scene.spawn(VisualKind::PowerUp(kind), &SpawnState::at(position));
    power_ups.push(PowerUp {
        visual,
        kind,
        position,
        spin: 0.0,
        active: true,
    });
    Some(kind)
}

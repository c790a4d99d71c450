//! Per-frame simulation.
//!
//! `step` advances a `SessionState` by exactly one frame in a fixed order.
//! All randomness comes through the injected RNG so tests can run with a
//! seeded one.
//!
//! Deletion is deferred: a pass only sets `dead` flags while it iterates,
//! and prunes its own collection once it is done.  Bullets are flagged by
//! several passes, so they get one more prune at the very end of the step.

use log::{debug, info};
use rand::Rng;

use crate::boss::BOSS_KILL_SCORE;
use crate::entities::{
    Bullet, CollectibleKind, Enemy, EnemyKind, Particle, SessionState, Star,
    PLAYER_SHOT_COOLDOWN, PLAYER_SMOOTHING, STAR_COUNT,
};
use crate::events::GameEvent;
use crate::geometry::{overlaps, Bounds};
use crate::spawner;
use crate::surface::{
    Cue, Pointer, Rgb, DEBRIS_GREY, DUST_GREY, FIRE_ORANGE, NEON_CYAN, NEON_MAGENTA, RED, WHITE,
};

// ── Gameplay numbers ──────────────────────────────────────────────────────────

/// Frames a multi-fire or shield pickup lasts.
pub const POWER_UP_DURATION: u32 = 600;
pub const HEAL_AMOUNT: u32 = 25;

pub const ENEMY_CONTACT_DAMAGE: u32 = 20;
pub const ASTEROID_CONTACT_DAMAGE: u32 = 50;
/// Applied every frame the player overlaps the boss.
pub const BOSS_CONTACT_DAMAGE: u32 = 2;
pub const BOSS_HIT_DAMAGE: u32 = 10;

pub const ENEMY_KILL_SCORE: u32 = 100;
pub const ASTEROID_KILL_SCORE: u32 = 50;

const SHOOTER_COOLDOWN: u64 = 100;
const SHOOTER_FIRE_CHANCE: f64 = 0.02;
const SHOOTER_BULLET_SPEED: f32 = 5.0;

const MULTI_FIRE_VX: f32 = 2.0;
const THRUST_SPEED: f32 = 2.0;
const EXPLOSION_SPEED: f32 = 5.0;
const EXPLOSION_PARTICLES: usize = 15;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A brand-new session on a `width`×`height` surface: fresh player, empty
/// collections, seeded starfield.
pub fn new_session(width: f32, height: f32, rng: &mut impl Rng) -> SessionState {
    let mut state = SessionState::empty(width, height);
    state.stars = (0..STAR_COUNT).map(|_| Star::new(width, height, rng)).collect();
    state
}

// ── Shared effects ───────────────────────────────────────────────────────────

/// Burst of `count` particles at `(x, y)`.
pub fn explode(
    particles: &mut Vec<Particle>,
    x: f32,
    y: f32,
    color: Rgb,
    count: usize,
    rng: &mut impl Rng,
) {
    particles.extend((0..count).map(|_| Particle::new(x, y, color, EXPLOSION_SPEED, rng)));
}

pub fn award(state: &mut SessionState, points: u32) {
    if points == 0 {
        return;
    }
    state.score = state.score.saturating_add(points);
    state.events.push(GameEvent::ScoreChanged(state.score));
}

/// Damages the player unless shielded.  The hit that takes health to zero
/// reports `PlayerDestroyed`; later hits only clamp.
pub fn damage_player(state: &mut SessionState, amount: u32) {
    let was_alive = state.player.health > 0;
    if !state.player.take_damage(amount) {
        return;
    }
    state.events.push(GameEvent::Sound(Cue::Damage));
    state.events.push(GameEvent::PlayerHit);
    state.events.push(GameEvent::HealthChanged(state.player.health_percent()));
    if was_alive && state.player.health == 0 {
        info!("player destroyed at score {} (frame {})", state.score, state.frame);
        state.events.push(GameEvent::PlayerDestroyed);
    }
}

pub fn heal_player(state: &mut SessionState, amount: u32) {
    state.player.heal(amount);
    state.events.push(GameEvent::HealthChanged(state.player.health_percent()));
}

fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance `state` by one frame, in place.
pub fn step(state: &mut SessionState, pointer: &Pointer, rng: &mut impl Rng) {
    update_stars(state, rng);
    advance_player(state, pointer, rng);
    update_bullets(state, rng);
    update_boss(state, rng);
    update_asteroids(state, rng);

    spawner::spawn_enemy(state, rng);
    spawner::spawn_collectible(state, rng);
    spawner::spawn_asteroid(state, rng);

    update_enemies(state, rng);
    update_collectibles(state, rng);
    update_particles(state);

    state.bullets.retain(|b| !b.dead);
    state.frame += 1;
}

// ── 1. Stars ─────────────────────────────────────────────────────────────────

pub fn update_stars(state: &mut SessionState, rng: &mut impl Rng) {
    let (width, height) = (state.width, state.height);
    for star in state.stars.iter_mut() {
        star.update(width, height, rng);
    }
}

// ── 2. Player ────────────────────────────────────────────────────────────────

/// Glide toward the pointer, auto-fire, count down power-ups, and leave a
/// thrust trail.
pub fn advance_player(state: &mut SessionState, pointer: &Pointer, rng: &mut impl Rng) {
    let frame = state.frame;
    let player = &mut state.player;

    let max_x = state.width - player.width;
    let max_y = state.height - player.height;
    let target_x = (pointer.x - player.width / 2.0).max(0.0).min(max_x);
    let target_y = (pointer.y - player.height / 2.0).max(0.0).min(max_y);
    player.x += (target_x - player.x) * PLAYER_SMOOTHING * 2.0;
    player.y += (target_y - player.y) * PLAYER_SMOOTHING * 2.0;

    if frame.saturating_sub(player.last_shot) > PLAYER_SHOT_COOLDOWN {
        let nose_x = player.x + player.width / 2.0;
        state.bullets.push(Bullet::new(nose_x, player.y, false));
        if player.multi_fire_timer > 0 {
            state
                .bullets
                .push(Bullet::new(player.x, player.y + 10.0, false).with_velocity(-MULTI_FIRE_VX, 0.0));
            state.bullets.push(
                Bullet::new(player.x + player.width, player.y + 10.0, false)
                    .with_velocity(MULTI_FIRE_VX, 0.0),
            );
        }
        state.events.push(GameEvent::Sound(Cue::Shoot));
        player.last_shot = frame;
    }

    player.multi_fire_timer = player.multi_fire_timer.saturating_sub(1);
    player.shield_timer = player.shield_timer.saturating_sub(1);

    if frame % 2 == 0 {
        let (tail_x, tail_y) = (player.x + player.width / 2.0, player.y + player.height);
        state
            .particles
            .push(Particle::new(tail_x, tail_y, NEON_CYAN, THRUST_SPEED, rng));
    }
}

// ── 3. Bullets ───────────────────────────────────────────────────────────────

pub fn update_bullets(state: &mut SessionState, rng: &mut impl Rng) {
    let (width, height) = (state.width, state.height);
    for bullet in state.bullets.iter_mut() {
        bullet.update(width, height);
    }
    collide_bullets_with_player(state, rng);
    state.bullets.retain(|b| !b.dead);
}

/// Every live enemy bullet touching the player deals its damage and is
/// flagged for removal.
pub fn collide_bullets_with_player(state: &mut SessionState, rng: &mut impl Rng) {
    let ship = state.player.bounds();
    for i in 0..state.bullets.len() {
        let bullet = &mut state.bullets[i];
        if !bullet.is_enemy || bullet.dead || !overlaps(&bullet.bounds(), &ship) {
            continue;
        }
        bullet.dead = true;
        let (damage, x, y) = (bullet.damage, bullet.x, bullet.y);

        damage_player(state, damage);
        explode(&mut state.particles, x, y, RED, 5, rng);
        state.events.push(GameEvent::Sound(Cue::Damage));
    }
}

// ── 4. Boss ──────────────────────────────────────────────────────────────────

pub fn update_boss(state: &mut SessionState, rng: &mut impl Rng) {
    spawner::spawn_boss_if_due(state, rng);

    // Taken out for the duration of the pass so the rest of the state stays
    // free to borrow; put back unless destroyed.
    let mut boss = match state.boss.take() {
        Some(boss) => boss,
        None => return,
    };

    if let Some(volley) = boss.update(state.player.center(), state.frame) {
        state.bullets.extend(volley.bullets);
        state.events.push(GameEvent::Sound(volley.cue));
    }

    if overlaps(&state.player, &boss) {
        damage_player(state, BOSS_CONTACT_DAMAGE);
    }

    let hull = boss.bounds();
    let mut destroyed = false;
    for bullet in state.bullets.iter_mut() {
        if bullet.is_enemy || bullet.dead || boss.dead || !overlaps(&bullet.bounds(), &hull) {
            continue;
        }
        bullet.dead = true;
        explode(&mut state.particles, bullet.x, bullet.y, RED, 3, rng);
        destroyed |= boss.take_damage(BOSS_HIT_DAMAGE);
    }

    if destroyed {
        let (cx, cy) = boss.center();
        award(state, BOSS_KILL_SCORE);
        explode(&mut state.particles, cx, cy, NEON_MAGENTA, 50, rng);
        state.events.push(GameEvent::Sound(Cue::Explosion));
        state.events.push(GameEvent::BossDefeated);
        info!(
            "boss defeated, score {} (next boss at {})",
            state.score, state.next_boss_score
        );
    }

    if !boss.dead {
        state.boss = Some(boss);
    }
}

// ── 5. Asteroids ─────────────────────────────────────────────────────────────

pub fn update_asteroids(state: &mut SessionState, rng: &mut impl Rng) {
    let height = state.height;
    for i in 0..state.asteroids.len() {
        state.asteroids[i].update(height);

        if overlaps(&state.player, &state.asteroids[i]) {
            let asteroid = &mut state.asteroids[i];
            asteroid.dead = true;
            let (x, y) = (asteroid.x, asteroid.y);

            damage_player(state, ASTEROID_CONTACT_DAMAGE);
            explode(&mut state.particles, x, y, FIRE_ORANGE, 30, rng);
            state.events.push(GameEvent::Sound(Cue::Damage));
        }

        let asteroid = &mut state.asteroids[i];
        let rock = asteroid.bounds();
        let mut destroyed = false;
        for bullet in state.bullets.iter_mut() {
            if bullet.is_enemy || bullet.dead || asteroid.dead || !overlaps(&bullet.bounds(), &rock) {
                continue;
            }
            bullet.dead = true;
            explode(&mut state.particles, bullet.x, bullet.y, DEBRIS_GREY, 3, rng);
            asteroid.hit_points = asteroid.hit_points.saturating_sub(1);
            if asteroid.hit_points == 0 {
                asteroid.dead = true;
                destroyed = true;
            }
        }

        if destroyed {
            let (x, y) = (asteroid.x, asteroid.y);
            award(state, ASTEROID_KILL_SCORE);
            explode(&mut state.particles, x, y, DUST_GREY, EXPLOSION_PARTICLES, rng);
            state.events.push(GameEvent::Sound(Cue::Explosion));
        }
    }
    state.asteroids.retain(|a| !a.dead);
}

// ── 6. Enemies ───────────────────────────────────────────────────────────────

/// Falls, drifts toward the player, and (for shooters) maybe takes an aimed
/// shot: only once the cooldown has passed, and then only on a 2% roll.
pub fn update_enemy(
    enemy: &mut Enemy,
    player_center: (f32, f32),
    frame: u64,
    height: f32,
    rng: &mut impl Rng,
) -> Option<Bullet> {
    enemy.y += enemy.speed;

    let (cx, _) = enemy.bounds().center();
    enemy.x += sign(player_center.0 - cx) * enemy.kind.tracking_speed();

    let mut shot = None;
    if enemy.kind == EnemyKind::Shooter
        && frame.saturating_sub(enemy.last_shot) > SHOOTER_COOLDOWN
        && rng.gen_bool(SHOOTER_FIRE_CHANCE)
    {
        let muzzle_x = enemy.x + enemy.width / 2.0;
        let muzzle_y = enemy.y + enemy.height;
        shot = Some(Bullet::aimed(muzzle_x, muzzle_y, player_center, SHOOTER_BULLET_SPEED));
        enemy.last_shot = frame;
    }

    if enemy.y > height {
        enemy.dead = true;
    }
    shot
}

pub fn update_enemies(state: &mut SessionState, rng: &mut impl Rng) {
    let (height, frame) = (state.height, state.frame);
    for i in 0..state.enemies.len() {
        let player_center = state.player.center();
        if let Some(shot) = update_enemy(&mut state.enemies[i], player_center, frame, height, rng) {
            state.bullets.push(shot);
        }

        if overlaps(&state.player, &state.enemies[i]) {
            let enemy = &mut state.enemies[i];
            enemy.dead = true;
            let (x, y, color) = (enemy.x, enemy.y, enemy.color());

            damage_player(state, ENEMY_CONTACT_DAMAGE);
            explode(&mut state.particles, x, y, color, EXPLOSION_PARTICLES, rng);
            state.events.push(GameEvent::Sound(Cue::Explosion));
        }

        let enemy = &mut state.enemies[i];
        let hull = enemy.bounds();
        let mut shot_down = false;
        for bullet in state.bullets.iter_mut() {
            if bullet.is_enemy || bullet.dead || enemy.dead || !overlaps(&bullet.bounds(), &hull) {
                continue;
            }
            bullet.dead = true;
            enemy.dead = true;
            shot_down = true;
        }

        if shot_down {
            let (x, y, color) = (enemy.x, enemy.y, enemy.color());
            award(state, ENEMY_KILL_SCORE);
            explode(&mut state.particles, x, y, color, EXPLOSION_PARTICLES, rng);
            state.events.push(GameEvent::Sound(Cue::Explosion));
        }
    }
    state.enemies.retain(|e| !e.dead);
}

// ── 7. Collectibles ──────────────────────────────────────────────────────────

pub fn update_collectibles(state: &mut SessionState, rng: &mut impl Rng) {
    let height = state.height;
    for i in 0..state.collectibles.len() {
        state.collectibles[i].update(height);
        if !overlaps(&state.player, &state.collectibles[i]) {
            continue;
        }

        let item = &mut state.collectibles[i];
        item.dead = true;
        let (x, y, kind) = (item.x, item.y, item.kind);
        debug!("picked up {:?}", kind);

        match kind {
            CollectibleKind::MultiFire => state.player.multi_fire_timer = POWER_UP_DURATION,
            CollectibleKind::Shield => state.player.shield_timer = POWER_UP_DURATION,
            CollectibleKind::Health => heal_player(state, HEAL_AMOUNT),
        }
        explode(&mut state.particles, x, y, WHITE, 10, rng);
        state.events.push(GameEvent::Sound(Cue::Powerup));
    }
    state.collectibles.retain(|c| !c.dead);
}

// ── 8. Particles ─────────────────────────────────────────────────────────────

pub fn update_particles(state: &mut SessionState) {
    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| !p.is_spent());
}

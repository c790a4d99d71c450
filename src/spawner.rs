//! Frame-counter gated spawning.

use log::info;
use rand::Rng;

use crate::boss::{Boss, BOSS_SCORE_STEP};
use crate::compute::explode;
use crate::entities::{Asteroid, Collectible, Enemy, SessionState};
use crate::events::GameEvent;

pub const ENEMY_INTERVAL: u64 = 60;
pub const ASTEROID_INTERVAL: u64 = 120;
pub const COLLECTIBLE_INTERVAL: u64 = 600;

/// A regular enemy every `ENEMY_INTERVAL` frames, unless a boss is alive.
pub fn spawn_enemy(state: &mut SessionState, rng: &mut impl Rng) {
    if state.boss.is_some() {
        return;
    }
    if state.frame % ENEMY_INTERVAL == 0 {
        state.enemies.push(Enemy::spawn(state.width, rng));
    }
}

pub fn spawn_asteroid(state: &mut SessionState, rng: &mut impl Rng) {
    if state.frame % ASTEROID_INTERVAL == 0 {
        state.asteroids.push(Asteroid::spawn(state.width, rng));
    }
}

pub fn spawn_collectible(state: &mut SessionState, rng: &mut impl Rng) {
    if state.frame % COLLECTIBLE_INTERVAL == 0 {
        state.collectibles.push(Collectible::spawn(state.width, rng));
    }
}

/// Brings in a boss once the score reaches the threshold and none is alive.
/// Every standing regular enemy is blown up to clear the stage, and the
/// threshold moves up for the next one.  Returns whether a boss spawned.
pub fn spawn_boss_if_due(state: &mut SessionState, rng: &mut impl Rng) -> bool {
    if state.boss.is_some() || state.score < state.next_boss_score {
        return false;
    }

    info!(
        "boss spawned at score {} (frame {})",
        state.score, state.frame
    );
    state.boss = Some(Boss::new(state.width));
    state.next_boss_score += BOSS_SCORE_STEP;

    for enemy in state.enemies.iter_mut() {
        enemy.dead = true;
        explode(&mut state.particles, enemy.x, enemy.y, enemy.color(), 15, rng);
    }
    state.enemies.retain(|e| !e.dead);

    state.events.push(GameEvent::BossSpawned);
    true
}

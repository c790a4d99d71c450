mod common;

use approx::assert_relative_eq;
use neon_shooter::entities::*;
use neon_shooter::geometry::{overlaps, Bounds, Rect};

use common::seeded_rng;

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(overlaps(&a, &b));
    assert!(overlaps(&b, &a));
}

#[test]
fn contained_rect_overlaps() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
    assert!(overlaps(&outer, &inner));
    assert!(overlaps(&inner, &outer));
}

#[test]
fn shared_edge_is_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let right = Rect::new(10.0, 0.0, 10.0, 10.0);
    let below = Rect::new(0.0, 10.0, 10.0, 10.0);
    assert!(!overlaps(&a, &right));
    assert!(!overlaps(&right, &a));
    assert!(!overlaps(&a, &below));
}

#[test]
fn disjoint_rects() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(50.0, 50.0, 10.0, 10.0);
    assert!(!overlaps(&a, &b));
}

#[test]
fn entities_overlap_by_hitbox() {
    let player = Player::new(800.0, 600.0);
    let enemy = Enemy::new(player.x + 59.0, player.y, 2.0, EnemyKind::Chaser);
    assert!(overlaps(&player, &enemy));
    let enemy = Enemy::new(player.x + 60.0, player.y, 2.0, EnemyKind::Chaser);
    assert!(!overlaps(&player, &enemy));
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_centred_on_muzzle() {
    let b = Bullet::new(100.0, 50.0, false);
    assert_relative_eq!(b.x, 97.5);
    assert_relative_eq!(b.width, 5.0);
    assert_relative_eq!(b.height, 15.0);
    assert_eq!(b.damage, BULLET_DAMAGE);
    assert_eq!(b.vy, 0.0);
}

#[test]
fn bullet_default_heading_depends_on_owner() {
    let mut up = Bullet::new(100.0, 300.0, false);
    let mut down = Bullet::new(100.0, 300.0, true);
    up.update(800.0, 600.0);
    down.update(800.0, 600.0);
    assert_relative_eq!(up.y, 293.0);
    assert_relative_eq!(down.y, 307.0);
}

#[test]
fn zero_vy_falls_back_to_owner_heading() {
    let mut down = Bullet::new(100.0, 300.0, true).with_velocity(4.0, 0.0);
    down.update(800.0, 600.0);
    assert_relative_eq!(down.y, 307.0);
    assert_relative_eq!(down.x, 101.5);

    let mut up = Bullet::new(100.0, 300.0, false).with_velocity(-2.0, 0.0);
    up.update(800.0, 600.0);
    assert_relative_eq!(up.y, 293.0);
}

#[test]
fn explicit_vy_overrides_heading() {
    let mut b = Bullet::new(100.0, 300.0, true).with_velocity(0.0, -3.0);
    b.update(800.0, 600.0);
    assert_relative_eq!(b.y, 297.0);
}

#[test]
fn bullet_dies_off_any_edge() {
    let mut left = Bullet::new(1.0, 300.0, true).with_velocity(-4.0, 0.0);
    left.update(800.0, 600.0);
    assert!(left.dead);

    let mut right = Bullet::new(801.0, 300.0, true).with_velocity(4.0, 0.0);
    right.update(800.0, 600.0);
    assert!(right.dead);
}

#[test]
fn aimed_bullet_heads_at_target() {
    let b = Bullet::aimed(0.0, 0.0, (30.0, 40.0), 5.0);
    assert!(b.is_enemy);
    assert_relative_eq!(b.vx, 3.0, epsilon = 1e-4);
    assert_relative_eq!(b.vy, 4.0, epsilon = 1e-4);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn damage_saturates_at_zero() {
    let mut p = Player::new(800.0, 600.0);
    assert!(p.take_damage(60));
    assert!(p.take_damage(60));
    assert_eq!(p.health, 0);
    assert_eq!(p.health_percent(), 0);
}

#[test]
fn shielded_player_takes_nothing() {
    let mut p = Player::new(800.0, 600.0);
    p.shield_timer = 1;
    assert!(!p.take_damage(50));
    assert_eq!(p.health, 100);
}

#[test]
fn heal_clamps_to_max() {
    let mut p = Player::new(800.0, 600.0);
    p.health = 90;
    p.heal(25);
    assert_eq!(p.health, 100);
    p.health = 40;
    p.heal(25);
    assert_eq!(p.health, 65);
    assert_eq!(p.health_percent(), 65);
}

#[test]
fn player_center() {
    let p = Player::new(800.0, 600.0);
    let (cx, cy) = p.center();
    assert_relative_eq!(cx, 400.0);
    assert_relative_eq!(cy, 530.0);
}

// ── Spawned entities ──────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_above_field() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let e = Enemy::spawn(800.0, &mut rng);
        assert_relative_eq!(e.y, -ENEMY_SIZE);
        assert!(e.x >= 0.0 && e.x <= 750.0);
        assert!(e.speed >= 2.0 && e.speed < 4.0);
    }
}

#[test]
fn enemy_kinds_mostly_chasers() {
    let mut rng = seeded_rng();
    let shooters = (0..10_000)
        .filter(|_| Enemy::spawn(800.0, &mut rng).kind == EnemyKind::Shooter)
        .count();
    assert!(shooters > 1500 && shooters < 2500, "shooters = {}", shooters);
}

#[test]
fn asteroid_spawn_ranges() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let a = Asteroid::spawn(800.0, &mut rng);
        assert!(a.size >= 30.0 && a.size < 70.0);
        assert_relative_eq!(a.y, -a.size);
        assert!(a.rotation_speed.abs() <= 0.025);
        assert_eq!(a.hit_points, ASTEROID_HIT_POINTS);
        assert_relative_eq!(a.bounds().width, a.size);
    }
}

#[test]
fn spawns_fit_narrow_field() {
    let mut rng = seeded_rng();
    let e = Enemy::spawn(10.0, &mut rng);
    assert_relative_eq!(e.x, 0.0);
    let c = Collectible::spawn(10.0, &mut rng);
    assert_relative_eq!(c.x, 0.0);
}

#[test]
fn collectible_roll_distribution() {
    let mut rng = seeded_rng();
    let (mut multi, mut shield, mut health) = (0, 0, 0);
    for _ in 0..10_000 {
        match CollectibleKind::roll(&mut rng) {
            CollectibleKind::MultiFire => multi += 1,
            CollectibleKind::Shield => shield += 1,
            CollectibleKind::Health => health += 1,
        }
    }
    assert!(multi > 3500 && multi < 4500, "multi = {}", multi);
    assert!(shield > 3500 && shield < 4500, "shield = {}", shield);
    assert!(health > 1500 && health < 2500, "health = {}", health);
}

#[test]
fn particle_fades() {
    let mut p = Particle::new(0.0, 0.0, neon_shooter::surface::WHITE, 5.0, &mut seeded_rng());
    assert_relative_eq!(p.life, 1.0);
    assert!(p.decay >= 0.02 && p.decay < 0.05);
    let mut frames = 0;
    while !p.is_spent() {
        p.update();
        frames += 1;
    }
    assert!(frames >= 20 && frames <= 51);
}

// ── SessionState ──────────────────────────────────────────────────────────────

#[test]
fn drain_events_empties_queue() {
    let mut s = SessionState::empty(800.0, 600.0);
    s.events.push(neon_shooter::events::GameEvent::BossSpawned);
    assert_eq!(s.drain_events().len(), 1);
    assert!(s.events.is_empty());
}

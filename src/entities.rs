//! All game entity types, their spawn constructors, and the per-frame
//! kinematics that need nothing but the entity itself.  Anything that
//! involves two entities lives in `compute`.

use std::f32::consts::TAU;

use rand::Rng;

use crate::boss::Boss;
use crate::events::GameEvent;
use crate::geometry::{Bounds, Rect};
use crate::surface::{Rgb, NEON_CYAN, NEON_MAGENTA};

// ── Tunables ──────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 60.0;
pub const PLAYER_MAX_HEALTH: u32 = 100;
/// Lerp factor toward the pointer; applied twice per frame.
pub const PLAYER_SMOOTHING: f32 = 0.1;
pub const PLAYER_SHOT_COOLDOWN: u64 = 10;
/// Distance from the bottom edge the ship starts at.
pub const PLAYER_START_OFFSET: f32 = 100.0;

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 15.0;
pub const BULLET_SPEED: f32 = 7.0;
pub const BULLET_DAMAGE: u32 = 10;

pub const ENEMY_SIZE: f32 = 50.0;
pub const SHOOTER_CHANCE: f64 = 0.2;

pub const ASTEROID_HIT_POINTS: u32 = 3;

pub const COLLECTIBLE_SIZE: f32 = 50.0;
pub const COLLECTIBLE_SPEED: f32 = 2.0;

pub const STAR_COUNT: usize = 100;

// ── Stars ─────────────────────────────────────────────────────────────────────

/// Background star.  Never deleted: wraps back to the top instead.
#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub alpha: f32,
}

impl Star {
    pub fn new(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Star {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            size: rng.gen::<f32>() * 2.0,
            speed: rng.gen::<f32>() * 3.0 + 0.5,
            alpha: rng.gen::<f32>() * 0.5 + 0.1,
        }
    }

    pub fn update(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.y += self.speed;
        if self.y > height {
            self.y = 0.0;
            self.x = rng.gen::<f32>() * width;
        }
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// Cosmetic spark.  Pruned once `life` drops to zero.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    /// Random heading; speed in `[1, max_speed + 1)`.
    pub fn new(x: f32, y: f32, color: Rgb, max_speed: f32, rng: &mut impl Rng) -> Self {
        let angle = rng.gen::<f32>() * TAU;
        let speed = rng.gen::<f32>() * max_speed + 1.0;
        Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life: 1.0,
            decay: rng.gen::<f32>() * 0.03 + 0.02,
            size: rng.gen::<f32>() * 3.0 + 1.0,
            color,
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= self.decay;
    }

    pub fn is_spent(&self) -> bool {
        self.life <= 0.0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    /// Zero means the owner's default: straight up for the player,
    /// straight down for enemies.
    pub vy: f32,
    pub is_enemy: bool,
    pub damage: u32,
    pub dead: bool,
}

impl Bullet {
    /// Bullet centred horizontally on `x`, top edge at `y`.
    pub fn new(x: f32, y: f32, is_enemy: bool) -> Self {
        Bullet {
            x: x - BULLET_WIDTH / 2.0,
            y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            vx: 0.0,
            vy: 0.0,
            is_enemy,
            damage: BULLET_DAMAGE,
            dead: false,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Bullet fired from `(x, y)` toward `target` at `speed`.
    pub fn aimed(x: f32, y: f32, target: (f32, f32), speed: f32) -> Self {
        let angle = (target.1 - y).atan2(target.0 - x);
        Bullet::new(x, y, true).with_velocity(angle.cos() * speed, angle.sin() * speed)
    }

    pub fn update(&mut self, width: f32, height: f32) {
        self.x += self.vx;
        self.y += if self.vy != 0.0 {
            self.vy
        } else if self.is_enemy {
            BULLET_SPEED
        } else {
            -BULLET_SPEED
        };
        if self.y < 0.0 || self.y > height || self.x < 0.0 || self.x > width {
            self.dead = true;
        }
    }

    pub fn color(&self) -> Rgb {
        if self.is_enemy {
            Rgb::new(0xff, 0x00, 0x00)
        } else {
            Rgb::new(0xff, 0xff, 0x00)
        }
    }
}

// ── Collectibles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Three-way fire for `POWER_UP_DURATION` frames.
    MultiFire,
    /// Full invulnerability for `POWER_UP_DURATION` frames.
    Shield,
    /// Instant heal.
    Health,
}

impl CollectibleKind {
    /// 40% multi-fire, 40% shield, 20% health.
    pub fn roll(rng: &mut impl Rng) -> Self {
        let draw: f32 = rng.gen();
        if draw < 0.4 {
            CollectibleKind::MultiFire
        } else if draw < 0.8 {
            CollectibleKind::Shield
        } else {
            CollectibleKind::Health
        }
    }
}

#[derive(Clone, Debug)]
pub struct Collectible {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: CollectibleKind,
    pub dead: bool,
}

impl Collectible {
    pub fn spawn(width: f32, rng: &mut impl Rng) -> Self {
        let kind = CollectibleKind::roll(rng);
        Collectible::new(rng.gen::<f32>() * (width - COLLECTIBLE_SIZE).max(0.0), -COLLECTIBLE_SIZE, kind)
    }

    pub fn new(x: f32, y: f32, kind: CollectibleKind) -> Self {
        Collectible {
            x,
            y,
            width: COLLECTIBLE_SIZE,
            height: COLLECTIBLE_SIZE,
            speed: COLLECTIBLE_SPEED,
            kind,
            dead: false,
        }
    }

    pub fn update(&mut self, height: f32) {
        self.y += self.speed;
        if self.y > height {
            self.dead = true;
        }
    }
}

// ── Asteroids ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    /// Diameter; also the width and height of the hitbox.
    pub size: f32,
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub hit_points: u32,
    pub dead: bool,
}

impl Asteroid {
    pub fn spawn(width: f32, rng: &mut impl Rng) -> Self {
        let size = rng.gen::<f32>() * 40.0 + 30.0;
        Asteroid {
            x: rng.gen::<f32>() * (width - size).max(0.0),
            y: -size,
            size,
            speed: rng.gen::<f32>() + 1.0,
            rotation: 0.0,
            rotation_speed: rng.gen::<f32>() * 0.05 - 0.025,
            hit_points: ASTEROID_HIT_POINTS,
            dead: false,
        }
    }

    pub fn update(&mut self, height: f32) {
        self.y += self.speed;
        self.rotation += self.rotation_speed;
        if self.y > height {
            self.dead = true;
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Tracks the player aggressively, never fires.
    Chaser,
    /// Tracks slowly and takes aimed shots.
    Shooter,
}

impl EnemyKind {
    /// Horizontal step toward the player per frame.
    pub fn tracking_speed(self) -> f32 {
        match self {
            EnemyKind::Chaser => 1.5,
            EnemyKind::Shooter => 0.5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: EnemyKind,
    pub last_shot: u64,
    pub dead: bool,
}

impl Enemy {
    pub fn spawn(width: f32, rng: &mut impl Rng) -> Self {
        let x = rng.gen::<f32>() * (width - ENEMY_SIZE).max(0.0);
        let speed = rng.gen::<f32>() * 2.0 + 2.0;
        let kind = if rng.gen_bool(SHOOTER_CHANCE) {
            EnemyKind::Shooter
        } else {
            EnemyKind::Chaser
        };
        Enemy::new(x, -ENEMY_SIZE, speed, kind)
    }

    pub fn new(x: f32, y: f32, speed: f32, kind: EnemyKind) -> Self {
        Enemy {
            x,
            y,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            speed,
            kind,
            last_shot: 0,
            dead: false,
        }
    }

    pub fn color(&self) -> Rgb {
        NEON_MAGENTA
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    pub max_health: u32,
    pub last_shot: u64,
    /// Frames of multi-fire left.
    pub multi_fire_timer: u32,
    /// Frames of invulnerability left.
    pub shield_timer: u32,
}

impl Player {
    /// Ship centred horizontally near the bottom of a `width`×`height` area.
    pub fn new(width: f32, height: f32) -> Self {
        Player {
            x: width / 2.0 - PLAYER_SIZE / 2.0,
            y: height - PLAYER_START_OFFSET,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            last_shot: 0,
            multi_fire_timer: 0,
            shield_timer: 0,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.bounds().center()
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_timer > 0
    }

    /// Returns whether the hit landed; a shielded player takes nothing.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.is_shielded() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        true
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn health_percent(&self) -> u8 {
        if self.max_health == 0 {
            return 0;
        }
        (self.health * 100 / self.max_health).min(100) as u8
    }

    pub fn color(&self) -> Rgb {
        NEON_CYAN
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

macro_rules! impl_bounds {
    ($($ty:ty),*) => {$(
        impl Bounds for $ty {
            fn bounds(&self) -> Rect {
                Rect::new(self.x, self.y, self.width, self.height)
            }
        }
    )*};
}

impl_bounds!(Bullet, Collectible, Enemy, Player);

impl Bounds for Asteroid {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one play session owns.  Built fresh on every start and
/// dropped when the session ends.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub asteroids: Vec<Asteroid>,
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    /// At most one boss at a time.
    pub boss: Option<Boss>,
    /// Score the next boss appears at.
    pub next_boss_score: u32,
    pub score: u32,
    pub frame: u64,
    /// Events produced since the controller last drained them.
    pub events: Vec<GameEvent>,
}

impl SessionState {
    /// Empty field with a fresh player; no stars.
    pub fn empty(width: f32, height: f32) -> Self {
        SessionState {
            width,
            height,
            player: Player::new(width, height),
            bullets: Vec::new(),
            enemies: Vec::new(),
            asteroids: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            boss: None,
            next_boss_score: crate::boss::FIRST_BOSS_SCORE,
            score: 0,
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

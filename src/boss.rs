//! The boss: an entry glide followed by a fight that cycles through three
//! attack phases on a fixed timer.
//!
//! ```text
//!   Entering ──(y reaches TARGET_Y)──▶ Fighting
//!
//!   Fighting phases:  Spread ──▶ Rapid ──▶ Omni ──▶ Spread …
//!                     (advance whenever the phase timer passes PHASE_DURATION)
//! ```
//!
//! All three phases share one last-shot frame index, so a phase that has
//! just taken over still waits out its own cooldown measured from the
//! previous phase's final shot.

use std::f32::consts::TAU;

use log::{debug, info};

use crate::entities::Bullet;
use crate::geometry::{Bounds, Rect};
use crate::surface::Cue;

pub const BOSS_SIZE: f32 = 150.0;
pub const BOSS_MAX_HEALTH: u32 = 2500;
pub const BOSS_SPEED: f32 = 4.0;
/// Resting y of the boss's top edge once it has entered.
pub const BOSS_TARGET_Y: f32 = 50.0;
/// Frames each attack phase lasts.
pub const PHASE_DURATION: u32 = 300;
pub const BOSS_BULLET_DAMAGE: u32 = 20;

pub const FIRST_BOSS_SCORE: u32 = 2000;
pub const BOSS_SCORE_STEP: u32 = 2000;
pub const BOSS_KILL_SCORE: u32 = 1000;

const SPREAD_COOLDOWN: u64 = 60;
const RAPID_COOLDOWN: u64 = 10;
const OMNI_COOLDOWN: u64 = 120;

const RAPID_SPEED: f32 = 8.0;
const OMNI_BULLETS: usize = 20;
const OMNI_RADIUS: f32 = 40.0;
const OMNI_SPEED: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Entering,
    Fighting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackPhase {
    /// Five-bullet fan straight down.
    Spread,
    /// Single aimed shots in quick succession.
    Rapid,
    /// Twenty-bullet ring.
    Omni,
}

impl AttackPhase {
    pub fn next(self) -> Self {
        match self {
            AttackPhase::Spread => AttackPhase::Rapid,
            AttackPhase::Rapid => AttackPhase::Omni,
            AttackPhase::Omni => AttackPhase::Spread,
        }
    }

    /// Minimum frames since the last shot before this phase may fire.
    pub fn cooldown(self) -> u64 {
        match self {
            AttackPhase::Spread => SPREAD_COOLDOWN,
            AttackPhase::Rapid => RAPID_COOLDOWN,
            AttackPhase::Omni => OMNI_COOLDOWN,
        }
    }
}

/// Bullets one attack produced, plus the sound that goes with them.
#[derive(Clone, Debug)]
pub struct Volley {
    pub bullets: Vec<Bullet>,
    pub cue: Cue,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    pub max_health: u32,
    pub lifecycle: Lifecycle,
    pub phase: AttackPhase,
    pub phase_timer: u32,
    pub last_shot: u64,
    pub dead: bool,
}

impl Boss {
    /// Boss centred horizontally, fully above the top edge.
    pub fn new(surface_width: f32) -> Self {
        Boss {
            x: surface_width / 2.0 - BOSS_SIZE / 2.0,
            y: -BOSS_SIZE,
            width: BOSS_SIZE,
            height: BOSS_SIZE,
            health: BOSS_MAX_HEALTH,
            max_health: BOSS_MAX_HEALTH,
            lifecycle: Lifecycle::Entering,
            phase: AttackPhase::Spread,
            phase_timer: 0,
            last_shot: 0,
            dead: false,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.bounds().center()
    }

    /// One frame of movement and attacks.  `player_center` is the point the
    /// boss tracks and aims at; `frame` is the session frame counter.
    pub fn update(&mut self, player_center: (f32, f32), frame: u64) -> Option<Volley> {
        match self.lifecycle {
            Lifecycle::Entering => {
                self.y += BOSS_SPEED;
                if self.y >= BOSS_TARGET_Y {
                    self.y = BOSS_TARGET_Y;
                    self.lifecycle = Lifecycle::Fighting;
                    debug!("boss in position, fight begins");
                }
                None
            }
            Lifecycle::Fighting => {
                self.track(player_center.0);
                self.advance_phase();
                self.attack(player_center, frame)
            }
        }
    }

    fn track(&mut self, player_center_x: f32) {
        let target_x = player_center_x - self.width / 2.0;
        let dx = target_x - self.x;
        if dx.abs() > BOSS_SPEED {
            self.x += dx.signum() * BOSS_SPEED;
        } else {
            self.x = target_x;
        }
    }

    /// Counts one frame; past `PHASE_DURATION` the next phase takes over
    /// and the timer restarts.  The cycle runs whether or not anything fired.
    pub fn advance_phase(&mut self) {
        self.phase_timer += 1;
        if self.phase_timer > PHASE_DURATION {
            self.phase_timer = 0;
            self.phase = self.phase.next();
            debug!("boss attack phase -> {:?}", self.phase);
        }
    }

    fn attack(&mut self, player_center: (f32, f32), frame: u64) -> Option<Volley> {
        if frame.saturating_sub(self.last_shot) <= self.phase.cooldown() {
            return None;
        }
        self.last_shot = frame;

        let (cx, cy) = self.center();
        let muzzle_y = self.y + self.height;
        let volley = match self.phase {
            AttackPhase::Spread => Volley {
                bullets: (-2..=2)
                    .map(|i| {
                        Bullet::new(cx, muzzle_y, true)
                            .with_velocity(i as f32 * 2.0, 0.0)
                            .with_damage(BOSS_BULLET_DAMAGE)
                    })
                    .collect(),
                cue: Cue::Shoot,
            },
            AttackPhase::Rapid => Volley {
                bullets: vec![Bullet::aimed(cx, muzzle_y, player_center, RAPID_SPEED)
                    .with_damage(BOSS_BULLET_DAMAGE)],
                cue: Cue::Shoot,
            },
            AttackPhase::Omni => Volley {
                bullets: (0..OMNI_BULLETS)
                    .map(|i| {
                        let angle = TAU / OMNI_BULLETS as f32 * i as f32;
                        let (sin, cos) = angle.sin_cos();
                        Bullet::new(cx + cos * OMNI_RADIUS, cy + sin * OMNI_RADIUS, true)
                            .with_velocity(cos * OMNI_SPEED, sin * OMNI_SPEED)
                            .with_damage(BOSS_BULLET_DAMAGE)
                    })
                    .collect(),
                cue: Cue::Explosion,
            },
        };
        Some(volley)
    }

    /// Applies a hit.  Returns true only for the hit that destroys the
    /// boss; hits on an already destroyed boss change nothing.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.dead {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.dead = true;
            info!("boss destroyed");
            return true;
        }
        false
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }
}

impl Bounds for Boss {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

//! Draws a `SessionState` onto any [`Surface`].
//!
//! Drawing never feeds back into the simulation.  Every entity that has a
//! sprite checks `sprite_ready` first and falls back to a vector shape, so
//! a surface with nothing loaded still shows a playable picture.

use crate::boss::Boss;
use crate::entities::{
    Asteroid, Bullet, Collectible, CollectibleKind, Enemy, Particle, Player, SessionState, Star,
};
use crate::geometry::{Bounds, Rect};
use crate::surface::{
    Glow, Rgb, Sprite, Surface, RED, ROCK_GREY, SHIELD_GREEN, SPACE_BLACK, WHITE,
};

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame, back to front.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &SessionState) {
    surface.fill_overlay(SPACE_BLACK, 0.3);

    for star in &state.stars {
        draw_star(surface, star);
    }
    draw_player(surface, &state.player, state.frame);
    for bullet in &state.bullets {
        draw_bullet(surface, bullet);
    }
    if let Some(boss) = &state.boss {
        draw_boss(surface, boss);
        draw_boss_health_bar(surface, boss, state.width);
    }
    for asteroid in &state.asteroids {
        draw_asteroid(surface, asteroid);
    }
    for enemy in &state.enemies {
        draw_enemy(surface, enemy);
    }
    for item in &state.collectibles {
        draw_collectible(surface, item);
    }
    for particle in &state.particles {
        draw_particle(surface, particle);
    }
}

/// Starfield only, for screens shown outside a session.
pub fn draw_backdrop<S: Surface + ?Sized>(surface: &mut S, stars: &[Star]) {
    surface.fill_overlay(SPACE_BLACK, 1.0);
    for star in stars {
        draw_star(surface, star);
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_star<S: Surface + ?Sized>(surface: &mut S, star: &Star) {
    surface.save();
    surface.set_alpha(star.alpha);
    surface.fill_circle(star.x, star.y, star.size, WHITE);
    surface.restore();
}

fn draw_particle<S: Surface + ?Sized>(surface: &mut S, particle: &Particle) {
    surface.save();
    surface.set_alpha(particle.life.max(0.0));
    surface.fill_circle(particle.x, particle.y, particle.size, particle.color);
    surface.restore();
}

fn draw_bullet<S: Surface + ?Sized>(surface: &mut S, bullet: &Bullet) {
    let color = bullet.color();
    surface.fill_rect(bullet.bounds(), color, Some(Glow { color, blur: 10.0 }));
}

/// Sprite rectangle centred on the current (already translated) origin.
fn centered(width: f32, height: f32) -> Rect {
    Rect::new(-width / 2.0, -height / 2.0, width, height)
}

fn draw_player<S: Surface + ?Sized>(surface: &mut S, player: &Player, frame: u64) {
    let (cx, cy) = player.center();
    let (w, h) = (player.width, player.height);
    let glow = Glow { color: player.color(), blur: 20.0 };

    surface.save();
    surface.translate(cx, cy);
    if surface.sprite_ready(Sprite::Player) {
        surface.draw_image(Sprite::Player, centered(w, h), Some(glow));
    } else {
        let hull = [(0.0, -h / 2.0), (w / 2.0, h / 2.0), (-w / 2.0, h / 2.0)];
        surface.stroke_path(&hull, player.color(), 3.0, Some(glow));
    }
    surface.restore();

    if player.is_shielded() {
        let pulse = 0.5 + (frame as f32 * 0.1).sin() * 0.2;
        surface.save();
        surface.translate(cx, cy);
        surface.set_alpha(pulse);
        surface.stroke_circle(0.0, 0.0, w, SHIELD_GREEN, 3.0);
        surface.restore();
    }
}

fn draw_enemy<S: Surface + ?Sized>(surface: &mut S, enemy: &Enemy) {
    let (cx, cy) = enemy.bounds().center();
    let (w, h) = (enemy.width, enemy.height);
    let glow = Glow { color: enemy.color(), blur: 15.0 };

    surface.save();
    surface.translate(cx, cy);
    if surface.sprite_ready(Sprite::Enemy) {
        surface.draw_image(Sprite::Enemy, centered(w, h), Some(glow));
    } else {
        let diamond = [(0.0, -h / 2.0), (w / 2.0, 0.0), (0.0, h / 2.0), (-w / 2.0, 0.0)];
        surface.stroke_path(&diamond, enemy.color(), 2.0, Some(glow));
    }
    surface.restore();
}

fn draw_asteroid<S: Surface + ?Sized>(surface: &mut S, asteroid: &Asteroid) {
    let size = asteroid.size;
    surface.save();
    surface.translate(asteroid.x + size / 2.0, asteroid.y + size / 2.0);
    surface.rotate(asteroid.rotation);
    if surface.sprite_ready(Sprite::Asteroid) {
        surface.draw_image(Sprite::Asteroid, centered(size, size), None);
    } else {
        surface.fill_circle(0.0, 0.0, size / 2.0, ROCK_GREY);
    }
    surface.restore();
}

fn collectible_look(kind: CollectibleKind) -> (Sprite, Rgb) {
    match kind {
        CollectibleKind::MultiFire => (Sprite::MultiFireIcon, Rgb::new(0xff, 0xaa, 0x00)),
        CollectibleKind::Shield => (Sprite::ShieldIcon, Rgb::new(0x00, 0xff, 0x00)),
        CollectibleKind::Health => (Sprite::HealthIcon, RED),
    }
}

fn draw_collectible<S: Surface + ?Sized>(surface: &mut S, item: &Collectible) {
    let (cx, cy) = item.bounds().center();
    let (sprite, halo) = collectible_look(item.kind);

    surface.save();
    surface.translate(cx, cy);
    if surface.sprite_ready(sprite) {
        surface.draw_image(sprite, centered(item.width, item.height), Some(Glow { color: halo, blur: 15.0 }));
    } else {
        surface.fill_rect(centered(item.width, item.height), WHITE, None);
    }
    surface.restore();
}

fn draw_boss<S: Surface + ?Sized>(surface: &mut S, boss: &Boss) {
    let (cx, cy) = boss.center();
    surface.save();
    surface.translate(cx, cy);
    if surface.sprite_ready(Sprite::Boss) {
        surface.draw_image(
            Sprite::Boss,
            centered(boss.width, boss.height),
            Some(Glow { color: RED, blur: 30.0 }),
        );
    } else {
        surface.fill_rect(centered(boss.width, boss.height), RED, None);
    }
    surface.restore();
}

const BOSS_BAR_WIDTH: f32 = 200.0;
const BOSS_BAR_HEIGHT: f32 = 20.0;

fn draw_boss_health_bar<S: Surface + ?Sized>(surface: &mut S, boss: &Boss, surface_width: f32) {
    let frame = Rect::new(surface_width / 2.0 - BOSS_BAR_WIDTH / 2.0, 10.0, BOSS_BAR_WIDTH, BOSS_BAR_HEIGHT);

    surface.save();
    surface.set_alpha(0.5);
    surface.fill_rect(frame, Rgb::new(0, 0, 0), None);
    surface.restore();

    let fill = Rect { width: BOSS_BAR_WIDTH * boss.health_fraction(), ..frame };
    surface.fill_rect(fill, RED, None);
    surface.stroke_rect(frame, WHITE, 1.0);
}

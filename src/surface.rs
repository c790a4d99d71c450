//! Collaborator seams: the draw surface, the audio sink, the UI, and the
//! pointer.  The simulation never owns any of these; the session
//! controller and the renderer talk to them through these traits.

use crate::geometry::Rect;

// ── Colours ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

pub const NEON_CYAN: Rgb = Rgb::new(0x00, 0xf3, 0xff);
pub const NEON_MAGENTA: Rgb = Rgb::new(0xff, 0x00, 0xff);
pub const SHIELD_GREEN: Rgb = Rgb::new(0x00, 0xff, 0x9d);
pub const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);
pub const YELLOW: Rgb = Rgb::new(0xff, 0xff, 0x00);
pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const FIRE_ORANGE: Rgb = Rgb::new(0xff, 0x44, 0x00);
pub const ROCK_GREY: Rgb = Rgb::new(0x55, 0x55, 0x55);
pub const DEBRIS_GREY: Rgb = Rgb::new(0xaa, 0xaa, 0xaa);
pub const DUST_GREY: Rgb = Rgb::new(0x88, 0x88, 0x88);
pub const SPACE_BLACK: Rgb = Rgb::new(0x05, 0x05, 0x05);

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Image assets an entity may blit.  Whether one is loaded is the
/// surface's business; see [`Surface::sprite_ready`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy,
    Boss,
    Asteroid,
    MultiFireIcon,
    ShieldIcon,
    HealthIcon,
}

/// Soft coloured halo drawn behind an image or shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Rgb,
    pub blur: f32,
}

/// 2D drawing primitives.  Coordinates are world pixels, relative to the
/// current transform (see `save`/`translate`/`rotate`).
pub trait Surface {
    /// False until the asset behind `sprite` can be drawn.  Callers fall
    /// back to vector shapes instead of waiting.
    fn sprite_ready(&self, sprite: Sprite) -> bool;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, radians: f32);
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Rgb, glow: Option<Glow>);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb);
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, line_width: f32);
    /// Closed polygon outline through `points`.
    fn stroke_path(&mut self, points: &[(f32, f32)], color: Rgb, line_width: f32, glow: Option<Glow>);
    fn draw_image(&mut self, sprite: Sprite, rect: Rect, glow: Option<Glow>);

    /// Translucent fill over the whole surface (motion-trail effect).
    fn fill_overlay(&mut self, color: Rgb, alpha: f32);
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Shoot,
    Explosion,
    Damage,
    Powerup,
}

/// Fire-and-forget sound sink.  Implementations must tolerate calls made
/// before `init` by ignoring them.
pub trait Audio {
    fn init(&mut self);
    fn play(&mut self, cue: Cue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

// ── UI ────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    GameOver { final_score: u32 },
}

/// Score text, health bar, and overlay screens.
pub trait Ui {
    fn set_score(&mut self, score: u32);
    /// Percentage in `0..=100`.
    fn set_health(&mut self, percent: u8);
    fn show(&mut self, screen: Screen);
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Latest pointer sample, in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

impl Pointer {
    pub fn centered(width: f32, height: f32) -> Self {
        Pointer { x: width / 2.0, y: height / 2.0, pressed: false }
    }
}

//! Recording fakes for the collaborator traits, shared by the integration
//! tests.
#![allow(dead_code)]

use neon_shooter::geometry::Rect;
use neon_shooter::surface::{Audio, Cue, Glow, Rgb, Screen, Sprite, Surface, Ui};

use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCall {
    Init,
    Play(Cue),
    StartMusic,
    StopMusic,
}

#[derive(Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    pub fn played(&self, cue: Cue) -> usize {
        self.calls.iter().filter(|c| **c == AudioCall::Play(cue)).count()
    }
}

impl Audio for RecordingAudio {
    fn init(&mut self) {
        self.calls.push(AudioCall::Init);
    }
    fn play(&mut self, cue: Cue) {
        self.calls.push(AudioCall::Play(cue));
    }
    fn start_music(&mut self) {
        self.calls.push(AudioCall::StartMusic);
    }
    fn stop_music(&mut self) {
        self.calls.push(AudioCall::StopMusic);
    }
}

// ── UI ────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum UiCall {
    Score(u32),
    Health(u8),
    Show(Screen),
}

#[derive(Default)]
pub struct RecordingUi {
    pub calls: Vec<UiCall>,
}

impl RecordingUi {
    pub fn last_screen(&self) -> Option<Screen> {
        self.calls.iter().rev().find_map(|c| match c {
            UiCall::Show(screen) => Some(*screen),
            _ => None,
        })
    }
}

impl Ui for RecordingUi {
    fn set_score(&mut self, score: u32) {
        self.calls.push(UiCall::Score(score));
    }
    fn set_health(&mut self, percent: u8) {
        self.calls.push(UiCall::Health(percent));
    }
    fn show(&mut self, screen: Screen) {
        self.calls.push(UiCall::Show(screen));
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    Alpha(f32),
    FillRect(Rect, Rgb),
    StrokeRect(Rect, Rgb),
    FillCircle(f32, f32, f32, Rgb),
    StrokeCircle(f32, Rgb),
    StrokePath(usize, Rgb),
    Image(Sprite, Rect),
    Overlay(Rgb, f32),
}

/// Records every primitive.  `sprites_ready` answers every
/// `sprite_ready` query.
pub struct RecordingSurface {
    pub sprites_ready: bool,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(sprites_ready: bool) -> Self {
        RecordingSurface { sprites_ready, ops: Vec::new() }
    }

    pub fn images(&self) -> Vec<Sprite> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(sprite, _) => Some(*sprite),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn sprite_ready(&self, _sprite: Sprite) -> bool {
        self.sprites_ready
    }
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(Op::Translate(dx, dy));
    }
    fn rotate(&mut self, radians: f32) {
        self.ops.push(Op::Rotate(radians));
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(Op::Alpha(alpha));
    }
    fn fill_rect(&mut self, rect: Rect, color: Rgb, _glow: Option<Glow>) {
        self.ops.push(Op::FillRect(rect, color));
    }
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, _line_width: f32) {
        self.ops.push(Op::StrokeRect(rect, color));
    }
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        self.ops.push(Op::FillCircle(cx, cy, radius, color));
    }
    fn stroke_circle(&mut self, _cx: f32, _cy: f32, radius: f32, color: Rgb, _line_width: f32) {
        self.ops.push(Op::StrokeCircle(radius, color));
    }
    fn stroke_path(&mut self, points: &[(f32, f32)], color: Rgb, _line_width: f32, _glow: Option<Glow>) {
        self.ops.push(Op::StrokePath(points.len(), color));
    }
    fn draw_image(&mut self, sprite: Sprite, rect: Rect, _glow: Option<Glow>) {
        self.ops.push(Op::Image(sprite, rect));
    }
    fn fill_overlay(&mut self, color: Rgb, alpha: f32) {
        self.ops.push(Op::Overlay(color, alpha));
    }
}

//! Game-state controller: START → PLAYING → GAMEOVER.
//!
//! The controller owns the current `SessionState` (only while playing),
//! the pointer sample, the RNG, and the audio and UI collaborators.  The
//! host calls [`Session::frame`] once per display refresh and keeps doing
//! so while it returns `true`.

use log::{debug, info};
use rand::Rng;

use crate::compute::{self, new_session};
use crate::entities::{SessionState, Star, STAR_COUNT};
use crate::events::GameEvent;
use crate::render;
use crate::surface::{Audio, Pointer, Screen, Surface, Ui};

/// Frames the view stays offset after the player is hit.
pub const SHAKE_FRAMES: u32 = 3;
/// Largest offset, in world pixels, along either axis.
pub const SHAKE_MAGNITUDE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Start,
    Playing,
    GameOver,
}

pub struct Session<A: Audio, U: Ui, R: Rng> {
    status: GameStatus,
    state: Option<SessionState>,
    width: f32,
    height: f32,
    pointer: Pointer,
    /// Score of the session that ended most recently.
    final_score: u32,
    /// Starfield shown behind the start and game-over screens.
    backdrop: Vec<Star>,
    shake_frames: u32,
    shake_offset: (f32, f32),
    audio: A,
    ui: U,
    rng: R,
}

impl<A: Audio, U: Ui, R: Rng> Session<A, U, R> {
    pub fn new(width: f32, height: f32, audio: A, mut ui: U, mut rng: R) -> Self {
        let backdrop = starfield(width, height, &mut rng);
        ui.show(Screen::Start);
        Session {
            status: GameStatus::Start,
            state: None,
            width,
            height,
            pointer: Pointer::centered(width, height),
            final_score: 0,
            backdrop,
            shake_frames: 0,
            shake_offset: (0.0, 0.0),
            audio,
            ui,
            rng,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Live session, if one is running.
    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut SessionState> {
        self.state.as_mut()
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// View offset applied while the screen is shaking.
    pub fn shake_offset(&self) -> Option<(f32, f32)> {
        (self.shake_frames > 0).then_some(self.shake_offset)
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Pointer moves only steer the ship while a session is running.
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        if self.status == GameStatus::Playing {
            self.pointer.x = x;
            self.pointer.y = y;
        }
    }

    /// A press on the start screen starts the game.
    pub fn press(&mut self) {
        self.pointer.pressed = true;
        if self.status == GameStatus::Start {
            self.start();
        }
    }

    pub fn release(&mut self) {
        self.pointer.pressed = false;
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Throws away whatever was running and begins a fresh session.
    pub fn start(&mut self) {
        self.audio.init();
        self.audio.start_music();

        self.status = GameStatus::Playing;
        self.shake_frames = 0;
        self.state = Some(new_session(self.width, self.height, &mut self.rng));
        self.pointer = Pointer { pressed: self.pointer.pressed, ..Pointer::centered(self.width, self.height) };

        self.ui.show(Screen::Playing);
        self.ui.set_score(0);
        self.ui.set_health(100);
        info!("session started ({}x{})", self.width, self.height);
    }

    pub fn restart(&mut self) {
        self.start();
    }

    fn end(&mut self) {
        self.final_score = self.state.take().map(|s| s.score).unwrap_or(0);
        self.status = GameStatus::GameOver;
        self.shake_frames = 0;
        self.audio.stop_music();
        self.ui.show(Screen::GameOver { final_score: self.final_score });
        info!("session over, final score {}", self.final_score);
    }

    // ── Loop ─────────────────────────────────────────────────────────────────

    /// Runs one simulation step and forwards its events.  Returns whether
    /// the host should schedule another frame.
    pub fn frame(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return false,
        };

        compute::step(state, &self.pointer, &mut self.rng);
        self.shake_frames = self.shake_frames.saturating_sub(1);

        let mut destroyed = false;
        for event in state.drain_events() {
            match event {
                GameEvent::Sound(cue) => self.audio.play(cue),
                GameEvent::ScoreChanged(score) => self.ui.set_score(score),
                GameEvent::HealthChanged(percent) => self.ui.set_health(percent),
                GameEvent::PlayerHit => {
                    self.shake_frames = SHAKE_FRAMES;
                    self.shake_offset = (
                        self.rng.gen_range(-SHAKE_MAGNITUDE..=SHAKE_MAGNITUDE),
                        self.rng.gen_range(-SHAKE_MAGNITUDE..=SHAKE_MAGNITUDE),
                    );
                }
                GameEvent::PlayerDestroyed => destroyed = true,
                GameEvent::BossSpawned | GameEvent::BossDefeated => debug!("{:?}", event),
            }
        }

        if destroyed {
            self.end();
        }
        self.status == GameStatus::Playing
    }

    /// A running session keeps its entities; the menu starfield is
    /// regenerated to cover the new area.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        match self.state.as_mut() {
            Some(state) => state.resize(width, height),
            None => self.backdrop = starfield(width, height, &mut self.rng),
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        match (&self.state, self.shake_offset()) {
            (Some(state), Some((dx, dy))) => {
                surface.save();
                surface.translate(dx, dy);
                render::draw_frame(surface, state);
                surface.restore();
            }
            (Some(state), None) => render::draw_frame(surface, state),
            (None, _) => render::draw_backdrop(surface, &self.backdrop),
        }
    }
}

fn starfield(width: f32, height: f32, rng: &mut impl Rng) -> Vec<Star> {
    (0..STAR_COUNT).map(|_| Star::new(width, height, rng)).collect()
}

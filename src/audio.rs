//! Terminal stand-in for the sound system.
//!
//! A terminal cannot synthesise the game's cues, so this sink logs them
//! and, when enabled, rings the bell for explosions.  The bell is queued
//! and written with the next frame so it never interleaves with drawing.

use std::io::Write;

use crossterm::{style::Print, QueueableCommand};
use log::{debug, trace};
use neon_shooter::config::AudioConfig;
use neon_shooter::surface::{Audio, Cue};

pub struct TerminalAudio {
    enabled: bool,
    bell: bool,
    initialized: bool,
    music: bool,
    pending_bell: bool,
}

impl TerminalAudio {
    pub fn new(config: &AudioConfig) -> Self {
        TerminalAudio {
            enabled: config.enabled,
            bell: config.bell,
            initialized: false,
            music: false,
            pending_bell: false,
        }
    }

    /// Writes a queued bell, if any.
    pub fn flush_bell<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if std::mem::take(&mut self.pending_bell) {
            out.queue(Print('\x07'))?;
        }
        Ok(())
    }
}

impl Audio for TerminalAudio {
    fn init(&mut self) {
        if !self.initialized {
            self.initialized = true;
            debug!("audio initialised (enabled: {}, bell: {})", self.enabled, self.bell);
        }
    }

    fn play(&mut self, cue: Cue) {
        if !self.initialized || !self.enabled {
            return;
        }
        trace!("cue {:?}", cue);
        if self.bell && cue == Cue::Explosion {
            self.pending_bell = true;
        }
    }

    fn start_music(&mut self) {
        if !self.initialized || !self.enabled || self.music {
            return;
        }
        self.music = true;
        debug!("background loop started");
    }

    fn stop_music(&mut self) {
        if self.music {
            self.music = false;
            debug!("background loop stopped");
        }
    }
}

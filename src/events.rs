//! Side effects a simulation step wants the outside world to see.
//!
//! The step itself never touches a collaborator; it appends to
//! `SessionState::events` and the session controller drains the queue
//! after each step.

use crate::surface::Cue;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Sound(Cue),
    ScoreChanged(u32),
    /// Player health as a percentage of max, `0..=100`.
    HealthChanged(u8),
    /// A hit landed on the unshielded player.
    PlayerHit,
    /// Player health reached zero.  Emitted once per session.
    PlayerDestroyed,
    BossSpawned,
    BossDefeated,
}

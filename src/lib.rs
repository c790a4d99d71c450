//! Neon Shooter, a single-player arcade shooter.
//!
//! The crate is split between a pure per-frame simulation (`compute`,
//! `boss`, `spawner`) and the collaborator seams it talks to (`surface`,
//! `session`).  The terminal front-end in `main.rs` is one such
//! collaborator set; tests provide recording fakes.

pub mod boss;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod geometry;
pub mod render;
pub mod session;
pub mod spawner;
pub mod surface;

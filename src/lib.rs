//! Core of a wave-based invaders shooter.
//!
//! The library owns the whole simulation: entities, formations, collision,
//! scoring and the win/lose state machine. Drawing and input are reached
//! through the narrow interfaces in [`surface`] and [`input`], so the binary
//! only has to supply a terminal and a clock.

pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod surface;
pub mod types;
pub mod wave;

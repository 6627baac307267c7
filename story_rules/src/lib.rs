//! # Story Rules
//!
//! The rules side of the Forest Story adventure: the player's health, the
//! outcomes a playthrough can end with, and the configuration that tunes them.
//! This crate knows nothing about the story graph itself.

pub mod config;
pub mod player;

pub use config::*;
pub use player::*;

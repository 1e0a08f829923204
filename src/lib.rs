//! Hexapawn with a HER (Hexapawn Educable Robot) rote learner
//!
//! This crate provides:
//! - Complete Hexapawn rules on a 3x3 board with move validation
//! - The HER learning agent, which prunes moves that led to defeat
//! - Random and console agents behind a common `Agent` port
//! - A game director and training pipeline with pluggable observers
//! - A command-line interface for training runs and interactive play

pub mod adapters;
pub mod cli;
pub mod error;
pub mod her;
pub mod hexapawn;
pub mod pipeline;
pub mod ports;
pub mod utils;

pub use error::{Error, Result};
pub use her::LearningAgent;
pub use hexapawn::{Board, Move, Side};
pub use pipeline::{GameRecord, play_game};

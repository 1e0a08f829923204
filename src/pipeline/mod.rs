//! Game and training pipeline
//!
//! This module provides:
//! - The director, which referees a single game between two agents
//! - Training runs that replay games between the same agents
//! - Observers that report on a run while it happens

pub mod director;
pub mod observers;
pub mod training;

pub use director::{GameRecord, play_game, play_observed_game};
pub use observers::{ProgressObserver, TracingObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Observer};

//! HER learning system
//!
//! A rote learner in the spirit of Gardner's Hexapawn Educable Robot: one
//! "matchbox" of trusted moves per situation, pruned after every lost game.

pub mod agent;
pub mod preferences;

pub use agent::{LearnerStats, LearningAgent};
pub use preferences::{
    CascadeReport, History, PreferenceTable, Situation, SituationPreferences, TableStats,
};

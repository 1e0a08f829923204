//! CLI command implementations

pub mod play;
pub mod train;

use crate::{
    her::{LearnerStats, LearningAgent},
    ports::Agent,
};

/// Learner statistics, if `agent` is a HER learner.
pub(crate) fn learner_stats(agent: &dyn Agent) -> Option<LearnerStats> {
    agent
        .as_any()
        .downcast_ref::<LearningAgent>()
        .map(LearningAgent::stats)
}

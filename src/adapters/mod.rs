//! Adapters implementing the agent port.
//!
//! Baseline players that the director can pit against the HER learner:
//! a uniform random mover and a human reading moves from a console.

pub mod human_agent;
pub mod random_agent;

pub use human_agent::HumanAgent;
pub use random_agent::RandomAgent;

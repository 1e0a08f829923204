//! Ports (trait boundaries) for external collaborators.
//!
//! The game director and training pipeline only talk to players and
//! observers through these traits; concrete players live in [`crate::adapters`]
//! and [`crate::her`], concrete observers in [`crate::pipeline::observers`].

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;

//! Shared configuration types for CLI commands

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::RandomAgent,
    her::LearningAgent,
    hexapawn::Side,
    ports::Agent,
};

/// Options every command accepts
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,
}

impl CommonArgs {
    pub fn show_progress(&self) -> bool {
        !self.no_progress
    }
}

/// Kinds of computer player
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Uniformly random legal moves
    Random,
    /// HER rote learner
    Learner,
}

impl AgentKind {
    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Learner => "learner",
        }
    }

    /// Build a fresh agent of this kind for `side`.
    pub fn build(self, side: Side) -> Box<dyn Agent> {
        let name = format!("{}-{}", self.label(), side.to_string().to_lowercase());
        match self {
            AgentKind::Random => Box::new(RandomAgent::new(name)),
            AgentKind::Learner => Box::new(LearningAgent::new(name)),
        }
    }
}

/// Colour chosen on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::White => Side::White,
            SideArg::Black => Side::Black,
        }
    }
}

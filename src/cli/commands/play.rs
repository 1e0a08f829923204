//! Play command - a human at the console against the HER learner

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::{
    Error,
    adapters::{HumanAgent, RandomAgent},
    cli::{
        config::{CommonArgs, SideArg},
        output::{format_number, print_kv, print_section},
    },
    her::LearningAgent,
    hexapawn::Side,
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline, play_game},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the learner")]
pub struct PlayArgs {
    /// Colour you play
    #[arg(long, value_enum, default_value_t = SideArg::White)]
    pub side: SideArg,

    /// Games the learner plays against a random opponent before facing you
    #[arg(long, default_value_t = 0)]
    pub pretrain: usize,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    pub rounds: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Results of a play session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayTally {
    pub human_wins: usize,
    pub learner_wins: usize,
    /// Games the learner gave up before its first move.
    pub resignations: usize,
}

impl PlayTally {
    pub fn games(&self) -> usize {
        self.human_wins + self.learner_wins
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let tally = play_session(&args, HumanAgent::stdio("you"))?;

    print_section("Session Results");
    print_kv("Games", &format_number(tally.games()));
    print_kv("You won", &format_number(tally.human_wins));
    print_kv("Learner won", &format_number(tally.learner_wins));
    if tally.resignations > 0 {
        print_kv("Resignations", &format_number(tally.resignations));
    }
    Ok(())
}

/// Pre-train a learner, then let `human` play it for `args.rounds` games.
///
/// The learner keeps learning from the games against the human. Once its
/// opening situation is exhausted it resigns every remaining game.
pub fn play_session<R, W>(args: &PlayArgs, mut human: HumanAgent<R, W>) -> Result<PlayTally>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let human_side = Side::from(args.side);
    let learner_side = human_side.opposite();
    let mut learner = LearningAgent::new(format!(
        "learner-{}",
        learner_side.to_string().to_lowercase()
    ));
    if let Some(seed) = args.common.seed {
        learner.reseed(Some(seed));
    }

    if args.pretrain > 0 {
        pretrain(&mut learner, learner_side, args)?;
    }

    let mut tally = PlayTally::default();
    for round in 0..args.rounds {
        let outcome = match learner_side {
            Side::White => play_game(&mut learner, &mut human),
            _ => play_game(&mut human, &mut learner),
        };

        match outcome {
            Ok(record) if record.winner == human_side => tally.human_wins += 1,
            Ok(_) => tally.learner_wins += 1,
            Err(err @ Error::UnwinnableFirstMove { .. }) => {
                println!("\nThe learner resigns: {err}");
                tally.human_wins += args.rounds - round;
                tally.resignations += args.rounds - round;
                break;
            }
            Err(err) => return Err(err.into()),
        }
        info!(
            round,
            human_wins = tally.human_wins,
            learner_wins = tally.learner_wins,
            "round finished"
        );
    }

    Ok(tally)
}

fn pretrain(learner: &mut LearningAgent, learner_side: Side, args: &PlayArgs) -> Result<()> {
    let mut random = RandomAgent::new("random");
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: args.pretrain,
        seed: args.common.seed,
    });
    if args.common.show_progress() {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    println!(
        "Warming up the learner with {} games against a random opponent",
        format_number(args.pretrain)
    );
    let result = match learner_side {
        Side::White => pipeline.run(&mut *learner, &mut random)?,
        _ => pipeline.run(&mut random, &mut *learner)?,
    };
    if let Some(reason) = &result.stopped_early {
        println!("Warm-up stopped early: {reason}");
    }

    let stats = learner.stats();
    print_kv("Situations learned", &format_number(stats.table.situations));
    print_kv("Trusted moves", &format_number(stats.table.trusted_moves));
    Ok(())
}

//! Train command - play many games between two computer agents

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use super::learner_stats;
use crate::{
    cli::{
        config::{AgentKind, CommonArgs},
        output::{format_number, format_rate, print_kv, print_section, print_subsection},
    },
    her::LearnerStats,
    hexapawn::Side,
    pipeline::{ProgressObserver, TracingObserver, TrainingConfig, TrainingPipeline, TrainingResult},
    ports::Agent,
};

#[derive(Debug, Serialize)]
struct AgentSummary {
    kind: AgentKind,
    name: String,
    learner: Option<LearnerStats>,
}

impl AgentSummary {
    fn new(kind: AgentKind, agent: &dyn Agent) -> Self {
        Self {
            kind,
            name: agent.name().to_string(),
            learner: learner_stats(agent),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    games_requested: usize,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    white: AgentSummary,
    black: AgentSummary,
    metadata: SummaryMetadata,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train two agents against each other")]
pub struct TrainArgs {
    /// Agent playing White (moves first)
    #[arg(long, value_enum, default_value_t = AgentKind::Learner)]
    pub white: AgentKind,

    /// Agent playing Black
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    pub black: AgentKind,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut white = args.white.build(Side::White);
    let mut black = args.black.build(Side::Black);

    let config = TrainingConfig {
        num_games: args.games,
        seed: args.common.seed,
    };
    let mut pipeline = TrainingPipeline::new(config);
    if args.common.show_progress() {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline = pipeline.with_observer(Box::new(TracingObserver::new()));

    println!(
        "Training {} (White) against {} (Black) for {} games",
        white.name(),
        black.name(),
        format_number(args.games)
    );
    let result = pipeline.run(white.as_mut(), black.as_mut())?;

    print_section("Training Results");
    print_kv("Games played", &format_number(result.total_games));
    print_kv(
        "White wins",
        &format!(
            "{} ({})",
            format_number(result.white_wins),
            format_rate(result.white_win_rate)
        ),
    );
    print_kv(
        "Black wins",
        &format!(
            "{} ({})",
            format_number(result.black_wins),
            format_rate(result.black_win_rate)
        ),
    );
    print_kv("Average plies", &format!("{:.2}", result.average_plies));
    if let Some(reason) = &result.stopped_early {
        println!("\nWarning: training stopped early: {reason}");
    }

    for (side, agent) in [(Side::White, white.as_ref()), (Side::Black, black.as_ref())] {
        if let Some(stats) = learner_stats(agent) {
            print_subsection(&format!("{side} learner ({})", agent.name()));
            print_kv("Games lost", &format_number(stats.games_lost));
            print_kv("Guessed moves", &format_number(stats.guesses));
            print_kv("Situations", &format_number(stats.table.situations));
            print_kv("Trusted moves", &format_number(stats.table.trusted_moves));
            print_kv("Exhausted", &format_number(stats.table.exhausted));
        }
    }

    if let Some(raw) = &args.summary {
        let summary_path = sanitize_summary_path(raw);
        if summary_path != *raw {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            white: AgentSummary::new(args.white, white.as_ref()),
            black: AgentSummary::new(args.black, black.as_ref()),
            training: result,
            metadata: SummaryMetadata {
                games_requested: args.games,
                seed: args.common.seed,
            },
        };

        let file = File::create(&summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_extension_is_kept() {
        let path = sanitize_summary_path(Path::new("out/run.JSON"));
        assert_eq!(path, PathBuf::from("out/run.JSON"));
    }

    #[test]
    fn other_extensions_are_replaced() {
        let path = sanitize_summary_path(Path::new("out/run.txt"));
        assert_eq!(path, PathBuf::from("out/run.json"));
    }

    #[test]
    fn parses_agent_kinds() {
        let args = TrainArgs::parse_from(["train", "--white", "random", "--black", "learner"]);
        assert_eq!(args.white, AgentKind::Random);
        assert_eq!(args.black, AgentKind::Learner);
        assert_eq!(args.games, 1000);
        assert!(args.common.show_progress());
    }
}

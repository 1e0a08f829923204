//! Training pipeline: many games between the same pair of agents

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::director::play_observed_game;
use crate::{
    Error, Result,
    hexapawn::Side,
    ports::{Agent, Observer},
    utils::rate,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Random seed. White is seeded with it, Black with the next value.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 1000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Games actually completed
    pub total_games: usize,

    pub white_wins: usize,

    pub black_wins: usize,

    pub white_win_rate: f64,

    pub black_win_rate: f64,

    /// Mean number of plies per completed game
    pub average_plies: f64,

    /// Why the run ended before `num_games`, if it did
    pub stopped_early: Option<String>,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        total_games: usize,
        white_wins: usize,
        black_wins: usize,
        total_plies: usize,
        stopped_early: Option<String>,
    ) -> Self {
        Self {
            total_games,
            white_wins,
            black_wins,
            white_win_rate: rate(white_wins, total_games),
            black_win_rate: rate(black_wins, total_games),
            average_plies: rate(total_plies, total_games),
            stopped_early,
        }
    }

    /// Wins for one side.
    pub fn wins(&self, side: Side) -> usize {
        match side {
            Side::White => self.white_wins,
            Side::Black => self.black_wins,
            Side::Empty => 0,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays a fixed number of games between two agents.
///
/// The agents keep their state between games, so a learner gets better
/// over the course of a run.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run training with `white` always moving first.
    ///
    /// A learner whose opening situation has run out of trusted moves cannot
    /// play another game. The run then stops early and the reason is kept in
    /// [`TrainingResult::stopped_early`]; any other error ends the run.
    pub fn run(&mut self, white: &mut dyn Agent, black: &mut dyn Agent) -> Result<TrainingResult> {
        self.seed_pair(white, black)?;

        info!(
            games = self.config.num_games,
            white = white.name(),
            black = black.name(),
            seed = ?self.config.seed,
            "starting training"
        );

        let mut white_wins = 0;
        let mut black_wins = 0;
        let mut total_plies = 0;
        let mut total_games = 0;
        let mut stopped_early: Option<String> = None;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let record = match play_observed_game(game_num, white, black, &mut self.observers) {
                Ok(record) => record,
                Err(err @ Error::UnwinnableFirstMove { .. }) => {
                    stopped_early = Some(err.to_string());
                    break;
                }
                Err(err) => return Err(err),
            };

            match record.winner {
                Side::White => white_wins += 1,
                Side::Black => black_wins += 1,
                Side::Empty => {}
            }
            total_plies += record.plies();
            total_games += 1;
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        if let Some(reason) = &stopped_early {
            warn!(completed = total_games, %reason, "training stopped early");
        }

        let result = TrainingResult::new(
            total_games,
            white_wins,
            black_wins,
            total_plies,
            stopped_early,
        );
        info!(
            games = result.total_games,
            white_wins = result.white_wins,
            black_wins = result.black_wins,
            average_plies = result.average_plies,
            "training finished"
        );
        Ok(result)
    }

    fn seed_pair(&self, white: &mut dyn Agent, black: &mut dyn Agent) -> Result<()> {
        if let Some(seed) = self.config.seed {
            white.set_rng_seed(seed)?;
            black.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::RandomAgent,
        hexapawn::Board,
        her::LearningAgent,
    };

    fn config(num_games: usize, seed: u64) -> TrainingConfig {
        TrainingConfig {
            num_games,
            seed: Some(seed),
        }
    }

    #[test]
    fn every_game_has_a_winner() {
        let mut white = RandomAgent::new("white");
        let mut black = RandomAgent::new("black");
        let mut pipeline = TrainingPipeline::new(config(200, 3));

        let result = pipeline.run(&mut white, &mut black).unwrap();

        assert_eq!(result.total_games, 200);
        assert_eq!(result.white_wins + result.black_wins, 200);
        assert!((result.white_win_rate + result.black_win_rate - 1.0).abs() < 1e-9);
        assert!(result.average_plies >= 3.0);
        assert!(result.stopped_early.is_none());
    }

    #[test]
    fn same_seed_same_result() {
        let run = |seed| {
            let mut white = LearningAgent::new("her");
            let mut black = RandomAgent::new("random");
            TrainingPipeline::new(config(100, seed))
                .run(&mut white, &mut black)
                .unwrap()
        };

        let first = run(9);
        let second = run(9);
        assert_eq!(first.white_wins, second.white_wins);
        assert_eq!(first.average_plies, second.average_plies);
    }

    #[test]
    fn exhausted_opening_stops_the_run() {
        let mut white = LearningAgent::with_seed("her", 1);
        white.set_preferences(Side::White, Board::initial(), std::iter::empty());
        let mut black = RandomAgent::with_seed("random", 2);

        let result = TrainingPipeline::new(TrainingConfig::default())
            .run(&mut white, &mut black)
            .unwrap();

        assert_eq!(result.total_games, 0);
        assert!(result.stopped_early.unwrap().contains("opening position"));
    }

    #[test]
    fn wins_by_side() {
        let result = TrainingResult::new(4, 3, 1, 20, None);
        assert_eq!(result.wins(Side::White), 3);
        assert_eq!(result.wins(Side::Black), 1);
        assert_eq!(result.average_plies, 5.0);
    }

    #[test]
    fn result_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");

        let result = TrainingResult::new(10, 4, 6, 51, Some("stopped".to_string()));
        result.save(&path).unwrap();
        let loaded = TrainingResult::load(&path).unwrap();

        assert_eq!(loaded.total_games, 10);
        assert_eq!(loaded.black_wins, 6);
        assert_eq!(loaded.stopped_early.as_deref(), Some("stopped"));
    }
}

//! Observer implementations for training runs

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, trace};

use super::director::GameRecord;
use crate::{
    Result,
    hexapawn::{Board, Move, Side},
    ports::Observer,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    white_wins: usize,
    black_wins: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            white_wins: 0,
            black_wins: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} B:{}", self.white_wins, self.black_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        match record.winner {
            Side::White => self.white_wins += 1,
            Side::Black => self.black_wins += 1,
            Side::Empty => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Logs every ply and every finished game through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver {
    games: usize,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Games seen so far.
    pub fn games(&self) -> usize {
        self.games
    }
}

impl Observer for TracingObserver {
    fn on_move(
        &mut self,
        game_num: usize,
        ply: usize,
        board: &Board,
        side: Side,
        mv: Move,
    ) -> Result<()> {
        trace!(game = game_num, ply, %side, board = %board.encode(), mv = %mv, "ply");
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        self.games += 1;
        debug!(
            game = game_num,
            winner = %record.winner,
            plies = record.plies(),
            "game recorded"
        );
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        debug!(games = self.games, "observer saw training end");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::RandomAgent,
        pipeline::{TrainingConfig, TrainingPipeline},
    };

    #[test]
    fn tracing_observer_counts_games() {
        let mut observer = TracingObserver::new();
        let record = GameRecord {
            winner: Side::Black,
            moves: vec![(Side::White, Move::new(7, 4))],
            final_board: Board::initial(),
        };
        observer.on_game_end(0, &record).unwrap();
        observer.on_game_end(1, &record).unwrap();
        assert_eq!(observer.games(), 2);
    }

    #[test]
    fn progress_observer_runs_inside_pipeline() {
        let mut white = RandomAgent::new("white");
        let mut black = RandomAgent::new("black");
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            num_games: 10,
            seed: Some(5),
        })
        .with_observer(Box::new(ProgressObserver::new()))
        .with_observer(Box::new(TracingObserver::new()));

        let result = pipeline.run(&mut white, &mut black).unwrap();
        assert_eq!(result.total_games, 10);
    }
}

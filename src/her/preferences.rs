//! Preference store for the HER learner
//!
//! Each situation (side to move + board) owns a set of moves the learner
//! still trusts. Sets are seeded with every legal move the first time a
//! situation is seen and only ever shrink afterwards.

use std::collections::{BTreeSet, HashMap};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    hexapawn::{Board, Move, Side},
    utils::choose_uniform,
};

/// The unit of learning: a board together with the side about to move on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Situation {
    pub side: Side,
    pub board: Board,
}

impl Situation {
    pub fn new(side: Side, board: Board) -> Self {
        Situation { side, board }
    }
}

/// Moves still trusted from a single situation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationPreferences {
    moves: BTreeSet<Move>,
}

impl SituationPreferences {
    /// Trust every move `side` can currently play on `board`.
    pub fn seeded(board: &Board, side: Side) -> Self {
        SituationPreferences {
            moves: board.legal_moves(side),
        }
    }

    pub fn from_moves<I: IntoIterator<Item = Move>>(moves: I) -> Self {
        SituationPreferences {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// Stop trusting `mv`. Returns whether it was trusted before.
    pub fn remove(&mut self, mv: Move) -> bool {
        self.moves.remove(&mv)
    }

    /// Every move from here has been shown to lose.
    pub fn is_exhausted(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    /// Pick one of the trusted moves uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
        choose_uniform(rng, &self.moves)
    }
}

/// Moves played by the learner in the current game, in play order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History(Vec<(Board, Move)>);

impl History {
    pub fn new() -> Self {
        History(Vec::new())
    }

    pub fn push(&mut self, board: Board, mv: Move) {
        self.0.push((board, mv));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[(Board, Move)] {
        &self.0
    }
}

impl FromIterator<(Board, Move)> for History {
    fn from_iter<I: IntoIterator<Item = (Board, Move)>>(iter: I) -> Self {
        History(iter.into_iter().collect())
    }
}

/// Outcome of a backward pruning walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// History entries visited, newest first.
    pub visited: usize,
    /// Moves that were actually removed from a preference set.
    pub pruned: usize,
    /// Situations left with no trusted move.
    pub exhausted: usize,
    /// The walk ran out of history instead of stopping at a live situation.
    pub reached_start: bool,
}

/// Aggregate size of a preference table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub situations: usize,
    pub trusted_moves: usize,
    pub exhausted: usize,
}

/// Situation-keyed store of trusted moves.
///
/// Lookup is by value: boards with equal cells share an entry no matter
/// where they were constructed.
#[derive(Debug, Clone, Default)]
pub struct PreferenceTable {
    situations: HashMap<Situation, SituationPreferences>,
}

impl PreferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side, board: &Board) -> Option<&SituationPreferences> {
        self.situations.get(&Situation::new(side, *board))
    }

    /// Get the preferences for a situation, seeding them on first sight.
    pub fn entry(&mut self, side: Side, board: Board) -> &mut SituationPreferences {
        self.situations
            .entry(Situation::new(side, board))
            .or_insert_with(|| SituationPreferences::seeded(&board, side))
    }

    /// Overwrite the trusted moves of a situation.
    pub fn set<I: IntoIterator<Item = Move>>(&mut self, side: Side, board: Board, moves: I) {
        self.situations.insert(
            Situation::new(side, board),
            SituationPreferences::from_moves(moves),
        );
    }

    /// Punish a lost game.
    ///
    /// Walks `history` from the last move backward, removing each played move
    /// from its situation. The walk continues only while the situation just
    /// pruned has become exhausted; the first situation that still has a
    /// trusted move ends it. If every visited situation ends up exhausted the
    /// whole game is unwound. Situations the table has never seen count as
    /// exhausted.
    pub fn cascade(&mut self, side: Side, history: &[(Board, Move)]) -> CascadeReport {
        let mut report = CascadeReport::default();

        for &(board, mv) in history.iter().rev() {
            report.visited += 1;
            let prefs = self
                .situations
                .entry(Situation::new(side, board))
                .or_default();
            if prefs.remove(mv) {
                report.pruned += 1;
            }

            debug!(
                %side,
                board = %board.encode(),
                mv = %mv,
                remaining = prefs.len(),
                "pruned losing move"
            );

            if !prefs.is_exhausted() {
                return report;
            }
            report.exhausted += 1;
        }

        report.reached_start = true;
        report
    }

    /// Number of known situations across both sides.
    pub fn len(&self) -> usize {
        self.situations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.situations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Situation, &SituationPreferences)> {
        self.situations.iter()
    }

    /// Total number of trusted moves across all situations.
    pub fn trusted_moves(&self) -> usize {
        self.situations.values().map(SituationPreferences::len).sum()
    }

    pub fn stats(&self) -> TableStats {
        self.collect_stats(|_| true)
    }

    /// Statistics restricted to the situations where `side` is to move.
    pub fn stats_for(&self, side: Side) -> TableStats {
        self.collect_stats(|situation| situation.side == side)
    }

    fn collect_stats(&self, include: impl Fn(&Situation) -> bool) -> TableStats {
        self.situations
            .iter()
            .filter(|(situation, _)| include(situation))
            .fold(TableStats::default(), |mut stats, (_, prefs)| {
                stats.situations += 1;
                stats.trusted_moves += prefs.len();
                if prefs.is_exhausted() {
                    stats.exhausted += 1;
                }
                stats
            })
    }

    pub fn clear(&mut self) {
        self.situations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::parse(s).unwrap()
    }

    #[test]
    fn seeding_trusts_every_legal_move() {
        let mut table = PreferenceTable::new();
        let start = Board::initial();
        let prefs = table.entry(Side::White, start);
        assert_eq!(prefs.len(), 3);
        assert!(prefs.contains(Move::new(7, 4)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn equal_boards_share_an_entry() {
        let mut table = PreferenceTable::new();
        table.entry(Side::White, board("BBB/.../WWW"));
        table.entry(Side::White, Board::initial());
        assert_eq!(table.len(), 1);

        // same board, other side to move, is a different situation
        table.entry(Side::Black, Board::initial());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn cascade_stops_at_first_situation_with_options() {
        let b1 = board("BBB/.../WWW");
        let b2 = board("B.B/.B./W.W");
        let b3 = board("..B/.BW/W..");
        let m1 = Move::new(7, 4);
        let m2 = Move::new(6, 4);
        let m2_alt = Move::new(8, 4);
        let m3 = Move::new(5, 2);

        let mut table = PreferenceTable::new();
        table.set(Side::White, b1, [m1]);
        table.set(Side::White, b2, [m2, m2_alt]);
        table.set(Side::White, b3, [m3]);

        let report = table.cascade(Side::White, &[(b1, m1), (b2, m2), (b3, m3)]);

        assert!(table.get(Side::White, &b3).unwrap().is_exhausted());
        assert_eq!(
            table.get(Side::White, &b2).unwrap(),
            &SituationPreferences::from_moves([m2_alt])
        );
        assert_eq!(
            table.get(Side::White, &b1).unwrap(),
            &SituationPreferences::from_moves([m1])
        );
        assert_eq!(
            report,
            CascadeReport {
                visited: 2,
                pruned: 2,
                exhausted: 1,
                reached_start: false,
            }
        );
    }

    #[test]
    fn cascade_unwinds_whole_game_when_everything_is_exhausted() {
        let b1 = board("BBB/.../WWW");
        let b2 = board("B.B/.B./W.W");
        let m1 = Move::new(7, 4);
        let m2 = Move::new(6, 4);

        let mut table = PreferenceTable::new();
        table.set(Side::White, b1, [m1]);
        table.set(Side::White, b2, [m2]);

        let report = table.cascade(Side::White, &[(b1, m1), (b2, m2)]);

        assert!(report.reached_start);
        assert_eq!(report.exhausted, 2);
        assert_eq!(table.stats().exhausted, 2);
        assert_eq!(table.trusted_moves(), 0);
    }

    #[test]
    fn cascade_on_already_exhausted_situation_keeps_walking() {
        // a guessed move from an exhausted situation is not in the set
        let b1 = board("BBB/.../WWW");
        let b2 = board("B.B/.B./W.W");
        let m1 = Move::new(7, 4);
        let guess = Move::new(8, 4);

        let mut table = PreferenceTable::new();
        table.set(Side::White, b1, [m1, Move::new(6, 3)]);
        table.set(Side::White, b2, std::iter::empty());

        let report = table.cascade(Side::White, &[(b1, m1), (b2, guess)]);

        assert_eq!(report.pruned, 1);
        assert_eq!(report.visited, 2);
        assert_eq!(
            table.get(Side::White, &b1).unwrap(),
            &SituationPreferences::from_moves([Move::new(6, 3)])
        );
    }

    #[test]
    fn stats_are_split_by_side() {
        let mut table = PreferenceTable::new();
        table.entry(Side::White, Board::initial());
        table.set(Side::Black, board("BBB/W../.WW"), std::iter::empty());

        let white = table.stats_for(Side::White);
        assert_eq!(white.situations, 1);
        assert_eq!(white.trusted_moves, 3);
        assert_eq!(white.exhausted, 0);

        let black = table.stats_for(Side::Black);
        assert_eq!(black.situations, 1);
        assert_eq!(black.exhausted, 1);

        assert_eq!(table.stats().situations, 2);
    }
}

//! Regression tests for the HER learner driven through the agent port

use std::collections::{BTreeSet, HashMap};

use hexapawn::{
    Board, Error, LearningAgent, Move, Side,
    adapters::RandomAgent,
    her::Situation,
    pipeline::{TrainingConfig, TrainingPipeline, play_game},
    ports::Agent,
};

fn board(s: &str) -> Board {
    Board::parse(s).expect("valid board")
}

fn snapshot(agent: &LearningAgent) -> HashMap<Situation, BTreeSet<Move>> {
    agent
        .table()
        .iter()
        .map(|(situation, prefs)| (*situation, prefs.moves().collect()))
        .collect()
}

/// Moves trusted at first sight, summed over every situation the agent knows.
fn seeded_moves(agent: &LearningAgent) -> usize {
    agent
        .table()
        .iter()
        .map(|(situation, _)| situation.board.legal_moves(situation.side).len())
        .sum()
}

#[test]
fn loss_prunes_backward_until_a_situation_has_options() {
    let b1 = Board::initial();
    let b2 = board("B.B/.B./W.W");
    let b3 = board("..B/.BW/W..");
    let m1 = Move::new(7, 4);
    let options = [Move::new(6, 4), Move::new(8, 4)];
    let m3 = Move::new(6, 3);

    let mut agent = LearningAgent::with_seed("her", 17);
    agent.set_preferences(Side::White, b1, [m1]);
    agent.set_preferences(Side::White, b2, options);
    agent.set_preferences(Side::White, b3, [m3]);

    agent.on_game_start(Side::White).unwrap();
    assert_eq!(agent.get_move(&b1, Side::White).unwrap(), m1);
    let played = agent.get_move(&b2, Side::White).unwrap();
    assert_eq!(agent.get_move(&b3, Side::White).unwrap(), m3);
    agent.on_game_end(Side::Black).unwrap();

    let other = if played == options[0] {
        options[1]
    } else {
        options[0]
    };
    assert!(agent.preferences(Side::White, &b3).unwrap().is_exhausted());
    let b2_moves: Vec<Move> = agent.preferences(Side::White, &b2).unwrap().moves().collect();
    assert_eq!(b2_moves, vec![other]);
    let b1_moves: Vec<Move> = agent.preferences(Side::White, &b1).unwrap().moves().collect();
    assert_eq!(b1_moves, vec![m1]);
}

#[test]
fn preference_sets_never_grow() {
    let mut learner = LearningAgent::with_seed("her", 31);
    let mut random = RandomAgent::with_seed("random", 32);

    for _ in 0..300 {
        let before = snapshot(&learner);
        match play_game(&mut random, &mut learner) {
            Ok(_) => {}
            Err(Error::UnwinnableFirstMove { .. }) => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
        let after = snapshot(&learner);

        for (situation, moves) in &before {
            let now = &after[situation];
            assert!(now.is_subset(moves), "{situation:?} grew");
        }
    }
}

#[test]
fn every_loss_costs_at_least_one_trusted_move() {
    let mut white = RandomAgent::new("random");
    let mut black = LearningAgent::new("her");

    let result = TrainingPipeline::new(TrainingConfig {
        num_games: 2000,
        seed: Some(8),
    })
    .run(&mut white, &mut black)
    .unwrap();

    let stats = black.stats();
    let pruned = seeded_moves(&black) - stats.table.trusted_moves;
    assert_eq!(stats.games_lost, result.white_wins);
    assert!(stats.games_lost <= pruned);
    assert!(result.stopped_early.is_none());
}

#[test]
fn black_learner_improves_against_random_play() {
    let mut white = RandomAgent::new("random");
    let mut black = LearningAgent::new("her");

    let mut run = |seed| {
        TrainingPipeline::new(TrainingConfig {
            num_games: 1000,
            seed: Some(seed),
        })
        .run(&mut white, &mut black)
        .unwrap()
    };
    let early = run(100);
    let late = run(200);

    assert!(late.white_wins <= early.white_wins);
    assert!(late.black_win_rate >= 0.9);
}

#[test]
fn each_learner_only_knows_its_own_side() {
    let mut white = LearningAgent::new("her-white");
    let mut black = LearningAgent::new("her-black");

    TrainingPipeline::new(TrainingConfig {
        num_games: 200,
        seed: Some(4),
    })
    .run(&mut white, &mut black)
    .unwrap();

    assert_eq!(white.table().stats_for(Side::Black).situations, 0);
    assert_eq!(black.table().stats_for(Side::White).situations, 0);
    assert!(white.table().stats_for(Side::White).situations > 0);
}

use std::io::Cursor;

use clap::Parser;
use hexapawn::{
    Error,
    adapters::HumanAgent,
    cli::commands::play::{PlayArgs, play_session},
};

fn args(extra: &[&str]) -> PlayArgs {
    let mut argv = vec!["hexapawn-play", "--no-progress", "--seed", "11"];
    argv.extend_from_slice(extra);
    PlayArgs::parse_from(argv)
}

#[test]
fn illegal_console_move_aborts_the_game() {
    let human = HumanAgent::new("tester", Cursor::new(b"7 1\n".to_vec()), Vec::new());

    let err = play_session(&args(&["--side", "white"]), human).unwrap_err();
    let err = err.downcast::<Error>().unwrap();
    assert!(matches!(
        err,
        Error::AgentContractViolation {
            from: 7,
            to: 1,
            ..
        }
    ));
}

#[test]
fn closed_console_ends_the_session_with_an_error() {
    let human = HumanAgent::new("tester", Cursor::new(Vec::new()), Vec::new());

    let err = play_session(&args(&["--side", "black"]), human).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidInput { .. })
    ));
}

#[test]
fn pretraining_without_rounds_plays_no_games() {
    let human = HumanAgent::new("tester", Cursor::new(Vec::new()), Vec::new());

    let tally = play_session(&args(&["--pretrain", "50", "--rounds", "0"]), human).unwrap();
    assert_eq!(tally.games(), 0);
}

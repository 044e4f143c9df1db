use std::path::PathBuf;

use picotris_engine::{GameSession, Piece, PieceSeed, PlayerInput};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::info;

use crate::{
    logging::{self, LogTarget},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece seed as 32 hexadecimal digits (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Seed for the random player's choice of moves
    #[clap(long, default_value_t = 0)]
    player_seed: u64,
    /// Stop after this many settled pieces
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Write the JSON report to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Summary of a simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SimulationReport {
    seed: PieceSeed,
    player_seed: u64,
    pieces: usize,
    score: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    lost: bool,
    current_piece: Piece,
    court: Vec<String>,
}

const PLAYER_INPUTS: [PlayerInput; 4] = [
    PlayerInput::MoveLeft,
    PlayerInput::MoveRight,
    PlayerInput::Rotate,
    PlayerInput::Drop,
];

pub(crate) fn run(arg: &SimulateArg, verbose: u8) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        player_seed,
        max_pieces,
        output,
    } = arg;

    logging::init(verbose, LogTarget::Stderr)?;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let report = simulate(seed, *player_seed, *max_pieces);
    info!(
        pieces = report.pieces,
        score = report.score,
        lost = report.lost,
        "simulation finished"
    );
    util::save_json(&report, output.as_deref())
}

/// Plays one game with a player that presses a random key before every drop
/// tick. Stops when the game is lost or `max_pieces` pieces have settled.
pub(crate) fn simulate(seed: PieceSeed, player_seed: u64, max_pieces: usize) -> SimulationReport {
    let mut session = GameSession::with_seed(seed);
    let mut player = Pcg32::seed_from_u64(player_seed);

    while session.game().is_playing() && session.game().stats().settled_pieces() < max_pieces {
        let input = PLAYER_INPUTS[player.random_range(0..PLAYER_INPUTS.len())];
        _ = session.handle_input(input);
        session.drop_tick();
    }

    let game = session.game();
    let stats = game.stats();
    SimulationReport {
        seed,
        player_seed,
        pieces: stats.settled_pieces(),
        score: stats.score(),
        total_cleared_lines: stats.total_cleared_lines(),
        line_cleared_counter: *stats.line_cleared_counter(),
        lost: game.is_lost(),
        current_piece: *game.current_piece(),
        court: game.court().to_string().lines().map(str::to_owned).collect(),
    }
}

#[cfg(test)]
mod tests {
    use picotris_engine::{COURT_HEIGHT, SETTLE_SCORE, line_clear_score};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([0x42; 16]);

    #[test]
    fn test_simulation_is_reproducible() {
        let a = simulate(SEED, 1, 200);
        let b = simulate(SEED, 1, 200);
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulation_stops_at_piece_limit_or_loss() {
        let report = simulate(SEED, 2, 5);
        assert!(report.pieces <= 5);
        assert!(report.lost || report.pieces == 5);
    }

    #[test]
    fn test_zero_piece_limit_plays_nothing() {
        let report = simulate(SEED, 0, 0);
        assert_eq!(report.pieces, 0);
        assert_eq!(report.score, 0);
        assert!(!report.lost);
        assert!(report.court.iter().all(|row| row == ".........."));
    }

    #[test]
    fn test_score_matches_counters() {
        let report = simulate(SEED, 3, 1000);
        let line_score: usize = report
            .line_cleared_counter
            .iter()
            .enumerate()
            .map(|(lines, count)| line_clear_score(lines) * count)
            .sum();
        assert_eq!(report.score, report.pieces * SETTLE_SCORE + line_score);
        assert_eq!(report.line_cleared_counter.iter().sum::<usize>(), report.pieces);
    }

    #[test]
    fn test_report_json_shape() {
        let report = simulate(SEED, 0, 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "42424242424242424242424242424242");
        assert_eq!(json["court"].as_array().unwrap().len(), COURT_HEIGHT);
        assert!(json["current_piece"].as_str().unwrap().contains('@'));
    }
}

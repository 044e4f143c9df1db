use std::{path::PathBuf, time::Duration};

use picotris_engine::{GameSession, PieceSeed};
use tracing::info;

use crate::{
    command::play::app::PlayApp,
    logging::{self, LogTarget},
    tui::Tui,
};

mod app;

const DEFAULT_DROP_INTERVAL_MS: u64 = 300;
const DEFAULT_FRAME_INTERVAL_MS: u64 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Milliseconds between automatic drops
    #[clap(
        long,
        default_value_t = DEFAULT_DROP_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    drop_interval_ms: u64,
    /// Milliseconds between screen redraws
    #[clap(
        long,
        default_value_t = DEFAULT_FRAME_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    frame_interval_ms: u64,
    /// Piece seed as 32 hexadecimal digits (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Write logs to this file; the terminal is taken by the game
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            seed: None,
            log_file: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg, verbose: u8) -> anyhow::Result<()> {
    let PlayArg {
        drop_interval_ms,
        frame_interval_ms,
        seed,
        log_file,
    } = arg;

    let log_target = log_file.clone().map_or(LogTarget::Disabled, LogTarget::File);
    logging::init(verbose, log_target)?;

    let session = seed.map_or_else(GameSession::new, GameSession::with_seed);
    info!(seed = %session.game().seed(), "starting game");

    let mut app = PlayApp::new(
        session,
        Duration::from_millis(*drop_interval_ms),
        Duration::from_millis(*frame_interval_ms),
    );
    Tui::new().run(&mut app)?;

    let session = app.into_session();
    info!(
        score = session.game().score(),
        games = session.games_started(),
        "session finished"
    );
    Ok(())
}

use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a seeded random player without a terminal UI and print a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, args.verbose)?,
        Mode::Simulate(arg) => simulate::run(&arg, args.verbose)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["picotris"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_verbose_is_global() {
        let args = CommandArgs::try_parse_from(["picotris", "simulate", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let result = CommandArgs::try_parse_from(["picotris", "play", "--seed", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let result =
            CommandArgs::try_parse_from(["picotris", "play", "--drop-interval-ms", "0"]);
        assert!(result.is_err());
    }
}

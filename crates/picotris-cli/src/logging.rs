use std::{fs::File, io, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Where log records go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// No subscriber is installed.
    Disabled,
    Stderr,
    File(PathBuf),
}

/// Maps the `-v` count to a level: WARN by default, then INFO, DEBUG, TRACE.
pub fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init(verbose: u8, target: LogTarget) -> anyhow::Result<()> {
    let level = level_filter(verbose);
    match target {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false).with_writer(io::stderr))
                .with(level)
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        LogTarget::File(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(level)
                .try_init()
                .context("Failed to install log subscriber")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_filter(0), LevelFilter::WARN);
        assert_eq!(level_filter(1), LevelFilter::INFO);
        assert_eq!(level_filter(2), LevelFilter::DEBUG);
        assert_eq!(level_filter(3), LevelFilter::TRACE);
        assert_eq!(level_filter(u8::MAX), LevelFilter::TRACE);
    }

    #[test]
    fn test_disabled_target_installs_nothing() {
        init(3, LogTarget::Disabled).unwrap();
    }
}

//! Logger construction.
//!
//! Each tool builds a [`Logging`] from its verbosity flags and runs its job under the
//! resulting dispatcher (`WithSubscriber::with_subscriber`), so nothing is installed
//! as the process-wide default.

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

use crate::config::VerbosityArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logging {
    level: LevelFilter,
}

impl Logging {
    /// WARN by default, INFO with `--verbose`, DEBUG with `--debug` (debug wins).
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        let level = if debug {
            LevelFilter::DEBUG
        } else if verbose {
            LevelFilter::INFO
        } else {
            LevelFilter::WARN
        };
        Self { level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// `RUST_LOG`, when set and valid, takes precedence over the flag-derived level.
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }

    pub fn dispatch(&self) -> Dispatch {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        Dispatch::new(subscriber)
    }
}

impl From<VerbosityArgs> for Logging {
    fn from(v: VerbosityArgs) -> Self {
        Self::from_flags(v.verbose, v.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_flags() {
        assert_eq!(Logging::from_flags(false, false).level(), LevelFilter::WARN);
        assert_eq!(Logging::from_flags(true, false).level(), LevelFilter::INFO);
        assert_eq!(Logging::from_flags(false, true).level(), LevelFilter::DEBUG);
        assert_eq!(Logging::from_flags(true, true).level(), LevelFilter::DEBUG);
    }
}

//! Error types for configuration loading and blocking waits.
//!
//! Selection input on an empty or unselected list is not an error: the
//! navigator ignores it. Open/close conflicts are resolved by override.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::openness::Target;

/// Failure of [`crate::blocking::wait_until_open`] / [`crate::blocking::wait_until_closed`].
#[derive(Debug, Error)]
pub enum WaitError {
    /// The window is idle short of the target and nothing will move it there.
    #[error("window is not transitioning toward {target}; request it first")]
    Unreachable { target: Target },

    /// The frame budget ran out before the target was reached.
    #[error("transition did not finish within {ticks} frames")]
    TimedOut { ticks: u32 },

    /// The cancel token was set between frames.
    #[error("wait cancelled after {ticks} frames")]
    Cancelled { ticks: u32 },

    /// The host frame pump failed.
    #[error("frame pump failed: {0}")]
    Host(#[from] io::Error),
}

/// Failure while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_errors_render_frame_counts() {
        assert_eq!(
            WaitError::TimedOut { ticks: 30 }.to_string(),
            "transition did not finish within 30 frames"
        );
        assert_eq!(
            WaitError::Cancelled { ticks: 3 }.to_string(),
            "wait cancelled after 3 frames"
        );
    }

    #[test]
    fn unreachable_names_the_target() {
        let err = WaitError::Unreachable { target: Target::Closed };
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn host_errors_convert() {
        let err: WaitError = io::Error::other("terminal gone").into();
        assert!(matches!(err, WaitError::Host(_)));
    }
}

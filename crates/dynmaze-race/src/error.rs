//! Race-level errors.

use std::error::Error;
use std::fmt;

use dynmaze_core::MazeError;

use crate::config::ConfigError;
use crate::race::RaceState;

/// Errors surfaced by [`Race`](crate::Race) operations.
///
/// An unreachable goal is not an error; it is recorded as
/// [`RaceOutcome::Unreachable`](crate::RaceOutcome::Unreachable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A grid operation failed.
    Maze(MazeError),
    /// `tick` was called outside the `Running` state.
    NotRunning(RaceState),
    /// `start` was called after the race had left `Setup`.
    AlreadyStarted(RaceState),
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Maze(e) => write!(f, "maze: {e}"),
            Self::NotRunning(state) => write!(f, "race is not running (state: {state})"),
            Self::AlreadyStarted(state) => write!(f, "race already started (state: {state})"),
        }
    }
}

impl Error for RaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Maze(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for RaceError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<MazeError> for RaceError {
    fn from(e: MazeError) -> Self {
        Self::Maze(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynmaze_core::Cell;

    #[test]
    fn source_chains_to_inner_error() {
        let inner = MazeError::NotAdjacent {
            a: Cell::new(0, 0),
            b: Cell::new(2, 2),
        };
        let err: RaceError = inner.clone().into();
        assert_eq!(err, RaceError::Maze(inner));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("not adjacent"));
    }

    #[test]
    fn state_errors_have_no_source() {
        let err = RaceError::NotRunning(RaceState::Setup);
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "race is not running (state: setup)");
    }
}

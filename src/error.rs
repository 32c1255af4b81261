//! Errors for the outer shell: terminal I/O and configuration.
//!
//! The simulation itself cannot fail; nothing in `compute`, `entities` or
//! `wave` returns these.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// Terminal or file I/O failed.
    Io(io::Error),

    /// A configuration file was unreadable or held an unusable value.
    Config {
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(err) => write!(f, "terminal I/O failed: {}", err),
            GameError::Config { path, message } => {
                write!(f, "bad config '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(err) => Some(err),
            GameError::Config { .. } => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}

pub type GameResult<T> = Result<T, GameError>;

/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type for Cadence
#[derive(Error, Debug)]
pub enum CadenceError {
    /// A playlist adapter could not read or write a location
    #[error("Parser {parser} failed on {path}: {reason}")]
    Parse {
        /// Adapter name
        parser: String,
        /// Location being read or written
        path: String,
        /// What went wrong
        reason: String,
    },

    /// No registered adapter could handle a location
    #[error("Could not find appropriate parser for {path}")]
    NoParser {
        /// Location nobody could handle
        path: String,
    },

    /// Writing a playlist failed after the target was already cleared
    #[error("Could not persist playlist to {path}: {reason}")]
    Persistence {
        /// Target location
        path: String,
        /// Last adapter failure
        reason: String,
    },

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CadenceError {
    /// Create a parse error for a named adapter
    pub fn parse(
        parser: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Parse {
            parser: parser.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a "no parser" error
    pub fn no_parser(path: impl Into<String>) -> Self {
        Self::NoParser { path: path.into() }
    }

    /// Create a persistence error
    pub fn persistence(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::PlaylistNotFound(name.into())
    }
}

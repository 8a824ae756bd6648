use thiserror::Error;

/// Result type alias for greencheck-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for GreenCheck
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Script library errors
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// Logging setup errors
    #[error("logging error: {0}")]
    Logging(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Script library errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Script index outside the library
    #[error("no script at index {index} (library has {len} scripts)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A script must have at least one turn
    #[error("script '{0}' has no turns")]
    EmptyScript(String),

    /// The library must have at least one script
    #[error("script library is empty")]
    EmptyLibrary,
}

pub mod config;
pub mod error;
pub mod logging;
pub mod player;
pub mod script;

pub use config::{Config, FileLoggingConfig, LoggingConfig};
pub use error::{Error, Result, ScriptError};
pub use logging::{LogFormat, init_logging};
pub use player::{DEFAULT_TYPING_DELAY, PendingReply, Player, Speaker, TranscriptEntry};
pub use script::{Script, ScriptLibrary, Turn};

use std::io;
use std::path::PathBuf;

/// Errors that can occur while resolving and running a pawn tool
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument '{option}': {message}")]
    ArgumentParse { option: String, message: String },

    #[error("Failed to load plugin '{module}': {reason}")]
    PluginLoad { module: String, reason: String },

    #[error("Environment probe failed: {0}")]
    Probe(String),

    #[error("Failed to launch local installation {}: {source}", entry.display())]
    DelegateSpawn {
        entry: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Local installation {} exited with {}", entry.display(), describe_code(*code))]
    DelegateExit { entry: PathBuf, code: Option<i32> },

    #[error("Cannot change working directory to {}: {source}", path.display())]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Option '{name}' from {incoming} collides with the one declared by {existing}")]
    OptionCollision {
        name: String,
        existing: String,
        incoming: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Program(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a failure returned by a program's `execute`
    pub fn program(err: anyhow::Error) -> Self {
        Error::Program(err.into())
    }

    pub(crate) fn argument(option: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ArgumentParse {
            option: option.into(),
            message: message.into(),
        }
    }

    pub(crate) fn plugin(module: impl Into<String>, reason: impl ToString) -> Self {
        Error::PluginLoad {
            module: module.into(),
            reason: reason.to_string(),
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Result type alias for pawn operations
pub type Result<T> = std::result::Result<T, Error>;

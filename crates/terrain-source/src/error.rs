use std::fmt;
use std::path::PathBuf;

use terrain_core::CalendarError;

/// Why a contribution fetch failed. Callers treat every variant the same
/// way (error panel plus retry); the variants exist for logs.
#[derive(Debug)]
pub enum FetchError {
    InvalidRequest(String),
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    GraphQl(Vec<String>),
    NotFound(String),
    Malformed(String),
}

impl FetchError {
    /// Human-readable message for the error state.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            FetchError::Transport(e) => write!(f, "request failed: {e}"),
            FetchError::Status { status, body } if body.is_empty() => {
                write!(f, "GitHub responded with status {status}")
            }
            FetchError::Status { status, body } => {
                write!(f, "GitHub responded with status {status}: {body}")
            }
            FetchError::GraphQl(messages) => write!(f, "GitHub query failed: {}", messages.join("; ")),
            FetchError::NotFound(login) => write!(f, "no GitHub user named '{login}'"),
            FetchError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Malformed(e.to_string())
    }
}

impl From<CalendarError> for FetchError {
    fn from(e: CalendarError) -> Self {
        FetchError::Malformed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

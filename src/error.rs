use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("unknown pipeline '{name}'")]
    UnknownPipeline { name: String },

    #[error("pipeline '{pipeline}' does not produce {expected}")]
    PipelineKind {
        pipeline: String,
        expected: &'static str,
    },

    #[error("pipeline '{pipeline}' is unavailable: {reason}")]
    PipelineUnavailable { pipeline: String, reason: String },
}

/// Fetch failures below the pipeline boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("{url} still failing after {attempts} attempt(s): {reason}")]
    Exhausted {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("browser driver error: {0}")]
    Browser(String),

    #[error("inspect lookup failed: {0}")]
    Inspect(String),
}

/// Protocol violations on a [`crate::stream`] channel.
///
/// These are programming errors and are never recovered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("put on a closed stream")]
    Closed,

    #[error("stream closed twice")]
    AlreadyClosed,

    #[error("stream reader dropped before the writer finished")]
    ReceiverDropped,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("malformed response from {source_name}: {reason}")]
    MalformedResponse {
        source_name: &'static str,
        reason: String,
    },

    #[error("could not resolve item name: {0}")]
    NameResolution(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("task failed: {0}")]
    Task(String),
}

impl Error {
    /// Build a [`Error::MalformedResponse`] for the named source.
    pub fn malformed(source_name: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            source_name,
            reason: reason.into(),
        }
    }

    /// Stable category name, used by notifiers to pick a user-facing message.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Domain(_) | Self::MalformedResponse { .. } | Self::Json(_) => "malformed_response",
            Self::Transport(_) | Self::Url(_) => "transport",
            Self::NameResolution(_) => "name_resolution",
            Self::Stream(_) | Self::Io(_) | Self::Task(_) => "internal",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::Http(err))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_the_taxonomy() {
        assert_eq!(
            Error::from(ConfigError::UnknownPipeline { name: "x".into() }).category(),
            "configuration"
        );
        assert_eq!(Error::malformed("steam", "no listinginfo").category(), "malformed_response");
        assert_eq!(Error::NameResolution("AK-47".into()).category(), "name_resolution");
        assert_eq!(
            Error::from(TransportError::Browser("gone".into())).category(),
            "transport"
        );
        assert_eq!(Error::from(StreamError::Closed).category(), "internal");
    }

    #[test]
    fn malformed_message_names_the_source() {
        let err = Error::malformed("csmoney", "missing items");
        assert_eq!(err.to_string(), "malformed response from csmoney: missing items");
    }
}

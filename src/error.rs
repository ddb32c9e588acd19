//! Library error type.

use std::path::PathBuf;
use std::time::Duration;

/// Broad failure categories. Every kind is fatal; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown source name or table identifier.
    Configuration,
    /// Network timeout or HTTP failure.
    Transport,
    /// The remote service does not know the organism.
    NotFound,
    /// Upstream response or CSV file not in the expected format.
    MalformedResponse,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("unknown source '{0}', expected one of: kazusa, cocoputs")]
    UnknownSource(String),

    #[error("unknown table identifier '{0}'")]
    UnknownTable(String),

    #[error("invalid taxonomy ID '{0}'")]
    InvalidTaxid(String),

    #[error("connection to {url} timed out after {timeout:?}. Maybe the service is down?")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("codon usage table for taxonomy ID '{taxid}' not found: {url}")]
    NotFound { taxid: u64, url: String },

    #[error("malformed response: missing field '{0}'")]
    MissingField(&'static str),

    #[error("malformed response: cannot parse {field} value '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("malformed response at line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("malformed codon table CSV at line {line}: {reason}")]
    MalformedCsv { line: usize, reason: String },

    #[error("cannot access '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownSource(_) | Self::UnknownTable(_) | Self::InvalidTaxid(_) => {
                ErrorKind::Configuration
            }
            Self::Timeout { .. } | Self::Transport { .. } | Self::HttpStatus { .. } => {
                ErrorKind::Transport
            }
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MissingField(_)
            | Self::InvalidNumber { .. }
            | Self::MalformedLine { .. }
            | Self::MalformedCsv { .. } => ErrorKind::MalformedResponse,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_mentions_service() {
        let err = TableError::Timeout { url: "http://example.org".into(), timeout: Duration::from_secs(5) };
        let msg = err.to_string();
        assert!(msg.contains("timed out after 5s"));
        assert!(msg.contains("service is down"));
        assert_eq!(err.kind(), ErrorKind::Transport);

        let short = TableError::Timeout { url: String::new(), timeout: Duration::from_millis(500) };
        assert!(short.to_string().contains("timed out after 500ms"));
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(TableError::UnknownSource("x".into()).kind(), ErrorKind::Configuration);
        assert_eq!(TableError::UnknownTable("x".into()).kind(), ErrorKind::Configuration);
        let nf = TableError::NotFound { taxid: 1, url: String::new() };
        assert_eq!(nf.kind(), ErrorKind::NotFound);
        assert_eq!(TableError::MissingField("taxid").kind(), ErrorKind::MalformedResponse);
    }
}

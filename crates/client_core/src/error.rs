use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Failure of a single dispatcher round-trip. Rendered into an operator
/// notice by the command and query clients; never returned past them.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{method} {path} failed: {} - {body}", .status.as_u16())]
    Rejected {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("{method} {path} failed: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl DispatchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DispatchError::Rejected { status, .. } => Some(*status),
            DispatchError::Transport { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum BaseUrlError {
    #[error("invalid dispatcher url '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("dispatcher url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

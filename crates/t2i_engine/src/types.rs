use std::fmt;
use std::io;

use t2i_core::{EndpointsResponse, RenderedImage};

pub use t2i_core::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    EndpointsLoaded(Result<EndpointsResponse, ClientError>),
    StarCountLoaded(Option<u64>),
    GenerateCompleted {
        request_id: RequestId,
        result: Result<RenderedImage, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text shown to the user. For a rejected request this is the body the
    /// service sent back.
    pub fn detail(&self) -> String {
        match self.kind {
            FailureKind::HttpStatus(_) => self.message.clone(),
            _ => self.to_string(),
        }
    }
}

/// Failure to bring the engine up.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] ClientError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientError, FailureKind};

    #[test]
    fn detail_of_rejection_is_the_body() {
        let err = ClientError::new(FailureKind::HttpStatus(500), "jinja2 exploded");
        assert_eq!(err.detail(), "jinja2 exploded");
        assert_eq!(err.to_string(), "http status 500: jinja2 exploded");
    }

    #[test]
    fn detail_of_transport_failure_names_the_kind() {
        let err = ClientError::new(FailureKind::Timeout, "operation timed out");
        assert_eq!(err.detail(), "timeout: operation timed out");
    }
}

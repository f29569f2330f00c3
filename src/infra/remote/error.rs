use reqwest::StatusCode;
use thiserror::Error;

/// Any failed round trip to the remote catalog.
///
/// 4xx and 5xx are not distinguished; callers only learn that the call failed.
#[derive(Error, Debug)]
pub enum RequestFailure {
    #[error("{operation} failed: HTTP {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned an unreadable body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl RequestFailure {
    pub fn operation(&self) -> &'static str {
        match self {
            RequestFailure::Status { operation, .. }
            | RequestFailure::Transport { operation, .. }
            | RequestFailure::Decode { operation, .. } => operation,
        }
    }

    /// HTTP status, when the remote answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestFailure::Status { status, .. } => Some(*status),
            RequestFailure::Transport { source, .. } | RequestFailure::Decode { source, .. } => {
                source.status()
            }
        }
    }

    /// Reason phrase of the HTTP status, if any.
    pub fn reason(&self) -> Option<&'static str> {
        self.status().and_then(|s| s.canonical_reason())
    }
}

use std::fmt;

use dashboard_core::{
    BatchId, FormTarget, ParametricJob, Request, RequestId, TargetOutcome,
};
use thiserror::Error;

/// Everything the client reports back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    TableLoaded(Result<Vec<Request>, ApiError>),
    JobsLoaded {
        request_id: RequestId,
        result: Result<Vec<ParametricJob>, ApiError>,
    },
    /// Emitted once per batch, after every request in it has settled.
    BatchSettled {
        batch_id: BatchId,
        outcomes: Vec<TargetOutcome>,
    },
    InfoLoaded(Result<String, ApiError>),
    RequestSaved {
        target: FormTarget,
        result: Result<(), ApiError>,
    },
    TagsLoaded(Result<Vec<String>, ApiError>),
    AppVersionsLoaded {
        app: String,
        result: Result<Vec<String>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

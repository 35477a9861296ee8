use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-side identifier for one dispatched submission.
pub type RequestId = u64;

/// A transcription task as the service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub video_url: String,
    pub video_title: String,
    pub transcription: String,
    pub summary: String,
}

/// Acknowledgement body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any network activity.
    InvalidUrl,
    /// Transport-level failure reaching the service.
    Network,
    /// The service was reached but responded with a non-2xx status.
    Remote(u16),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidUrl => write!(f, "invalid url"),
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Remote(status) => write!(f, "service error (http {status})"),
        }
    }
}

/// Settlement events reported by [`crate::ApiHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    SubmitSettled {
        request_id: RequestId,
        url: String,
        result: Result<Task, ApiError>,
    },
    TasksListed {
        result: Result<Vec<Task>, ApiError>,
    },
    DeleteSettled {
        task_id: String,
        result: Result<DeleteAck, ApiError>,
    },
}

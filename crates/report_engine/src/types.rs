use std::fmt;

use report_core::{Failure, FailureKind, JobStatus, ReportData, SessionId};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Launched {
        session: SessionId,
        instance_id: String,
    },
    StatusObserved {
        session: SessionId,
        attempt: u32,
        status: JobStatus,
    },
    SessionCompleted {
        session: SessionId,
        result: Result<ReportData, SessionFailure>,
    },
}

/// Failure of one remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteErrorKind::InvalidUrl => write!(f, "invalid url"),
            RemoteErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            RemoteErrorKind::Timeout => write!(f, "timeout"),
            RemoteErrorKind::Network => write!(f, "network error"),
            RemoteErrorKind::Decode => write!(f, "decode error"),
        }
    }
}

/// Why a session ended without data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFailure {
    /// The session ran to an outcome the widget should show.
    Failed(Failure),
    /// The session was superseded or torn down; nobody is waiting for it.
    Cancelled,
}

impl SessionFailure {
    pub(crate) fn failed(kind: FailureKind, detail: impl Into<String>) -> Self {
        SessionFailure::Failed(Failure {
            kind,
            detail: detail.into(),
        })
    }

    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            SessionFailure::Failed(failure) => Some(failure.kind),
            SessionFailure::Cancelled => None,
        }
    }
}

impl fmt::Display for SessionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionFailure::Failed(failure) => write!(f, "{}: {}", failure.kind, failure.detail),
            SessionFailure::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// How a poll loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded { attempts: u32 },
    Failed { attempts: u32 },
    Exhausted { attempts: u32 },
}

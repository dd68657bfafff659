//! Report engine: remote calls, polling and session execution.
mod engine;
mod poller;
mod service;
mod session;
mod types;

pub use engine::{ClockFn, EngineConfig, EngineError, EngineHandle};
pub use poller::{poll_until_terminal, ChannelEventSink, EventSink};
pub use service::{HttpReportService, ReportService, ServiceSettings};
pub use session::{run_session, FETCHED_UTC_FIELD};
pub use types::{EngineEvent, PollOutcome, RemoteError, RemoteErrorKind, SessionFailure};

use crate::{FailureKind, JobStatus, ReportData, SessionId, SortDirection};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Widget was attached to the page; runs the report once.
    Connected,
    /// User clicked the re-run control.
    RunClicked,
    /// Widget was removed from the page; any pending session is cancelled.
    Disconnected,
    /// Engine: launch returned a job instance identifier.
    LaunchSucceeded {
        session: SessionId,
        instance_id: String,
    },
    /// Engine: a status query returned a value.
    StatusObserved {
        session: SessionId,
        attempt: u32,
        status: JobStatus,
    },
    /// Engine: rows were fetched and materialized.
    ReportReady {
        session: SessionId,
        data: ReportData,
    },
    /// Engine: the session ended without data.
    SessionFailed {
        session: SessionId,
        kind: FailureKind,
        detail: String,
    },
    /// Table raised a sort request.
    SortRequested {
        field: String,
        direction: SortDirection,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}

use crate::{LaunchRequest, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch the report, poll it to completion and fetch its rows.
    RunReport {
        session: SessionId,
        request: LaunchRequest,
        filter_sortable: bool,
    },
    /// Stop a session's poll loop; its late results are discarded.
    CancelSession { session: SessionId },
}

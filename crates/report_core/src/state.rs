use std::fmt;

use crate::view_model::WidgetView;
use crate::{columns, JobStatus, ReportData, SortState, WidgetConfig};

/// Error text shown when the backend reports the job itself as failed.
pub const JOB_FAILED_TEXT: &str = "Error when fetching Report";

/// Token attached to one launch; responses for any other token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Launch,
    JobFailed,
    Timeout,
    MaterializationFailed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Launch => write!(f, "launch failed"),
            FailureKind::JobFailed => write!(f, "job failed"),
            FailureKind::Timeout => write!(f, "timed out"),
            FailureKind::MaterializationFailed => write!(f, "materialization failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: String,
}

/// What the widget is showing. Exactly one of spinner, data or error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WidgetStatus {
    #[default]
    Loading,
    Ready(ReportData),
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    config: WidgetConfig,
    status: WidgetStatus,
    current: Option<SessionId>,
    in_flight: bool,
    torn_down: bool,
    instance_id: Option<String>,
    last_status: Option<JobStatus>,
    attempts: u32,
    sort: Option<SortState>,
    dirty: bool,
}

impl AppState {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn view(&self) -> WidgetView {
        let (show_error, error_text) = match &self.status {
            WidgetStatus::Failed(failure) => {
                let banner = match failure.kind {
                    FailureKind::JobFailed => self.config.error_banner_on_job_failure,
                    _ => true,
                };
                (banner, failure.detail.clone())
            }
            _ => (false, String::new()),
        };
        let (rows, metadata) = match &self.status {
            WidgetStatus::Ready(data) => (data.rows.clone(), data.metadata.clone()),
            _ => Default::default(),
        };

        WidgetView {
            show_spinner: matches!(self.status, WidgetStatus::Loading),
            show_data: matches!(self.status, WidgetStatus::Ready(_)),
            show_error,
            error_text,
            failure_kind: self.failure().map(|failure| failure.kind),
            columns: columns(&rows),
            rows,
            metadata,
            sorted_by: self.sort.as_ref().map(|sort| sort.field.clone()),
            sort_direction: self.sort.as_ref().map(|sort| sort.direction),
            component_style: self.config.component_style(),
            height: self.config.height,
            session: self.current,
            instance_id: self.instance_id.clone(),
            last_status: self.last_status.clone(),
            attempts: self.attempts,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn status(&self) -> &WidgetStatus {
        &self.status
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.status {
            WidgetStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn current_session(&self) -> Option<SessionId> {
        self.current
    }

    /// True while a launched session has not yet reached a terminal outcome.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Allocates the next session token and resets per-session progress.
    pub(crate) fn begin_session(&mut self) -> SessionId {
        let next = SessionId(self.current.map_or(1, |SessionId(id)| id + 1));
        self.current = Some(next);
        self.in_flight = true;
        self.torn_down = false;
        self.instance_id = None;
        self.last_status = None;
        self.attempts = 0;
        self.status = WidgetStatus::Loading;
        self.mark_dirty();
        next
    }

    pub(crate) fn tear_down(&mut self) {
        self.in_flight = false;
        self.torn_down = true;
    }

    /// True if `session` is the live session and may still change the state.
    pub(crate) fn accepts(&self, session: SessionId) -> bool {
        !self.torn_down && self.in_flight && self.current == Some(session)
    }

    pub(crate) fn record_launch(&mut self, instance_id: String) {
        self.instance_id = Some(instance_id);
        self.mark_dirty();
    }

    pub(crate) fn record_status(&mut self, attempt: u32, status: JobStatus) {
        self.attempts = attempt;
        self.last_status = Some(status);
        self.mark_dirty();
    }

    pub(crate) fn finish_ready(&mut self, data: ReportData) {
        self.in_flight = false;
        self.status = WidgetStatus::Ready(data);
        self.mark_dirty();
    }

    pub(crate) fn finish_failed(&mut self, failure: Failure) {
        self.in_flight = false;
        self.status = WidgetStatus::Failed(failure);
        self.mark_dirty();
    }

    pub(crate) fn set_sort(&mut self, sort: SortState) {
        self.sort = Some(sort);
        self.mark_dirty();
    }

    pub(crate) fn ready_data_mut(&mut self) -> Option<&mut ReportData> {
        match &mut self.status {
            WidgetStatus::Ready(data) => Some(data),
            _ => None,
        }
    }
}

use serde_json::{Map, Value};

use crate::{FailureKind, JobStatus, Row, SessionId, SortDirection};

/// Render-ready snapshot of the widget.
///
/// The three visibility flags are derived from a single tagged status, so
/// `show_spinner` and `show_data` are never both set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetView {
    pub show_spinner: bool,
    pub show_data: bool,
    /// Error banner visibility.
    pub show_error: bool,
    pub error_text: String,
    pub failure_kind: Option<FailureKind>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub metadata: Map<String, Value>,
    pub sorted_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub component_style: String,
    pub height: u32,
    pub session: Option<SessionId>,
    pub instance_id: Option<String>,
    pub last_status: Option<JobStatus>,
    pub attempts: u32,
}

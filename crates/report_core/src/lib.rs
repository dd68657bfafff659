//! Report printer core: pure widget state machine, materialization and sorting.
mod config;
mod effect;
mod msg;
mod policy;
mod report;
mod sort;
mod state;
mod status;
mod update;
mod view_model;

pub use config::{LaunchRequest, WidgetConfig};
pub use effect::Effect;
pub use msg::Msg;
pub use policy::{Backoff, PollPolicy, PollPolicyError};
pub use report::{
    columns, display_value, materialize, MaterializeError, ReportData, Row, CUSTOM_VALUES_FIELD,
};
pub use sort::{compare_values, sort_rows, Primer, SortDirection, SortDirectionError, SortState};
pub use state::{AppState, Failure, FailureKind, SessionId, WidgetStatus, JOB_FAILED_TEXT};
pub use status::JobStatus;
pub use update::update;
pub use view_model::WidgetView;

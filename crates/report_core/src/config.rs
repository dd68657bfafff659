use serde::{Deserialize, Serialize};

use crate::PollPolicy;

/// Configuration supplied by the hosting page and record context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Current record identifier, sent as the report's `objectId`.
    pub record_id: String,
    pub report_developer_name: String,
    pub filter_by_current_record: bool,
    /// Container height in pixels.
    pub height: u32,
    /// Forwarded to the data fetch as `configFilterSortable`.
    pub filter_sortable: bool,
    pub poll: PollPolicy,
    /// Raise the error banner when the job itself ends in `Error`.
    ///
    /// Launch, timeout and materialization failures always raise it.
    pub error_banner_on_job_failure: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            record_id: String::new(),
            report_developer_name: String::new(),
            filter_by_current_record: false,
            height: 300,
            filter_sortable: false,
            poll: PollPolicy::default(),
            error_banner_on_job_failure: false,
        }
    }
}

/// Request fields of the remote launch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub report_developer_name: String,
    pub filter_by_current_record: bool,
    pub object_id: String,
}

impl WidgetConfig {
    pub fn launch_request(&self) -> LaunchRequest {
        LaunchRequest {
            report_developer_name: self.report_developer_name.clone(),
            filter_by_current_record: self.filter_by_current_record,
            object_id: self.record_id.clone(),
        }
    }

    pub fn component_style(&self) -> String {
        format!("height:{}px;", self.height)
    }
}

use std::fs;
use std::path::Path;

use report_core::{PollPolicyError, WidgetConfig};
use report_engine::ServiceSettings;
use report_logging::report_info;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("invalid widget.poll: {0}")]
    Poll(#[from] PollPolicyError),
}

/// Everything the hosting page would otherwise supply, as one RON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub widget: WidgetConfig,
    pub service: ServiceSettings,
}

impl AppConfig {
    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(url) = &args.base_url {
            self.service.base_url = url.clone();
        }
        if let Some(record_id) = &args.record_id {
            self.widget.record_id = record_id.clone();
        }
        if let Some(report) = &args.report {
            self.widget.report_developer_name = report.clone();
        }
        if let Some(filter) = args.filter_by_current_record {
            self.widget.filter_by_current_record = filter;
        }
        if let Some(height) = args.height {
            self.widget.height = height;
        }
        if let Some(sortable) = args.sortable {
            self.widget.filter_sortable = sortable;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.widget.report_developer_name.trim().is_empty() {
            return Err(ConfigError::Missing("widget.report_developer_name"));
        }
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("service.base_url"));
        }
        self.widget.poll.validate()?;
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    report_info!("Loaded config from {:?}", path);
    Ok(config)
}

use std::time::Duration;

use report_core::LaunchRequest;
use report_logging::{report_debug, TARGET_REMOTE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{RemoteError, RemoteErrorKind};

/// The three remote operations the widget consumes.
#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    /// Start a report run; returns the job instance identifier.
    async fn execute_report_async(&self, request: &LaunchRequest) -> Result<String, RemoteError>;

    /// Current status of a job instance.
    async fn get_report_instance(&self, instance_id: &str) -> Result<String, RemoteError>;

    /// Finished report record, with rows JSON-encoded in `customValues`.
    async fn get_report_data(
        &self,
        instance_id: &str,
        config_filter_sortable: bool,
    ) -> Result<Value, RemoteError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/services/apexrest/reports".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstanceRequest<'a> {
    report_instance_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DataRequest<'a> {
    report_instance_id: &'a str,
    config_filter_sortable: bool,
}

/// JSON-over-HTTP client: each operation is a `POST {base_url}/{operation}`.
#[derive(Debug, Clone)]
pub struct HttpReportService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl HttpReportService {
    pub fn new(settings: ServiceSettings) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RemoteError::new(RemoteErrorKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, operation: &str) -> Result<reqwest::Url, RemoteError> {
        let base = self.settings.base_url.trim_end_matches('/');
        reqwest::Url::parse(&format!("{base}/{operation}"))
            .map_err(|err| RemoteError::new(RemoteErrorKind::InvalidUrl, err.to_string()))
    }

    async fn call<B, T>(&self, operation: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(operation)?;
        report_debug!(target: TARGET_REMOTE, "POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let message = if detail.is_empty() {
                status.to_string()
            } else {
                detail
            };
            return Err(RemoteError::new(
                RemoteErrorKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl ReportService for HttpReportService {
    async fn execute_report_async(&self, request: &LaunchRequest) -> Result<String, RemoteError> {
        self.call("executeReportAsync", request).await
    }

    async fn get_report_instance(&self, instance_id: &str) -> Result<String, RemoteError> {
        self.call(
            "getReportInstance",
            &InstanceRequest {
                report_instance_id: instance_id,
            },
        )
        .await
    }

    async fn get_report_data(
        &self,
        instance_id: &str,
        config_filter_sortable: bool,
    ) -> Result<Value, RemoteError> {
        self.call(
            "getReportData",
            &DataRequest {
                report_instance_id: instance_id,
                config_filter_sortable,
            },
        )
        .await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        return RemoteError::new(RemoteErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return RemoteError::new(RemoteErrorKind::Decode, err.to_string());
    }
    RemoteError::new(RemoteErrorKind::Network, err.to_string())
}

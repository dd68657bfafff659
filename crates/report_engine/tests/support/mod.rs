#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use report_core::LaunchRequest;
use report_engine::{EngineEvent, EventSink, RemoteError, RemoteErrorKind, ReportService};
use serde_json::{json, Value};
use tokio::time::Instant;

/// Scripted in-memory backend that records every call.
pub struct FakeService {
    launch: Mutex<Result<String, RemoteError>>,
    statuses: Mutex<VecDeque<Result<String, RemoteError>>>,
    data: Mutex<Result<Value, RemoteError>>,
    pub launches: Mutex<Vec<LaunchRequest>>,
    pub status_calls: Mutex<Vec<Instant>>,
    pub fetch_calls: Mutex<Vec<(Instant, String, bool)>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            launch: Mutex::new(Ok("0LGxx0000000001".to_string())),
            statuses: Mutex::new(VecDeque::new()),
            data: Mutex::new(Ok(json!({
                "reportName": "Open Cases",
                "customValues": "[{\"a\":2},{\"a\":1}]",
            }))),
            launches: Mutex::new(Vec::new()),
            status_calls: Mutex::new(Vec::new()),
            fetch_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        *self.statuses.lock().unwrap() = statuses.iter().map(|s| Ok(s.to_string())).collect();
        self
    }

    pub fn with_status_results(self, statuses: Vec<Result<String, RemoteError>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_launch_error(self, message: &str) -> Self {
        *self.launch.lock().unwrap() = Err(RemoteError::new(RemoteErrorKind::Network, message));
        self
    }

    pub fn with_data(self, data: Result<Value, RemoteError>) -> Self {
        *self.data.lock().unwrap() = data;
        self
    }

    pub fn status_count(&self) -> usize {
        self.status_calls.lock().unwrap().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ReportService for FakeService {
    async fn execute_report_async(&self, request: &LaunchRequest) -> Result<String, RemoteError> {
        self.launches.lock().unwrap().push(request.clone());
        self.launch.lock().unwrap().clone()
    }

    async fn get_report_instance(&self, _instance_id: &str) -> Result<String, RemoteError> {
        self.status_calls.lock().unwrap().push(Instant::now());
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Running".to_string()))
    }

    async fn get_report_data(
        &self,
        instance_id: &str,
        config_filter_sortable: bool,
    ) -> Result<Value, RemoteError> {
        self.fetch_calls.lock().unwrap().push((
            Instant::now(),
            instance_id.to_string(),
            config_filter_sortable,
        ));
        self.data.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn launch_request() -> LaunchRequest {
    LaunchRequest {
        report_developer_name: "Open_Cases".to_string(),
        filter_by_current_record: true,
        object_id: "001XX000003DHPh".to_string(),
    }
}

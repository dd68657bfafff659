use std::future;

use report_core::{materialize, FailureKind, LaunchRequest, ReportData, SessionId};
use report_logging::{report_error, report_info, TARGET_REMOTE};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::poller::{poll_until_terminal, EventSink};
use crate::{EngineConfig, EngineEvent, PollOutcome, ReportService, SessionFailure};

/// Metadata key stamped on materialized reports when the clock yields a value.
pub const FETCHED_UTC_FIELD: &str = "fetchedUtc";

/// Launch a report, poll it to a terminal status and materialize its rows.
pub async fn run_session(
    service: &dyn ReportService,
    session: SessionId,
    request: &LaunchRequest,
    filter_sortable: bool,
    config: &EngineConfig,
    cancel: &CancellationToken,
    sink: &dyn EventSink,
) -> Result<ReportData, SessionFailure> {
    let launched = tokio::select! {
        _ = cancel.cancelled() => return Err(SessionFailure::Cancelled),
        launched = service.execute_report_async(request) => launched,
    };
    let instance_id = launched.map_err(|err| {
        report_error!(
            target: TARGET_REMOTE,
            "Session {} launch of {} failed: {}",
            session,
            request.report_developer_name,
            err
        );
        SessionFailure::failed(FailureKind::Launch, err.to_string())
    })?;
    report_info!(
        target: TARGET_REMOTE,
        "Session {} launched {} as {}",
        session,
        request.report_developer_name,
        instance_id
    );
    sink.emit(EngineEvent::Launched {
        session,
        instance_id: instance_id.clone(),
    });

    let policy = &config.poll;
    let deadline = async {
        match policy.deadline {
            Some(limit) => tokio::time::sleep(limit).await,
            None => future::pending::<()>().await,
        }
    };
    let outcome = tokio::select! {
        _ = cancel.cancelled() => return Err(SessionFailure::Cancelled),
        _ = deadline => {
            return Err(SessionFailure::failed(
                FailureKind::Timeout,
                format!("report did not finish within {:?}", policy.deadline.unwrap_or_default()),
            ));
        }
        outcome = poll_until_terminal(service, session, &instance_id, policy, sink) => outcome,
    };

    match outcome {
        PollOutcome::Succeeded { .. } => {}
        PollOutcome::Failed { attempts } => {
            return Err(SessionFailure::failed(
                FailureKind::JobFailed,
                format!("report instance {instance_id} ended with status Error after {attempts} checks"),
            ));
        }
        PollOutcome::Exhausted { attempts } => {
            return Err(SessionFailure::failed(
                FailureKind::Timeout,
                format!("report did not finish after {attempts} status checks"),
            ));
        }
    }

    let fetched = tokio::select! {
        _ = cancel.cancelled() => return Err(SessionFailure::Cancelled),
        fetched = service.get_report_data(&instance_id, filter_sortable) => fetched,
    };
    let mut data = fetched
        .map_err(|err| err.to_string())
        .and_then(|record| materialize(record).map_err(|err| err.to_string()))
        .map_err(|message| {
            report_error!(
                target: TARGET_REMOTE,
                "Session {} could not materialize {}: {}",
                session,
                instance_id,
                message
            );
            SessionFailure::failed(FailureKind::MaterializationFailed, message)
        })?;

    let fetched_utc = (config.fetched_utc)();
    if !fetched_utc.is_empty() {
        data.metadata
            .insert(FETCHED_UTC_FIELD.to_string(), Value::String(fetched_utc));
    }
    report_info!(
        target: TARGET_REMOTE,
        "Session {} materialized {} rows",
        session,
        data.rows.len()
    );
    Ok(data)
}

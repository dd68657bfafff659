use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use report_core::{Effect, Msg, PollPolicy};
use report_engine::{
    EngineConfig, EngineError, EngineEvent, EngineHandle, ReportService, SessionFailure,
};
use report_logging::{report_debug, report_info};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(service: Arc<dyn ReportService>, poll: PollPolicy) -> Result<Self, EngineError> {
        let config = EngineConfig {
            poll,
            fetched_utc: Arc::new(|| Utc::now().to_rfc3339()),
        };
        let engine = EngineHandle::new(service, config)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RunReport {
                    session,
                    request,
                    filter_sortable,
                } => {
                    report_info!(
                        "RunReport session={} report={} object_id={} filter_by_current_record={}",
                        session,
                        request.report_developer_name,
                        request.object_id,
                        request.filter_by_current_record
                    );
                    self.engine.run(session, request, filter_sortable);
                }
                Effect::CancelSession { session } => {
                    report_info!("CancelSession session={}", session);
                    self.engine.cancel(session);
                }
            }
        }
    }

    /// Wait up to `timeout` for the next engine event that the widget cares about.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).and_then(map_event)
    }
}

/// Translate an engine event into a widget message; cancelled sessions produce none.
pub fn map_event(event: EngineEvent) -> Option<Msg> {
    let msg = match event {
        EngineEvent::Launched {
            session,
            instance_id,
        } => Msg::LaunchSucceeded {
            session,
            instance_id,
        },
        EngineEvent::StatusObserved {
            session,
            attempt,
            status,
        } => Msg::StatusObserved {
            session,
            attempt,
            status,
        },
        EngineEvent::SessionCompleted {
            session,
            result: Ok(data),
        } => Msg::ReportReady { session, data },
        EngineEvent::SessionCompleted {
            session,
            result: Err(SessionFailure::Failed(failure)),
        } => Msg::SessionFailed {
            session,
            kind: failure.kind,
            detail: failure.detail,
        },
        EngineEvent::SessionCompleted {
            session,
            result: Err(SessionFailure::Cancelled),
        } => {
            report_debug!("Session {} ended after cancellation", session);
            return None;
        }
    };
    Some(msg)
}

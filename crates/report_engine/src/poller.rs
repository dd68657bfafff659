use report_core::{JobStatus, PollPolicy, SessionId};
use report_logging::{report_debug, report_warn, TARGET_REMOTE};

use crate::{EngineEvent, PollOutcome, ReportService};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Query the job status on the policy's cadence until it reaches a terminal value.
///
/// The first query happens one delay after the call. A failed query is logged and
/// counts as an attempt. Deadline and cancellation are the caller's concern.
pub async fn poll_until_terminal(
    service: &dyn ReportService,
    session: SessionId,
    instance_id: &str,
    policy: &PollPolicy,
    sink: &dyn EventSink,
) -> PollOutcome {
    let mut attempt: u32 = 0;
    loop {
        if policy.attempts_exhausted(attempt) {
            return PollOutcome::Exhausted { attempts: attempt };
        }
        attempt += 1;
        tokio::time::sleep(policy.delay_for(attempt)).await;

        let raw = match service.get_report_instance(instance_id).await {
            Ok(raw) => raw,
            Err(err) => {
                report_warn!(
                    target: TARGET_REMOTE,
                    "Status query {} for {} failed ({}): {}",
                    attempt,
                    instance_id,
                    err.kind,
                    err
                );
                continue;
            }
        };

        let status = JobStatus::parse(&raw);
        report_debug!(
            target: TARGET_REMOTE,
            "Session {} instance {} attempt {}: {}",
            session,
            instance_id,
            attempt,
            status
        );
        sink.emit(EngineEvent::StatusObserved {
            session,
            attempt,
            status: status.clone(),
        });

        match status {
            JobStatus::Success => return PollOutcome::Succeeded { attempts: attempt },
            JobStatus::Error => return PollOutcome::Failed { attempts: attempt },
            JobStatus::Other(_) => {}
        }
    }
}

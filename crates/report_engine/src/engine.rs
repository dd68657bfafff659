use std::collections::HashMap;
use std::fmt;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use report_core::{LaunchRequest, PollPolicy, PollPolicyError, SessionId};
use report_logging::{report_debug, report_info};
use tokio_util::sync::CancellationToken;

use crate::poller::ChannelEventSink;
use crate::session::run_session;
use crate::{EngineEvent, ReportService};

/// Clock used to stamp materialized reports; an empty string skips the stamp.
pub type ClockFn = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub poll: PollPolicy,
    pub fetched_utc: ClockFn,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll: PollPolicy::default(),
            fetched_utc: Arc::new(String::new),
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(std::io::Error),
    #[error("invalid poll policy: {0}")]
    Policy(#[from] PollPolicyError),
}

enum EngineCommand {
    Run {
        session: SessionId,
        request: LaunchRequest,
        filter_sortable: bool,
    },
    Cancel {
        session: SessionId,
    },
}

/// Owns the background runtime that executes report sessions.
///
/// Starting a session cancels every earlier one. Dropping the handle cancels all
/// sessions that are still polling.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn ReportService>, config: EngineConfig) -> Result<Self, EngineError> {
        config.poll.validate()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("report-engine".to_string())
            .spawn(move || {
                let root = CancellationToken::new();
                let mut sessions: HashMap<SessionId, CancellationToken> = HashMap::new();

                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Run {
                            session,
                            request,
                            filter_sortable,
                        } => {
                            for (old, token) in sessions.drain() {
                                report_debug!("Superseding session {}", old);
                                token.cancel();
                            }
                            let cancel = root.child_token();
                            sessions.insert(session, cancel.clone());

                            let service = service.clone();
                            let config = config.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let sink = ChannelEventSink::new(event_tx.clone());
                                let result = run_session(
                                    service.as_ref(),
                                    session,
                                    &request,
                                    filter_sortable,
                                    &config,
                                    &cancel,
                                    &sink,
                                )
                                .await;
                                if let Err(failure) = &result {
                                    report_debug!("Session {} ended without data: {}", session, failure);
                                }
                                let _ = event_tx.send(EngineEvent::SessionCompleted { session, result });
                            });
                        }
                        EngineCommand::Cancel { session } => {
                            if let Some(token) = sessions.remove(&session) {
                                report_info!("Cancelling session {}", session);
                                token.cancel();
                            }
                        }
                    }
                }

                report_debug!("Engine handle dropped; cancelling {} sessions", sessions.len());
                root.cancel();
                runtime.shutdown_timeout(Duration::from_secs(1));
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn run(&self, session: SessionId, request: LaunchRequest, filter_sortable: bool) {
        let _ = self.cmd_tx.send(EngineCommand::Run {
            session,
            request,
            filter_sortable,
        });
    }

    pub fn cancel(&self, session: SessionId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { session });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

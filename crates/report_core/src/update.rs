use report_logging::{report_debug, report_warn, TARGET_WIDGET};

use crate::state::JOB_FAILED_TEXT;
use crate::{sort_rows, AppState, Effect, Failure, FailureKind, Msg, SessionId, SortState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Connected => {
            if state.current_session().is_some() && !state.is_torn_down() {
                return (state, Vec::new());
            }
            let session = state.begin_session();
            vec![run_report(&state, session)]
        }
        Msg::RunClicked => {
            if state.is_torn_down() {
                return (state, Vec::new());
            }
            let superseded = state
                .current_session()
                .filter(|_| state.is_in_flight());
            let session = state.begin_session();
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = superseded {
                effects.push(Effect::CancelSession { session: previous });
            }
            effects.push(run_report(&state, session));
            effects
        }
        Msg::Disconnected => {
            if state.is_torn_down() {
                return (state, Vec::new());
            }
            let pending = state
                .current_session()
                .filter(|_| state.is_in_flight());
            state.tear_down();
            pending
                .map(|session| vec![Effect::CancelSession { session }])
                .unwrap_or_default()
        }
        Msg::LaunchSucceeded {
            session,
            instance_id,
        } => {
            if accept(&state, session, "launch") {
                state.record_launch(instance_id);
            }
            Vec::new()
        }
        Msg::StatusObserved {
            session,
            attempt,
            status,
        } => {
            if accept(&state, session, "status") {
                state.record_status(attempt, status);
            }
            Vec::new()
        }
        Msg::ReportReady { session, data } => {
            if accept(&state, session, "report data") {
                state.finish_ready(data);
            }
            Vec::new()
        }
        Msg::SessionFailed {
            session,
            kind,
            detail,
        } => {
            if accept(&state, session, "failure") {
                report_warn!(target: TARGET_WIDGET, "Session {} {}: {}", session, kind, detail);
                let detail = match kind {
                    FailureKind::JobFailed => JOB_FAILED_TEXT.to_string(),
                    _ => detail,
                };
                state.finish_failed(Failure { kind, detail });
            }
            Vec::new()
        }
        Msg::SortRequested { field, direction } => {
            if let Some(data) = state.ready_data_mut() {
                data.rows = sort_rows(&data.rows, &field, direction, None);
            }
            state.set_sort(SortState { field, direction });
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn run_report(state: &AppState, session: SessionId) -> Effect {
    Effect::RunReport {
        session,
        request: state.config().launch_request(),
        filter_sortable: state.config().filter_sortable,
    }
}

fn accept(state: &AppState, session: SessionId, what: &str) -> bool {
    let accepted = state.accepts(session);
    if !accepted {
        report_debug!(
            target: TARGET_WIDGET,
            "Discarding stale {} for session {} (current {:?})",
            what,
            session,
            state.current_session()
        );
    }
    accepted
}

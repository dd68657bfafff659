use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use report_core::{update, AppState, Msg, WidgetStatus};
use report_engine::HttpReportService;
use report_logging::{report_info, report_warn};

use super::config::{load_config, AppConfig};
use super::effects::EffectRunner;
use super::logging::{self, LogSettings};
use super::ui;
use crate::cli::Cli;

/// How long to wait for an engine event before emitting a render tick.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_app(args: Cli) -> anyhow::Result<ExitCode> {
    logging::initialize(&LogSettings {
        destination: args.log,
        level: if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        ..LogSettings::default()
    });

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    }
    .with_overrides(&args);
    config.validate()?;

    let service = HttpReportService::new(config.service.clone())
        .context("failed to build report service client")?;
    let runner = EffectRunner::new(Arc::new(service), config.widget.poll.clone())
        .context("failed to start report engine")?;

    let mut host = Host {
        state: AppState::new(config.widget),
        runner,
        args,
    };

    host.dispatch(Msg::Connected);
    host.wait_for_result();
    for _ in 0..host.args.repeat {
        host.print_result()?;
        host.dispatch(Msg::RunClicked);
        host.wait_for_result();
    }

    if let Some(field) = host.args.sort_by.clone() {
        host.dispatch(Msg::SortRequested {
            field,
            direction: host.args.sort_direction,
        });
    }
    host.print_result()?;

    let failed = matches!(host.state.status(), WidgetStatus::Failed(_));
    host.dispatch(Msg::Disconnected);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

struct Host {
    state: AppState,
    runner: EffectRunner,
    args: Cli,
}

impl Host {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() && state.is_in_flight() {
            eprintln!("{}", ui::render::status_line(&state.view()));
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Pump engine events until the current session leaves the loading state.
    fn wait_for_result(&mut self) {
        while self.state.is_in_flight() {
            let msg = self.runner.next_msg(TICK_INTERVAL).unwrap_or(Msg::Tick);
            self.dispatch(msg);
        }
        let view = self.state.view();
        match self.state.failure() {
            Some(failure) => report_warn!("Report failed ({}): {}", failure.kind, failure.detail),
            None => report_info!("{}", ui::render::status_line(&view)),
        }
    }

    fn print_result(&self) -> anyhow::Result<()> {
        let view = self.state.view();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if self.args.json {
            let text = serde_json::to_string_pretty(&ui::render::render_json(&view))?;
            writeln!(out, "{text}")?;
        } else {
            for line in ui::render::render_text(&view) {
                writeln!(out, "{line}")?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

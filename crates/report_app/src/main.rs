use std::process::ExitCode;

use clap::Parser;
use report_app::cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    report_app::platform::run_app(args)
}

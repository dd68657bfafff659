use std::path::PathBuf;

use clap::Parser;
use report_core::SortDirection;

use crate::platform::logging::LogDestination;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "report-printer",
    version,
    about = "Run a backend report, wait for it and print its rows"
)]
pub struct Cli {
    /// RON configuration file with `widget` and `service` sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the report service (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Current record identifier
    #[arg(long)]
    pub record_id: Option<String>,

    /// Report developer name
    #[arg(long)]
    pub report: Option<String>,

    /// Use --filter-by-current-record true or false to override
    #[arg(long, action = clap::ArgAction::Set)]
    pub filter_by_current_record: Option<bool>,

    /// Container height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Use --sortable true or false to override
    #[arg(long, action = clap::ArgAction::Set)]
    pub sortable: Option<bool>,

    /// Column to sort by once the data is shown
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction token (`asc` or `desc`)
    #[arg(long, default_value = "asc")]
    pub sort_direction: SortDirection,

    /// Press the re-run control this many extra times after the first result
    #[arg(long, default_value_t = 0)]
    pub repeat: u32,

    /// Print the rows as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level
    #[arg(long, short)]
    pub verbose: bool,
}

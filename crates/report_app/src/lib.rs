//! Headless host for the report printer widget.
pub mod cli;
pub mod platform;

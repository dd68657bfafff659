mod app;
pub mod config;
mod effects;
pub mod logging;
pub mod ui;

pub use app::run_app;
pub use effects::{map_event, EffectRunner};

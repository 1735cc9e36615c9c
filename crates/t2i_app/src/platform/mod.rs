mod app;
mod config;
mod effects;
mod logging;
mod output;
mod ui;

pub use app::run_app;

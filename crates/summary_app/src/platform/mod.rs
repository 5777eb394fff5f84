mod app;
mod cli;
mod config;
mod effects;
mod input;
mod ui;

pub use app::run_app;

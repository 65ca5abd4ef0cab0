pub mod app;
pub mod config;
pub mod console;
pub mod effects;
pub mod logging;
pub mod page;
pub mod ui;

pub use app::run_app;

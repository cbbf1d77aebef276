pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
#[cfg(feature = "trace-log")]
pub mod logging;
pub mod system;
pub mod ui;

pub mod app;
pub mod cli;

#[cfg(feature = "gui")]
pub mod ui;

pub mod answer;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod print;
pub mod sse;
pub mod ui;

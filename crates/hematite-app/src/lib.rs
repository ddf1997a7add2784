//! Hematite Application
//!
//! A headless driver that loads a layout, wires the sidebar and panels to
//! one key router and reads commands from a line-based input.

mod app;
mod shortcuts;

pub use app::{App, AppConfig, AppError, AppResult, Command, Flow, DEMO_LAYOUT};
pub use shortcuts::{Shortcut, ShortcutRegistry};

//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two screens:
//! - Respondent form driven by the encoder vocabularies
//! - Verdict with the class probabilities

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::InclusionTheme;

//! Terminal front end for `coat` list widgets.
//!
//! [`TerminalHost`] mirrors controller state for drawing, [`SelectApp`] and
//! [`PaletteApp`] translate crossterm events into controller operations, and
//! [`run_select`] / [`run_palette`] drive them in a full-screen event loop.

mod app;
pub mod host;
pub mod input;
mod render;
mod runtime;
pub mod style;

#[cfg(test)]
mod snapshot_tests;

pub use app::{Outcome, PaletteApp, SelectApp};
pub use host::{Focus, HostNotice, TerminalHost};
pub use input::QueryInput;
pub use runtime::{Screen, run, run_palette, run_select};
pub use style::Theme;

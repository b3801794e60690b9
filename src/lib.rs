//! Declarative select and command palette widgets for the terminal.
//!
//! Widget documents are parsed into [`WidgetDecl`]s and mounted through a
//! [`ComponentRegistry`]; the list behaviour lives in `coat-listbox` and the
//! terminal presentation in `coat-tui`.

pub mod app_dirs;
pub mod document;
pub mod logging;
pub mod registry;
pub mod widgets;

pub use coat_listbox as listbox;
pub use coat_tui as tui;
pub use document::{ItemDecl, Keywords, WidgetDecl};
pub use registry::{ComponentRegistry, Element, RegistryError};
pub use widgets::{MountedWidget, default_registry};

//! Filterable selection lists for select controls and command palettes.
//!
//! A [`Controller`] owns an [`ItemCatalog`], the [`VisibleSet`] for the current
//! query, an [`ActiveCursor`] and a [`SelectionState`]. Hosts implement
//! [`HostAdapter`] to mirror that state into whatever presentation layer they
//! drive; controllers sharing an [`OpenChannel`] keep at most one of them open.

pub mod catalog;
pub mod channel;
pub mod command;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod host;
mod list;
pub mod selection;
#[cfg(test)]
mod testing;

pub use catalog::{Item, ItemCatalog, ItemDescriptor, ItemId, split_keywords};
pub use channel::{InstanceId, OpenChannel, OpenSubscriber};
pub use command::CommandPalette;
pub use controller::{Controller, Key, ListboxConfig};
pub use cursor::{ActiveCursor, Navigation};
pub use error::{ListboxError, PersistError, WidgetKind};
pub use filter::{Query, VisibleSet, filter};
pub use host::{HostAdapter, HostParts, ScrollBehavior};
pub use selection::{SelectionMode, SelectionState, SelectionValue};

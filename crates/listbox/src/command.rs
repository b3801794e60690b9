//! Command palette: an always-open filterable menu whose items are activated.

use log::debug;

use crate::catalog::{Item, ItemCatalog, ItemDescriptor, ItemId};
use crate::controller::Key;
use crate::error::{ListboxError, WidgetKind};
use crate::filter::{Query, VisibleSet};
use crate::host::{HostAdapter, ScrollBehavior};
use crate::list::FilteredList;

/// Filterable menu of commands.
///
/// The cursor always re-anchors to the first match, so pressing Enter right
/// after typing runs the best candidate.
#[derive(Debug)]
pub struct CommandPalette<H> {
	list: FilteredList,
	host: H,
}

impl<H: HostAdapter> CommandPalette<H> {
	/// Build a palette and anchor the cursor on the first item.
	///
	/// # Errors
	///
	/// Returns [`ListboxError::MissingParts`] when the host lacks a query input
	/// or a menu.
	pub fn new(
		items: impl IntoIterator<Item = ItemDescriptor>,
		host: H,
	) -> Result<Self, ListboxError> {
		host.parts().require(WidgetKind::Command)?;

		let mut palette = Self {
			list: FilteredList::new(ItemCatalog::new(items)),
			host,
		};
		let first = palette.list.visible.first();
		palette
			.list
			.activate(first, Some(ScrollBehavior::Instant), &mut palette.host);
		palette.host.dispatch_initialized();
		debug!("command palette initialised with {} item(s)", palette.list.catalog.len());
		Ok(palette)
	}

	#[must_use]
	pub fn catalog(&self) -> &ItemCatalog {
		&self.list.catalog
	}

	#[must_use]
	pub fn query(&self) -> &Query {
		&self.list.query
	}

	#[must_use]
	pub fn visible(&self) -> &VisibleSet {
		&self.list.visible
	}

	#[must_use]
	pub fn active(&self) -> Option<ItemId> {
		self.list.cursor.active()
	}

	#[must_use]
	pub fn active_item(&self) -> Option<&Item> {
		self.active().and_then(|id| self.list.item(id))
	}

	#[must_use]
	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn on_query_changed(&mut self, text: &str) {
		self.list.apply_query(text, &mut self.host);
	}

	/// Route a key press. Returns whether the key was consumed.
	///
	/// Navigation is only consumed while something is visible; dismissal is
	/// always left to the surrounding dialog.
	pub fn handle_key(&mut self, key: Key) -> bool {
		match key {
			Key::Navigate(navigation) => {
				if self.list.visible.is_empty() {
					return false;
				}
				self.list.navigate(navigation, &mut self.host);
				true
			}
			Key::Commit => {
				self.activate_active();
				true
			}
			Key::Dismiss => false,
		}
	}

	/// Activate the item under the cursor, if any.
	pub fn activate_active(&mut self) {
		if let Some(id) = self.active() {
			self.activate(id);
		}
	}

	pub fn on_pointer_hover(&mut self, id: ItemId) {
		self.list.hover(id, &mut self.host);
	}

	/// The pointer clicked `id`. Hidden or unknown items are ignored.
	pub fn on_pointer_activate(&mut self, id: ItemId) {
		if self.list.visible.contains(id) {
			self.activate(id);
		}
	}

	fn activate(&mut self, id: ItemId) {
		let Some(item) = self.list.catalog.get(id) else {
			return;
		};
		debug!("command {:?} activated", item.value());
		self.host.dispatch_activated(item);
		if !item.keeps_open() {
			self.host.dismiss_dialog();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cursor::Navigation;
	use crate::host::HostParts;
	use crate::testing::{HostEvent, RecordingHost};

	fn palette() -> CommandPalette<RecordingHost> {
		let items = vec![
			ItemDescriptor::new("Open file").with_keywords(["browse"]),
			ItemDescriptor::new("Save").disabled(),
			ItemDescriptor::new("Settings")
				.with_keywords(["preferences"])
				.keep_open(),
			ItemDescriptor::new("Help").forced(),
		];
		CommandPalette::new(items, RecordingHost::command()).expect("palette builds")
	}

	#[test]
	fn construction_anchors_on_the_first_item() {
		let palette = palette();
		assert_eq!(palette.active(), Some(ItemId::new(0)));
		assert_eq!(
			palette.host().events,
			[
				HostEvent::Active(Some(ItemId::new(0))),
				HostEvent::Scroll(ItemId::new(0), ScrollBehavior::Instant),
				HostEvent::Initialized,
			]
		);
	}

	#[test]
	fn palette_requires_input_and_menu() {
		let err = CommandPalette::new(Vec::new(), RecordingHost::with_parts(HostParts::default()))
			.expect_err("structural error");
		assert_eq!(
			err,
			ListboxError::MissingParts {
				widget: WidgetKind::Command,
				missing: vec!["input", "menu"],
			}
		);
	}

	#[test]
	fn query_changes_re_anchor_on_the_first_match() {
		let mut palette = palette();
		palette.handle_key(Key::Navigate(Navigation::Last));
		assert_eq!(palette.active(), Some(ItemId::new(2)));

		palette.on_query_changed("pref");

		assert_eq!(palette.active(), Some(ItemId::new(1)));
		assert_eq!(palette.visible().len(), 2);
	}

	#[test]
	fn enter_activates_and_dismisses_unless_kept_open() {
		let mut palette = palette();
		palette.host_mut().take();
		assert!(palette.handle_key(Key::Commit));
		assert_eq!(
			palette.host_mut().take(),
			[HostEvent::Activated(ItemId::new(0)), HostEvent::DismissDialog]
		);

		palette.on_query_changed("settings");
		palette.host_mut().take();
		palette.activate_active();
		assert_eq!(palette.host_mut().take(), [HostEvent::Activated(ItemId::new(1))]);
	}

	#[test]
	fn navigation_is_not_consumed_without_matches() {
		let mut palette = CommandPalette::new(
			vec![ItemDescriptor::new("Only")],
			RecordingHost::command(),
		)
		.expect("palette");
		palette.on_query_changed("zzz");

		assert!(!palette.handle_key(Key::Navigate(Navigation::Next)));
		assert!(!palette.handle_key(Key::Dismiss));
		assert_eq!(palette.active(), None);
	}

	#[test]
	fn pointer_hover_and_click() {
		let mut palette = palette();
		palette.host_mut().take();

		palette.on_pointer_hover(ItemId::new(2));
		palette.on_pointer_activate(ItemId::new(2));

		assert_eq!(palette.active(), Some(ItemId::new(2)));
		assert_eq!(
			palette.host_mut().take(),
			[
				HostEvent::Active(Some(ItemId::new(2))),
				HostEvent::Activated(ItemId::new(2)),
				HostEvent::DismissDialog,
			]
		);
	}
}

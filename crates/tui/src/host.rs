//! [`HostAdapter`] implementation that records presentation state for the
//! terminal renderer.
//!
//! Controllers push visibility, selection and cursor changes here; the draw
//! pass reads them back. Notifications that would become DOM events elsewhere
//! are queued as [`HostNotice`]s for the surrounding application.

use coat_listbox::{HostAdapter, HostParts, Item, ItemId, ScrollBehavior};
use log::trace;

/// Which part of the widget receives typed keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
	#[default]
	Trigger,
	Query,
}

/// Notifications emitted by a controller, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostNotice {
	Initialized,
	Opened,
	Closed,
	Changed(String),
	Activated(String),
}

#[derive(Debug, Clone, Copy, Default)]
struct ItemMarks {
	hidden: bool,
	selected: bool,
}

#[derive(Debug, Clone)]
pub struct TerminalHost {
	parts: HostParts,
	marks: Vec<ItemMarks>,
	active: Option<ItemId>,
	summary: String,
	summary_is_placeholder: bool,
	scroll: Option<(ItemId, ScrollBehavior)>,
	focus: Focus,
	open: bool,
	stored_value: String,
	dismissed: bool,
	notices: Vec<HostNotice>,
}

impl TerminalHost {
	/// Host for a select, with or without a filter input.
	#[must_use]
	pub fn select(filter: bool) -> Self {
		Self::with_parts(HostParts::select(filter))
	}

	/// Host for a command palette.
	#[must_use]
	pub fn command() -> Self {
		let mut host = Self::with_parts(HostParts::command());
		host.focus = Focus::Query;
		host
	}

	#[must_use]
	pub fn with_parts(parts: HostParts) -> Self {
		Self {
			parts,
			marks: Vec::new(),
			active: None,
			summary: String::new(),
			summary_is_placeholder: false,
			scroll: None,
			focus: Focus::Trigger,
			open: false,
			stored_value: String::new(),
			dismissed: false,
			notices: Vec::new(),
		}
	}

	fn marks_mut(&mut self, id: ItemId) -> &mut ItemMarks {
		let index = id.index();
		if self.marks.len() <= index {
			self.marks.resize(index + 1, ItemMarks::default());
		}
		&mut self.marks[index]
	}

	/// Items are visible until the controller reports otherwise.
	#[must_use]
	pub fn is_visible(&self, id: ItemId) -> bool {
		self.marks.get(id.index()).is_none_or(|marks| !marks.hidden)
	}

	#[must_use]
	pub fn is_selected(&self, id: ItemId) -> bool {
		self.marks
			.get(id.index())
			.is_some_and(|marks| marks.selected)
	}

	#[must_use]
	pub fn active(&self) -> Option<ItemId> {
		self.active
	}

	/// Summary text and whether it is a placeholder.
	#[must_use]
	pub fn summary(&self) -> (&str, bool) {
		(&self.summary, self.summary_is_placeholder)
	}

	#[must_use]
	pub fn focus(&self) -> Focus {
		self.focus
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.open
	}

	#[must_use]
	pub fn parts(&self) -> HostParts {
		self.parts
	}

	/// The value mirrored into storage.
	#[must_use]
	pub fn stored_value(&self) -> &str {
		&self.stored_value
	}

	/// Whether a command palette asked for its dialog to close.
	#[must_use]
	pub fn is_dismissed(&self) -> bool {
		self.dismissed
	}

	/// Take the pending scroll request, if any.
	pub fn take_scroll(&mut self) -> Option<(ItemId, ScrollBehavior)> {
		self.scroll.take()
	}

	/// Drain queued notifications.
	pub fn drain_notices(&mut self) -> Vec<HostNotice> {
		std::mem::take(&mut self.notices)
	}

	fn notify(&mut self, notice: HostNotice) {
		trace!("host notice {notice:?}");
		self.notices.push(notice);
	}
}

impl HostAdapter for TerminalHost {
	fn parts(&self) -> HostParts {
		self.parts
	}

	fn render_visibility(&mut self, item: &Item, visible: bool) {
		self.marks_mut(item.id()).hidden = !visible;
	}

	fn render_active(&mut self, item: Option<&Item>) {
		self.active = item.map(Item::id);
	}

	fn render_selected(&mut self, item: &Item, selected: bool) {
		self.marks_mut(item.id()).selected = selected;
	}

	fn render_summary_label(&mut self, text: &str, is_placeholder: bool) {
		text.clone_into(&mut self.summary);
		self.summary_is_placeholder = is_placeholder;
	}

	fn scroll_into_view(&mut self, item: &Item, behavior: ScrollBehavior) {
		self.scroll = Some((item.id(), behavior));
	}

	fn focus_query_input(&mut self) {
		self.focus = Focus::Query;
	}

	fn focus_trigger(&mut self) {
		self.focus = Focus::Trigger;
	}

	fn dispatch_change(&mut self, value: &str) {
		self.notify(HostNotice::Changed(value.to_owned()));
	}

	fn dispatch_opened(&mut self) {
		self.open = true;
		self.notify(HostNotice::Opened);
	}

	fn dispatch_closed(&mut self) {
		self.open = false;
		self.notify(HostNotice::Closed);
	}

	fn dispatch_initialized(&mut self) {
		self.notify(HostNotice::Initialized);
	}

	fn persist_value(&mut self, value: &str) {
		value.clone_into(&mut self.stored_value);
	}

	fn dispatch_activated(&mut self, item: &Item) {
		self.notify(HostNotice::Activated(item.value().to_owned()));
	}

	fn dismiss_dialog(&mut self) {
		self.dismissed = true;
	}
}

#[cfg(test)]
mod tests {
	use coat_listbox::{Controller, ItemDescriptor, ListboxConfig};

	use super::*;

	#[test]
	fn records_controller_state() {
		let items = ["Apple", "Banana", "Cherry"].map(ItemDescriptor::new);
		let mut controller = Controller::new(
			ListboxConfig::multi().with_placeholder("Fruit"),
			items,
			TerminalHost::select(true),
		)
		.expect("select");
		assert_eq!(controller.host().summary(), ("Fruit", true));
		assert_eq!(controller.host().stored_value(), "[]");

		controller.open();
		controller.on_query_changed("an");
		controller.on_commit_active();

		let apple = controller.catalog().find_value("Apple").map(Item::id).expect("apple");
		let banana = controller.catalog().find_value("Banana").map(Item::id).expect("banana");
		let host = controller.host_mut();
		assert!(host.is_open());
		assert_eq!(host.focus(), Focus::Query);
		assert!(!host.is_visible(apple));
		assert!(host.is_selected(banana));
		assert_eq!(host.active(), Some(banana));
		assert_eq!(host.summary(), ("Banana", false));
		assert_eq!(host.stored_value(), r#"["Banana"]"#);
		assert_eq!(
			host.drain_notices(),
			[
				HostNotice::Initialized,
				HostNotice::Opened,
				HostNotice::Changed(r#"["Banana"]"#.into()),
			]
		);
	}
}

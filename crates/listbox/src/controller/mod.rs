//! The select controller.
//!
//! [`Controller`] turns a fixed catalog, a live query and key/pointer events
//! into a visible subset, a keyboard cursor and a committed selection. All
//! presentation goes through the [`HostAdapter`] it owns.

use log::debug;

use crate::catalog::{Item, ItemCatalog, ItemDescriptor, ItemId};
use crate::channel::{InstanceId, OpenChannel, OpenSubscriber};
use crate::cursor::Navigation;
use crate::error::{ListboxError, WidgetKind};
use crate::filter::{Query, VisibleSet};
use crate::host::{HostAdapter, ScrollBehavior};
use crate::list::FilteredList;
use crate::selection::{SelectionMode, SelectionState, SelectionValue};


/// Construction-time options for a select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListboxConfig {
	pub mode: SelectionMode,
	/// Close after a commit in multi mode. Single mode always closes.
	pub close_on_select: bool,
	/// Summary shown while a multi selection is empty.
	pub placeholder: Option<String>,
	/// Previously persisted value; wins over declared pre-selection.
	pub persisted: Option<String>,
}

impl ListboxConfig {
	#[must_use]
	pub fn single() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn multi() -> Self {
		Self {
			mode: SelectionMode::Multi,
			..Self::default()
		}
	}

	#[must_use]
	pub fn close_on_select(mut self, close: bool) -> Self {
		self.close_on_select = close;
		self
	}

	#[must_use]
	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	#[must_use]
	pub fn with_persisted(mut self, persisted: impl Into<String>) -> Self {
		self.persisted = Some(persisted.into());
		self
	}
}

/// A key the controller understands, already mapped from host key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	Navigate(Navigation),
	Commit,
	Dismiss,
}

/// Where a commit came from; pointer commits keep multi selects focused on the
/// clicked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommitSource {
	Keyboard,
	Pointer,
}

/// Filterable single or multi value select.
#[derive(Debug)]
pub struct Controller<H> {
	id: InstanceId,
	close_on_select: bool,
	placeholder: Option<String>,
	list: FilteredList,
	selection: SelectionState,
	open: bool,
	host: H,
	channel: Option<OpenChannel>,
}

impl<H: HostAdapter> Controller<H> {
	/// Build a controller, hydrate its selection and report the initial state.
	///
	/// Hydration renders the selection without emitting a change.
	///
	/// # Errors
	///
	/// Returns [`ListboxError::MissingParts`] when the host lacks a trigger,
	/// popover, listbox or value field.
	pub fn new(
		config: ListboxConfig,
		items: impl IntoIterator<Item = ItemDescriptor>,
		host: H,
	) -> Result<Self, ListboxError> {
		host.parts().require(WidgetKind::Select)?;

		let ListboxConfig {
			mode,
			close_on_select,
			placeholder,
			persisted,
		} = config;
		let catalog = ItemCatalog::new(items);
		let selection = SelectionState::hydrate(mode, &catalog, persisted.as_deref());
		let mut controller = Self {
			id: InstanceId::next(),
			close_on_select,
			placeholder,
			list: FilteredList::new(catalog),
			selection,
			open: false,
			host,
			channel: None,
		};
		controller.render_selection();
		controller.host.dispatch_initialized();
		debug!(
			"{} initialised with {} item(s), value {:?}",
			controller.id,
			controller.list.catalog.len(),
			controller.persisted_value()
		);
		Ok(controller)
	}

	#[must_use]
	pub fn id(&self) -> InstanceId {
		self.id
	}

	#[must_use]
	pub fn mode(&self) -> SelectionMode {
		self.selection.mode()
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.open
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
	pub fn selection(&self) -> &SelectionState {
		&self.selection
	}

	#[must_use]
	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	/// Current selection as typed values.
	#[must_use]
	pub fn value(&self) -> SelectionValue {
		self.selection.value(&self.list.catalog)
	}

	/// Current selection in its persisted form.
	#[must_use]
	pub fn persisted_value(&self) -> String {
		self.selection.to_persisted(&self.list.catalog)
	}

	/// Replace the selection from a persisted-style value.
	///
	/// Single mode: an unknown value is ignored; a known one is committed and
	/// the control closes. Multi mode: a JSON array of values, or any other
	/// text taken as one raw value; the decoded set replaces the selection.
	pub fn set_value(&mut self, raw: &str) {
		match self.mode() {
			SelectionMode::Single => {
				let Some(id) = self.list.catalog.find_value(raw).map(Item::id) else {
					debug!("{} ignoring unknown value {raw:?}", self.id);
					return;
				};
				self.commit(SelectionState::Single(Some(id)));
				self.close();
			}
			SelectionMode::Multi => {
				let state = SelectionState::from_persisted(SelectionMode::Multi, &self.list.catalog, raw)
					.unwrap_or_else(|err| {
						debug!("{} treating {raw:?} as a single value: {err}", self.id);
						SelectionState::from_values(SelectionMode::Multi, &self.list.catalog, [raw])
					});
				self.commit(state);
			}
		}
	}

	/// Recompute the visible items for `text` and re-anchor the cursor.
	pub fn on_query_changed(&mut self, text: &str) {
		self.list.apply_query(text, &mut self.host);
	}

	/// Move the cursor. Does nothing when no item is visible.
	pub fn on_navigate(&mut self, navigation: Navigation) {
		self.list.navigate(navigation, &mut self.host);
	}

	/// Commit the item under the cursor, if any.
	pub fn on_commit_active(&mut self) {
		if let Some(id) = self.active() {
			self.commit_item(id, CommitSource::Keyboard);
		}
	}

	/// Route a key press. Returns whether the key was consumed.
	///
	/// While closed, navigation keys open the control and commit/dismiss are
	/// left to the host.
	pub fn handle_key(&mut self, key: Key) -> bool {
		match (self.open, key) {
			(false, Key::Commit | Key::Dismiss) => false,
			(false, Key::Navigate(_)) => {
				self.open();
				true
			}
			(true, Key::Dismiss) => {
				self.close();
				true
			}
			(true, Key::Commit) => {
				self.on_commit_active();
				true
			}
			(true, Key::Navigate(navigation)) => {
				self.on_navigate(navigation);
				true
			}
		}
	}

	/// Select the first item carrying `value`.
	///
	/// Single mode replaces the selection when the value differs and always
	/// closes afterwards. Multi mode adds a matching item that is not selected
	/// yet. Unknown values are ignored.
	pub fn select(&mut self, value: &str) {
		match self.mode() {
			SelectionMode::Single => {
				let Some(id) = self.list.catalog.find_value(value).map(Item::id) else {
					return;
				};
				if self.persisted_value() != value {
					self.commit(SelectionState::Single(Some(id)));
				}
				self.close();
			}
			SelectionMode::Multi => {
				let selection = &self.selection;
				let Some(id) = self
					.list
					.catalog
					.find_value_where(value, |item| !selection.is_selected(item.id()))
					.map(Item::id)
				else {
					return;
				};
				let mut next = self.selection.clone();
				next.insert(id);
				self.commit(next);
			}
		}
	}

	/// Remove a selected item carrying `value`. Multi mode only.
	pub fn deselect(&mut self, value: &str) {
		if self.mode() != SelectionMode::Multi {
			return;
		}
		let selection = &self.selection;
		let Some(id) = self
			.list
			.catalog
			.find_value_where(value, |item| selection.is_selected(item.id()))
			.map(Item::id)
		else {
			return;
		};
		let mut next = self.selection.clone();
		next.remove(id);
		self.commit(next);
	}

	/// Toggle the first item carrying `value`. Multi mode only.
	pub fn toggle(&mut self, value: &str) {
		if self.mode() != SelectionMode::Multi {
			return;
		}
		if let Some(id) = self.list.catalog.find_value(value).map(Item::id) {
			self.toggle_item(id);
		}
	}

	/// Select every eligible item. Multi mode only.
	pub fn select_all(&mut self) {
		if self.mode() == SelectionMode::Multi {
			let all = SelectionState::Multi(self.list.catalog.ids().collect());
			self.commit(all);
		}
	}

	/// Clear the selection. Multi mode only.
	pub fn select_none(&mut self) {
		if self.mode() == SelectionMode::Multi {
			self.commit(SelectionState::empty(SelectionMode::Multi));
		}
	}

	/// Open the popover.
	///
	/// Other instances on the same channel close first. The cursor lands on
	/// the first selected item, or the first visible one.
	pub fn open(&mut self) {
		if self.open {
			return;
		}
		if let Some(channel) = &self.channel {
			channel.publish_opened(self.id);
		}
		if self.host.parts().query_input {
			self.host.focus_query_input();
		}
		self.open = true;
		let target = self
			.selection
			.selected()
			.into_iter()
			.find(|id| self.list.visible.contains(*id))
			.or_else(|| self.list.visible.first());
		self.list
			.activate(target, Some(ScrollBehavior::Instant), &mut self.host);
		self.host.dispatch_opened();
		debug!("{} opened", self.id);
	}

	/// Close the popover and return focus to the trigger.
	pub fn close(&mut self) {
		self.close_with_focus(true);
	}

	/// Close the popover. Closing a closed control does nothing.
	///
	/// The query resets so every item is visible again, and the cursor clears.
	pub fn close_with_focus(&mut self, focus_trigger: bool) {
		if !self.open {
			return;
		}
		self.list.reset_query(&mut self.host);
		if focus_trigger {
			self.host.focus_trigger();
		}
		self.open = false;
		self.list.activate(None, None, &mut self.host);
		self.host.dispatch_closed();
		debug!("{} closed", self.id);
	}

	/// The trigger was clicked: toggle open and closed.
	pub fn on_trigger_activated(&mut self) {
		if self.open {
			self.close();
		} else {
			self.open();
		}
	}

	/// The pointer moved over `id`. Pointer handlers ignore a closed popover.
	pub fn on_pointer_hover(&mut self, id: ItemId) {
		if self.open {
			self.list.hover(id, &mut self.host);
		}
	}

	/// The pointer left the list: point back at the selection.
	pub fn on_pointer_leave(&mut self) {
		if !self.open {
			return;
		}
		let target = self
			.selection
			.selected()
			.into_iter()
			.find(|id| self.list.visible.contains(*id));
		self.list.activate(target, None, &mut self.host);
	}

	/// The pointer clicked `id`. Hidden or unknown items are ignored.
	pub fn on_pointer_activate(&mut self, id: ItemId) {
		if self.open && self.list.visible.contains(id) {
			self.commit_item(id, CommitSource::Pointer);
		}
	}

	/// The pointer clicked somewhere outside the control.
	pub fn on_pointer_outside(&mut self) {
		self.close_with_focus(false);
	}

	fn commit_item(&mut self, id: ItemId, source: CommitSource) {
		let Some(value) = self.list.item(id).map(|item| item.value().to_owned()) else {
			return;
		};
		match self.mode() {
			SelectionMode::Single => {
				if self.persisted_value() != value {
					self.commit(SelectionState::Single(Some(id)));
				}
				self.close();
			}
			SelectionMode::Multi => {
				self.toggle_item(id);
				if self.close_on_select {
					self.close();
				} else if source == CommitSource::Pointer {
					self.list.activate(Some(id), None, &mut self.host);
					if self.host.parts().query_input {
						self.host.focus_query_input();
					} else {
						self.host.focus_trigger();
					}
				}
			}
		}
	}

	fn toggle_item(&mut self, id: ItemId) {
		let mut next = self.selection.clone();
		if next.toggle(id) {
			self.commit(next);
		}
	}

	/// Replace the selection, reflect it and emit a change.
	fn commit(&mut self, selection: SelectionState) {
		self.selection = selection;
		self.render_selection();
		let value = self.persisted_value();
		debug!("{} changed to {value:?}", self.id);
		self.host.dispatch_change(&value);
	}

	/// Reflect the selection: per-item marks, summary label, stored value.
	fn render_selection(&mut self) {
		for item in self.list.catalog.iter() {
			self.host
				.render_selected(item, self.selection.is_selected(item.id()));
		}

		let selected: Vec<&Item> = self
			.selection
			.selected()
			.into_iter()
			.filter_map(|id| self.list.catalog.get(id))
			.collect();
		match (&self.selection, selected.as_slice()) {
			(SelectionState::Single(_), [item, ..]) => {
				self.host.render_summary_label(item.text(), false);
			}
			(SelectionState::Multi(_), [_, ..]) => {
				let summary = selected
					.iter()
					.map(|item| item.summary_label())
					.collect::<Vec<_>>()
					.join(", ");
				self.host.render_summary_label(&summary, false);
			}
			(_, []) => {
				if let Some(placeholder) = &self.placeholder {
					self.host.render_summary_label(placeholder, true);
				} else if self.mode() == SelectionMode::Multi {
					self.host.render_summary_label("", true);
				}
			}
		}

		let value = self.persisted_value();
		self.host.persist_value(&value);
	}

	/// Whether the cursor and selection invariants hold.
	#[must_use]
	pub fn is_consistent(&self) -> bool {
		self.list.cursor.is_consistent_with(&self.list.visible)
			&& self
				.selection
				.selected()
				.into_iter()
				.all(|id| self.list.catalog.contains(id))
	}
}

impl<H: HostAdapter> OpenSubscriber for Controller<H> {
	fn instance_id(&self) -> InstanceId {
		self.id
	}

	fn attach(&mut self, channel: OpenChannel) {
		self.channel = Some(channel);
	}

	fn opened_elsewhere(&mut self, source: InstanceId) {
		if self.open {
			debug!("{} closing because {source} opened", self.id);
		}
		self.close_with_focus(false);
	}
}

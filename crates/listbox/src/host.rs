//! The presentation seam between controllers and whatever renders them.

use crate::catalog::Item;
use crate::error::{ListboxError, WidgetKind};

/// Structural sub-elements a host provides for one widget instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostParts {
	/// Button that toggles the popover and shows the summary label.
	pub trigger: bool,
	/// Container shown while the control is open.
	pub popover: bool,
	/// The list (or menu) of items.
	pub listbox: bool,
	/// Storage for the persisted value.
	pub value_field: bool,
	/// Text input feeding the filter.
	pub query_input: bool,
}

impl HostParts {
	/// Every part a select needs, with or without a filter input.
	#[must_use]
	pub const fn select(query_input: bool) -> Self {
		Self {
			trigger: true,
			popover: true,
			listbox: true,
			value_field: true,
			query_input,
		}
	}

	/// Every part a command palette needs.
	#[must_use]
	pub const fn command() -> Self {
		Self {
			trigger: false,
			popover: false,
			listbox: true,
			value_field: false,
			query_input: true,
		}
	}

	/// Names of the parts `widget` requires but the host lacks.
	#[must_use]
	pub fn missing_for(&self, widget: WidgetKind) -> Vec<&'static str> {
		let required: &[(bool, &'static str)] = match widget {
			WidgetKind::Select => &[
				(self.trigger, "trigger"),
				(self.popover, "popover"),
				(self.listbox, "listbox"),
				(self.value_field, "input"),
			],
			WidgetKind::Command => &[(self.query_input, "input"), (self.listbox, "menu")],
		};
		required
			.iter()
			.filter(|(present, _)| !present)
			.map(|(_, name)| *name)
			.collect()
	}

	/// Fail with [`ListboxError::MissingParts`] unless `widget` can be built.
	///
	/// # Errors
	///
	/// Returns the list of missing part names.
	pub fn require(&self, widget: WidgetKind) -> Result<(), ListboxError> {
		let missing = self.missing_for(widget);
		if missing.is_empty() {
			Ok(())
		} else {
			Err(ListboxError::MissingParts { widget, missing })
		}
	}
}

/// How an item should be brought into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
	/// Initial activation: opening, or re-anchoring after a filter change.
	Instant,
	/// Keyboard moves.
	Smooth,
}

/// Callbacks a controller uses to reflect its state into a presentation layer.
///
/// All calls are synchronous and happen before the controller operation that
/// caused them returns.
pub trait HostAdapter {
	/// Which structural parts this host provides.
	fn parts(&self) -> HostParts;

	fn render_visibility(&mut self, item: &Item, visible: bool);

	/// Reflect the cursor position; `None` clears it.
	fn render_active(&mut self, item: Option<&Item>);

	fn render_selected(&mut self, item: &Item, selected: bool);

	fn render_summary_label(&mut self, text: &str, is_placeholder: bool);

	fn scroll_into_view(&mut self, item: &Item, behavior: ScrollBehavior);

	fn focus_query_input(&mut self);

	fn focus_trigger(&mut self);

	fn dispatch_change(&mut self, value: &str);

	fn dispatch_opened(&mut self);

	fn dispatch_closed(&mut self);

	fn dispatch_initialized(&mut self);

	/// Mirror the persisted value into host storage.
	fn persist_value(&mut self, value: &str);

	/// A command palette item was activated.
	fn dispatch_activated(&mut self, _item: &Item) {}

	/// Close the dialog surrounding a command palette.
	fn dismiss_dialog(&mut self) {}
}

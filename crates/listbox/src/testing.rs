//! A host that records every callback, for controller tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::catalog::{Item, ItemId};
use crate::host::{HostAdapter, HostParts, ScrollBehavior};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostEvent {
	Visibility(ItemId, bool),
	Active(Option<ItemId>),
	Selected(ItemId, bool),
	Summary(String, bool),
	Scroll(ItemId, ScrollBehavior),
	FocusQuery,
	FocusTrigger,
	Change(String),
	Opened,
	Closed,
	Initialized,
	Persist(String),
	Activated(ItemId),
	DismissDialog,
}

/// Events from several hosts in the order they happened, tagged by host.
pub(crate) type Journal = Rc<RefCell<Vec<(&'static str, HostEvent)>>>;

#[derive(Debug, Clone)]
pub(crate) struct RecordingHost {
	pub(crate) parts: HostParts,
	pub(crate) events: Vec<HostEvent>,
	journal: Option<(&'static str, Journal)>,
}

impl RecordingHost {
	pub(crate) fn select() -> Self {
		Self::with_parts(HostParts::select(true))
	}

	pub(crate) fn command() -> Self {
		Self::with_parts(HostParts::command())
	}

	pub(crate) fn with_parts(parts: HostParts) -> Self {
		Self {
			parts,
			events: Vec::new(),
			journal: None,
		}
	}

	/// Also append every event to `journal` under `name`.
	pub(crate) fn journaled(mut self, name: &'static str, journal: &Journal) -> Self {
		self.journal = Some((name, Rc::clone(journal)));
		self
	}

	fn record(&mut self, event: HostEvent) {
		if let Some((name, journal)) = &self.journal {
			journal.borrow_mut().push((*name, event.clone()));
		}
		self.events.push(event);
	}

	pub(crate) fn take(&mut self) -> Vec<HostEvent> {
		std::mem::take(&mut self.events)
	}

	pub(crate) fn count(&self, predicate: impl Fn(&HostEvent) -> bool) -> usize {
		self.events.iter().filter(|event| predicate(event)).count()
	}

	pub(crate) fn changes(&self) -> Vec<&str> {
		self.events
			.iter()
			.filter_map(|event| match event {
				HostEvent::Change(value) => Some(value.as_str()),
				_ => None,
			})
			.collect()
	}

	pub(crate) fn last_summary(&self) -> Option<(&str, bool)> {
		self.events.iter().rev().find_map(|event| match event {
			HostEvent::Summary(text, placeholder) => Some((text.as_str(), *placeholder)),
			_ => None,
		})
	}
}

impl HostAdapter for RecordingHost {
	fn parts(&self) -> HostParts {
		self.parts
	}

	fn render_visibility(&mut self, item: &Item, visible: bool) {
		self.record(HostEvent::Visibility(item.id(), visible));
	}

	fn render_active(&mut self, item: Option<&Item>) {
		self.record(HostEvent::Active(item.map(Item::id)));
	}

	fn render_selected(&mut self, item: &Item, selected: bool) {
		self.record(HostEvent::Selected(item.id(), selected));
	}

	fn render_summary_label(&mut self, text: &str, is_placeholder: bool) {
		self.record(HostEvent::Summary(text.to_owned(), is_placeholder));
	}

	fn scroll_into_view(&mut self, item: &Item, behavior: ScrollBehavior) {
		self.record(HostEvent::Scroll(item.id(), behavior));
	}

	fn focus_query_input(&mut self) {
		self.record(HostEvent::FocusQuery);
	}

	fn focus_trigger(&mut self) {
		self.record(HostEvent::FocusTrigger);
	}

	fn dispatch_change(&mut self, value: &str) {
		self.record(HostEvent::Change(value.to_owned()));
	}

	fn dispatch_opened(&mut self) {
		self.record(HostEvent::Opened);
	}

	fn dispatch_closed(&mut self) {
		self.record(HostEvent::Closed);
	}

	fn dispatch_initialized(&mut self) {
		self.record(HostEvent::Initialized);
	}

	fn persist_value(&mut self, value: &str) {
		self.record(HostEvent::Persist(value.to_owned()));
	}

	fn dispatch_activated(&mut self, item: &Item) {
		self.record(HostEvent::Activated(item.id()));
	}

	fn dismiss_dialog(&mut self) {
		self.record(HostEvent::DismissDialog);
	}
}

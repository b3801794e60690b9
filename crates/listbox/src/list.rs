//! State shared by the select controller and the command palette: the catalog,
//! the current query, the visible subset and the active cursor.

use log::debug;

use crate::catalog::{Item, ItemCatalog, ItemId};
use crate::cursor::{ActiveCursor, Navigation};
use crate::filter::{Query, VisibleSet, filter};
use crate::host::{HostAdapter, ScrollBehavior};

#[derive(Debug, Clone)]
pub(crate) struct FilteredList {
	pub(crate) catalog: ItemCatalog,
	pub(crate) query: Query,
	pub(crate) visible: VisibleSet,
	pub(crate) cursor: ActiveCursor,
}

impl FilteredList {
	pub(crate) fn new(catalog: ItemCatalog) -> Self {
		let visible = VisibleSet::all(&catalog);
		Self {
			catalog,
			query: Query::default(),
			visible,
			cursor: ActiveCursor::default(),
		}
	}

	pub(crate) fn item(&self, id: ItemId) -> Option<&Item> {
		self.catalog.get(id)
	}

	/// Recompute the visible subset for `raw`, report each item's visibility
	/// and re-anchor the cursor on the first match.
	pub(crate) fn apply_query(&mut self, raw: &str, host: &mut impl HostAdapter) {
		self.query = Query::new(raw);
		self.visible = filter(&self.catalog, &self.query);
		debug!(
			"query {:?} matched {} of {} item(s)",
			self.query.as_str(),
			self.visible.len(),
			self.catalog.len()
		);
		self.report_visibility(host);
		let anchor = self.visible.first();
		self.activate(anchor, Some(ScrollBehavior::Instant), host);
	}

	/// Clear the query and show every item without touching the cursor.
	pub(crate) fn reset_query(&mut self, host: &mut impl HostAdapter) {
		self.query = Query::default();
		self.visible = VisibleSet::all(&self.catalog);
		self.report_visibility(host);
	}

	fn report_visibility(&self, host: &mut impl HostAdapter) {
		for item in self.catalog.iter() {
			host.render_visibility(item, self.visible.contains(item.id()));
		}
	}

	/// Move the cursor with the keyboard. Returns whether it moved.
	pub(crate) fn navigate(&mut self, navigation: Navigation, host: &mut impl HostAdapter) -> bool {
		let Some(target) = self.cursor.navigate(navigation, &self.visible) else {
			return false;
		};
		if let Some(item) = self.catalog.get(target) {
			host.render_active(Some(item));
			host.scroll_into_view(item, ScrollBehavior::Smooth);
		}
		true
	}

	/// Point the cursor at `target` and report it, scrolling when asked.
	///
	/// Targets that are not visible clear the cursor instead.
	pub(crate) fn activate(
		&mut self,
		target: Option<ItemId>,
		scroll: Option<ScrollBehavior>,
		host: &mut impl HostAdapter,
	) {
		let target = target.filter(|id| self.visible.contains(*id));
		self.cursor.set(target);
		let item = target.and_then(|id| self.catalog.get(id));
		host.render_active(item);
		if let (Some(item), Some(behavior)) = (item, scroll) {
			host.scroll_into_view(item, behavior);
		}
	}

	/// Pointer hover over `id`: move the cursor without scrolling.
	pub(crate) fn hover(&mut self, id: ItemId, host: &mut impl HostAdapter) -> bool {
		if !self.visible.contains(id) || self.cursor.active() == Some(id) {
			return false;
		}
		self.activate(Some(id), None, host);
		true
	}
}

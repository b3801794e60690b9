//! Keyboard focus pointer over the visible items.

use crate::catalog::ItemId;
use crate::filter::VisibleSet;

/// Direction of a cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
	Next,
	Previous,
	First,
	Last,
}

/// The item currently targeted by keyboard navigation, if any.
///
/// Whenever the cursor points at an item, that item belongs to the visible set
/// it was last validated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveCursor {
	active: Option<ItemId>,
}

impl ActiveCursor {
	#[must_use]
	pub fn active(&self) -> Option<ItemId> {
		self.active
	}

	/// Point the cursor at `target`, returning whether it moved.
	pub fn set(&mut self, target: Option<ItemId>) -> bool {
		let moved = self.active != target;
		self.active = target;
		moved
	}

	/// Clear the cursor, returning whether it pointed at something.
	pub fn clear(&mut self) -> bool {
		self.set(None)
	}

	/// Re-anchor after the visible set changed: first visible item, or nothing.
	pub fn anchor(&mut self, visible: &VisibleSet) -> Option<ItemId> {
		self.active = visible.first();
		self.active
	}

	/// Move the cursor and return the new target when it changed.
	///
	/// Moves clamp at both ends. From the empty state both `Next` and
	/// `Previous` land on the first visible item.
	pub fn navigate(&mut self, navigation: Navigation, visible: &VisibleSet) -> Option<ItemId> {
		if visible.is_empty() {
			return None;
		}
		let last = visible.len() - 1;
		let current = self.active.and_then(|id| visible.position(id));
		let target = match (navigation, current) {
			(Navigation::Next | Navigation::Previous, None) => 0,
			(Navigation::Next, Some(position)) => (position + 1).min(last),
			(Navigation::Previous, Some(position)) => position.saturating_sub(1),
			(Navigation::First, _) => 0,
			(Navigation::Last, _) => last,
		};
		if current == Some(target) {
			return None;
		}
		self.active = visible.get(target);
		self.active
	}

	/// Whether the cursor satisfies the visibility invariant for `visible`.
	#[must_use]
	pub fn is_consistent_with(&self, visible: &VisibleSet) -> bool {
		self.active.is_none_or(|id| visible.contains(id))
	}
}

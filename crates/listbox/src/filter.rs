//! Substring filtering of catalog items.

use crate::catalog::{Item, ItemCatalog, ItemId};

/// A normalised query: trimmed and lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(String);

impl Query {
	#[must_use]
	pub fn new(raw: &str) -> Self {
		Self(raw.trim().to_lowercase())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Whether `item` is visible for `query`.
///
/// Forced items always match. Otherwise the filter text must contain the
/// query, or a keyword must contain the query. Keyword matching is one way:
/// the keyword `settings` matches `sett`, the keyword `sett` does not match
/// `settings`.
#[must_use]
pub fn matches(item: &Item, query: &Query) -> bool {
	if item.is_forced() {
		return true;
	}
	let needle = query.as_str();
	item.filter_text().contains(needle)
		|| item
			.keywords()
			.iter()
			.any(|keyword| keyword.contains(needle))
}

/// Ordered subsequence of catalog items matching the current query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
	members: Vec<ItemId>,
	mask: Vec<bool>,
}

impl VisibleSet {
	/// Every eligible item, as seen for the empty query.
	#[must_use]
	pub fn all(catalog: &ItemCatalog) -> Self {
		Self {
			members: catalog.ids().collect(),
			mask: vec![true; catalog.len()],
		}
	}

	#[must_use]
	pub fn contains(&self, id: ItemId) -> bool {
		self.mask.get(id.index()).copied().unwrap_or(false)
	}

	/// Position of `id` within the visible order.
	#[must_use]
	pub fn position(&self, id: ItemId) -> Option<usize> {
		if !self.contains(id) {
			return None;
		}
		self.members.iter().position(|member| *member == id)
	}

	#[must_use]
	pub fn get(&self, position: usize) -> Option<ItemId> {
		self.members.get(position).copied()
	}

	#[must_use]
	pub fn first(&self) -> Option<ItemId> {
		self.members.first().copied()
	}

	#[must_use]
	pub fn last(&self) -> Option<ItemId> {
		self.members.last().copied()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.members.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
		self.members.iter().copied()
	}
}

/// Compute the visible subset of `catalog` for `query`, in catalog order.
#[must_use]
pub fn filter(catalog: &ItemCatalog, query: &Query) -> VisibleSet {
	let mut members = Vec::new();
	let mask = catalog
		.iter()
		.map(|item| {
			let visible = matches(item, query);
			if visible {
				members.push(item.id());
			}
			visible
		})
		.collect();
	VisibleSet { members, mask }
}

//! Single and multi value selection, and its persisted representation.
//!
//! A single selection persists as the raw value string. A multi selection
//! persists as a JSON array of values in catalog order.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{ItemCatalog, ItemId};
use crate::error::PersistError;

/// Whether a control holds one value or many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
	#[default]
	Single,
	Multi,
}

/// The committed selection of a controller.
///
/// Members are always eligible catalog items. `BTreeSet` keeps the multi
/// selection in catalog order because [`ItemId`]s are assigned in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
	Single(Option<ItemId>),
	Multi(BTreeSet<ItemId>),
}

/// Typed view of the selected values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SelectionValue {
	Single(Option<String>),
	Multi(Vec<String>),
}

impl SelectionState {
	/// An empty selection for `mode`.
	#[must_use]
	pub fn empty(mode: SelectionMode) -> Self {
		match mode {
			SelectionMode::Single => Self::Single(None),
			SelectionMode::Multi => Self::Multi(BTreeSet::new()),
		}
	}

	#[must_use]
	pub fn mode(&self) -> SelectionMode {
		match self {
			Self::Single(_) => SelectionMode::Single,
			Self::Multi(_) => SelectionMode::Multi,
		}
	}

	#[must_use]
	pub fn is_selected(&self, id: ItemId) -> bool {
		match self {
			Self::Single(current) => *current == Some(id),
			Self::Multi(selected) => selected.contains(&id),
		}
	}

	/// Selected items in catalog order.
	#[must_use]
	pub fn selected(&self) -> Vec<ItemId> {
		match self {
			Self::Single(current) => current.iter().copied().collect(),
			Self::Multi(selected) => selected.iter().copied().collect(),
		}
	}

	/// The first selected item in catalog order.
	#[must_use]
	pub fn first_selected(&self) -> Option<ItemId> {
		match self {
			Self::Single(current) => *current,
			Self::Multi(selected) => selected.first().copied(),
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.first_selected().is_none()
	}

	/// Build a selection from values, matching each against the catalog.
	///
	/// Unknown values are dropped. A catalog item is referenced at most once, so
	/// a repeated value only matches a second item that carries the same value.
	/// Single mode keeps the first match.
	pub fn from_values<'v>(
		mode: SelectionMode,
		catalog: &ItemCatalog,
		values: impl IntoIterator<Item = &'v str>,
	) -> Self {
		let mut picked = BTreeSet::new();
		for value in values {
			if let Some(item) = catalog.find_value_where(value, |item| !picked.contains(&item.id())) {
				picked.insert(item.id());
				if mode == SelectionMode::Single {
					break;
				}
			}
		}
		match mode {
			SelectionMode::Single => Self::Single(picked.first().copied()),
			SelectionMode::Multi => Self::Multi(picked),
		}
	}

	/// Decode a persisted value without any fallback.
	///
	/// # Errors
	///
	/// Multi mode returns [`PersistError`] when `raw` is not a JSON array. An
	/// empty string decodes as the empty array. Single mode never fails: an
	/// unknown value decodes to an empty selection.
	pub fn from_persisted(
		mode: SelectionMode,
		catalog: &ItemCatalog,
		raw: &str,
	) -> Result<Self, PersistError> {
		match mode {
			SelectionMode::Single => Ok(Self::from_values(mode, catalog, [raw])),
			SelectionMode::Multi => {
				let raw = if raw.is_empty() { "[]" } else { raw };
				let parsed: serde_json::Value = serde_json::from_str(raw)?;
				let serde_json::Value::Array(entries) = parsed else {
					return Err(PersistError::NotAnArray);
				};
				let values = entries.iter().filter_map(serde_json::Value::as_str);
				Ok(Self::from_values(mode, catalog, values))
			}
		}
	}

	/// Construction-time hydration with fallbacks.
	///
	/// Multi mode falls back to the declared pre-selection when the persisted
	/// value is absent, malformed or matches nothing. Single mode falls back to
	/// the first pre-selected item, then to the first eligible item.
	#[must_use]
	pub fn hydrate(mode: SelectionMode, catalog: &ItemCatalog, persisted: Option<&str>) -> Self {
		let decoded = match SelectionState::from_persisted(mode, catalog, persisted.unwrap_or_default()) {
			Ok(state) => state,
			Err(err) => {
				debug!("ignoring persisted value: {err}");
				Self::empty(mode)
			}
		};
		if !decoded.is_empty() {
			return decoded;
		}
		match mode {
			SelectionMode::Single => Self::Single(
				catalog
					.iter()
					.find(|item| item.is_preselected())
					.or_else(|| catalog.first())
					.map(|item| item.id()),
			),
			SelectionMode::Multi => Self::Multi(
				catalog
					.iter()
					.filter(|item| item.is_preselected())
					.map(|item| item.id())
					.collect(),
			),
		}
	}

	/// Selected values in catalog order.
	#[must_use]
	pub fn values<'c>(&self, catalog: &'c ItemCatalog) -> Vec<&'c str> {
		self.selected()
			.into_iter()
			.filter_map(|id| catalog.get(id))
			.map(|item| item.value())
			.collect()
	}

	#[must_use]
	pub fn value(&self, catalog: &ItemCatalog) -> SelectionValue {
		let values = self.values(catalog);
		match self {
			Self::Single(_) => SelectionValue::Single(values.first().map(|value| (*value).to_owned())),
			Self::Multi(_) => SelectionValue::Multi(values.into_iter().map(str::to_owned).collect()),
		}
	}

	/// Encode the selection for host storage.
	#[must_use]
	pub fn to_persisted(&self, catalog: &ItemCatalog) -> String {
		let values = self.values(catalog);
		match self {
			Self::Single(_) => values.first().map(|value| (*value).to_owned()).unwrap_or_default(),
			// Serialising a list of strings cannot fail.
			Self::Multi(_) => serde_json::to_string(&values).unwrap_or_else(|_| "[]".to_owned()),
		}
	}

	/// Replace a single selection. Returns whether the selection changed.
	pub fn replace_single(&mut self, id: ItemId) -> bool {
		match self {
			Self::Single(current) => current.replace(id) != Some(id),
			Self::Multi(_) => false,
		}
	}

	/// Add `id` if absent, remove it otherwise. Multi mode only.
	pub fn toggle(&mut self, id: ItemId) -> bool {
		match self {
			Self::Single(_) => false,
			Self::Multi(selected) => {
				if !selected.remove(&id) {
					selected.insert(id);
				}
				true
			}
		}
	}

	/// Add `id` to a multi selection. Returns whether it was newly added.
	pub fn insert(&mut self, id: ItemId) -> bool {
		match self {
			Self::Single(_) => false,
			Self::Multi(selected) => selected.insert(id),
		}
	}

	/// Remove `id` from a multi selection. Returns whether it was present.
	pub fn remove(&mut self, id: ItemId) -> bool {
		match self {
			Self::Single(_) => false,
			Self::Multi(selected) => selected.remove(&id),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::ItemDescriptor;

	fn abc() -> ItemCatalog {
		ItemCatalog::new(["a", "b", "c"].map(ItemDescriptor::new))
	}

	fn ids(indices: &[usize]) -> BTreeSet<ItemId> {
		indices.iter().copied().map(ItemId::new).collect()
	}

	#[test]
	fn hydration_collapses_duplicates_and_drops_unknown_values() {
		let catalog = abc();
		let state = SelectionState::hydrate(SelectionMode::Multi, &catalog, Some(r#"["b","b","z"]"#));
		assert_eq!(state, SelectionState::Multi(ids(&[1])));
	}

	#[test]
	fn repeated_values_match_distinct_items_sharing_that_value() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("First").with_value("x"),
			ItemDescriptor::new("Second").with_value("x"),
		]);
		let state = SelectionState::from_persisted(SelectionMode::Multi, &catalog, r#"["x","x","x"]"#)
			.expect("valid array");
		assert_eq!(state, SelectionState::Multi(ids(&[0, 1])));
	}

	#[test]
	fn malformed_multi_value_falls_back_to_preselected_items() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("a"),
			ItemDescriptor::new("b").preselected(),
			ItemDescriptor::new("c").preselected(),
		]);

		for raw in ["not json", r#"{"a":1}"#, r#"["z"]"#, "[]", ""] {
			let state = SelectionState::hydrate(SelectionMode::Multi, &catalog, Some(raw));
			assert_eq!(state, SelectionState::Multi(ids(&[1, 2])), "input {raw:?}");
		}
		assert!(matches!(
			SelectionState::from_persisted(SelectionMode::Multi, &catalog, "not json"),
			Err(PersistError::Malformed(_))
		));
		assert!(matches!(
			SelectionState::from_persisted(SelectionMode::Multi, &catalog, "3"),
			Err(PersistError::NotAnArray)
		));
	}

	#[test]
	fn disabled_preselected_items_are_ignored() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("a").preselected().disabled(),
			ItemDescriptor::new("b"),
		]);
		let state = SelectionState::hydrate(SelectionMode::Multi, &catalog, None);
		assert!(state.is_empty());
	}

	#[test]
	fn single_hydration_falls_back_to_first_item() {
		let catalog = abc();
		let matched = SelectionState::hydrate(SelectionMode::Single, &catalog, Some("c"));
		assert_eq!(matched, SelectionState::Single(Some(ItemId::new(2))));

		let unknown = SelectionState::hydrate(SelectionMode::Single, &catalog, Some("zz"));
		assert_eq!(unknown, SelectionState::Single(Some(ItemId::new(0))));

		let empty = SelectionState::hydrate(SelectionMode::Single, &ItemCatalog::default(), None);
		assert_eq!(empty, SelectionState::Single(None));
	}

	#[test]
	fn single_hydration_prefers_preselected_item() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("x"),
			ItemDescriptor::new("y"),
			ItemDescriptor::new("z").preselected(),
		]);
		let declared = SelectionState::hydrate(SelectionMode::Single, &catalog, None);
		assert_eq!(declared, SelectionState::Single(Some(ItemId::new(2))));

		let persisted = SelectionState::hydrate(SelectionMode::Single, &catalog, Some("y"));
		assert_eq!(persisted, SelectionState::Single(Some(ItemId::new(1))));
	}

	#[test]
	fn valid_persisted_value_overrides_preselection() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("a"),
			ItemDescriptor::new("b").preselected(),
			ItemDescriptor::new("c"),
		]);
		let state = SelectionState::hydrate(SelectionMode::Multi, &catalog, Some(r#"["c"]"#));
		assert_eq!(state, SelectionState::Multi(ids(&[2])));
	}

	#[test]
	fn multi_values_persist_in_catalog_order() {
		let catalog = abc();
		let mut state = SelectionState::empty(SelectionMode::Multi);
		state.insert(ItemId::new(2));
		state.insert(ItemId::new(0));

		assert_eq!(state.to_persisted(&catalog), r#"["a","c"]"#);
		assert_eq!(
			state.value(&catalog),
			SelectionValue::Multi(vec!["a".into(), "c".into()])
		);
	}

	#[test]
	fn persisted_values_round_trip() {
		let catalog = abc();
		let states = [
			SelectionState::Single(None),
			SelectionState::Single(Some(ItemId::new(1))),
			SelectionState::Multi(BTreeSet::new()),
			SelectionState::Multi(ids(&[0, 2])),
			SelectionState::Multi(ids(&[0, 1, 2])),
		];
		for state in states {
			let persisted = state.to_persisted(&catalog);
			let decoded = SelectionState::from_persisted(state.mode(), &catalog, &persisted)
				.expect("decodes");
			assert_eq!(decoded, state, "persisted {persisted:?}");
		}
	}

	#[test]
	fn toggling_is_multi_only() {
		let mut single = SelectionState::empty(SelectionMode::Single);
		assert!(!single.toggle(ItemId::new(0)));
		assert!(single.replace_single(ItemId::new(0)));
		assert!(!single.replace_single(ItemId::new(0)));

		let mut multi = SelectionState::empty(SelectionMode::Multi);
		assert!(multi.toggle(ItemId::new(0)));
		assert!(multi.is_selected(ItemId::new(0)));
		assert!(multi.toggle(ItemId::new(0)));
		assert!(multi.is_empty());
	}

	#[test]
	fn selection_values_serialise_untagged() {
		let single = serde_json::to_string(&SelectionValue::Single(Some("a".into()))).expect("json");
		let multi = serde_json::to_string(&SelectionValue::Multi(vec!["a".into()])).expect("json");
		assert_eq!(single, r#""a""#);
		assert_eq!(multi, r#"["a"]"#);
	}
}

//! Item descriptors and the fixed catalog of eligible items.
//!
//! Hosts describe every candidate with an [`ItemDescriptor`]. The
//! [`ItemCatalog`] keeps only the enabled ones; disabled descriptors are
//! dropped at construction and never take part in filtering, navigation or
//! selection afterwards.

use std::fmt;

use log::debug;

/// Stable identifier of an eligible item within a single catalog.
///
/// Identifiers are assigned in catalog order, so ordering identifiers orders
/// items the way the host declared them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

impl ItemId {
	/// Position of the item among the eligible items.
	#[must_use]
	pub const fn index(self) -> usize {
		self.0
	}

	#[cfg(test)]
	pub(crate) const fn new(index: usize) -> Self {
		Self(index)
	}
}

impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Host-supplied description of a candidate item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
	/// Explicit value; the trimmed display text is used when absent.
	pub value: Option<String>,
	/// Text shown to the user.
	pub text: String,
	/// Text matched against the query instead of the display text.
	pub filter_text: Option<String>,
	/// Additional tokens matched against the query.
	pub keywords: Vec<String>,
	/// Always visible regardless of the query.
	pub forced: bool,
	/// Disabled items are dropped from the catalog.
	pub enabled: bool,
	/// Declared pre-selection used when no persisted value applies.
	pub selected: bool,
	/// Label used in the multi-select summary.
	pub summary: Option<String>,
	/// Host element identifier linked from the query input while active.
	pub anchor: Option<String>,
	/// Command palette items that keep the surrounding dialog open.
	pub keep_open: bool,
}

impl Default for ItemDescriptor {
	fn default() -> Self {
		Self {
			value: None,
			text: String::new(),
			filter_text: None,
			keywords: Vec::new(),
			forced: false,
			enabled: true,
			selected: false,
			summary: None,
			anchor: None,
			keep_open: false,
		}
	}
}

impl ItemDescriptor {
	/// Describe an enabled item showing `text`.
	#[must_use]
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	#[must_use]
	pub fn with_filter_text(mut self, filter_text: impl Into<String>) -> Self {
		self.filter_text = Some(filter_text.into());
		self
	}

	#[must_use]
	pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.keywords = keywords.into_iter().map(Into::into).collect();
		self
	}

	/// Parse keywords from a single whitespace or comma separated string.
	#[must_use]
	pub fn with_keyword_list(mut self, raw: &str) -> Self {
		self.keywords = split_keywords(raw);
		self
	}

	#[must_use]
	pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
		self.summary = Some(summary.into());
		self
	}

	#[must_use]
	pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
		self.anchor = Some(anchor.into());
		self
	}

	#[must_use]
	pub fn forced(mut self) -> Self {
		self.forced = true;
		self
	}

	#[must_use]
	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}

	#[must_use]
	pub fn preselected(mut self) -> Self {
		self.selected = true;
		self
	}

	#[must_use]
	pub fn keep_open(mut self) -> Self {
		self.keep_open = true;
		self
	}
}

/// Split a keyword string on whitespace and commas, dropping empty tokens.
#[must_use]
pub fn split_keywords(raw: &str) -> Vec<String> {
	raw.split(|ch: char| ch.is_whitespace() || ch == ',')
		.filter(|token| !token.is_empty())
		.map(str::to_owned)
		.collect()
}

/// An eligible catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
	id: ItemId,
	value: String,
	text: String,
	filter_text: String,
	keywords: Vec<String>,
	forced: bool,
	preselected: bool,
	summary: Option<String>,
	anchor: Option<String>,
	keep_open: bool,
}

impl Item {
	fn from_descriptor(id: ItemId, descriptor: ItemDescriptor) -> Self {
		let ItemDescriptor {
			value,
			text,
			filter_text,
			keywords,
			forced,
			selected,
			summary,
			anchor,
			keep_open,
			..
		} = descriptor;

		let value = value.unwrap_or_else(|| text.trim().to_owned());
		let filter_text = filter_text
			.as_deref()
			.unwrap_or(&text)
			.trim()
			.to_lowercase();
		let keywords = keywords
			.iter()
			.flat_map(|keyword| split_keywords(keyword))
			.map(|keyword| keyword.to_lowercase())
			.collect();

		Self {
			id,
			value,
			text,
			filter_text,
			keywords,
			forced,
			preselected: selected,
			summary,
			anchor,
			keep_open,
		}
	}

	#[must_use]
	pub fn id(&self) -> ItemId {
		self.id
	}

	/// Derived value: the explicit value or the trimmed display text.
	#[must_use]
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Display text exactly as the host supplied it.
	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Lower-cased text the filter matches against.
	#[must_use]
	pub fn filter_text(&self) -> &str {
		&self.filter_text
	}

	/// Lower-cased keyword tokens.
	#[must_use]
	pub fn keywords(&self) -> &[String] {
		&self.keywords
	}

	/// Label used when joining the multi-select summary.
	#[must_use]
	pub fn summary_label(&self) -> &str {
		self.summary
			.as_deref()
			.unwrap_or_else(|| self.text.trim())
	}

	#[must_use]
	pub fn anchor(&self) -> Option<&str> {
		self.anchor.as_deref()
	}

	#[must_use]
	pub fn is_forced(&self) -> bool {
		self.forced
	}

	#[must_use]
	pub fn is_preselected(&self) -> bool {
		self.preselected
	}

	#[must_use]
	pub fn keeps_open(&self) -> bool {
		self.keep_open
	}
}

/// Ordered collection of eligible items, fixed for a controller's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
	items: Vec<Item>,
}

impl ItemCatalog {
	/// Build a catalog from descriptors, dropping disabled ones.
	pub fn new(descriptors: impl IntoIterator<Item = ItemDescriptor>) -> Self {
		let mut dropped = 0usize;
		let mut items = Vec::new();
		for descriptor in descriptors {
			if !descriptor.enabled {
				dropped += 1;
				continue;
			}
			let id = ItemId(items.len());
			items.push(Item::from_descriptor(id, descriptor));
		}
		if dropped > 0 {
			debug!("catalog dropped {dropped} disabled item(s), {} eligible", items.len());
		}
		Self { items }
	}

	#[must_use]
	pub fn get(&self, id: ItemId) -> Option<&Item> {
		self.items.get(id.0)
	}

	#[must_use]
	pub fn contains(&self, id: ItemId) -> bool {
		id.0 < self.items.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Item> {
		self.items.iter()
	}

	pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
		self.items.iter().map(Item::id)
	}

	#[must_use]
	pub fn first(&self) -> Option<&Item> {
		self.items.first()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// First eligible item whose derived value equals `value`.
	#[must_use]
	pub fn find_value(&self, value: &str) -> Option<&Item> {
		self.find_value_where(value, |_| true)
	}

	/// First eligible item whose derived value equals `value` and that also
	/// satisfies `accept`.
	pub fn find_value_where(
		&self,
		value: &str,
		mut accept: impl FnMut(&Item) -> bool,
	) -> Option<&Item> {
		self.items
			.iter()
			.find(|item| item.value == value && accept(item))
	}

	/// Whether any eligible item carries `value`.
	#[must_use]
	pub fn has_value(&self, value: &str) -> bool {
		self.find_value(value).is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn disabled_items_are_not_part_of_the_catalog() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("Alpha"),
			ItemDescriptor::new("Beta").disabled(),
			ItemDescriptor::new("Gamma"),
		]);

		assert_eq!(catalog.len(), 2);
		let texts: Vec<_> = catalog.iter().map(Item::text).collect();
		assert_eq!(texts, ["Alpha", "Gamma"]);
		assert_eq!(catalog.get(ItemId(1)).map(Item::value), Some("Gamma"));
		assert!(!catalog.has_value("Beta"));
	}

	#[test]
	fn value_defaults_to_trimmed_display_text() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("  Padded  "),
			ItemDescriptor::new("Labelled").with_value("lbl"),
		]);

		assert_eq!(catalog.get(ItemId(0)).map(Item::value), Some("Padded"));
		assert_eq!(catalog.get(ItemId(1)).map(Item::value), Some("lbl"));
		assert_eq!(catalog.get(ItemId(0)).map(Item::summary_label), Some("Padded"));
	}

	#[test]
	fn filter_text_and_keywords_are_normalised() {
		let catalog = ItemCatalog::new([ItemDescriptor::new("Open File")
			.with_filter_text(" OPEN ")
			.with_keywords(["Files, Docs", "Browse"])]);
		let item = catalog.first().expect("item");

		assert_eq!(item.filter_text(), "open");
		assert_eq!(item.keywords(), ["files", "docs", "browse"]);
	}

	#[test]
	fn keyword_lists_split_on_whitespace_and_commas() {
		assert_eq!(split_keywords("a, b  c,,d"), ["a", "b", "c", "d"]);
		assert!(split_keywords(" , ").is_empty());
	}

	#[test]
	fn find_value_where_skips_rejected_items() {
		let catalog = ItemCatalog::new([
			ItemDescriptor::new("One").with_value("x"),
			ItemDescriptor::new("Two").with_value("x"),
		]);

		let second = catalog.find_value_where("x", |item| item.id() != ItemId(0));
		assert_eq!(second.map(Item::text), Some("Two"));
	}
}

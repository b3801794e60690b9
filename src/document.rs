//! Declarative widget documents loaded from configuration.

use coat_listbox::{ItemDescriptor, ListboxConfig, SelectionMode, WidgetKind, split_keywords};
use serde::{Deserialize, Serialize};

use crate::registry::Element;

/// Keywords given either as a list or as one whitespace/comma separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Keywords {
	List(Vec<String>),
	Text(String),
}

impl Keywords {
	fn tokens(&self) -> Vec<String> {
		match self {
			Self::List(list) => list.iter().flat_map(|entry| split_keywords(entry)).collect(),
			Self::Text(text) => split_keywords(text),
		}
	}
}

/// One option or command inside a [`WidgetDecl`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ItemDecl {
	pub text: String,
	pub value: Option<String>,
	pub filter: Option<String>,
	pub keywords: Option<Keywords>,
	pub force: bool,
	pub disabled: bool,
	pub selected: bool,
	pub summary: Option<String>,
	pub anchor: Option<String>,
	pub keep_open: bool,
}

impl ItemDecl {
	#[must_use]
	pub fn descriptor(&self) -> ItemDescriptor {
		let mut descriptor = ItemDescriptor::new(self.text.clone());
		descriptor.value = self.value.clone();
		descriptor.filter_text = self.filter.clone();
		descriptor.keywords = self.keywords.as_ref().map(Keywords::tokens).unwrap_or_default();
		descriptor.forced = self.force;
		descriptor.enabled = !self.disabled;
		descriptor.selected = self.selected;
		descriptor.summary = self.summary.clone();
		descriptor.anchor = self.anchor.clone();
		descriptor.keep_open = self.keep_open;
		descriptor
	}
}

/// A select or command palette declared in a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WidgetDecl {
	pub id: String,
	#[serde(default = "default_kind")]
	pub kind: WidgetKind,
	#[serde(default)]
	pub multiple: bool,
	#[serde(default)]
	pub close_on_select: bool,
	#[serde(default)]
	pub placeholder: Option<String>,
	/// Persisted value restored on initialization.
	#[serde(default)]
	pub value: Option<String>,
	/// Whether the select has a filter input. Palettes always do.
	#[serde(default = "default_filter")]
	pub filter: bool,
	#[serde(default)]
	pub items: Vec<ItemDecl>,
}

const fn default_kind() -> WidgetKind {
	WidgetKind::Select
}

const fn default_filter() -> bool {
	true
}

impl WidgetDecl {
	#[must_use]
	pub fn config(&self) -> ListboxConfig {
		ListboxConfig {
			mode: if self.multiple { SelectionMode::Multi } else { SelectionMode::Single },
			close_on_select: self.close_on_select,
			placeholder: self.placeholder.clone(),
			persisted: self.value.clone(),
		}
	}

	pub fn descriptors(&self) -> impl Iterator<Item = ItemDescriptor> + '_ {
		self.items.iter().map(ItemDecl::descriptor)
	}
}

impl Element for WidgetDecl {
	fn key(&self) -> &str {
		&self.id
	}

	fn matches(&self, selector: &str) -> bool {
		self.kind.as_str() == selector
	}
}

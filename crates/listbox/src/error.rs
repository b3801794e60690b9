use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The widget a controller drives, used to name structural requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
	Select,
	Command,
}

impl WidgetKind {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Select => "select",
			Self::Command => "command",
		}
	}
}

impl fmt::Display for WidgetKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors that abort construction of a single widget instance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListboxError {
	/// The host does not provide the sub-elements the widget needs.
	#[error("{widget} component initialisation failed. Missing element(s): {}", .missing.join(", "))]
	MissingParts {
		widget: WidgetKind,
		missing: Vec<&'static str>,
	},
}

/// A persisted multi-select value that could not be decoded.
///
/// Hydration recovers from these locally; they never reach the host.
#[derive(Debug, Error)]
pub enum PersistError {
	#[error("persisted value is not valid JSON: {0}")]
	Malformed(#[from] serde_json::Error),

	#[error("persisted value is not a JSON array")]
	NotAnArray,
}

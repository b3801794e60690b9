use thiserror::Error;

/// A configuration that parsed but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
	#[error("widget #{index} has an empty id")]
	EmptyId { index: usize },

	#[error("widget id '{id}' is declared more than once")]
	DuplicateWidget { id: String },

	#[error("default widget '{id}' is not declared")]
	UnknownWidget { id: String },

	#[error("--value needs a widget to apply to, but none is declared")]
	NoWidgetForValue,
}

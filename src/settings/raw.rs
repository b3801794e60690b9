use std::collections::HashSet;
use std::path::PathBuf;

use coat::WidgetDecl;
use serde::Deserialize;

use super::errors::ConfigError;
use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	pub(super) ui: UiSection,
	pub(super) logging: LoggingSection,
	pub(super) widgets: Vec<WidgetDecl>,
	#[serde(skip)]
	pub(super) value_override: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) default_widget: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LoggingSection {
	pub(super) level: Option<String>,
	pub(super) file: Option<PathBuf>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(widget) = &cli.widget {
			self.ui.default_widget = Some(widget.clone());
		}
		if let Some(value) = &cli.value {
			self.value_override = Some(value.clone());
		}
	}

	/// Validate widget declarations and pick the widget to run.
	pub(super) fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
		let Self {
			ui,
			logging,
			mut widgets,
			value_override,
		} = self;

		let mut seen = HashSet::new();
		for (index, widget) in widgets.iter().enumerate() {
			if widget.id.trim().is_empty() {
				return Err(ConfigError::EmptyId { index });
			}
			if !seen.insert(widget.id.as_str()) {
				return Err(ConfigError::DuplicateWidget {
					id: widget.id.clone(),
				});
			}
		}

		let active_widget = match ui.default_widget {
			Some(id) if !seen.contains(id.as_str()) => {
				return Err(ConfigError::UnknownWidget { id });
			}
			Some(id) => Some(id),
			None => widgets.first().map(|widget| widget.id.clone()),
		};

		if let Some(value) = value_override {
			let target = active_widget
				.as_deref()
				.and_then(|id| widgets.iter_mut().find(|widget| widget.id == id))
				.ok_or(ConfigError::NoWidgetForValue)?;
			target.value = Some(value);
		}

		Ok(ResolvedConfig {
			widgets,
			active_widget,
			log_level: logging.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
			log_file: logging.file,
		})
	}
}

//! Mount the declared widgets and run the active one.

use anyhow::{Context, Result, bail};
use coat::listbox::OpenChannel;
use coat::tui::{Outcome, PaletteApp, SelectApp, run_palette, run_select};
use coat::{MountedWidget, default_registry};
use log::info;

use crate::settings::ResolvedConfig;

pub(crate) struct WidgetWorkflow {
	settings: ResolvedConfig,
}

impl WidgetWorkflow {
	pub(crate) fn from_config(settings: ResolvedConfig) -> Self {
		Self { settings }
	}

	/// Print each declared widget on its own line.
	pub(crate) fn list(&self) {
		for widget in &self.settings.widgets {
			println!("{}\t{}", widget.id, widget.kind);
		}
	}

	pub(crate) fn run(self) -> Result<Outcome> {
		let Some(active) = self.settings.active() else {
			bail!("no widgets are declared; add a [[widgets]] table to a config file");
		};
		let kind = active.kind;
		let id = active.id.clone();

		let channel = OpenChannel::new();
		let mut registry = default_registry(&channel)?;
		let mounted = registry.init_all(&self.settings.widgets);
		registry.start();
		info!("mounted {mounted} widget(s); running '{id}'");

		let widget = registry
			.take_instance(kind.as_str(), &id)
			.with_context(|| format!("{kind} '{id}' failed to initialise"))?;

		let outcome = match widget {
			MountedWidget::Select(controller) => {
				let mut app = SelectApp::new(id, controller);
				run_select(&mut app)?
			}
			MountedWidget::Command(palette) => {
				let mut app = PaletteApp::new(id, palette);
				run_palette(&mut app)?
			}
		};
		registry.stop();
		Ok(outcome)
	}
}

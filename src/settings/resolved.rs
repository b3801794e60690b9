use std::path::PathBuf;

use coat::WidgetDecl;

/// Application-ready configuration derived from user input and config files.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
	pub(crate) widgets: Vec<WidgetDecl>,
	/// Widget to run; the first declared one unless chosen explicitly.
	pub(crate) active_widget: Option<String>,
	pub(crate) log_level: String,
	pub(crate) log_file: Option<PathBuf>,
}

impl ResolvedConfig {
	#[must_use]
	pub(crate) fn active(&self) -> Option<&WidgetDecl> {
		let id = self.active_widget.as_deref()?;
		self.widgets.iter().find(|widget| widget.id == id)
	}

	/// Print a human readable summary of the effective configuration.
	pub(crate) fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Log level: {}", self.log_level);
		match &self.log_file {
			Some(path) => println!("  Log file: {}", path.display()),
			None => println!("  Log file: (stderr)"),
		}
		match &self.active_widget {
			Some(id) => println!("  Active widget: {id}"),
			None => println!("  Active widget: (none)"),
		}
		println!("  Widgets: {}", self.widgets.len());
		for widget in &self.widgets {
			println!(
				"    {} ({}{}, {} item(s))",
				widget.id,
				widget.kind,
				if widget.multiple { ", multiple" } else { "" },
				widget.items.len()
			);
		}
	}
}

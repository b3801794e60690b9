//! Built-in components mounting declared widgets onto terminal hosts.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use coat_listbox::{CommandPalette, Controller, OpenChannel, WidgetKind};
use coat_tui::TerminalHost;

use crate::document::WidgetDecl;
use crate::registry::{ComponentRegistry, RegistryError};

/// A widget initialized from a [`WidgetDecl`].
pub enum MountedWidget {
	Select(Rc<RefCell<Controller<TerminalHost>>>),
	Command(CommandPalette<TerminalHost>),
}

/// Registry with the select and command components. Selects join `channel`
/// so that at most one of them is open.
pub fn default_registry(
	channel: &OpenChannel,
) -> Result<ComponentRegistry<WidgetDecl, MountedWidget>, RegistryError> {
	let mut registry = ComponentRegistry::new();

	let channel = channel.clone();
	registry.register(
		WidgetKind::Select.as_str(),
		WidgetKind::Select.as_str(),
		move |decl: &WidgetDecl| {
			let controller =
				Controller::new(decl.config(), decl.descriptors(), TerminalHost::select(decl.filter))
					.with_context(|| format!("select '{}'", decl.id))?;
			Ok(MountedWidget::Select(channel.join(controller)))
		},
	)?;

	registry.register(
		WidgetKind::Command.as_str(),
		WidgetKind::Command.as_str(),
		|decl: &WidgetDecl| {
			let palette = CommandPalette::new(decl.descriptors(), TerminalHost::command())
				.with_context(|| format!("command '{}'", decl.id))?;
			Ok(MountedWidget::Command(palette))
		},
	)?;

	Ok(registry)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn decls() -> Vec<WidgetDecl> {
		serde_json::from_value(json!([
			{ "id": "fruit", "items": [{ "text": "Apple" }, { "text": "Banana" }] },
			{ "id": "colour", "multiple": true, "items": [{ "text": "Red" }] },
			{ "id": "palette", "kind": "command", "items": [{ "text": "Quit" }] },
		]))
		.expect("decls")
	}

	#[test]
	fn mounts_every_declared_widget() {
		let channel = OpenChannel::new();
		let mut registry = default_registry(&channel).expect("registry");

		assert_eq!(registry.init_all(&decls()), 3);
		assert_eq!(channel.len(), 2);
		assert!(registry.is_initialized("command", "palette"));
		assert!(matches!(
			registry.take_instance("command", "palette"),
			Some(MountedWidget::Command(_))
		));
	}

	#[test]
	fn opening_one_select_closes_the_other() {
		let channel = OpenChannel::new();
		let mut registry = default_registry(&channel).expect("registry");
		registry.init_all(&decls());

		let Some(MountedWidget::Select(fruit)) = registry.instance("select", "fruit") else {
			panic!("fruit select missing");
		};
		let Some(MountedWidget::Select(colour)) = registry.instance("select", "colour") else {
			panic!("colour select missing");
		};

		fruit.borrow_mut().open();
		colour.borrow_mut().open();

		assert!(!fruit.borrow().is_open());
		assert!(colour.borrow().is_open());
	}
}

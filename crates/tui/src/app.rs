//! Terminal applications driving a select or a command palette.

use std::cell::RefCell;
use std::rc::Rc;

use coat_listbox::{
	CommandPalette, Controller, ItemId, Key, Navigation, SelectionMode, SelectionValue,
};
use log::debug;
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;
use serde::Serialize;

use crate::host::{HostNotice, TerminalHost};
use crate::input::QueryInput;
use crate::style::Theme;

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
	/// Whether the user accepted rather than cancelled.
	pub accepted: bool,
	/// Widget the outcome belongs to.
	pub widget: String,
	/// Final selection of a select.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<SelectionValue>,
	/// Value of the activated command of a palette.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub command: Option<String>,
}

/// Screen regions recorded by the last draw, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub(crate) struct HitAreas {
	pub(crate) trigger: Rect,
	pub(crate) popover: Rect,
	pub(crate) list: Rect,
	pub(crate) rows: Vec<ItemId>,
	pub(crate) offset: usize,
}

impl HitAreas {
	fn row_at(&self, position: Position) -> Option<ItemId> {
		if !self.list.contains(position) {
			return None;
		}
		let index = self.offset + usize::from(position.y - self.list.y);
		self.rows.get(index).copied()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectAction {
	Control(Key),
	ToggleOpen,
	SelectAll,
	SelectNone,
	Edit,
	Accept,
	Cancel,
	Ignore,
}

fn navigation_for(key: &KeyEvent) -> Option<Navigation> {
	let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
	match key.code {
		KeyCode::Down => Some(Navigation::Next),
		KeyCode::Up => Some(Navigation::Previous),
		KeyCode::Char('n') if ctrl => Some(Navigation::Next),
		KeyCode::Char('p') if ctrl => Some(Navigation::Previous),
		KeyCode::Home | KeyCode::PageUp => Some(Navigation::First),
		KeyCode::End | KeyCode::PageDown => Some(Navigation::Last),
		_ => None,
	}
}

fn is_interrupt(key: &KeyEvent) -> bool {
	key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Interactive select bound to a shared controller.
pub struct SelectApp {
	pub(crate) title: String,
	pub(crate) controller: Rc<RefCell<Controller<TerminalHost>>>,
	pub(crate) input: QueryInput,
	pub(crate) theme: Theme,
	pub(crate) list_state: ListState,
	pub(crate) hits: HitAreas,
	hovering: bool,
}

impl SelectApp {
	#[must_use]
	pub fn new(title: impl Into<String>, controller: Rc<RefCell<Controller<TerminalHost>>>) -> Self {
		Self {
			title: title.into(),
			controller,
			input: QueryInput::new("Filter..."),
			theme: Theme::default(),
			list_state: ListState::default(),
			hits: HitAreas::default(),
			hovering: false,
		}
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	#[must_use]
	pub fn controller(&self) -> &Rc<RefCell<Controller<TerminalHost>>> {
		&self.controller
	}

	fn action_for(&self, key: &KeyEvent) -> SelectAction {
		let controller = self.controller.borrow();
		let open = controller.is_open();
		let multi = controller.mode() == SelectionMode::Multi;
		let filter = controller.host().parts().query_input;
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

		if is_interrupt(key) {
			return SelectAction::Cancel;
		}
		if let Some(navigation) = navigation_for(key) {
			return SelectAction::Control(Key::Navigate(navigation));
		}
		match key.code {
			KeyCode::Char('a') if ctrl && multi => SelectAction::SelectAll,
			KeyCode::Char('d') if ctrl && multi => SelectAction::SelectNone,
			KeyCode::Esc if open => SelectAction::Control(Key::Dismiss),
			KeyCode::Esc => SelectAction::Cancel,
			KeyCode::Enter if open => SelectAction::Control(Key::Commit),
			KeyCode::Enter => SelectAction::Accept,
			KeyCode::Tab if open && multi => SelectAction::Control(Key::Commit),
			KeyCode::Char(' ') if !open => SelectAction::ToggleOpen,
			KeyCode::Char(' ') if !filter => SelectAction::Control(Key::Commit),
			_ if open && filter => SelectAction::Edit,
			_ => SelectAction::Ignore,
		}
	}

	/// Apply a key press. Returns an outcome once the user accepts or cancels.
	pub fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
		let action = self.action_for(&key);
		match action {
			SelectAction::Accept => return Some(self.outcome(true)),
			SelectAction::Cancel => return Some(self.outcome(false)),
			SelectAction::Control(key) => {
				self.controller.borrow_mut().handle_key(key);
			}
			SelectAction::ToggleOpen => self.controller.borrow_mut().on_trigger_activated(),
			SelectAction::SelectAll => self.controller.borrow_mut().select_all(),
			SelectAction::SelectNone => self.controller.borrow_mut().select_none(),
			SelectAction::Edit => {
				if self.input.input(key) {
					self.controller
						.borrow_mut()
						.on_query_changed(self.input.text());
				}
			}
			SelectAction::Ignore => {}
		}
		self.sync();
		None
	}

	/// Apply a mouse event against the regions of the last draw.
	pub fn handle_mouse(&mut self, mouse: MouseEvent) {
		let position = Position::new(mouse.column, mouse.row);
		{
			let mut controller = self.controller.borrow_mut();
			match mouse.kind {
				MouseEventKind::Moved => match self.hits.row_at(position) {
					Some(id) => {
						self.hovering = true;
						controller.on_pointer_hover(id);
					}
					None if self.hovering => {
						self.hovering = false;
						controller.on_pointer_leave();
					}
					None => {}
				},
				MouseEventKind::Down(MouseButton::Left) => {
					if self.hits.trigger.contains(position) {
						controller.on_trigger_activated();
					} else if let Some(id) = self.hits.row_at(position) {
						controller.on_pointer_activate(id);
					} else if !self.hits.popover.contains(position) {
						controller.on_pointer_outside();
					}
				}
				MouseEventKind::ScrollDown if controller.is_open() => {
					controller.on_navigate(Navigation::Next);
				}
				MouseEventKind::ScrollUp if controller.is_open() => {
					controller.on_navigate(Navigation::Previous);
				}
				_ => {}
			}
		}
		self.sync();
	}

	/// Clear the query once the control closes and log queued notices.
	fn sync(&mut self) {
		let mut controller = self.controller.borrow_mut();
		if !controller.is_open() {
			self.hovering = false;
			if !self.input.is_empty() {
				self.input.clear();
			}
		}
		for notice in controller.host_mut().drain_notices() {
			debug!("{} {notice:?}", self.title);
		}
	}

	fn outcome(&self, accepted: bool) -> Outcome {
		Outcome {
			accepted,
			widget: self.title.clone(),
			value: Some(self.controller.borrow().value()),
			command: None,
		}
	}
}

/// Interactive command palette.
pub struct PaletteApp {
	pub(crate) title: String,
	pub(crate) palette: CommandPalette<TerminalHost>,
	pub(crate) input: QueryInput,
	pub(crate) theme: Theme,
	pub(crate) list_state: ListState,
	pub(crate) hits: HitAreas,
	activated: Option<String>,
}

impl PaletteApp {
	#[must_use]
	pub fn new(title: impl Into<String>, palette: CommandPalette<TerminalHost>) -> Self {
		Self {
			title: title.into(),
			palette,
			input: QueryInput::new("Type a command..."),
			theme: Theme::default(),
			list_state: ListState::default(),
			hits: HitAreas::default(),
			activated: None,
		}
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	#[must_use]
	pub fn palette(&self) -> &CommandPalette<TerminalHost> {
		&self.palette
	}

	/// Apply a key press. Returns an outcome once a command dismisses the
	/// palette or the user cancels.
	pub fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
		if is_interrupt(&key) {
			return Some(self.outcome(false));
		}
		let mapped = match key.code {
			KeyCode::Esc => Some(Key::Dismiss),
			KeyCode::Enter => Some(Key::Commit),
			_ => navigation_for(&key).map(Key::Navigate),
		};
		match mapped {
			Some(mapped) => {
				if !self.palette.handle_key(mapped) && mapped == Key::Dismiss {
					return Some(self.outcome(false));
				}
			}
			None => {
				if self.input.input(key) {
					self.palette.on_query_changed(self.input.text());
				}
			}
		}
		self.sync()
	}

	pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Outcome> {
		let position = Position::new(mouse.column, mouse.row);
		let row = self.hits.row_at(position);
		match (mouse.kind, row) {
			(MouseEventKind::Moved, Some(id)) => self.palette.on_pointer_hover(id),
			(MouseEventKind::Down(MouseButton::Left), Some(id)) => {
				self.palette.on_pointer_activate(id);
			}
			(MouseEventKind::ScrollDown, _) => {
				self.palette.handle_key(Key::Navigate(Navigation::Next));
			}
			(MouseEventKind::ScrollUp, _) => {
				self.palette.handle_key(Key::Navigate(Navigation::Previous));
			}
			_ => {}
		}
		self.sync()
	}

	fn sync(&mut self) -> Option<Outcome> {
		for notice in self.palette.host_mut().drain_notices() {
			debug!("{} {notice:?}", self.title);
			if let HostNotice::Activated(value) = notice {
				self.activated = Some(value);
			}
		}
		self.palette
			.host()
			.is_dismissed()
			.then(|| self.outcome(true))
	}

	fn outcome(&self, accepted: bool) -> Outcome {
		Outcome {
			accepted,
			widget: self.title.clone(),
			value: None,
			command: if accepted { self.activated.clone() } else { None },
		}
	}
}

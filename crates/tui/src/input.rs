//! Single-line query input built on `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_textarea::{Input, TextArea};

/// Filter text typed into an open select or a command palette.
#[derive(Debug, Clone)]
pub struct QueryInput {
	textarea: TextArea<'static>,
}

impl Default for QueryInput {
	fn default() -> Self {
		Self::new("")
	}
}

impl QueryInput {
	#[must_use]
	pub fn new(placeholder: &str) -> Self {
		let mut textarea = TextArea::default();
		textarea.set_cursor_line_style(Style::default());
		if !placeholder.is_empty() {
			textarea.set_placeholder_text(placeholder);
		}
		Self { textarea }
	}

	/// Feed a key to the input. Returns whether the text changed.
	///
	/// Newlines are never inserted.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		match key.code {
			KeyCode::Enter | KeyCode::Tab => false,
			KeyCode::Char('m' | 'j') if key.modifiers.contains(KeyModifiers::CONTROL) => false,
			_ => self.textarea.input(Input::from(key)),
		}
	}

	/// Current text.
	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea.lines().first().map_or("", String::as_str)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.text().is_empty()
	}

	pub fn clear(&mut self) {
		self.textarea.select_all();
		self.textarea.cut();
	}

	pub fn render(&mut self, frame: &mut Frame, area: Rect, block: Block<'static>, style: Style) {
		self.textarea.set_block(block);
		self.textarea.set_style(style);
		frame.render_widget(&self.textarea, area);
	}
}

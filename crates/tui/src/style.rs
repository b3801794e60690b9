//! Visual styling for the list widgets.

use ratatui::style::{Color, Modifier, Style};

/// Styles applied to the trigger, query input and option rows.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Style for widget titles and borders.
	pub header: Style,
	/// Style for the row under the cursor.
	pub row_highlight: Style,
	/// Style for the query input.
	pub prompt: Style,
	/// Style for placeholder text and empty states.
	pub empty: Style,
	/// Style for selected rows.
	pub highlight: Style,
}

impl Theme {
	/// Border style for a part, emphasised while it holds focus.
	#[must_use]
	pub fn border_style(&self, focused: bool) -> Style {
		if focused {
			self.header
		} else {
			self.header.remove_modifier(Modifier::BOLD).fg(Color::DarkGray)
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			header: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
			row_highlight: Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
			prompt: Style::new().fg(Color::White),
			empty: Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
			highlight: Style::new().fg(Color::Green),
		}
	}
}

//! Drawing for [`SelectApp`] and [`PaletteApp`].

use std::rc::Rc;

use coat_listbox::{Item, ItemId, ScrollBehavior, SelectionMode};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use crate::app::{HitAreas, PaletteApp, SelectApp};
use crate::host::{Focus, TerminalHost};
use crate::input::QueryInput;
use crate::style::Theme;

const HIGHLIGHT_SYMBOL: &str = "> ";

fn marker(mode: Option<SelectionMode>, selected: bool) -> &'static str {
	match (mode, selected) {
		(None, _) => "",
		(Some(SelectionMode::Multi), true) => "[x] ",
		(Some(SelectionMode::Multi), false) => "[ ] ",
		(Some(SelectionMode::Single), true) => "✓ ",
		(Some(SelectionMode::Single), false) => "  ",
	}
}

/// Apply a pending scroll request to the list offset.
///
/// Instant requests centre the target; smooth ones leave it to the list's
/// own keep-in-view adjustment.
fn apply_scroll(
	state: &mut ListState,
	request: Option<(ItemId, ScrollBehavior)>,
	rows: &[ItemId],
	height: u16,
) {
	let Some((id, ScrollBehavior::Instant)) = request else {
		return;
	};
	if let Some(position) = rows.iter().position(|row| *row == id) {
		*state.offset_mut() = position.saturating_sub(usize::from(height / 2));
	}
}

/// What the rows draw from the host.
struct RowSource<'a> {
	host: &'a TerminalHost,
	mode: Option<SelectionMode>,
	scroll: Option<(ItemId, ScrollBehavior)>,
}

/// Render the visible rows of `items` into `area`, recording hit regions.
fn draw_rows<'a>(
	frame: &mut Frame,
	area: Rect,
	items: impl Iterator<Item = &'a Item>,
	source: RowSource<'_>,
	theme: &Theme,
	state: &mut ListState,
	hits: &mut HitAreas,
) {
	let RowSource { host, mode, scroll } = source;
	let block = Block::bordered().border_style(theme.border_style(false));
	let inner = block.inner(area);
	let visible: Vec<&Item> = items.filter(|item| host.is_visible(item.id())).collect();
	hits.list = inner;
	hits.rows = visible.iter().map(|item| item.id()).collect();

	if visible.is_empty() {
		state.select(None);
		hits.offset = 0;
		let empty = Paragraph::new(Line::styled("No matches", theme.empty)).block(block);
		frame.render_widget(empty, area);
		return;
	}

	let rows: Vec<ListItem> = visible
		.iter()
		.map(|item| {
			let selected = host.is_selected(item.id());
			let style = if selected { theme.highlight } else { theme.prompt };
			ListItem::new(Line::from(vec![
				Span::styled(marker(mode, selected), style),
				Span::styled(item.text().to_owned(), style),
			]))
		})
		.collect();

	let active = host
		.active()
		.and_then(|id| hits.rows.iter().position(|row| *row == id));
	state.select(active);
	apply_scroll(state, scroll, &hits.rows, inner.height);

	let list = List::new(rows)
		.block(block)
		.highlight_symbol(HIGHLIGHT_SYMBOL)
		.highlight_style(theme.row_highlight);
	frame.render_stateful_widget(list, area, state);
	hits.offset = state.offset();
}

fn draw_query(
	frame: &mut Frame,
	area: Rect,
	input: &mut QueryInput,
	title: &str,
	focused: bool,
	theme: &Theme,
) {
	let block = Block::bordered()
		.title(title.to_owned())
		.border_style(theme.border_style(focused));
	input.render(frame, area, block, theme.prompt);
}

impl SelectApp {
	/// Draw the trigger and, while open, the popover.
	pub fn draw(&mut self, frame: &mut Frame) {
		let shared = Rc::clone(&self.controller);
		let mut controller = shared.borrow_mut();
		let scroll = controller.host_mut().take_scroll();
		let controller = &*controller;
		let host = controller.host();

		let [trigger_area, popover_area] =
			Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(frame.area());
		self.hits = HitAreas {
			trigger: trigger_area,
			..HitAreas::default()
		};

		let (summary, is_placeholder) = host.summary();
		let summary_style = if is_placeholder { self.theme.empty } else { self.theme.prompt };
		let trigger = Paragraph::new(Line::styled(summary.to_owned(), summary_style)).block(
			Block::bordered()
				.title(self.title.clone())
				.title_style(self.theme.header)
				.border_style(self.theme.border_style(host.focus() == Focus::Trigger)),
		);
		frame.render_widget(trigger, trigger_area);

		if !host.is_open() {
			return;
		}
		self.hits.popover = popover_area;

		let list_area = if host.parts().query_input {
			let [query_area, list_area] =
				Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(popover_area);
			let focused = host.focus() == Focus::Query;
			draw_query(frame, query_area, &mut self.input, "Filter", focused, &self.theme);
			list_area
		} else {
			popover_area
		};

		let source = RowSource {
			host,
			mode: Some(controller.mode()),
			scroll,
		};
		draw_rows(
			frame,
			list_area,
			controller.catalog().iter(),
			source,
			&self.theme,
			&mut self.list_state,
			&mut self.hits,
		);
	}
}

impl PaletteApp {
	/// Draw the query input above the command list.
	pub fn draw(&mut self, frame: &mut Frame) {
		let [query_area, list_area] =
			Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(frame.area());
		draw_query(frame, query_area, &mut self.input, &self.title, true, &self.theme);

		let scroll = self.palette.host_mut().take_scroll();
		let source = RowSource {
			host: self.palette.host(),
			mode: None,
			scroll,
		};
		self.hits = HitAreas::default();
		draw_rows(
			frame,
			list_area,
			self.palette.catalog().iter(),
			source,
			&self.theme,
			&mut self.list_state,
			&mut self.hits,
		);
	}
}

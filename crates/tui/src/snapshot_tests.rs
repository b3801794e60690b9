use std::cell::RefCell;
use std::rc::Rc;

use coat_listbox::{CommandPalette, Controller, ItemDescriptor, ListboxConfig};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{PaletteApp, SelectApp, TerminalHost};

fn buffer_to_string(buf: &Buffer) -> String {
	let mut lines = Vec::new();
	for y in 0..buf.area.height {
		let mut line = String::new();
		for x in 0..buf.area.width {
			line.push_str(buf[(x, y)].symbol());
		}
		lines.push(line);
	}
	lines.join("\n")
}

fn fruit_select(config: ListboxConfig) -> SelectApp {
	let items = ["Apple", "Banana"].map(ItemDescriptor::new);
	let controller = Controller::new(config, items, TerminalHost::select(false)).expect("select");
	SelectApp::new("Fruit", Rc::new(RefCell::new(controller)))
}

#[test]
fn closed_select_shows_the_summary() {
	let mut app = fruit_select(ListboxConfig::single().with_persisted("Banana"));

	let mut terminal = Terminal::new(TestBackend::new(20, 3)).expect("terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw");

	insta::assert_snapshot!(buffer_to_string(terminal.backend().buffer()), @r"
┌Fruit─────────────┐
│Banana            │
└──────────────────┘
");
}

#[test]
fn open_multi_select_marks_selection_and_cursor() {
	let mut app = fruit_select(ListboxConfig::multi().with_persisted(r#"["Banana"]"#));
	app.controller().borrow_mut().open();

	let mut terminal = Terminal::new(TestBackend::new(24, 7)).expect("terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw");

	insta::assert_snapshot!(buffer_to_string(terminal.backend().buffer()), @r"
┌Fruit─────────────────┐
│Banana                │
└──────────────────────┘
┌──────────────────────┐
│  [ ] Apple           │
│> [x] Banana          │
└──────────────────────┘
");
}

#[test]
fn palette_lists_matching_commands() {
	let items = ["Open file", "Save all", "Settings"].map(ItemDescriptor::new);
	let palette = CommandPalette::new(items, TerminalHost::command()).expect("palette");
	let mut app = PaletteApp::new("Command", palette);
	app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE));

	let mut terminal = Terminal::new(TestBackend::new(24, 8)).expect("terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw");

	insta::assert_snapshot!(buffer_to_string(terminal.backend().buffer()), @r"
┌Command───────────────┐
│s                     │
└──────────────────────┘
┌──────────────────────┐
│> Save all            │
│  Settings            │
│                      │
└──────────────────────┘
");
}

#[test]
fn empty_matches_render_a_notice() {
	let palette = CommandPalette::new([ItemDescriptor::new("Quit")], TerminalHost::command())
		.expect("palette");
	let mut app = PaletteApp::new("Command", palette);
	app.handle_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE));

	let mut terminal = Terminal::new(TestBackend::new(24, 6)).expect("terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw");

	let screen = buffer_to_string(terminal.backend().buffer());
	assert!(screen.contains("No matches"), "{screen}");
	assert!(!screen.contains("Quit"), "{screen}");
}

//! Terminal runtime and event loop.

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::debug;
use ratatui::Frame;
use ratatui::crossterm::event::{
	self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
};
use ratatui::crossterm::execute;

use crate::app::{Outcome, PaletteApp, SelectApp};

/// An application the event loop can drive.
pub trait Screen {
	fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome>;
	fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Outcome>;
	fn draw(&mut self, frame: &mut Frame);
}

impl Screen for SelectApp {
	fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
		SelectApp::handle_key(self, key)
	}

	fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Outcome> {
		SelectApp::handle_mouse(self, mouse);
		None
	}

	fn draw(&mut self, frame: &mut Frame) {
		SelectApp::draw(self, frame);
	}
}

impl Screen for PaletteApp {
	fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
		PaletteApp::handle_key(self, key)
	}

	fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Outcome> {
		PaletteApp::handle_mouse(self, mouse)
	}

	fn draw(&mut self, frame: &mut Frame) {
		PaletteApp::draw(self, frame);
	}
}

/// Run a select until the user accepts or cancels.
pub fn run_select(app: &mut SelectApp) -> Result<Outcome> {
	run(app)
}

/// Run a command palette until a command dismisses it or the user cancels.
pub fn run_palette(app: &mut PaletteApp) -> Result<Outcome> {
	run(app)
}

/// Pump the terminal event loop until the screen yields an outcome.
pub fn run(screen: &mut impl Screen) -> Result<Outcome> {
	let mut terminal = ratatui::init();
	terminal.clear()?;
	execute!(stdout(), EnableMouseCapture)?;

	let (event_tx, event_rx) = mpsc::channel();
	let event_loop_running = Arc::new(AtomicBool::new(true));
	let event_loop_flag = Arc::clone(&event_loop_running);

	let event_thread = thread::spawn(move || -> Result<()> {
		while event_loop_flag.load(Ordering::Relaxed) {
			if event::poll(Duration::from_millis(50))? {
				let event = event::read()?;
				if event_tx.send(event).is_err() {
					break;
				}
			}
		}
		Ok(())
	});

	let mut pending_events = VecDeque::new();

	let result: Result<Outcome> = 'event_loop: loop {
		if let Err(err) = terminal.draw(|frame| screen.draw(frame)) {
			break Err(err.into());
		}

		match event_rx.recv_timeout(Duration::from_millis(250)) {
			Ok(event) => pending_events.push_back(event),
			Err(mpsc::RecvTimeoutError::Timeout) => continue,
			Err(mpsc::RecvTimeoutError::Disconnected) => {
				break Err(anyhow!("input event channel disconnected"));
			}
		}
		pending_events.extend(event_rx.try_iter());

		while let Some(event) = pending_events.pop_front() {
			let outcome = match event {
				Event::Key(key) if key.kind == KeyEventKind::Press => screen.handle_key(key),
				Event::Mouse(mouse) => screen.handle_mouse(mouse),
				_ => None,
			};
			if let Some(outcome) = outcome {
				debug!("session finished: {outcome:?}");
				break 'event_loop Ok(outcome);
			}
		}
	};

	ratatui::restore();
	execute!(stdout(), DisableMouseCapture)?;

	event_loop_running.store(false, Ordering::Relaxed);
	match event_thread.join() {
		Ok(join_result) => join_result?,
		Err(err) => std::panic::resume_unwind(err),
	}

	result
}

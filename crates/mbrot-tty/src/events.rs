#![forbid(unsafe_code)]

//! Terminal input → renderer events.

use std::io;
use std::time::Duration;

use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};

use mbrot_core::Event;

use crate::surface::pixel_size;

/// Translate one terminal event.
///
/// `q`, `Esc` and `Ctrl+C` quit; a terminal resize becomes a pixel resize
/// with twice the rows. Everything else is dropped.
pub fn map_event(event: &TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) => map_key(key),
        TermEvent::Resize(cols, rows) => {
            let size = pixel_size(*cols, *rows);
            Some(Event::Resized {
                width: size.width,
                height: size.height,
            })
        }
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Event::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Event::Quit),
        _ => None,
    }
}

/// Non-blocking reader over crossterm's global input queue.
#[derive(Debug, Default)]
pub struct TtyEventSource {
    buf: Vec<Event>,
}

impl TtyEventSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event already queued, mapped, without blocking.
    ///
    /// # Errors
    ///
    /// Propagates read failures from the terminal.
    pub fn drain(&mut self) -> io::Result<std::vec::Drain<'_, Event>> {
        self.buf.clear();
        while crossterm::event::poll(Duration::ZERO)? {
            let raw = crossterm::event::read()?;
            if let Some(event) = map_event(&raw) {
                self.buf.push(event);
            }
        }
        Ok(self.buf.drain(..))
    }

    /// Block up to `timeout` for input. `Ok(true)` when something is queued.
    pub fn wait(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }
}

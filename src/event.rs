use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::error::Result;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// Terminal resize event.
    Resize(u16, u16),
}

/// Blocking terminal event source.
///
/// The loop has exactly one producer (the keyboard) and one consumer (the
/// render loop), so a plain blocking `event::read` suffices; the read parks
/// until input arrives. Under raw mode Ctrl-C is delivered here as an
/// ordinary key event rather than a signal.
pub struct EventSource;

impl EventSource {
    pub fn new() -> Self {
        Self
    }

    /// Block until the next relevant event.
    ///
    /// Key releases and repeats (reported on some platforms) are filtered so
    /// each physical press is handled once.
    pub fn next(&mut self) -> Result<Event> {
        loop {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key));
                }
                CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                _ => {}
            }
        }
    }
}

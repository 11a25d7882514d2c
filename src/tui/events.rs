//! Event polling for the studio loop

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use std::time::Duration;

/// Events delivered to the application
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key press
    Key(KeyEvent),

    /// Mouse event (wheel scrolling)
    Mouse(MouseEvent),

    /// Window resize
    Resize(u16, u16),

    /// Periodic tick; used to drain pending analysis results
    Tick,

    /// Quit shortcut pressed
    Quit,
}

/// Polling event loop
pub struct EventLoop {
    /// Poll timeout in milliseconds; a timeout yields a tick
    tick_rate: u64,
}

impl EventLoop {
    /// Create a loop with the given tick rate in milliseconds
    pub fn new(tick_rate: u64) -> Self {
        Self { tick_rate }
    }

    /// Block up to one tick for the next event
    pub fn poll_event(&self) -> Result<TuiEvent> {
        if event::poll(Duration::from_millis(self.tick_rate))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if Self::is_quit_key(&key) {
                        return Ok(TuiEvent::Quit);
                    }
                    return Ok(TuiEvent::Key(key));
                }
                Event::Mouse(mouse) => return Ok(TuiEvent::Mouse(mouse)),
                Event::Resize(w, h) => return Ok(TuiEvent::Resize(w, h)),
                _ => {}
            }
        }
        Ok(TuiEvent::Tick)
    }

    /// Ctrl+C or Ctrl+Q always quit, regardless of focus or busy state
    fn is_quit_key(key: &KeyEvent) -> bool {
        matches!(
            (key.code, key.modifiers),
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
                | (KeyCode::Char('q'), KeyModifiers::CONTROL)
        )
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_quit_keys() {
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

        assert!(EventLoop::is_quit_key(&ctrl_q));
        assert!(EventLoop::is_quit_key(&ctrl_c));
        assert!(!EventLoop::is_quit_key(&plain_q));
    }
}

//! Terminal setup and teardown

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Terminal configuration
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Capture mouse events (wheel scrolling)
    pub mouse_enabled: bool,

    /// Use the alternate screen buffer
    pub alternate_screen: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
            alternate_screen: true,
        }
    }
}

/// Owns the ratatui terminal and restores the user's screen on drop
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    config: TerminalConfig,
}

impl TerminalManager {
    /// Enter raw mode and set up the terminal
    pub fn new(config: TerminalConfig) -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.mouse_enabled {
            execute!(stdout, EnableMouseCapture)?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, config })
    }

    /// Mutable access for drawing
    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Current terminal size as (width, height)
    pub fn size(&self) -> Result<(u16, u16)> {
        let rect = self.terminal.size()?;
        Ok((rect.width, rect.height))
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.config.mouse_enabled {
            let _ = execute!(io::stdout(), DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
        let _ = self.terminal.show_cursor();
    }
}

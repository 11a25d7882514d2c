//! Terminal UI infrastructure
//!
//! Terminal lifecycle management (raw mode, alternate screen, restore on
//! drop) and the polling event loop the studio application runs on.

mod events;
mod terminal;

pub use events::{EventLoop, TuiEvent};
pub use terminal::{TerminalConfig, TerminalManager};

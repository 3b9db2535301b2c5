//! Event handling for the application.
//!
//! This module handles terminal input polling and the listener plumbing
//! used between pickers and quick access providers.

mod emitter;
mod handler;

pub use emitter::{Emitter, Subscription};
pub use handler::EventHandler;

use crossterm::event::KeyEvent;

/// Events driving the application update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
    /// The application should exit.
    Quit,
}

//! User interface components.
//!
//! This module contains the terminal rendering of the quick access palette.

mod components;

pub use components::{QuickPick, QuickPickAction, TextInput};

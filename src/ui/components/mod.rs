//! Reusable UI components.

mod input;
mod quick_pick;

pub use input::TextInput;
pub use quick_pick::{QuickPick, QuickPickAction};

//! quickhelp - a terminal quick access palette.
//!
//! Quick access providers register under a text prefix (`>`, `@`, `#`, ...).
//! Typing a prefix into the palette activates its provider; `?` lists the help
//! of every registered provider, grouped into global and editor commands, and
//! accepting an entry jumps into that provider.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod nls;
pub mod quickaccess;
pub mod ui;

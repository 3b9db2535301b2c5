//! Quick access providers and the help listing that aggregates them.
//!
//! This module provides:
//! - The provider abstraction (`QuickAccessProvider`) and its help entries
//! - A registry mapping prefixes to providers
//! - The `?` help provider that groups every registered provider into one list
//! - Built-in static providers used by the palette

mod builtin;
mod compare;
mod help;
mod picker;
mod registry;
mod session;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use builtin::{builtin_providers, StaticProvider};
pub use compare::compare_prefixes;
pub use help::{build_grouped_list, HelpQuickAccess, LABEL_PLACEHOLDER};
pub use picker::{AcceptListener, PickItem, Picker, PickerEntry};
pub use registry::QuickAccessRegistry;
pub use session::Session;

/// A capability a provider advertises in the help listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HelpEntry {
    /// Prefix to open for this entry; the provider's prefix when unset or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// User facing description.
    pub description: String,
    /// Whether the entry only makes sense with an active editor.
    #[serde(default)]
    pub needs_editor: bool,
}

impl HelpEntry {
    /// A global entry using the provider's prefix.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            prefix: None,
            description: description.into(),
            needs_editor: false,
        }
    }

    /// Override the prefix this entry opens.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Mark the entry as editor scoped.
    pub fn needs_editor(mut self) -> Self {
        self.needs_editor = true;
        self
    }
}

/// A handler serving one quick access mode, selected by its prefix.
pub trait QuickAccessProvider {
    /// The text that activates this provider. Empty for the default provider.
    fn prefix(&self) -> &str;

    /// Entries describing this provider in the help listing.
    fn help_entries(&self) -> &[HelpEntry];

    /// Input hint shown while this provider is active.
    fn placeholder(&self) -> Option<&str> {
        None
    }

    /// Populate `picker` for this provider's mode.
    ///
    /// Everything the provider subscribes to is owned by the returned
    /// session and released when the session ends.
    fn provide(&self, picker: &mut dyn Picker, context: &QuickAccessContext<'_>) -> Session;
}

/// Read access to the currently registered providers.
pub trait ProviderSource {
    /// Every registered provider, in registration order.
    fn list_providers(&self) -> Vec<Rc<dyn QuickAccessProvider>>;
}

/// Requests that quick access be reopened with a new value.
pub trait QuickAccessNavigator {
    /// Open quick access with `value` as its input. Fire-and-forget.
    fn show(&self, value: &str);
}

/// Collaborators available to a provider while it fills a picker.
pub struct QuickAccessContext<'a> {
    /// The registry snapshot source.
    pub providers: &'a dyn ProviderSource,
    /// Where navigation requests go.
    pub navigator: Rc<dyn QuickAccessNavigator>,
}

//! The picker contract consumed by quick access providers.

use crate::events::Subscription;

/// A selectable row in a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    /// Quick access value to open when this item is accepted, if any.
    pub prefix: Option<String>,
    /// Primary text shown for the row. Never empty for help rows.
    pub label: String,
    /// Secondary text shown next to the label.
    pub description: Option<String>,
    /// Text announced by screen readers.
    pub aria_label: Option<String>,
}

impl PickItem {
    /// Create an item with just a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            prefix: None,
            label: label.into(),
            description: None,
            aria_label: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text a filter query is matched against.
    pub fn matches(&self, query_lower: &str) -> bool {
        if query_lower.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(query_lower)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(query_lower))
    }
}

/// An entry handed to a picker: either a row or a group heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEntry {
    /// A selectable row.
    Item(PickItem),
    /// A non-selectable group heading.
    Separator {
        /// Heading text.
        label: String,
    },
}

impl PickerEntry {
    /// Create a separator entry.
    pub fn separator(label: impl Into<String>) -> Self {
        Self::Separator {
            label: label.into(),
        }
    }

    /// The row, unless this entry is a separator.
    pub fn as_item(&self) -> Option<&PickItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Separator { .. } => None,
        }
    }

    /// Whether this entry is a group heading.
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator { .. })
    }

    /// The visible text of the entry.
    pub fn label(&self) -> &str {
        match self {
            Self::Item(item) => &item.label,
            Self::Separator { label } => label,
        }
    }
}

/// Callback invoked with the picker's selection when the user accepts.
pub type AcceptListener = Box<dyn FnMut(&[PickItem])>;

/// What a provider needs from the picker that hosts it.
pub trait Picker {
    /// Replace the displayed entries.
    fn set_items(&mut self, items: Vec<PickerEntry>);

    /// Set the hint shown while the filter text is empty.
    fn set_placeholder(&mut self, placeholder: Option<String>);

    /// Observe acceptance.
    ///
    /// The listener receives the selection at the time of acceptance (zero or
    /// one item for single-select pickers) and stays registered until the
    /// returned subscription is dropped.
    fn on_accept(&mut self, listener: AcceptListener) -> Subscription;

    /// The currently selected rows.
    fn selected_items(&self) -> Vec<PickItem>;
}

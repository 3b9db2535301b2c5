//! Providers serving a fixed list of items.
//!
//! The palette ships a handful of these as its built-in modes, and every
//! provider declared in the configuration file becomes one as well.

use std::rc::Rc;

use tracing::{debug, info};

use super::{
    HelpEntry, PickItem, Picker, PickerEntry, QuickAccessContext, QuickAccessProvider, Session,
};
use crate::config::ProviderConfig;

/// A quick access provider with a static item list.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    prefix: String,
    placeholder: Option<String>,
    help: Vec<HelpEntry>,
    items: Vec<PickItem>,
}

impl StaticProvider {
    /// Create a provider for `prefix` with no help entries or items.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Set the input hint.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Append a help entry.
    pub fn with_help(mut self, entry: HelpEntry) -> Self {
        self.help.push(entry);
        self
    }

    /// Append an item.
    pub fn with_item(mut self, item: PickItem) -> Self {
        self.items.push(item);
        self
    }

    /// The items this provider lists.
    pub fn items(&self) -> &[PickItem] {
        &self.items
    }
}

impl QuickAccessProvider for StaticProvider {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn help_entries(&self) -> &[HelpEntry] {
        &self.help
    }

    fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn provide(&self, picker: &mut dyn Picker, context: &QuickAccessContext<'_>) -> Session {
        let mut session = Session::new(self.prefix.clone());

        let navigator = Rc::clone(&context.navigator);
        let prefix = self.prefix.clone();
        session.add(picker.on_accept(Box::new(move |selection: &[PickItem]| {
            let Some(item) = selection.first() else {
                return;
            };
            info!(provider = %prefix, label = %item.label, "Item accepted");
            if let Some(target) = &item.prefix {
                navigator.show(target);
            }
        })));

        picker.set_placeholder(self.placeholder.clone());
        picker.set_items(self.items.iter().cloned().map(PickerEntry::Item).collect());
        debug!(prefix = %self.prefix, items = self.items.len(), "Populated static provider");

        session
    }
}

impl From<ProviderConfig> for StaticProvider {
    fn from(config: ProviderConfig) -> Self {
        let items = config
            .items
            .into_iter()
            .map(|item| PickItem {
                prefix: item.prefix,
                label: item.label,
                description: item.description,
                aria_label: None,
            })
            .collect();

        Self {
            prefix: config.prefix,
            placeholder: config.placeholder,
            help: config.help,
            items,
        }
    }
}

fn goto(label: &str, target: &str) -> PickItem {
    PickItem {
        prefix: Some(target.to_string()),
        ..PickItem::new(label)
    }
}

/// The palette's built-in modes.
pub fn builtin_providers() -> Vec<StaticProvider> {
    vec![
        StaticProvider::new("")
            .with_placeholder("Search files by name (append : to go to line or @ to go to symbol)")
            .with_help(HelpEntry::new("Go to File"))
            .with_item(PickItem::new("main.rs").with_description("src"))
            .with_item(PickItem::new("app.rs").with_description("src"))
            .with_item(PickItem::new("settings.rs").with_description("src/config"))
            .with_item(PickItem::new("Cargo.toml")),
        StaticProvider::new(">")
            .with_placeholder("Type the name of a command to run")
            .with_help(HelpEntry::new("Show and Run Commands"))
            .with_item(goto("Go to File...", ""))
            .with_item(goto("Go to Line/Column...", ":"))
            .with_item(goto("Go to Symbol in Workspace...", "#"))
            .with_item(goto("View: Open View...", "view "))
            .with_item(goto("Help: Quick Access Help", "?"))
            .with_item(PickItem::new("Preferences: Open Settings").with_description("Ctrl+,"))
            .with_item(PickItem::new("View: Toggle Word Wrap").with_description("Alt+Z")),
        StaticProvider::new(":")
            .with_placeholder("Type a line number to go to")
            .with_help(HelpEntry::new("Go to Line/Column").needs_editor()),
        StaticProvider::new("@")
            .with_placeholder("Type the name of a symbol to go to")
            .with_help(HelpEntry::new("Go to Symbol in Editor").needs_editor())
            .with_help(
                HelpEntry::new("Go to Symbol in Editor by Category")
                    .with_prefix("@:")
                    .needs_editor(),
            )
            .with_item(PickItem::new("main").with_description("function"))
            .with_item(PickItem::new("App").with_description("struct"))
            .with_item(PickItem::new("App::run").with_description("method")),
        StaticProvider::new("#")
            .with_placeholder("Type the name of a symbol to open")
            .with_help(HelpEntry::new("Go to Symbol in Workspace"))
            .with_item(PickItem::new("App").with_description("src/app.rs"))
            .with_item(PickItem::new("Settings").with_description("src/config/settings.rs"))
            .with_item(PickItem::new("QuickPick").with_description("src/ui/components/quick_pick.rs")),
        StaticProvider::new("edt ")
            .with_placeholder("Type the name of an open editor")
            .with_help(HelpEntry::new("Show Editors in Active Group").needs_editor())
            .with_item(PickItem::new("main.rs").with_description("src"))
            .with_item(PickItem::new("app.rs").with_description("src")),
        StaticProvider::new("view ")
            .with_placeholder("Type the name of a view to open")
            .with_help(HelpEntry::new("Open View"))
            .with_item(PickItem::new("Explorer"))
            .with_item(PickItem::new("Search"))
            .with_item(PickItem::new("Problems"))
            .with_item(PickItem::new("Output"))
            .with_item(PickItem::new("Terminal")),
    ]
}

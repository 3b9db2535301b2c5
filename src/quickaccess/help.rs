//! The `?` help provider.
//!
//! Lists every registered provider's help entries, sorted by prefix and split
//! into global and editor-scoped groups. Accepting an entry reopens quick
//! access with that entry's prefix.

use std::rc::Rc;

use tracing::{debug, trace};

use super::{
    compare_prefixes, HelpEntry, PickItem, Picker, PickerEntry, QuickAccessContext,
    QuickAccessNavigator, QuickAccessProvider, Session,
};
use crate::nls::Messages;

/// Label used when neither the entry nor its provider has a prefix.
pub const LABEL_PLACEHOLDER: &str = "\u{2026}";

/// Build the help listing for a set of providers.
///
/// Providers are ordered by [`compare_prefixes`] with a stable sort, so
/// providers sharing a prefix keep the order they were given in. Each help
/// entry becomes one row in either the global or the editor group. When both
/// groups have rows they are introduced by separators, global first;
/// otherwise the rows are returned without separators.
pub fn build_grouped_list(
    providers: &[Rc<dyn QuickAccessProvider>],
    messages: &Messages,
) -> Vec<PickerEntry> {
    let mut sorted: Vec<&Rc<dyn QuickAccessProvider>> = providers.iter().collect();
    sorted.sort_by(|a, b| compare_prefixes(a.prefix(), b.prefix()));

    let mut global = Vec::new();
    let mut editor = Vec::new();
    for provider in sorted {
        for entry in provider.help_entries() {
            let item = help_item(provider.prefix(), entry, messages);
            if entry.needs_editor {
                editor.push(PickerEntry::Item(item));
            } else {
                global.push(PickerEntry::Item(item));
            }
        }
    }

    if global.is_empty() || editor.is_empty() {
        global.append(&mut editor);
        return global;
    }

    let mut entries = Vec::with_capacity(global.len() + editor.len() + 2);
    entries.push(PickerEntry::separator(messages.localize(
        "globalCommands",
        "global commands",
        &[],
    )));
    entries.append(&mut global);
    entries.push(PickerEntry::separator(messages.localize(
        "editorCommands",
        "editor commands",
        &[],
    )));
    entries.append(&mut editor);
    entries
}

fn help_item(provider_prefix: &str, entry: &HelpEntry, messages: &Messages) -> PickItem {
    let prefix = entry
        .prefix
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(provider_prefix);
    let label = if prefix.is_empty() {
        LABEL_PLACEHOLDER
    } else {
        prefix
    };

    PickItem {
        prefix: Some(prefix.to_string()),
        label: label.to_string(),
        description: Some(entry.description.clone()),
        aria_label: Some(messages.localize("entryAriaLabel", "{0}, picker help", &[label])),
    }
}

/// Navigate into the accepted entry's provider.
///
/// Only the first selected row is considered; an empty selection does
/// nothing.
fn accept_selection(selection: &[PickItem], navigator: &dyn QuickAccessNavigator) {
    let Some(item) = selection.first() else {
        trace!("Help accepted without a selection");
        return;
    };
    if let Some(prefix) = &item.prefix {
        debug!(prefix = %prefix, "Opening quick access from help");
        navigator.show(prefix);
    }
}

/// Quick access provider listing the help of every registered provider.
pub struct HelpQuickAccess {
    prefix: String,
    help: Vec<HelpEntry>,
    messages: Rc<Messages>,
}

impl HelpQuickAccess {
    /// The prefix the help provider is registered under.
    pub const PREFIX: &'static str = "?";

    /// Create the help provider.
    pub fn new(messages: Rc<Messages>) -> Self {
        let description = messages.localize("quickAccessHelp", "Quick access help", &[]);
        Self {
            prefix: Self::PREFIX.to_string(),
            help: vec![HelpEntry::new(description)],
            messages,
        }
    }
}

impl QuickAccessProvider for HelpQuickAccess {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn help_entries(&self) -> &[HelpEntry] {
        &self.help
    }

    fn provide(&self, picker: &mut dyn Picker, context: &QuickAccessContext<'_>) -> Session {
        let mut session = Session::new(self.prefix.clone());

        let navigator = Rc::clone(&context.navigator);
        session.add(picker.on_accept(Box::new(move |selection: &[PickItem]| {
            accept_selection(selection, navigator.as_ref());
        })));

        let providers = context.providers.list_providers();
        let entries = build_grouped_list(&providers, &self.messages);
        debug!(
            providers = providers.len(),
            entries = entries.len(),
            "Populated quick access help"
        );
        picker.set_items(entries);

        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::events::{Emitter, Subscription};
    use crate::quickaccess::{AcceptListener, ProviderSource, StaticProvider};

    struct FakeSource(Vec<Rc<dyn QuickAccessProvider>>);

    impl ProviderSource for FakeSource {
        fn list_providers(&self) -> Vec<Rc<dyn QuickAccessProvider>> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        shown: RefCell<Vec<String>>,
    }

    impl QuickAccessNavigator for RecordingNavigator {
        fn show(&self, value: &str) {
            self.shown.borrow_mut().push(value.to_string());
        }
    }

    #[derive(Default)]
    struct FakePicker {
        items: Vec<PickerEntry>,
        set_items_calls: usize,
        selection: Vec<PickItem>,
        accept: Emitter<[PickItem]>,
    }

    impl FakePicker {
        fn select(&mut self, index: usize) {
            let item = self.items[index].as_item().cloned().unwrap();
            self.selection = vec![item];
        }

        fn accept(&self) {
            self.accept.fire(&self.selection);
        }
    }

    impl Picker for FakePicker {
        fn set_items(&mut self, items: Vec<PickerEntry>) {
            self.set_items_calls += 1;
            self.items = items;
        }

        fn set_placeholder(&mut self, _placeholder: Option<String>) {}

        fn on_accept(&mut self, listener: AcceptListener) -> Subscription {
            self.accept.subscribe(listener)
        }

        fn selected_items(&self) -> Vec<PickItem> {
            self.selection.clone()
        }
    }

    fn provider(prefix: &str, entries: Vec<HelpEntry>) -> Rc<dyn QuickAccessProvider> {
        let mut provider = StaticProvider::new(prefix);
        for entry in entries {
            provider = provider.with_help(entry);
        }
        Rc::new(provider)
    }

    fn labels(entries: &[PickerEntry]) -> Vec<String> {
        entries.iter().map(|e| e.label().to_string()).collect()
    }

    fn descriptions(entries: &[PickerEntry]) -> Vec<String> {
        entries
            .iter()
            .filter_map(|e| e.as_item())
            .filter_map(|i| i.description.clone())
            .collect()
    }

    fn open(
        providers: Vec<Rc<dyn QuickAccessProvider>>,
    ) -> (FakePicker, Rc<RecordingNavigator>, Session) {
        let source = FakeSource(providers);
        let navigator = Rc::new(RecordingNavigator::default());
        let context = QuickAccessContext {
            providers: &source,
            navigator: navigator.clone(),
        };
        let help = HelpQuickAccess::new(Rc::new(Messages::new()));
        let mut picker = FakePicker::default();
        let session = help.provide(&mut picker, &context);
        (picker, navigator, session)
    }

    #[test]
    fn test_global_only_sorted_without_separators() {
        let providers = vec![
            provider("@", vec![HelpEntry::new("Go to Symbol")]),
            provider("#", vec![HelpEntry::new("Go to Symbol in Workspace")]),
        ];

        let entries = build_grouped_list(&providers, &Messages::new());

        assert_eq!(labels(&entries), vec!["#", "@"]);
        assert_eq!(
            descriptions(&entries),
            vec!["Go to Symbol in Workspace", "Go to Symbol"]
        );
        assert!(entries.iter().all(|e| !e.is_separator()));
    }

    #[test]
    fn test_accented_prefix_sorts_with_base_letter() {
        let providers: Vec<_> = ["f", "é", "a", "~", "{"]
            .into_iter()
            .map(|prefix| provider(prefix, vec![HelpEntry::new(format!("mode {prefix}"))]))
            .collect();

        let entries = build_grouped_list(&providers, &Messages::new());

        assert_eq!(labels(&entries), vec!["a", "é", "f", "{", "~"]);
    }

    #[test]
    fn test_editor_only_has_no_separators() {
        let providers = vec![
            provider(":", vec![HelpEntry::new("Go to Line").needs_editor()]),
            provider("@", vec![HelpEntry::new("Go to Symbol").needs_editor()]),
        ];

        let entries = build_grouped_list(&providers, &Messages::new());

        assert_eq!(labels(&entries), vec![":", "@"]);
        assert!(entries.iter().all(|e| !e.is_separator()));
    }

    #[test]
    fn test_mixed_groups_global_first() {
        // Editor provider registered first and sorting first by prefix
        let providers = vec![
            provider(":", vec![HelpEntry::new("Go to Line").needs_editor()]),
            provider(">", vec![HelpEntry::new("Show Commands")]),
        ];

        let entries = build_grouped_list(&providers, &Messages::new());

        assert_eq!(
            labels(&entries),
            vec!["global commands", ">", "editor commands", ":"]
        );
        assert!(entries[0].is_separator());
        assert!(entries[2].is_separator());
    }

    #[test]
    fn test_groups_sorted_within() {
        let providers = vec![
            provider("view ", vec![HelpEntry::new("Open View")]),
            provider("@", vec![HelpEntry::new("Symbol").needs_editor()]),
            provider("#", vec![HelpEntry::new("Workspace Symbol")]),
            provider(":", vec![HelpEntry::new("Line").needs_editor()]),
        ];

        let entries = build_grouped_list(&providers, &Messages::new());

        assert_eq!(
            labels(&entries),
            vec![
                "global commands",
                "#",
                "view ",
                "editor commands",
                ":",
                "@"
            ]
        );
    }

    #[test]
    fn test_equal_prefixes_keep_registry_order() {
        let providers = vec![
            provider("@", vec![HelpEntry::new("first")]),
            provider("#", vec![HelpEntry::new("hash")]),
            provider("@", vec![HelpEntry::new("second")]),
        ];

        let entries = build_grouped_list(&providers, &Messages::new());

        assert_eq!(descriptions(&entries), vec!["hash", "first", "second"]);
    }

    #[test]
    fn test_every_entry_appears_once() {
        let providers = vec![
            provider(
                ">",
                vec![
                    HelpEntry::new("a"),
                    HelpEntry::new("b").needs_editor(),
                    HelpEntry::new("c"),
                ],
            ),
            provider("#", vec![HelpEntry::new("d").needs_editor()]),
            provider("x", vec![]),
        ];

        let entries = build_grouped_list(&providers, &Messages::new());
        let items: Vec<_> = entries.iter().filter_map(|e| e.as_item()).collect();

        assert_eq!(items.len(), 4);
        let mut seen = descriptions(&entries);
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
        // Declared order within a provider is kept inside each group
        assert_eq!(descriptions(&entries), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_entry_prefix_overrides_provider() {
        let providers = vec![provider(
            "@",
            vec![HelpEntry::new("Go to Symbol by Category").with_prefix("@:")],
        )];

        let entries = build_grouped_list(&providers, &Messages::new());
        let item = entries[0].as_item().unwrap();

        assert_eq!(item.prefix.as_deref(), Some("@:"));
        assert_eq!(item.label, "@:");
    }

    #[test]
    fn test_empty_entry_prefix_uses_provider() {
        let providers = vec![provider("#", vec![HelpEntry::new("x").with_prefix("")])];

        let entries = build_grouped_list(&providers, &Messages::new());
        let item = entries[0].as_item().unwrap();

        assert_eq!(item.prefix.as_deref(), Some("#"));
        assert_eq!(item.label, "#");
    }

    #[test]
    fn test_label_placeholder_when_no_prefix() {
        let providers = vec![provider("", vec![HelpEntry::new("Go to File")])];

        let entries = build_grouped_list(&providers, &Messages::new());
        let item = entries[0].as_item().unwrap();

        assert_eq!(item.label, LABEL_PLACEHOLDER);
        assert_eq!(item.prefix.as_deref(), Some(""));
        assert_eq!(item.aria_label.as_deref(), Some("…, picker help"));
    }

    #[test]
    fn test_aria_label_uses_label() {
        let providers = vec![provider(">", vec![HelpEntry::new("Commands")])];

        let entries = build_grouped_list(&providers, &Messages::new());
        let item = entries[0].as_item().unwrap();

        assert_eq!(item.aria_label.as_deref(), Some(">, picker help"));
    }

    #[test]
    fn test_localized_separators() {
        let mut overrides = HashMap::new();
        overrides.insert("globalCommands".to_string(), "GLOBAL".to_string());
        overrides.insert("editorCommands".to_string(), "EDITOR".to_string());
        let messages = Messages::with_overrides(overrides);
        let providers = vec![
            provider(">", vec![HelpEntry::new("g")]),
            provider(":", vec![HelpEntry::new("e").needs_editor()]),
        ];

        let entries = build_grouped_list(&providers, &messages);

        assert_eq!(labels(&entries), vec!["GLOBAL", ">", "EDITOR", ":"]);
    }

    #[test]
    fn test_empty_providers_empty_list() {
        assert!(build_grouped_list(&[], &Messages::new()).is_empty());
        let only_empty = vec![provider(">", vec![]), provider("#", vec![])];
        assert!(build_grouped_list(&only_empty, &Messages::new()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let providers = vec![
            provider("@", vec![HelpEntry::new("s").needs_editor()]),
            provider(">", vec![HelpEntry::new("c")]),
            provider("#", vec![HelpEntry::new("w")]),
        ];

        let first = build_grouped_list(&providers, &Messages::new());
        let second = build_grouped_list(&providers, &Messages::new());

        assert_eq!(first, second);
    }

    #[test]
    fn test_provide_empty_registry_sets_empty_items() {
        let (picker, navigator, session) = open(vec![]);

        assert_eq!(picker.set_items_calls, 1);
        assert!(picker.items.is_empty());
        assert_eq!(session.len(), 1);

        picker.accept();
        assert!(navigator.shown.borrow().is_empty());
    }

    #[test]
    fn test_accept_navigates_once() {
        let (mut picker, navigator, _session) = open(vec![
            provider("@", vec![HelpEntry::new("Go to Symbol")]),
            provider("#", vec![HelpEntry::new("Go to Symbol in Workspace")]),
        ]);

        picker.select(1);
        assert_eq!(picker.selected_items()[0].label, "@");
        picker.accept();

        assert_eq!(*navigator.shown.borrow(), vec!["@"]);
    }

    #[test]
    fn test_accept_without_selection_does_nothing() {
        let (picker, navigator, _session) =
            open(vec![provider("@", vec![HelpEntry::new("Go to Symbol")])]);

        picker.accept();

        assert!(navigator.shown.borrow().is_empty());
    }

    #[test]
    fn test_session_end_releases_listener() {
        let (mut picker, navigator, session) =
            open(vec![provider("@", vec![HelpEntry::new("Go to Symbol")])]);
        assert_eq!(picker.accept.listener_count(), 1);

        drop(session);
        assert_eq!(picker.accept.listener_count(), 0);

        picker.select(0);
        picker.accept();
        assert!(navigator.shown.borrow().is_empty());
    }

    #[test]
    fn test_provide_reads_registry_fresh() {
        let help = HelpQuickAccess::new(Rc::new(Messages::new()));
        let navigator: Rc<dyn QuickAccessNavigator> = Rc::new(RecordingNavigator::default());
        let mut picker = FakePicker::default();

        let source = FakeSource(vec![provider(">", vec![HelpEntry::new("c")])]);
        let context = QuickAccessContext {
            providers: &source,
            navigator: Rc::clone(&navigator),
        };
        let first = help.provide(&mut picker, &context);
        assert_eq!(labels(&picker.items), vec![">"]);
        first.close();

        let source = FakeSource(vec![
            provider(">", vec![HelpEntry::new("c")]),
            provider("#", vec![HelpEntry::new("w")]),
        ]);
        let context = QuickAccessContext {
            providers: &source,
            navigator,
        };
        let _second = help.provide(&mut picker, &context);
        assert_eq!(labels(&picker.items), vec!["#", ">"]);
        assert_eq!(picker.accept.listener_count(), 1);
    }

    #[test]
    fn test_help_provider_describes_itself() {
        let help = HelpQuickAccess::new(Rc::new(Messages::new()));
        assert_eq!(help.prefix(), "?");
        assert_eq!(help.help_entries().len(), 1);
        assert_eq!(help.help_entries()[0].description, "Quick access help");
        assert!(!help.help_entries()[0].needs_editor);
    }
}

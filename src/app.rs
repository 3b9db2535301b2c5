//! Quick access host: application state and event loop.
//!
//! The host owns the registry and the picker. Opening quick access with a
//! value resolves the responsible provider, lets it fill the picker, and keeps
//! the provider's session alive until the next provider takes over or the
//! palette closes. Providers ask for navigation through a queue that the host
//! drains after every accept.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::error::Result;
use crate::events::{Event, EventHandler};
use crate::nls::Messages;
use crate::quickaccess::{
    builtin_providers, HelpQuickAccess, PickItem, Picker, QuickAccessContext,
    QuickAccessNavigator, QuickAccessRegistry, Session, StaticProvider,
};
use crate::ui::{QuickPick, QuickPickAction};

/// Navigation requests waiting for the host.
#[derive(Debug, Default)]
pub struct NavigationQueue {
    pending: RefCell<VecDeque<String>>,
}

impl NavigationQueue {
    /// Take the most recent request, discarding any earlier ones.
    pub fn take_latest(&self) -> Option<String> {
        self.pending.borrow_mut().drain(..).last()
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl QuickAccessNavigator for NavigationQueue {
    fn show(&self, value: &str) {
        trace!(value, "Navigation requested");
        self.pending.borrow_mut().push_back(value.to_string());
    }
}

/// Build the registry for the given settings.
///
/// The help provider is always registered, followed by the built-in providers
/// (unless disabled) and the providers declared in the configuration.
pub fn build_registry(settings: &Settings, messages: Rc<Messages>) -> QuickAccessRegistry {
    let mut registry = QuickAccessRegistry::new();
    registry.register(Rc::new(HelpQuickAccess::new(messages)));
    if settings.builtin_providers {
        for provider in builtin_providers() {
            registry.register(Rc::new(provider));
        }
    }
    for config in &settings.providers {
        registry.register(Rc::new(StaticProvider::from(config.clone())));
    }
    registry
}

/// The main application struct that holds all state.
pub struct App {
    registry: QuickAccessRegistry,
    picker: QuickPick,
    navigator: Rc<NavigationQueue>,
    /// Session of the provider currently filling the picker.
    session: Option<Session>,
    /// Prefix of the provider currently filling the picker.
    active_prefix: Option<String>,
    /// The last accepted row.
    accepted: Option<PickItem>,
    should_quit: bool,
}

impl App {
    /// Create a host over `registry`. Nothing is shown until [`App::show`].
    pub fn new(registry: QuickAccessRegistry) -> Self {
        Self {
            registry,
            picker: QuickPick::new("Quick Access"),
            navigator: Rc::new(NavigationQueue::default()),
            session: None,
            active_prefix: None,
            accepted: None,
            should_quit: false,
        }
    }

    /// Open quick access with `value` as its input.
    pub fn show(&mut self, value: &str) {
        debug!(value, "Showing quick access");
        self.close_session();
        self.picker.set_value(value);
        self.activate();
    }

    /// Make sure the provider responsible for the current value is active.
    fn activate(&mut self) {
        let provider = self.registry.provider_for(self.picker.value());
        let prefix = provider.as_ref().map(|p| p.prefix().to_string());
        if self.session.is_some() && prefix == self.active_prefix {
            return;
        }

        self.close_session();
        self.picker.set_placeholder(None);

        let Some(provider) = provider else {
            debug!(value = self.picker.value(), "No provider for value");
            self.picker.set_filter_prefix("");
            self.picker.set_items(Vec::new());
            return;
        };

        self.picker.set_filter_prefix(provider.prefix());
        let context = QuickAccessContext {
            providers: &self.registry,
            navigator: self.navigator.clone(),
        };
        self.session = Some(provider.provide(&mut self.picker, &context));
        self.active_prefix = prefix;
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.close();
        }
        self.active_prefix = None;
    }

    /// Close the palette.
    pub fn quit(&mut self) {
        info!("Closing quick access");
        self.close_session();
        self.should_quit = true;
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Prefix of the active provider.
    pub fn active_prefix(&self) -> Option<&str> {
        self.active_prefix.as_deref()
    }

    /// The last accepted row.
    pub fn accepted(&self) -> Option<&PickItem> {
        self.accepted.as_ref()
    }

    /// The picker.
    pub fn picker(&self) -> &QuickPick {
        &self.picker
    }

    /// The registry.
    pub fn registry(&self) -> &QuickAccessRegistry {
        &self.registry
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => self.quit(),
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        match self.picker.handle_input(key) {
            Some(QuickPickAction::Cancel) => self.quit(),
            Some(QuickPickAction::Accept) => self.handle_accept(),
            Some(QuickPickAction::ValueChanged) => self.activate(),
            None => {}
        }
    }

    fn handle_accept(&mut self) {
        self.accepted = self.picker.selected_items().into_iter().next();

        match self.navigator.take_latest() {
            Some(value) => self.show(&value),
            None => self.quit(),
        }
    }

    /// Run the event loop until the palette closes.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>, events: &EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.view(frame))?;
            let event = events.next()?;
            self.update(event);
        }
        Ok(())
    }

    /// Render the application UI.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        self.picker.render(frame, chunks[0]);
        self.render_footer(frame, chunks[1]);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let mode = match self.active_prefix.as_deref() {
            Some("") => "default".to_string(),
            Some(prefix) => format!("'{}'", prefix),
            None => "none".to_string(),
        };
        let footer = Paragraph::new(Line::from(vec![
            Span::styled(" Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" open  "),
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" move  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" close  "),
            Span::styled(format!("mode {}", mode), Style::default().fg(Color::DarkGray)),
        ]));
        frame.render_widget(footer, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quickaccess::{HelpEntry, PickerEntry, ProviderSource, QuickAccessProvider};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        let registry = build_registry(&Settings::default(), Rc::new(Messages::new()));
        App::new(registry)
    }

    fn labels(app: &App) -> Vec<String> {
        app.picker()
            .visible_entries()
            .iter()
            .map(|e| e.label().to_string())
            .collect()
    }

    /// Move the selection down until the row labelled `label` is selected.
    fn select(app: &mut App, label: &str) {
        for _ in 0..32 {
            if app.picker().selected_item().map(|i| i.label.as_str()) == Some(label) {
                return;
            }
            app.update(key(KeyCode::Down));
        }
        panic!("row {label} not found");
    }

    #[test]
    fn test_navigation_queue() {
        let queue = NavigationQueue::default();
        assert!(queue.is_empty());
        queue.show("@");
        queue.show("#");
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.take_latest().as_deref(), Some("#"));
        assert!(queue.is_empty());
        assert!(queue.take_latest().is_none());
    }

    /// Provider whose single item asks for two navigations when accepted.
    struct DoubleJump;

    impl QuickAccessProvider for DoubleJump {
        fn prefix(&self) -> &str {
            "!"
        }

        fn help_entries(&self) -> &[HelpEntry] {
            &[]
        }

        fn provide(&self, picker: &mut dyn Picker, context: &QuickAccessContext<'_>) -> Session {
            let mut session = Session::new("!");
            let navigator = Rc::clone(&context.navigator);
            session.add(picker.on_accept(Box::new(move |_: &[PickItem]| {
                navigator.show("@");
                navigator.show("#");
            })));
            picker.set_items(vec![PickerEntry::Item(PickItem::new("jump"))]);
            session
        }
    }

    #[test]
    fn test_accept_applies_only_latest_navigation() {
        let mut registry = build_registry(&Settings::default(), Rc::new(Messages::new()));
        registry.register(Rc::new(DoubleJump));
        let mut app = App::new(registry);
        app.show("!");

        app.update(key(KeyCode::Enter));

        assert_eq!(app.active_prefix(), Some("#"));
        assert!(app.navigator.is_empty());

        // A later accept that navigates nowhere must not replay "@"
        app.show("view ");
        app.update(key(KeyCode::Enter));
        assert!(app.should_quit());
    }

    #[test]
    fn test_build_registry_default() {
        let registry = build_registry(&Settings::default(), Rc::new(Messages::new()));
        // Help plus seven built-ins
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.list_providers()[0].prefix(), "?");
    }

    #[test]
    fn test_build_registry_without_builtins() {
        let settings = Settings {
            builtin_providers: false,
            providers: vec![crate::config::ProviderConfig {
                prefix: "!".to_string(),
                placeholder: None,
                help: vec![HelpEntry::new("Run Task")],
                items: Vec::new(),
            }],
            ..Settings::default()
        };

        let registry = build_registry(&settings, Rc::new(Messages::new()));

        let prefixes: Vec<String> = registry
            .list_providers()
            .iter()
            .map(|p| p.prefix().to_string())
            .collect();
        assert_eq!(prefixes, vec!["?", "!"]);
    }

    #[test]
    fn test_show_help_lists_grouped_providers() {
        let mut app = app();
        app.show("?");

        assert_eq!(app.active_prefix(), Some("?"));
        assert_eq!(
            labels(&app),
            vec![
                "global commands",
                "…",
                "#",
                ">",
                "?",
                "view ",
                "editor commands",
                ":",
                "@",
                "@:",
                "edt ",
            ]
        );
        assert_eq!(app.picker().accept_listener_count(), 1);
    }

    #[test]
    fn test_accept_help_entry_opens_provider() {
        let mut app = app();
        app.show("?");

        select(&mut app, "@");
        app.update(key(KeyCode::Enter));

        assert!(!app.should_quit());
        assert_eq!(app.picker().value(), "@");
        assert_eq!(app.active_prefix(), Some("@"));
        assert_eq!(app.accepted().map(|i| i.label.as_str()), Some("@"));
        // The help listener was released; only the new provider's remains
        assert_eq!(app.picker().accept_listener_count(), 1);
        assert!(labels(&app).contains(&"App::run".to_string()));
    }

    #[test]
    fn test_accept_placeholder_entry_opens_default_provider() {
        let mut app = app();
        app.show("?");

        select(&mut app, "…");
        app.update(key(KeyCode::Enter));

        assert_eq!(app.picker().value(), "");
        assert_eq!(app.active_prefix(), Some(""));
        assert!(labels(&app).contains(&"Cargo.toml".to_string()));
    }

    #[test]
    fn test_accept_without_navigation_quits() {
        let mut app = app();
        app.show("view ");

        app.update(key(KeyCode::Enter));

        assert!(app.should_quit());
        assert_eq!(app.accepted().map(|i| i.label.as_str()), Some("Explorer"));
        assert_eq!(app.picker().accept_listener_count(), 0);
    }

    #[test]
    fn test_accept_with_empty_selection_quits_without_navigation() {
        let mut app = app();
        app.show("?");
        for c in "zzz".chars() {
            app.update(key(KeyCode::Char(c)));
        }

        app.update(key(KeyCode::Enter));

        assert!(app.should_quit());
        assert!(app.accepted().is_none());
        assert_eq!(app.picker().accept_listener_count(), 0);
    }

    #[test]
    fn test_escape_releases_session() {
        let mut app = app();
        app.show("?");
        assert_eq!(app.picker().accept_listener_count(), 1);

        app.update(key(KeyCode::Esc));

        assert!(app.should_quit());
        assert_eq!(app.picker().accept_listener_count(), 0);
    }

    #[test]
    fn test_typing_switches_provider() {
        let mut app = app();
        app.show("");
        assert_eq!(app.active_prefix(), Some(""));

        app.update(key(KeyCode::Char('>')));
        assert_eq!(app.active_prefix(), Some(">"));
        assert_eq!(app.picker().accept_listener_count(), 1);

        app.update(key(KeyCode::Backspace));
        assert_eq!(app.active_prefix(), Some(""));
        assert_eq!(app.picker().accept_listener_count(), 1);
    }

    #[test]
    fn test_typing_within_provider_keeps_session() {
        let mut app = app();
        app.show("?");
        for c in "open".chars() {
            app.update(key(KeyCode::Char(c)));
        }

        assert_eq!(app.active_prefix(), Some("?"));
        assert_eq!(labels(&app), vec!["global commands", "view "]);
        assert_eq!(app.picker().accept_listener_count(), 1);
    }

    #[test]
    fn test_command_item_navigates() {
        let mut app = app();
        app.show(">");

        select(&mut app, "Go to Line/Column...");
        app.update(key(KeyCode::Enter));

        assert_eq!(app.active_prefix(), Some(":"));
        assert_eq!(app.picker().value(), ":");
    }

    #[test]
    fn test_no_provider_shows_nothing() {
        let registry = QuickAccessRegistry::new();
        let mut app = App::new(registry);
        app.show("?");

        assert!(app.active_prefix().is_none());
        assert!(app.picker().visible_entries().is_empty());
        assert_eq!(app.picker().accept_listener_count(), 0);
    }

    #[test]
    fn test_quit_event() {
        let mut app = app();
        app.show("?");
        app.update(Event::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.show("?");
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_help_entries_are_items() {
        let mut app = app();
        app.show("?");
        let items: Vec<&PickerEntry> = app
            .picker()
            .visible_entries()
            .into_iter()
            .filter(|e| !e.is_separator())
            .collect();
        assert!(items.iter().all(|e| e.as_item().unwrap().prefix.is_some()));
    }
}

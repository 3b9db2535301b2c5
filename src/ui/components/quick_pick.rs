//! Quick pick component.
//!
//! A terminal picker that quick access providers fill through the
//! [`Picker`] contract. It supports:
//! - Substring filtering on labels and descriptions
//! - Group separators that hide when their group has no matches
//! - Keyboard navigation that skips separators and wraps
//! - Accept listeners fired on Enter

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::events::{Emitter, Subscription};
use crate::quickaccess::{AcceptListener, PickItem, Picker, PickerEntry};
use crate::ui::components::TextInput;

/// Actions returned from quick pick input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickPickAction {
    /// The user accepted the current selection.
    Accept,
    /// The user dismissed the picker.
    Cancel,
    /// The input value changed.
    ValueChanged,
}

/// Filterable, single-select picker.
pub struct QuickPick {
    /// Title shown in the border.
    title: String,
    /// The input line, including any provider prefix.
    input: TextInput,
    /// Hint shown while the filter text is empty.
    placeholder: Option<String>,
    /// Leading part of the value that selects the provider, excluded from filtering.
    filter_prefix: String,
    /// Everything the active provider handed over.
    entries: Vec<PickerEntry>,
    /// Indices into `entries` that pass the filter.
    visible: Vec<usize>,
    /// Index into `entries` of the highlighted row.
    selected: Option<usize>,
    accept: Emitter<[PickItem]>,
}

impl QuickPick {
    /// Create an empty picker.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            input: TextInput::new(),
            placeholder: None,
            filter_prefix: String::new(),
            entries: Vec::new(),
            visible: Vec::new(),
            selected: None,
            accept: Emitter::new(),
        }
    }

    /// The full input value.
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Replace the input value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input.set_value(value);
        self.refilter();
    }

    /// Set the part of the value that belongs to the active provider.
    pub fn set_filter_prefix(&mut self, prefix: impl Into<String>) {
        self.filter_prefix = prefix.into();
        self.refilter();
    }

    /// The text items are filtered by.
    pub fn filter_text(&self) -> &str {
        let value = self.input.value();
        value
            .strip_prefix(self.filter_prefix.as_str())
            .unwrap_or(value)
            .trim()
    }

    /// Entries currently shown, in display order.
    pub fn visible_entries(&self) -> Vec<&PickerEntry> {
        self.visible.iter().map(|&i| &self.entries[i]).collect()
    }

    /// The highlighted row, if any.
    pub fn selected_item(&self) -> Option<&PickItem> {
        self.selected.and_then(|i| self.entries[i].as_item())
    }

    /// Number of registered accept listeners.
    pub fn accept_listener_count(&self) -> usize {
        self.accept.listener_count()
    }

    fn refilter(&mut self) {
        let query = self.filter_text().to_lowercase();

        self.visible.clear();
        let mut pending_separator = None;
        for (index, entry) in self.entries.iter().enumerate() {
            match entry {
                PickerEntry::Separator { .. } => pending_separator = Some(index),
                PickerEntry::Item(item) => {
                    if item.matches(&query) {
                        if let Some(separator) = pending_separator.take() {
                            self.visible.push(separator);
                        }
                        self.visible.push(index);
                    }
                }
            }
        }

        self.selected = self
            .visible
            .iter()
            .copied()
            .find(|&i| !self.entries[i].is_separator());
    }

    fn move_selection(&mut self, forward: bool) {
        let rows: Vec<usize> = self
            .visible
            .iter()
            .copied()
            .filter(|&i| !self.entries[i].is_separator())
            .collect();
        if rows.is_empty() {
            return;
        }

        let current = self
            .selected
            .and_then(|s| rows.iter().position(|&r| r == s))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % rows.len()
        } else if current == 0 {
            rows.len() - 1
        } else {
            current - 1
        };
        self.selected = Some(rows[next]);
    }

    /// Fire accept listeners with the current selection.
    pub fn accept(&self) {
        let selection = self.selected_items();
        self.accept.fire(&selection);
    }

    /// Handle keyboard input.
    ///
    /// Returns an action if the host should react.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<QuickPickAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(QuickPickAction::Cancel),

            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.accept();
                Some(QuickPickAction::Accept)
            }

            // Navigation: Down, Tab, Ctrl+j, Ctrl+n
            (KeyCode::Down, KeyModifiers::NONE)
            | (KeyCode::Tab, KeyModifiers::NONE)
            | (KeyCode::Char('j'), KeyModifiers::CONTROL)
            | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                self.move_selection(true);
                None
            }

            // Navigation: Up, Shift+Tab, Ctrl+k, Ctrl+p
            (KeyCode::Up, KeyModifiers::NONE)
            | (KeyCode::BackTab, _)
            | (KeyCode::Char('k'), KeyModifiers::CONTROL)
            | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                self.move_selection(false);
                None
            }

            _ => {
                if self.input.handle_input(key) {
                    self.refilter();
                    Some(QuickPickAction::ValueChanged)
                } else {
                    None
                }
            }
        }
    }

    /// Render the quick pick.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 70.min(area.width.saturating_sub(4));
        let height = 18.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + area.height / 8;
        let pick_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, pick_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(pick_area);
        frame.render_widget(block, pick_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Input
                Constraint::Length(1), // Rule
                Constraint::Min(1),    // Entries
            ])
            .split(inner);

        self.render_input(frame, chunks[0]);

        let rule = Paragraph::new(Line::from(Span::styled(
            "─".repeat(chunks[1].width as usize),
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(rule, chunks[1]);

        self.render_entries(frame, chunks[2]);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let value = self.input.value();
        let mut spans = vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(value.to_string()),
        ];
        if self.filter_text().is_empty() {
            if let Some(placeholder) = &self.placeholder {
                let gap = if value.is_empty() { "" } else { " " };
                spans.push(Span::styled(
                    format!("{gap}{placeholder}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        let column = u16::try_from(self.input.cursor_column()).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(2).saturating_add(column);
        if cursor_x < area.x.saturating_add(area.width) {
            frame.set_cursor_position(Position::new(cursor_x, area.y));
        }
    }

    fn render_entries(&self, frame: &mut Frame, area: Rect) {
        if self.visible.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No matching results",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(empty, area);
            return;
        }

        let visible_count = area.height as usize;
        let selected_pos = self
            .selected
            .and_then(|s| self.visible.iter().position(|&i| i == s))
            .unwrap_or(0);
        let scroll_offset = (selected_pos + 1).saturating_sub(visible_count);

        let rows: Vec<ListItem> = self
            .visible
            .iter()
            .skip(scroll_offset)
            .take(visible_count)
            .map(|&index| {
                let entry = &self.entries[index];
                self.render_entry(entry, self.selected == Some(index), area.width as usize)
            })
            .collect();

        frame.render_widget(List::new(rows), area);
    }

    fn render_entry<'a>(
        &self,
        entry: &'a PickerEntry,
        is_selected: bool,
        width: usize,
    ) -> ListItem<'a> {
        let item = match entry {
            PickerEntry::Separator { label } => {
                let text = format!("── {} ", label);
                let fill = width.saturating_sub(text.chars().count());
                return ListItem::new(Line::from(Span::styled(
                    format!("{}{}", text, "─".repeat(fill)),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            PickerEntry::Item(item) => item,
        };

        let style = if is_selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = Vec::new();
        if is_selected {
            spans.push(Span::styled("> ", Style::default().fg(Color::Cyan)));
        } else {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            item.label.as_str(),
            style.add_modifier(Modifier::BOLD),
        ));
        if let Some(description) = &item.description {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                description.as_str(),
                Style::default().fg(Color::Gray),
            ));
        }

        ListItem::new(Line::from(spans)).style(style)
    }
}

impl Picker for QuickPick {
    fn set_items(&mut self, items: Vec<PickerEntry>) {
        self.entries = items;
        self.refilter();
    }

    fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    fn on_accept(&mut self, listener: AcceptListener) -> Subscription {
        self.accept.subscribe(listener)
    }

    fn selected_items(&self) -> Vec<PickItem> {
        self.selected_item().cloned().into_iter().collect()
    }
}

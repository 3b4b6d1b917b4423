use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Screen},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever currently has the keyboard.
pub fn for_state(state: &AppState) -> Vec<KeyHint> {
    match state.screen {
        Screen::List if state.list.searching => vec![
            KeyHint::new("type", "filter"),
            KeyHint::new("Enter", "done"),
            KeyHint::new("Esc", "done"),
        ],
        Screen::List => {
            let session = if state.session.is_authenticated() {
                KeyHint::new("l", "logout")
            } else {
                KeyHint::new("l", "login")
            };
            vec![
                KeyHint::new("↑↓", "select"),
                KeyHint::new("←→", "page"),
                KeyHint::new("/", "search"),
                KeyHint::new("a", "add"),
                KeyHint::new("e", "edit"),
                KeyHint::new("t", "toggle"),
                KeyHint::new("d", "delete"),
                KeyHint::new("r", "refresh"),
                session,
                KeyHint::new("q", "quit"),
            ]
        }
        Screen::Create | Screen::Edit => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "choose"),
            KeyHint::new("Enter", "submit"),
            KeyHint::new("Esc", "back"),
        ],
        Screen::Login => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "login"),
            KeyHint::new("Esc", "back"),
        ],
    }
}

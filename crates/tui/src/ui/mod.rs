pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Screen};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_nav_bar(frame, layout[0], state, &theme);

    match state.screen {
        Screen::List => screens::transactions::render(frame, layout[1], state),
        Screen::Create | Screen::Edit => screens::form::render(frame, layout[1], state),
        Screen::Login => screens::login::render(frame, layout[1], state),
    }

    render_bottom_bar(frame, layout[2], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_nav_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let session = match state.session.username() {
        Some(username) => format!("{username} · Logout"),
        None => "Login".to_string(),
    };
    let new_entry_style = if state.screen == Screen::Create {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let left = Line::from(vec![
        Span::styled(
            "Financial Tracker",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(theme.border)),
        Span::styled("Transactions", Style::default().fg(theme.text)),
        Span::raw("  "),
        Span::styled("New Entry", new_entry_style),
    ]);
    let right = Line::from(vec![
        Span::styled(state.base_url.as_str(), Style::default().fg(theme.dim)),
        Span::raw("  "),
        Span::styled(session, Style::default().fg(theme.accent)),
    ]);

    frame.render_widget(Paragraph::new(left), area);
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(&components::hints::for_state(state), theme);
    parts.push(components::hints::hint_separator(theme));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" exit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

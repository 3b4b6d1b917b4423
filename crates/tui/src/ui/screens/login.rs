use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::{components::card::Card, theme::Theme},
};

const BOX_WIDTH: u16 = 40;
const BOX_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card_area = centered_box(BOX_WIDTH, BOX_HEIGHT, area);
    frame.render_widget(Clear, card_area);

    let card = Card::new("Login", &theme).focused(true);
    let inner = card.inner(card_area);
    frame.render_widget(card.block(), card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Username
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;
    render_input(
        frame,
        rows[0],
        "Username",
        &login.username,
        login.focus == LoginField::Username,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        "Password",
        &mask_password(&login.password),
        login.focus == LoginField::Password,
        &theme,
    );

    if let Some(message) = &login.message {
        let message_area = Rect {
            x: card_area.x,
            y: card_area.bottom().min(area.bottom().saturating_sub(1)),
            width: card_area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            message_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    };
    let cursor = if focused { "│" } else { "" };

    let line = Line::from(vec![
        Span::styled(format!("{label:<10}"), style),
        Span::styled(format!("{value}{cursor}"), Style::default().fg(theme.text)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_masked_per_character() {
        assert_eq!(mask_password(""), "");
        assert_eq!(mask_password("pässword"), "••••••••");
    }
}

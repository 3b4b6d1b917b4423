use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, FormField, FormState, Screen},
    ui::{components::card::Card, theme::Theme},
};

const LABEL_WIDTH: usize = 16;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.form;
    let editing = state.screen == Screen::Edit;
    let title = if editing {
        "Edit Transaction"
    } else {
        "Create a New Financial Entry"
    };

    let card_area = centered(area, 64, FormField::ALL.len() as u16 + 6);
    let card = Card::new(title, &theme).focused(true);

    let mut lines: Vec<Line<'_>> = FormField::ALL
        .iter()
        .map(|field| field_line(form, *field, &theme))
        .collect();
    lines.push(Line::from(""));
    lines.push(submit_line(form, editing, &theme));
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(theme.error),
        )));
    }

    card.render_with(frame, card_area, Paragraph::new(lines));
}

fn field_line<'a>(form: &'a FormState, field: FormField, theme: &Theme) -> Line<'a> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let marker = if focused { "› " } else { "  " };

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
    ];

    if field.is_choice() {
        let value = match form.choice_label(field) {
            Some(label) => Span::styled(label, Style::default().fg(theme.text)),
            None => Span::styled(field.placeholder(), Style::default().fg(theme.dim)),
        };
        if focused {
            spans.push(Span::styled("‹ ", Style::default().fg(theme.accent)));
            spans.push(value);
            spans.push(Span::styled(" ›", Style::default().fg(theme.accent)));
        } else {
            spans.push(value);
        }
        return Line::from(spans);
    }

    let value = form.text_value(field);
    if value.is_empty() && !focused {
        spans.push(Span::styled(field.placeholder(), Style::default().fg(theme.dim)));
    } else {
        spans.push(Span::styled(value, Style::default().fg(theme.text)));
    }
    if focused {
        spans.push(Span::styled("│", Style::default().fg(theme.accent)));
    }
    Line::from(spans)
}

fn submit_line(form: &FormState, editing: bool, theme: &Theme) -> Line<'static> {
    let label = match (editing, form.submitting) {
        (false, false) => "Submit",
        (false, true) => "Saving...",
        (true, false) => "Update Transaction",
        (true, true) => "Updating...",
    };
    let style = if form.submitting {
        Style::default().fg(theme.dim)
    } else {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    };

    Line::from(Span::styled(format!("[ {label} ]"), style)).alignment(Alignment::Center)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{ToastLevel, ToastState},
    ui::theme::Theme,
};

const MAX_WIDTH: u16 = 48;

/// Draws the toast in the bottom-right corner, above the hints bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>, theme: &Theme) {
    let Some(toast) = toast else {
        return;
    };

    let rect = toast_area(area, toast.message.chars().count());
    let style = match toast.level {
        ToastLevel::Info => Style::default().fg(theme.text),
        ToastLevel::Success => Style::default().fg(theme.positive),
        ToastLevel::Error => Style::default().fg(theme.error),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style);
    let content = Paragraph::new(Line::from(toast.message.as_str()))
        .style(style)
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(Clear, rect);
    frame.render_widget(content, rect);
}

fn toast_area(area: Rect, message_len: usize) -> Rect {
    let width = (message_len as u16)
        .saturating_add(4)
        .min(MAX_WIDTH)
        .min(area.width);
    let inner_width = width.saturating_sub(4).max(1);
    let lines = (message_len as u16).div_ceil(inner_width).max(1);
    let height = (lines + 2).min(area.height);

    Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}

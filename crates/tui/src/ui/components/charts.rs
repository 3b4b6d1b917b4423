use engine::Summary;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{components::card::Card, theme::Theme};

const LABEL_WIDTH: usize = 16;

/// Spending by category as horizontal share bars, one row per category in
/// first-appearance order.
pub fn render_category_shares(frame: &mut Frame<'_>, area: Rect, summary: &Summary, theme: &Theme) {
    let card = Card::new("Spending by Category", theme);
    let inner = card.inner(area);

    if summary.categories.is_empty() {
        let empty = Paragraph::new(Span::styled("No data", Style::default().fg(theme.dim)));
        card.render_with(frame, area, empty);
        return;
    }

    // label, space, bar, space, "100%"
    let bar_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 6).max(4);
    let lines: Vec<Line<'_>> = summary
        .categories
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            let share = summary.share(slice);
            let color = Theme::slice_color(index);
            Line::from(vec![
                Span::styled(
                    format!("{:<LABEL_WIDTH$}", truncate(slice.label(), LABEL_WIDTH)),
                    Style::default().fg(theme.text),
                ),
                Span::raw(" "),
                Span::styled(ascii_bar(share, bar_width), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>3}%", (share * 100.0).round() as u16),
                    Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    card.render_with(frame, area, Paragraph::new(lines));
}

/// Returns something like `████████░░░░` for `ratio` in `0.0..=1.0`.
#[must_use]
pub fn ascii_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let mut out: String = label.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(ascii_bar(0.5, 4), "██░░");
        assert_eq!(ascii_bar(1.0, 3), "███");
        assert_eq!(ascii_bar(0.0, 3), "░░░");
        assert_eq!(ascii_bar(f64::NAN, 2), "░░");
        assert_eq!(ascii_bar(7.0, 2), "██");
    }

    #[test]
    fn long_labels_are_cut() {
        assert_eq!(truncate("Entertainment", 6), "Enter…");
        assert_eq!(truncate("Rent", 6), "Rent");
    }
}

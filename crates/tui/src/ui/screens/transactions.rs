use api_types::{EntryStatus, FinancialEntry};
use engine::{Money, display_date};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, ListState},
    ui::{
        components::{card::Card, charts},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let list = &state.list;
    let summary = list.summary();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], list, &summary.total_display(), &theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[1]);

    charts::render_category_shares(frame, body[0], &summary, &theme);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Page indicator
        ])
        .split(body[1]);

    render_search(frame, right[0], list, &theme);
    render_table(frame, right[1], list, &theme);
    render_pager(frame, right[2], list, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, list: &ListState, total: &str, theme: &Theme) {
    let mut line = vec![
        Span::styled(
            "Transactions List",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Total Spending", Style::default().fg(theme.dim)),
        Span::styled(
            format!(": ${total}"),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
    ];

    if list.loading {
        line.push(Span::styled("   Loading...", Style::default().fg(theme.dim)));
    } else if let Some(at) = list.last_refresh {
        line.push(Span::styled(
            format!("   Refreshed {}", at.format("%H:%M:%S")),
            Style::default().fg(theme.dim),
        ));
    }
    if let Some(err) = &list.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    Card::new("", theme).render_with(frame, area, Paragraph::new(Line::from(line)));
}

fn render_search(frame: &mut Frame<'_>, area: Rect, list: &ListState, theme: &Theme) {
    let content = if list.search.is_empty() && !list.searching {
        Span::styled("Search transactions...", Style::default().fg(theme.dim))
    } else {
        let cursor = if list.searching { "│" } else { "" };
        Span::styled(
            format!("{}{cursor}", list.search),
            Style::default().fg(theme.text),
        )
    };

    Card::new("Search", theme)
        .focused(list.searching)
        .render_with(frame, area, Paragraph::new(Line::from(content)));
}

fn render_table(frame: &mut Frame<'_>, area: Rect, list: &ListState, theme: &Theme) {
    let card = Card::new("Transactions", theme);
    let filtered_len = list.filtered().len();

    if let Some(message) = empty_message(list, filtered_len) {
        let hint = Paragraph::new(Span::styled(message, Style::default().fg(theme.dim)))
            .alignment(Alignment::Center);
        card.render_with(frame, area, hint);
        return;
    }

    let header = Row::new(["Amount", "Date", "Category", "Status", "Description"])
        .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));
    let rows = list
        .visible()
        .into_iter()
        .map(|entry| entry_row(entry, theme))
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(11),
        Constraint::Length(15),
        Constraint::Length(10),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(card.block())
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(list.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn empty_message(list: &ListState, filtered_len: usize) -> Option<String> {
    if list.entries.is_empty() {
        return Some(if list.loading {
            "Loading transactions...".to_string()
        } else {
            "No transactions yet. Press a to add one.".to_string()
        });
    }
    if filtered_len == 0 {
        return Some("No transactions match your search.".to_string());
    }
    if list.pager.is_out_of_range(filtered_len) {
        return Some(format!(
            "Page {} is empty. Press ← to go back.",
            list.pager.current_page()
        ));
    }
    None
}

fn entry_row<'a>(entry: &'a FinancialEntry, theme: &Theme) -> Row<'a> {
    let amount = Money::from(entry.amount_value()).to_string();
    let date = entry.date.as_deref().map(display_date).unwrap_or_default();
    let category = entry
        .category
        .as_ref()
        .map(|choice| choice.label())
        .unwrap_or("");
    let status = entry
        .status
        .as_ref()
        .map(|choice| choice.label())
        .unwrap_or("");
    let status_style = match entry.status_kind() {
        Some(EntryStatus::Completed) => Style::default().fg(theme.positive),
        Some(EntryStatus::Pending) => Style::default().fg(theme.warning),
        Some(EntryStatus::Canceled) => Style::default().fg(theme.error),
        None => Style::default().fg(theme.dim),
    };

    Row::new(vec![
        Cell::from(amount),
        Cell::from(date),
        Cell::from(category),
        Cell::from(Span::styled(status, status_style)),
        Cell::from(entry.headline().unwrap_or("")),
    ])
    .style(Style::default().fg(theme.text))
}

fn render_pager(frame: &mut Frame<'_>, area: Rect, list: &ListState, theme: &Theme) {
    let filtered_len = list.filtered().len();
    let line = Line::from(vec![
        Span::styled("Page ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{} of {}", list.pager.current_page(), list.page_count()),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("   {filtered_len} of {} shown", list.entries.len()),
            Style::default().fg(theme.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Row, Table, TableState},
};

use api_types::{DATE_FORMAT, entry::Entry};

use crate::{
    app::ListPage,
    ui::{
        components::{card::Card, money::styled_entry_amount},
        screens::render_list_status,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &ListPage<Entry>, theme: &Theme) {
    let [table_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let rows = page.list.items().iter().map(|entry| entry_row(entry, theme));
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Percentage(40),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Data", "Lançamento", "Tipo", "Valor", "Situação"])
            .style(Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD)),
    )
    .style(Style::default().fg(theme.text))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("› ");

    let card = Card::new("Lançamentos", theme).focused(true);
    let inner = card.inner(table_area);
    frame.render_widget(card.block(), table_area);

    let mut state = TableState::default();
    if !page.list.items().is_empty() {
        state.select(Some(page.list.selected()));
    }
    frame.render_stateful_widget(table, inner, &mut state);

    render_list_status(frame, status_area, page.list.error(), page.confirm_delete, theme);
}

fn entry_row(entry: &Entry, theme: &Theme) -> Row<'static> {
    let date = entry
        .date
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default();

    let mut name = vec![Span::raw(entry.name.clone().unwrap_or_default())];
    if let Some(category) = entry.category.as_ref().and_then(|c| c.name.clone()) {
        name.push(Span::styled(format!("  ({category})"), Style::default().fg(theme.dim)));
    }

    let paid_style = if entry.paid.unwrap_or(false) {
        Style::default().fg(theme.positive)
    } else {
        Style::default().fg(theme.text_muted)
    };

    Row::new(vec![
        Cell::from(date),
        Cell::from(Line::from(name)),
        Cell::from(entry.kind.map(|kind| kind.label()).unwrap_or_default()),
        Cell::from(styled_entry_amount(entry.amount, entry.kind, theme)),
        Cell::from(Span::styled(entry.paid_text(), paid_style)),
    ])
}

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Row, Table, TableState},
};

use api_types::category::Category;

use crate::{
    app::ListPage,
    ui::{components::card::Card, screens::render_list_status, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &ListPage<Category>, theme: &Theme) {
    let [table_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let rows = page.list.items().iter().map(|category| {
        Row::new(vec![
            category.name.clone().unwrap_or_default(),
            category.description.clone().unwrap_or_default(),
        ])
    });
    let table = Table::new(rows, [Constraint::Percentage(35), Constraint::Percentage(65)])
        .header(
            Row::new(vec!["Categoria", "Descrição"])
                .style(Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().fg(theme.text))
        .row_highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");

    let card = Card::new("Categorias", theme).focused(true);
    let inner = card.inner(table_area);
    frame.render_widget(card.block(), table_area);

    let mut state = TableState::default();
    if !page.list.items().is_empty() {
        state.select(Some(page.list.selected()));
    }
    frame.render_stateful_widget(table, inner, &mut state);

    render_list_status(frame, status_area, page.list.error(), page.confirm_delete, theme);
}

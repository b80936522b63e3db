use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use frontend::reports::Report;

use crate::{
    app::ReportsPage,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::ascii_bar,
            money::{format_brl, styled_amount, styled_amount_bold},
        },
        theme::Theme,
    },
};

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &ReportsPage, theme: &Theme) {
    let report = &page.report;
    let [filter_area, totals_area, categories_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let mut filter = vec![
        Span::styled(" Mês: ", Style::default().fg(theme.text_muted)),
        Span::styled(report.filter.label(), Style::default().fg(theme.accent)),
        Span::styled(
            format!("   {} lançamentos", report.entries),
            Style::default().fg(theme.dim),
        ),
    ];
    if let Some(error) = &page.error {
        filter.push(Span::styled(format!("   {error}"), Style::default().fg(theme.error)));
    }
    frame.render_widget(Paragraph::new(Line::from(filter)), filter_area);

    let [revenue, expense, balance] =
        Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(totals_area);
    StatCard::new(
        "Receita",
        Span::styled(format_brl(report.revenue_total), Style::default().fg(theme.positive)),
        theme,
    )
    .render(frame, revenue);
    StatCard::new(
        "Despesa",
        Span::styled(format_brl(report.expense_total), Style::default().fg(theme.error)),
        theme,
    )
    .render(frame, expense);
    StatCard::new("Saldo", styled_amount_bold(report.balance, theme), theme).render(frame, balance);

    Card::new("Por categoria", theme).render_with(
        frame,
        categories_area,
        Paragraph::new(category_lines(report, theme)),
    );
}

fn category_lines(report: &Report, theme: &Theme) -> Vec<Line<'static>> {
    if report.by_category.is_empty() {
        return vec![Line::styled(
            "Nenhum lançamento neste mês.",
            Style::default().fg(theme.dim),
        )];
    }

    let max = report
        .by_category
        .iter()
        .map(|totals| totals.revenue.cents().max(totals.expense.cents()))
        .max()
        .unwrap_or(0)
        .unsigned_abs();

    let mut lines = Vec::new();
    for totals in &report.by_category {
        lines.push(Line::styled(
            totals.name.clone(),
            Style::default().fg(theme.text),
        ));
        lines.push(Line::from(vec![
            Span::styled("  + ", Style::default().fg(theme.dim)),
            Span::styled(
                ascii_bar(totals.revenue.cents().unsigned_abs(), max, BAR_WIDTH),
                Style::default().fg(theme.positive),
            ),
            Span::raw(" "),
            styled_amount(totals.revenue, theme),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  - ", Style::default().fg(theme.dim)),
            Span::styled(
                ascii_bar(totals.expense.cents().unsigned_abs(), max, BAR_WIDTH),
                Style::default().fg(theme.error),
            ),
            Span::raw(" "),
            Span::styled(format_brl(totals.expense), Style::default().fg(theme.error)),
        ]));
    }
    lines
}

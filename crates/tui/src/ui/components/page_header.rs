use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// Page title on the left, the page action (`n + Novo`, `Esc << Voltar`) on the right.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    button: Option<(&'static str, &'static str)>,
    theme: &Theme,
) {
    let [title_area, button_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(area);

    let title = Line::from(Span::styled(
        format!(" {title}"),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), title_area);

    if let Some((key, label)) = button {
        let button = Line::from(vec![
            Span::styled(key, Style::default().fg(theme.accent)),
            Span::raw(" "),
            Span::styled(format!("[ {label} ]"), Style::default().fg(theme.accent)),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(button), button_area);
    }
}

pub mod categories;
pub mod entries;
pub mod reports;
pub mod resource_form;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use frontend::list::DELETE_CONFIRMATION;

use crate::ui::theme::Theme;

/// Status line under a list: the load error or the delete prompt.
fn render_list_status(
    frame: &mut Frame<'_>,
    area: Rect,
    error: Option<&str>,
    confirm_delete: bool,
    theme: &Theme,
) {
    let line = if confirm_delete {
        Line::from(vec![
            Span::styled(DELETE_CONFIRMATION, Style::default().fg(theme.error)),
            Span::styled(" (y/n)", Style::default().fg(theme.dim)),
        ])
    } else if let Some(error) = error {
        Line::styled(error.to_string(), Style::default().fg(theme.error))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

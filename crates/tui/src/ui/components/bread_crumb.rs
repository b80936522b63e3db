use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// One breadcrumb segment; the last item is the current page and has no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadCrumbItem {
    pub text: String,
    pub link: Option<String>,
}

impl BreadCrumbItem {
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
        }
    }

    pub fn current(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }
}

/// Renders `Home > ... > current`.
pub fn render(frame: &mut Frame<'_>, area: Rect, items: &[BreadCrumbItem], theme: &Theme) {
    let mut spans = vec![Span::styled(" Home", Style::default().fg(theme.text_muted))];
    for item in items {
        spans.push(Span::styled(" > ", Style::default().fg(theme.dim)));
        let color = if item.link.is_some() {
            theme.text_muted
        } else {
            theme.text
        };
        spans.push(Span::styled(item.text.clone(), Style::default().fg(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

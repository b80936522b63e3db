use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use frontend::{Collection, Page};

use crate::ui::theme::Theme;

/// Top-level sections reachable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Reports,
    Categories,
    Entries,
}

impl Section {
    const ALL: [Self; 3] = [Self::Reports, Self::Categories, Self::Entries];

    pub fn of(page: Page) -> Self {
        match page {
            Page::Reports => Self::Reports,
            Page::List(Collection::Categories) | Page::Form(Collection::Categories) => {
                Self::Categories
            }
            Page::List(Collection::Entries) | Page::Form(Collection::Entries) => Self::Entries,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Reports => "Relatórios",
            Self::Categories => Collection::Categories.label(),
            Self::Entries => Collection::Entries.label(),
        }
    }

    fn shortcut(self) -> &'static str {
        match self {
            Self::Reports => "r",
            Self::Categories => "c",
            Self::Entries => "l",
        }
    }
}

/// Renders a horizontal tab bar for section navigation.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: Section, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, section) in Section::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = section.label();
        if *section == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn tab_shortcuts(theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, section) in Section::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("/"));
        }
        spans.push(Span::styled(section.shortcut(), Style::default().fg(theme.accent)));
    }
    spans.push(Span::raw(" nav"));
    spans
}

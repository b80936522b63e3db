pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use frontend::{Collection, Mode, Page};

use crate::app::{AppState, PageState};
use components::{
    bread_crumb::{self, BreadCrumbItem},
    hints::{self, KeyHint},
    page_header,
    tabs::{self, Section},
    toast,
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let [info, tab_bar, crumbs, header, content, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_info_bar(frame, info, state, &theme);
    tabs::render_tabs(frame, tab_bar, Section::of(state.route.page()), &theme);
    bread_crumb::render(frame, crumbs, &breadcrumb_items(state), &theme);
    render_header(frame, header, state, &theme);

    match &state.page {
        PageState::Loading => {
            frame.render_widget(
                Paragraph::new(Span::styled(" Carregando...", Style::default().fg(theme.dim))),
                content,
            );
        }
        PageState::Reports(page) => screens::reports::render(frame, content, page, &theme),
        PageState::Categories(page) => screens::categories::render(frame, content, page, &theme),
        PageState::Entries(page) => screens::entries::render(frame, content, page, &theme),
        PageState::Form(page) => screens::resource_form::render(frame, content, page, &theme),
    }

    render_bottom_bar(frame, bottom, state, &theme);
    toast::render(frame, area, state.toast.as_ref(), &theme);
    toast::render_alert(frame, area, state.alert.as_deref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Rota", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": /{}", state.location)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn page_title(state: &AppState) -> String {
    match &state.page {
        PageState::Loading => String::new(),
        PageState::Reports(_) => "Relatórios".to_string(),
        PageState::Categories(_) => Collection::Categories.label().to_string(),
        PageState::Entries(_) => Collection::Entries.label().to_string(),
        PageState::Form(page) => page.form.page_title().to_string(),
    }
}

fn breadcrumb_items(state: &AppState) -> Vec<BreadCrumbItem> {
    match (&state.page, state.route.page()) {
        (PageState::Form(page), Page::Form(collection)) => {
            let current = match page.form.mode() {
                Mode::New => "Novo",
                Mode::Edit => "Edição",
            };
            vec![
                BreadCrumbItem::link(collection.label(), collection.path()),
                BreadCrumbItem::current(current),
            ]
        }
        _ => vec![BreadCrumbItem::current(page_title(state))],
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let button = match &state.page {
        PageState::Categories(_) | PageState::Entries(_) => Some(("n", "+ Novo")),
        PageState::Form(_) => Some(("Esc", "<< Voltar")),
        PageState::Reports(_) | PageState::Loading => None,
    };
    page_header::render(frame, area, &page_title(state), button, theme);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = Vec::new();

    let context = match &state.page {
        PageState::Form(_) => hints::common::form(),
        PageState::Categories(page) if page.confirm_delete => hints::common::confirm_delete(),
        PageState::Entries(page) if page.confirm_delete => hints::common::confirm_delete(),
        PageState::Categories(_) | PageState::Entries(_) => hints::common::list(),
        PageState::Reports(_) => hints::common::report(),
        PageState::Loading => Vec::new(),
    };

    let on_form = matches!(state.page, PageState::Form(_));
    if !on_form {
        parts.push(Span::raw(" "));
        parts.extend(tabs::tab_shortcuts(theme));
    }
    if !context.is_empty() {
        if !parts.is_empty() {
            parts.push(hints::hint_separator(theme));
        } else {
            parts.push(Span::raw(" "));
        }
        parts.extend(hints::hints_to_spans(&context, theme));
    }

    let quit = if on_form {
        [KeyHint::new("Ctrl+C", "quit")]
    } else {
        [KeyHint::new("q", "quit")]
    };
    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(&quit, theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

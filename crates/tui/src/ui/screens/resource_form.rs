use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use frontend::{
    FormStatus,
    form::{FormControl, InputKind},
};

use crate::{
    app::FormPage,
    ui::{
        components::{card::Card, form_field_error, server_error_msg},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &FormPage, theme: &Theme) {
    let focused = page.focused_field();
    let mut lines = Vec::new();

    for control in page.form.form().controls() {
        if control.input() == InputKind::Hidden {
            continue;
        }
        let is_focused = focused == Some(control.name());
        lines.push(label_line(control, is_focused, theme));
        lines.push(value_line(page, control, is_focused, theme));
        lines.push(form_field_error::line(control, theme));
    }

    lines.extend(server_error_msg::lines(page.form.state().server_errors(), theme));
    lines.push(Line::from(""));
    lines.push(submit_line(page, theme));

    let title = page.form.collection().label();
    Card::new(title, theme)
        .focused(true)
        .render_with(frame, area, Paragraph::new(lines).wrap(Wrap { trim: false }));
}

fn label_line(control: &FormControl, focused: bool, theme: &Theme) -> Line<'static> {
    let style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    Line::styled(control.label(), style)
}

fn value_line(
    page: &FormPage,
    control: &FormControl,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let border = if control.touched() && control.is_invalid() {
        theme.error
    } else if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let value_style = Style::default().fg(theme.text);

    let content = match control.input() {
        InputKind::Toggle => {
            let on = control.value().as_bool().unwrap_or(false);
            let (mark, text) = if on { ("[x]", "Pago") } else { ("[ ]", "Pendente") };
            vec![Span::styled(format!("{mark} {text}"), value_style)]
        }
        InputKind::Select => {
            let selected = page.form.options_for(control.name()).and_then(|options| {
                options
                    .into_iter()
                    .find(|option| &option.value == control.value())
                    .map(|option| option.text)
            });
            let text = match selected {
                Some(text) => Span::styled(text, value_style),
                None => Span::styled("Selecione", Style::default().fg(theme.dim)),
            };
            vec![
                Span::styled("◀ ", Style::default().fg(border)),
                text,
                Span::styled(" ▶", Style::default().fg(border)),
            ]
        }
        InputKind::Text | InputKind::Hidden => {
            let mut spans = vec![Span::styled(control.display_value(), value_style)];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
            }
            spans
        }
    };

    let mut spans = vec![Span::styled("│ ", Style::default().fg(border))];
    spans.extend(content);
    Line::from(spans)
}

fn submit_line(page: &FormPage, theme: &Theme) -> Line<'static> {
    let state = page.form.state();
    let (label, style) = if state.is_submitting() {
        ("[ Salvando... ]", Style::default().fg(theme.dim))
    } else if page.form.can_submit() {
        (
            "[ Salvar ]",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )
    } else {
        ("[ Salvar ]", Style::default().fg(theme.dim))
    };

    let mut spans = vec![Span::styled(label, style)];
    if state.status() == FormStatus::Succeeded {
        spans.push(Span::styled("  salvo", Style::default().fg(theme.positive)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use frontend::{ActivatedRoute, Collection, RestClient, entries::EntryForm};
    use serde_json::Value;

    use super::*;
    use crate::app::ActiveForm;

    async fn entry_page() -> FormPage {
        let client = RestClient::new("http://127.0.0.1:9/api/").unwrap();
        let route = ActivatedRoute::parse("entries/new").unwrap();
        let (form, _) = EntryForm::on_init(
            client.resource(Collection::Entries.path()),
            client.resource(Collection::Categories.path()),
            route,
        )
        .await;
        FormPage::new(ActiveForm::Entry(form))
    }

    fn type_line(page: &FormPage) -> String {
        let control = page.form.form().get("type").unwrap();
        value_line(page, control, false, &Theme::default())
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[tokio::test]
    async fn select_shows_the_chosen_option_between_arrows() {
        let mut page = entry_page().await;
        assert_eq!(type_line(&page), "│ ◀ Despesa ▶");

        let ActiveForm::Entry(entry) = &mut page.form else {
            panic!("expected an entry form");
        };
        entry.controller_mut().set_value("type", Value::Null);
        assert_eq!(type_line(&page), "│ ◀ Selecione ▶");
    }
}

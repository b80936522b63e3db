use ratatui::{
    style::{Modifier, Style},
    text::Line,
};

use crate::ui::theme::Theme;

/// Bulleted list of the messages returned by the last failed submission.
pub fn lines(errors: Option<&[String]>, theme: &Theme) -> Vec<Line<'static>> {
    let Some(errors) = errors.filter(|errors| !errors.is_empty()) else {
        return Vec::new();
    };
    let style = Style::default().fg(theme.error);
    let mut lines = vec![Line::styled(
        "Erro no servidor:",
        style.add_modifier(Modifier::BOLD),
    )];
    lines.extend(
        errors
            .iter()
            .map(|error| Line::styled(format!("  • {error}"), style)),
    );
    lines
}

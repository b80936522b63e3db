use frontend::{field_error::error_message, form::FormControl};
use ratatui::{style::Style, text::Line};

use crate::ui::theme::Theme;

/// The line shown under a field: the validation message, or blank.
pub fn line(control: &FormControl, theme: &Theme) -> Line<'static> {
    match error_message(control) {
        Some(message) => Line::styled(format!("  {message}"), Style::default().fg(theme.error)),
        None => Line::from(""),
    }
}

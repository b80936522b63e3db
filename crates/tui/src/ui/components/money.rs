use api_types::{Amount, entry::EntryType};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Formats an amount in reais, e.g. `R$ 1500,00` or `-R$ 12,50`.
#[must_use]
pub fn format_brl(amount: Amount) -> String {
    let text = amount.to_string();
    match text.strip_prefix('-') {
        Some(digits) => format!("-R$ {digits}"),
        None => format!("R$ {text}"),
    }
}

/// Creates a styled span for a balance with semantic coloring.
///
/// - Positive amounts: green
/// - Negative amounts: red
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: Amount, theme: &Theme) -> Span<'static> {
    let color = if amount.cents() > 0 {
        theme.positive
    } else if amount.cents() < 0 {
        theme.error
    } else {
        theme.text
    };

    Span::styled(format_brl(amount), Style::default().fg(color))
}

/// Same as [`styled_amount`], bold, for totals.
#[must_use]
pub fn styled_amount_bold(amount: Amount, theme: &Theme) -> Span<'static> {
    let span = styled_amount(amount, theme);
    let style = span.style.add_modifier(Modifier::BOLD);
    span.style(style)
}

/// Entry amounts are stored unsigned; the type decides the color.
#[must_use]
pub fn styled_entry_amount(
    amount: Option<Amount>,
    kind: Option<EntryType>,
    theme: &Theme,
) -> Span<'static> {
    let Some(amount) = amount else {
        return Span::styled("-", Style::default().fg(theme.dim));
    };
    let color = match kind {
        Some(EntryType::Income) => theme.positive,
        Some(EntryType::Expense) => theme.error,
        None => theme.text,
    };
    Span::styled(format_brl(amount), Style::default().fg(color))
}

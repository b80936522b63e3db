//! Localized message for a single form field.

use crate::form::{FormControl, ValidationErrors};

/// Returns the message to show under `control`, if any.
///
/// Nothing is shown until the field has been touched and while it is valid.
pub fn error_message(control: &FormControl) -> Option<String> {
    if !(control.touched() && control.is_invalid()) {
        return None;
    }
    message_for(&control.errors())
}

/// Picks one message following the rule priority:
/// required, email, minimum length, maximum length.
pub fn message_for(errors: &ValidationErrors) -> Option<String> {
    if errors.required {
        Some("Dado obrigatório".to_string())
    } else if errors.email {
        Some("Formato de e-mail inválido".to_string())
    } else if let Some(min) = errors.min_length {
        Some(format!(
            "Deve ter no mínimo {} Caracteres",
            min.required_length
        ))
    } else {
        errors.max_length.map(|max| {
            format!("Deve ter no máximo {} Caracteres", max.required_length)
        })
    }
}

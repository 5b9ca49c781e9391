use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors};

/// Reads a JSON `null` as an empty string, leaving rejection to validation.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Fails for empty or whitespace-only values.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("not_blank"))
    } else {
        Ok(())
    }
}

/// Flattens validation errors into sorted `field|message` strings.
#[must_use]
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error.message.as_ref().unwrap_or(&error.code);
                format!("{field}|{message}")
            })
        })
        .collect();

    messages.sort();
    messages
}

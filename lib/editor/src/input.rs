use crate::{EditorError, EditorResult};

/// Parses one form field as a signed 32-bit integer.
///
/// Surrounding whitespace is ignored. Empty text, fractions and values outside
/// the `i32` range are rejected.
pub fn parse_number(field: &'static str, text: &str) -> EditorResult<i32> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| EditorError::InvalidNumericInput {
            field,
            value: text.to_string(),
        })
}

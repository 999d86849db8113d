use crate::errors::{HrError, Result};

/// Earliest year a review may be recorded for
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// A review year as supplied by a caller: either an integer or numeric text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearInput {
    Int(i64),
    Text(String),
}

impl From<i64> for YearInput {
    fn from(value: i64) -> Self {
        YearInput::Int(value)
    }
}

impl From<i32> for YearInput {
    fn from(value: i32) -> Self {
        YearInput::Int(i64::from(value))
    }
}

impl From<u32> for YearInput {
    fn from(value: u32) -> Self {
        YearInput::Int(i64::from(value))
    }
}

impl From<&str> for YearInput {
    fn from(value: &str) -> Self {
        YearInput::Text(value.to_string())
    }
}

impl From<String> for YearInput {
    fn from(value: String) -> Self {
        YearInput::Text(value)
    }
}

/// Validate a review year and return its integer form
///
/// Text is trimmed and parsed as a base-10 integer. The result must be at
/// least [`MIN_REVIEW_YEAR`].
///
/// # Errors
/// [`HrError::InvalidYear`] for non-numeric text or a year before 2000.
pub fn validate_year(input: impl Into<YearInput>) -> Result<i64> {
    let input = input.into();
    let year = match &input {
        YearInput::Int(year) => Some(*year),
        YearInput::Text(text) => text.trim().parse::<i64>().ok(),
    };

    match year {
        Some(year) if year >= MIN_REVIEW_YEAR => Ok(year),
        _ => Err(HrError::InvalidYear {
            value: match input {
                YearInput::Int(year) => year.to_string(),
                YearInput::Text(text) => text,
            },
        }),
    }
}

/// Require a non-empty text value
///
/// Whitespace counts as content; only the empty string is rejected.
///
/// # Errors
/// [`HrError::EmptyField`] naming the entity and field.
pub fn require_non_empty(
    entity: &'static str,
    field: &'static str,
    value: impl Into<String>,
) -> Result<String> {
    let value = value.into();
    if value.is_empty() {
        return Err(HrError::EmptyField { entity, field });
    }
    Ok(value)
}

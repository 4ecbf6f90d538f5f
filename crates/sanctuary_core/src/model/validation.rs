//! Field validation shared by entity drafts and patches.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before any storage write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Time range ends before it starts.
    InvalidTimeRange { start: i64, end: i64 },
    /// E-mail address does not look like `local@domain`.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::InvalidTimeRange { start, end } => {
                write!(f, "time range end {end} is earlier than start {start}")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

/// Rejects ranges whose end precedes the start. Open-ended ranges pass.
pub fn require_ordered_range(start: i64, end: Option<i64>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::InvalidTimeRange { start, end }),
        _ => Ok(()),
    }
}

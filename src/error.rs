use chrono::NaiveDate;
use thiserror::Error;

/// A submission the dashboard refuses to apply. Nothing is mutated when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("{0} must not be empty")]
    BlankField(&'static str),
    #[error("marks must be a non-negative number, got {0}")]
    InvalidMarks(String),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{date} is outside the selectable window {start}..={end}")]
    DateOutsideWindow {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("{0} falls on a weekend")]
    WeekendDate(NaiveDate),
}

impl ValidationError {
    /// Name of the offending input, for the `details` of an error response.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(f) | ValidationError::BlankField(f) => f,
            ValidationError::InvalidMarks(_) => "marks",
            ValidationError::InvalidDate(_)
            | ValidationError::DateOutsideWindow { .. }
            | ValidationError::WeekendDate(_) => "date",
        }
    }
}

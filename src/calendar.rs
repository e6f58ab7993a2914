use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate, Weekday};

/// Inclusive range of dates the picker offers. Weekends inside the range are
/// never selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// `None` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.contains(date) && !is_weekend(date)
    }

    pub fn selectable_dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .filter(|d| self.is_selectable(*d))
            .collect()
    }

    /// Parses a `YYYY-MM-DD` date and checks it against the window.
    pub fn select(&self, raw: &str) -> Result<NaiveDate, ValidationError> {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw.to_string()))?;
        if !self.contains(date) {
            return Err(ValidationError::DateOutsideWindow {
                date,
                start: self.start,
                end: self.end,
            });
        }
        if is_weekend(date) {
            return Err(ValidationError::WeekendDate(date));
        }
        Ok(date)
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 7, 5).unwrap_or_default(),
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

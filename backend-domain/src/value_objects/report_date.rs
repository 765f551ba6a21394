// Report date value object
// Canonical YYYY-MM-DD day the report is scoped to

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_REPORT_YEAR: i32 = 2000;
pub const MAX_REPORT_YEAR: i32 = 2050;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateValidationError {
    #[error("date must match YYYY-MM-DD")]
    Pattern,
    #[error("date is not a valid calendar day")]
    Calendar,
    #[error("year must be between {MIN_REPORT_YEAR} and {MAX_REPORT_YEAR}")]
    YearRange,
}

/// A validated calendar day. Always holds the canonical `YYYY-MM-DD`
/// form, so lexicographic comparison matches chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportDate(String);

impl ReportDate {
    pub fn parse(value: &str) -> Result<ReportDate, DateValidationError> {
        let raw = value.trim();
        if !matches_pattern(raw) {
            return Err(DateValidationError::Pattern);
        }
        let date =
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| DateValidationError::Calendar)?;
        if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&date.year()) {
            return Err(DateValidationError::YearRange);
        }
        Ok(ReportDate(raw.to_string()))
    }

    pub fn today() -> ReportDate {
        ReportDate(Local::now().format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Long-form display date, e.g. `Sunday, June 15, 2025`.
    pub fn formatted(&self) -> String {
        match NaiveDate::parse_from_str(&self.0, "%Y-%m-%d") {
            Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
            Err(_) => self.0.clone(),
        }
    }

    /// Inclusive start of the day in canonical timestamp form.
    pub fn day_start(&self) -> String {
        format!("{} 00:00:00", self.0)
    }

    /// Inclusive end of the day in canonical timestamp form.
    pub fn day_end(&self) -> String {
        format!("{} 23:59:59", self.0)
    }
}

impl std::fmt::Display for ReportDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn matches_pattern(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    for (idx, ch) in value.chars().enumerate() {
        if idx == 4 || idx == 7 {
            if ch != '-' {
                return false;
            }
            continue;
        }
        if !ch.is_ascii_digit() {
            return false;
        }
    }
    true
}

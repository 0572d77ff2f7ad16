//! 时间格式化模块
//!
//! Renders backend timestamps for tables. All output is UTC, English month
//! abbreviations, and `N/A` for a missing value.

use chrono::{DateTime, Utc};

const MISSING: &str = "N/A";

/// Display granularity of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Jan 5`
    MonthDay,
    /// `Jan 5, 2025`
    Full,
    /// `Jan 5, 02:30 PM`
    MonthDayTime,
}

impl DateStyle {
    fn pattern(&self) -> &'static str {
        match self {
            DateStyle::MonthDay => "%b %-d",
            DateStyle::Full => "%b %-d, %Y",
            DateStyle::MonthDayTime => "%b %-d, %I:%M %p",
        }
    }
}

pub fn format_date(value: Option<&DateTime<Utc>>, style: DateStyle) -> String {
    match value {
        Some(date) => date.format(style.pattern()).to_string(),
        None => MISSING.to_string(),
    }
}

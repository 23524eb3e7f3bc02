/// Month anchors and display labels for result rows

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimulationError};

/// Payout day shown on every month label
pub const LABEL_DAY: u32 = 20;

/// A year-month anchor, written as `YYYY-MM`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartMonth {
    first_day: NaiveDate,
}

impl StartMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| SimulationError::InvalidStartMonth(format!("{:04}-{:02}", year, month)))
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            first_day: today.with_day(1).unwrap_or(today),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Label for the month `offset` months after the anchor, e.g. `2024/03/20`
    pub fn label(&self, offset: u32) -> Result<String> {
        let shifted = self
            .first_day
            .checked_add_months(Months::new(offset))
            .ok_or_else(|| SimulationError::MonthOutOfRange {
                start: self.to_string(),
                offset,
            })?;
        Ok(format!(
            "{:04}/{:02}/{:02}",
            shifted.year(),
            shifted.month(),
            LABEL_DAY
        ))
    }
}

impl fmt::Display for StartMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for StartMonth {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .map(|first_day| Self { first_day })
            .map_err(|_| SimulationError::InvalidStartMonth(trimmed.to_string()))
    }
}

impl TryFrom<String> for StartMonth {
    type Error = SimulationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StartMonth> for String {
    fn from(value: StartMonth) -> Self {
        value.to_string()
    }
}

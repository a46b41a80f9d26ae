//! Calendar periods used to bucket transactions
//!
//! Weeks follow ISO-8601 everywhere: a week belongs to the ISO week-year that
//! contains its Thursday, so 2024-12-30 falls in 2025 week 1.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket size for period statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    /// The period of this granularity containing `date`
    pub fn period_for(&self, date: NaiveDate) -> Period {
        match self {
            Self::Weekly => {
                let iso = date.iso_week();
                Period::Weekly {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Self::Monthly => Period::Monthly {
                year: date.year(),
                month: date.month(),
            },
            Self::Yearly => Period::Yearly { year: date.year() },
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "y" => Ok(Self::Yearly),
            other => Err(PeriodParseError::InvalidFormat(other.to_string())),
        }
    }
}

/// A single calendar bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// ISO week ("2025 week 3")
    Weekly { year: i32, week: u32 },

    /// Calendar month ("2025-01")
    Monthly { year: i32, month: u32 },

    /// Calendar year ("2025")
    Yearly { year: i32 },
}

impl Period {
    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Weekly { year, week }
    }

    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Monthly { year, month }
    }

    pub fn yearly(year: i32) -> Self {
        Self::Yearly { year }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Weekly { .. } => Granularity::Weekly,
            Self::Monthly { .. } => Granularity::Monthly,
            Self::Yearly { .. } => Granularity::Yearly,
        }
    }

    /// Year component (ISO week-year for weekly periods)
    pub fn year(&self) -> i32 {
        match self {
            Self::Weekly { year, .. } | Self::Monthly { year, .. } | Self::Yearly { year } => *year,
        }
    }

    /// Get the start date of this period
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Weekly { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)
                .unwrap_or(NaiveDate::MIN),
            Self::Monthly { year, month } => {
                NaiveDate::from_ymd_opt(*year, *month, 1).unwrap_or(NaiveDate::MIN)
            }
            Self::Yearly { year } => NaiveDate::from_ymd_opt(*year, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }

    /// Get the end date of this period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Weekly { .. } => self.start_date() + Duration::days(6),
            Self::Monthly { year, month } => {
                let next_month = if *month == 12 {
                    NaiveDate::from_ymd_opt(*year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(*year, *month + 1, 1)
                };
                next_month
                    .map(|d| d - Duration::days(1))
                    .unwrap_or(NaiveDate::MAX)
            }
            Self::Yearly { year } => {
                NaiveDate::from_ymd_opt(*year, 12, 31).unwrap_or(NaiveDate::MAX)
            }
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.granularity().period_for(date) == *self
    }

    /// Human-readable label ("2024-03", "2024 week 11", "2024")
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly { year, week } => write!(f, "{:04} week {}", year, week),
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Yearly { year } => write!(f, "{:04}", year),
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then_with(|| self.end_date().cmp(&other.end_date()))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid period '{}'. Use weekly, monthly or yearly", s)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

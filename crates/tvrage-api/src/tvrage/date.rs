//! Lenient air date and year parsing.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

/// Regex for the `YYYY-MM-DD` air date format.
#[allow(clippy::expect_used)]
static AIR_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("failed to compile air date regex")
});

/// Episode air date.
///
/// Unaired episodes are published with placeholder dates such as
/// `0000-00-00` or impossible ones such as `2022-12-32`. Those, and any
/// other text that is not a real `YYYY-MM-DD` date, become [`AirDate::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AirDate {
    /// A real calendar date.
    Date(NaiveDate),
    /// Missing or unparsable date.
    #[default]
    Unknown,
}

impl AirDate {
    /// Parses a `YYYY-MM-DD` date, degrading to [`AirDate::Unknown`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = AIR_DATE_RE.captures(raw.trim()) else {
            return Self::Unknown;
        };
        let year = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok());
        let month = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
        let day = caps.get(3).and_then(|m| m.as_str().parse::<u32>().ok());

        match (year, month, day) {
            (Some(y), Some(m), Some(d)) => {
                NaiveDate::from_ymd_opt(y, m, d).map_or(Self::Unknown, Self::Date)
            }
            _ => Self::Unknown,
        }
    }

    /// Returns the calendar date, if known.
    #[must_use]
    pub const fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(d),
            Self::Unknown => None,
        }
    }

    /// Returns `true` for [`AirDate::Unknown`].
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns midnight UTC of the air date, if known.
    #[must_use]
    pub fn instant(self) -> Option<DateTime<Utc>> {
        self.date()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

impl fmt::Display for AirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Extracts a year from a bare year (`1997`) or a `Mon/DD/YYYY` date
/// (`Mar/10/1997`).
///
/// Only the trailing year of a slash-separated date is kept. Returns `None`
/// when no integer year can be read.
#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    let year = raw.trim().rsplit('/').next()?;
    year.trim().parse().ok()
}

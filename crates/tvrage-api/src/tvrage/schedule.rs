//! Last/next episode selection and relative day labels.

use chrono::{DateTime, Utc};

use super::types::{Episode, Episodes};

impl Episodes {
    /// Returns the episode with the latest air date strictly before `now`.
    ///
    /// Scans the whole collection since feed order is not chronological.
    /// Episodes with an unknown air date are skipped; on equal air dates
    /// the later episode in feed order wins.
    #[must_use]
    pub fn last_aired(&self, now: DateTime<Utc>) -> Option<&Episode> {
        self.iter()
            .filter_map(|e| e.air_date.instant().map(|aired| (e, aired)))
            .filter(|&(_, aired)| aired < now)
            .max_by_key(|&(_, aired)| aired)
            .map(|(e, _)| e)
    }

    /// Returns the first episode, in feed order, airing strictly after `now`.
    ///
    /// This is the first match, not necessarily the earliest future air date
    /// when season groups are out of order.
    #[must_use]
    pub fn next_to_air(&self, now: DateTime<Utc>) -> Option<&Episode> {
        self.iter()
            .find(|e| e.air_date.instant().is_some_and(|aired| aired > now))
    }
}

/// Returns the signed number of whole days from `now` to `air`.
///
/// Partial days are truncated toward zero, so 25 hours ahead is 1 and
/// 25 hours ago is -1.
#[must_use]
pub fn delta_days(air: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    air.signed_duration_since(now).num_days()
}

/// Describes `air` relative to `now`: "today", "tomorrow", "in 3 days",
/// "yesterday" or "3 days ago".
#[must_use]
pub fn format_delta(air: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match delta_days(air, now) {
        0 => String::from("today"),
        1 => String::from("tomorrow"),
        -1 => String::from("yesterday"),
        d if d > 1 => format!("in {d} days"),
        d => format!("{} days ago", d.unsigned_abs()),
    }
}

//! TVRage show and episode types.

use std::fmt;
use std::ops::Deref;

use chrono::{DateTime, Utc};

use super::date::AirDate;
use super::schedule::format_delta;

/// A show, as returned by the search and show info feeds.
///
/// The two feeds name several fields differently; both are decoded into
/// this one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Show {
    /// Show ID (`showid`).
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Canonical tvrage.com link.
    pub link: String,
    /// Country code (e.g. "US").
    pub country: String,
    /// First aired year.
    pub started: Option<i32>,
    /// Last aired year (`Some(0)` while the show is running).
    pub ended: Option<i32>,
    /// Number of seasons.
    pub seasons: u32,
    /// Status (e.g. "Returning Series", "Canceled/Ended").
    pub status: String,
    /// Episode runtime in minutes (show info feed only, 0 if unknown).
    pub runtime: u32,
    /// Classification (e.g. "Scripted", "Animation").
    pub classification: String,
    /// Genres in feed order.
    pub genres: Vec<String>,
    /// Broadcasting network (show info feed only).
    pub network: String,
    /// Country attribute of the network element.
    pub network_country: Option<String>,
    /// Air time (e.g. "20:00").
    pub airtime: String,
    /// Air day (e.g. "Tuesday").
    pub airday: String,
    /// Time zone description (e.g. "GMT-5 +DST").
    pub timezone: String,
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} - {}]",
            self.name,
            self.started.unwrap_or(0),
            self.status
        )
    }
}

/// A single episode from the episode list feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Episode {
    /// Season number, taken from the enclosing `<Season no="N">` group.
    pub season: u32,
    /// Overall episode counter (`epnum`).
    pub ordinal: u32,
    /// Episode number within the season (`seasonnum`).
    pub number: u32,
    /// Production code (may be empty).
    pub production: String,
    /// Air date.
    pub air_date: AirDate,
    /// tvrage.com episode link.
    pub link: String,
    /// Episode title.
    pub title: String,
}

impl Episode {
    /// Describes the air date relative to `now` ("today", "in 3 days", ...).
    ///
    /// Returns `None` when the air date is unknown.
    #[must_use]
    pub fn delta(&self, now: DateTime<Utc>) -> Option<String> {
        self.air_date.instant().map(|air| format_delta(air, now))
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02} \"{}\"", self.season, self.number, self.title)
    }
}

/// Episodes of a show in feed order (season group, then position).
///
/// The order is not guaranteed to be chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Episodes(Vec<Episode>);

impl Deref for Episodes {
    type Target = [Episode];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Episode>> for Episodes {
    fn from(episodes: Vec<Episode>) -> Self {
        Self(episodes)
    }
}

impl FromIterator<Episode> for Episodes {
    fn from_iter<I: IntoIterator<Item = Episode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Episodes {
    type Item = &'a Episode;
    type IntoIter = std::slice::Iter<'a, Episode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::TimeZone;

    use super::*;

    fn make_episode(season: u32, number: u32, title: &str, air_date: &str) -> Episode {
        Episode {
            season,
            number,
            title: String::from(title),
            air_date: AirDate::parse(air_date),
            ..Episode::default()
        }
    }

    #[test]
    fn test_show_display() {
        // Arrange
        let show = Show {
            name: String::from("Supernatural"),
            started: Some(2005),
            status: String::from("Returning Series"),
            ..Show::default()
        };

        // Act & Assert
        assert_eq!(show.to_string(), "Supernatural [2005 - Returning Series]");
    }

    #[test]
    fn test_show_display_unknown_start_year() {
        // Arrange
        let show = Show {
            name: String::from("Untitled"),
            status: String::from("TBD"),
            ..Show::default()
        };

        // Act & Assert
        assert_eq!(show.to_string(), "Untitled [0 - TBD]");
    }

    #[test]
    fn test_episode_display() {
        // Arrange
        let episode = make_episode(2, 1, "In My Time of Dying", "2006-09-28");

        // Act & Assert
        assert_eq!(episode.to_string(), r#"S02E01 "In My Time of Dying""#);
    }

    #[test]
    fn test_episode_delta() {
        // Arrange
        let episode = make_episode(2, 2, "Everybody Loves a Clown", "2006-10-05");
        let now = Utc.with_ymd_and_hms(2006, 10, 4, 12, 0, 0).unwrap();

        // Act & Assert
        assert_eq!(episode.delta(now).as_deref(), Some("today"));
    }

    #[test]
    fn test_episode_delta_unknown_air_date() {
        // Arrange
        let episode = make_episode(1, 0, "Unaired Pilot", "0000-00-00");
        let now = Utc.with_ymd_and_hms(2006, 10, 4, 12, 0, 0).unwrap();

        // Act & Assert
        assert_eq!(episode.delta(now), None);
    }

    #[test]
    fn test_episodes_preserve_order() {
        // Arrange
        let episodes: Episodes = vec![
            make_episode(2, 1, "B", "2006-09-28"),
            make_episode(1, 1, "A", "2005-09-13"),
        ]
        .into();

        // Act
        let titles: Vec<&str> = episodes.iter().map(|e| e.title.as_str()).collect();

        // Assert
        assert_eq!(episodes.len(), 2);
        assert_eq!(titles, ["B", "A"]);
        assert_eq!(episodes[1].season, 1);
    }
}

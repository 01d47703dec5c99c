//! Feed decoding into `Show` and `Episodes`.

use std::fmt;

use serde::de::DeserializeOwned;

use super::types::{Episode, Episodes, Show};
use super::xml::{
    DetailShowRecord, EpisodeListResponse, EpisodeRecord, Genres, SearchResults, SearchShowRecord,
};

/// Upstream feed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// `full_search.php`
    Search,
    /// `showinfo.php`
    Detail,
    /// `episode_list.php`
    EpisodeList,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::Detail => "show info",
            Self::EpisodeList => "episode list",
        })
    }
}

/// Document-level decode failure.
///
/// Individual fields never cause this error; they degrade to empty or
/// unknown values instead.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The response body was empty.
    #[error("{feed} feed is empty")]
    Empty {
        /// Feed being decoded.
        feed: Feed,
    },
    /// The response body is not a well-formed feed document.
    #[error("{feed} feed is malformed: {source}")]
    Malformed {
        /// Feed being decoded.
        feed: Feed,
        /// Underlying XML error.
        #[source]
        source: quick_xml::DeError,
    },
}

/// Deserializes a whole feed document.
fn decode_feed<T: DeserializeOwned>(feed: Feed, body: &str) -> Result<T, DecodeError> {
    if body.trim().is_empty() {
        return Err(DecodeError::Empty { feed });
    }
    quick_xml::de::from_str(body).map_err(|source| DecodeError::Malformed { feed, source })
}

/// Returns `preferred` unless it is empty.
fn prefer(preferred: String, fallback: String) -> String {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

impl From<SearchShowRecord> for Show {
    fn from(r: SearchShowRecord) -> Self {
        Self {
            id: r.showid,
            name: r.name,
            link: r.link,
            country: r.country,
            started: r.started,
            ended: r.ended,
            seasons: r.seasons,
            status: r.status,
            classification: r.classification,
            genres: r.genres.map(Genres::into_names).unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl From<DetailShowRecord> for Show {
    fn from(r: DetailShowRecord) -> Self {
        let (network, network_country) = r
            .network
            .map(|n| {
                let country = n
                    .country
                    .map(|c| String::from(c.trim()))
                    .filter(|c| !c.is_empty());
                (String::from(n.name.trim()), country)
            })
            .unwrap_or_default();

        Self {
            id: r.showid,
            name: prefer(r.showname, r.name),
            link: prefer(r.showlink, r.link),
            country: prefer(r.origin_country, r.country),
            started: r.startdate.or(r.started),
            ended: r.ended,
            seasons: r.seasons,
            status: r.status,
            runtime: r.runtime,
            classification: r.classification,
            genres: r.genres.map(Genres::into_names).unwrap_or_default(),
            network,
            network_country,
            airtime: r.airtime,
            airday: r.airday,
            timezone: r.timezone,
        }
    }
}

impl EpisodeRecord {
    /// Converts the record, assigning the enclosing group's season number.
    ///
    /// The record's own `seasonnum` is the position within the season and is
    /// never used as the season.
    fn into_episode(self, season: u32) -> Episode {
        Episode {
            season,
            ordinal: self.epnum,
            number: self.seasonnum,
            production: self.prodnum,
            air_date: self.airdate,
            link: self.link,
            title: self.title,
        }
    }
}

/// Decodes a `full_search.php` response.
///
/// Returns one `Show` per `<show>` element, in feed order. A well-formed
/// document without matches yields an empty vector.
///
/// # Errors
///
/// Returns [`DecodeError`] if the body is empty or not well-formed XML.
pub fn decode_search(body: &str) -> Result<Vec<Show>, DecodeError> {
    let results: SearchResults = decode_feed(Feed::Search, body)?;
    Ok(results.shows.into_iter().map(Show::from).collect())
}

/// Decodes a `showinfo.php` response.
///
/// # Errors
///
/// Returns [`DecodeError`] if the body is empty or not well-formed XML.
pub fn decode_detail(body: &str) -> Result<Show, DecodeError> {
    let record: DetailShowRecord = decode_feed(Feed::Detail, body)?;
    Ok(Show::from(record))
}

/// Decodes an `episode_list.php` response into a flat episode sequence.
///
/// Episodes keep season-group order, then their position within the group.
/// Nothing is sorted, filtered or deduplicated.
///
/// # Errors
///
/// Returns [`DecodeError`] if the body is empty or not well-formed XML.
pub fn decode_episodes(body: &str) -> Result<Episodes, DecodeError> {
    let response: EpisodeListResponse = decode_feed(Feed::EpisodeList, body)?;
    tracing::debug!(
        show = %response.name,
        total_seasons = response.totalseasons,
        "Episode list decoded"
    );
    Ok(response
        .episode_list
        .unwrap_or_default()
        .seasons
        .into_iter()
        .flat_map(|s| {
            let season = s.number;
            s.episodes.into_iter().map(move |e| e.into_episode(season))
        })
        .collect())
}

//! XML wire records and lenient field deserializers.
//!
//! Field-level deserializers never fail: unparsable text degrades to an
//! empty, zero or unknown value so a single bad field cannot abort a feed.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::date::{AirDate, parse_year};

/// Deserializes an optional text field, trimmed, defaulting to empty.
pub fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| String::from(s.trim())).unwrap_or_default())
}

/// Deserializes a number, degrading unparsable text to zero.
pub fn deserialize_lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    let raw = s.as_deref().map_or("", str::trim);
    if raw.is_empty() {
        return Ok(T::default());
    }
    Ok(raw.parse().unwrap_or_else(|_| {
        tracing::debug!(raw, "unparsable number, using zero");
        T::default()
    }))
}

/// Deserializes a bare or `Mon/DD/YYYY` year, degrading to `None`.
pub fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    let raw = s.as_deref().map_or("", str::trim);
    if raw.is_empty() {
        return Ok(None);
    }
    let year = parse_year(raw);
    if year.is_none() {
        tracing::debug!(raw, "unparsable year, treating as unknown");
    }
    Ok(year)
}

/// Deserializes a `YYYY-MM-DD` air date, degrading to [`AirDate::Unknown`].
pub fn deserialize_air_date<'de, D>(deserializer: D) -> Result<AirDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    let raw = s.as_deref().map_or("", str::trim);
    let date = AirDate::parse(raw);
    if date.is_unknown() && !raw.is_empty() {
        tracing::debug!(raw, "unparsable air date, treating as unknown");
    }
    Ok(date)
}

/// `genres` container.
#[derive(Debug, Default, Deserialize)]
pub struct Genres {
    #[serde(rename = "genre", default)]
    pub items: Vec<String>,
}

impl Genres {
    /// Returns the non-empty, trimmed genre names in source order.
    pub fn into_names(self) -> Vec<String> {
        self.items
            .into_iter()
            .map(|g| String::from(g.trim()))
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// `full_search.php` response (`<Results>` root).
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    /// Matched shows, in relevance order.
    #[serde(rename = "show", default)]
    pub shows: Vec<SearchShowRecord>,
}

/// A `<show>` element of the search feed.
#[derive(Debug, Deserialize)]
pub struct SearchShowRecord {
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub showid: u64,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub name: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub link: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub country: String,
    #[serde(deserialize_with = "deserialize_year", default)]
    pub started: Option<i32>,
    #[serde(deserialize_with = "deserialize_year", default)]
    pub ended: Option<i32>,
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub seasons: u32,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub status: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub classification: String,
    #[serde(default)]
    pub genres: Option<Genres>,
}

/// `<network country="US">UPN</network>` element.
#[derive(Debug, Default, Deserialize)]
pub struct NetworkRecord {
    /// Broadcasting country attribute.
    #[serde(rename = "@country", default)]
    pub country: Option<String>,
    /// Network name.
    #[serde(rename = "$text", default)]
    pub name: String,
}

/// `showinfo.php` response (`<Showinfo>` root).
///
/// Carries `showname`, `showlink`, `origin_country` and `startdate` where
/// the search feed uses `name`, `link`, `country` and `started`; both
/// spellings are kept so the merge into `Show` can pick per field.
#[derive(Debug, Deserialize)]
pub struct DetailShowRecord {
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub showid: u64,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub showname: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub name: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub showlink: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub link: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub origin_country: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub country: String,
    #[serde(deserialize_with = "deserialize_year", default)]
    pub startdate: Option<i32>,
    #[serde(deserialize_with = "deserialize_year", default)]
    pub started: Option<i32>,
    #[serde(deserialize_with = "deserialize_year", default)]
    pub ended: Option<i32>,
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub seasons: u32,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub status: String,
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub runtime: u32,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub classification: String,
    #[serde(default)]
    pub genres: Option<Genres>,
    #[serde(default)]
    pub network: Option<NetworkRecord>,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub airtime: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub airday: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub timezone: String,
}

/// `episode_list.php` response (`<Show>` root).
#[derive(Debug, Deserialize)]
pub struct EpisodeListResponse {
    /// Show name.
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub name: String,
    /// Declared number of seasons.
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub totalseasons: u32,
    /// Season groups (absent for shows without episodes).
    #[serde(rename = "Episodelist", default)]
    pub episode_list: Option<EpisodeListRecord>,
}

/// `Episodelist` container.
#[derive(Debug, Default, Deserialize)]
pub struct EpisodeListRecord {
    #[serde(rename = "Season", default)]
    pub seasons: Vec<SeasonRecord>,
}

/// A `<Season no="N">` group.
#[derive(Debug, Deserialize)]
pub struct SeasonRecord {
    /// Declared season number; the only trusted source of an episode's season.
    #[serde(rename = "@no", deserialize_with = "deserialize_lenient_number", default)]
    pub number: u32,
    #[serde(rename = "episode", default)]
    pub episodes: Vec<EpisodeRecord>,
}

/// An `<episode>` element.
#[derive(Debug, Deserialize)]
pub struct EpisodeRecord {
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub epnum: u32,
    #[serde(deserialize_with = "deserialize_lenient_number", default)]
    pub seasonnum: u32,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub prodnum: String,
    #[serde(deserialize_with = "deserialize_air_date", default)]
    pub airdate: AirDate,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub link: String,
    #[serde(deserialize_with = "deserialize_trimmed_string", default)]
    pub title: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_deserialize_trimmed_string() {
        // Arrange
        #[derive(Deserialize)]
        struct Test {
            #[serde(deserialize_with = "deserialize_trimmed_string", default)]
            value: String,
        }

        // Act & Assert
        let result: Test =
            quick_xml::de::from_str("<Test><value>\n  http://example.com/a\n</value></Test>")
                .unwrap();
        assert_eq!(result.value, "http://example.com/a");

        let result: Test = quick_xml::de::from_str("<Test><value/></Test>").unwrap();
        assert_eq!(result.value, "");

        let result: Test = quick_xml::de::from_str("<Test></Test>").unwrap();
        assert_eq!(result.value, "");
    }

    #[test]
    fn test_deserialize_lenient_number() {
        // Arrange
        #[derive(Deserialize)]
        struct Test {
            #[serde(deserialize_with = "deserialize_lenient_number", default)]
            value: u32,
        }

        // Act & Assert
        let result: Test = quick_xml::de::from_str("<Test><value>07</value></Test>").unwrap();
        assert_eq!(result.value, 7);

        let result: Test = quick_xml::de::from_str("<Test><value>n/a</value></Test>").unwrap();
        assert_eq!(result.value, 0);

        let result: Test = quick_xml::de::from_str("<Test><value></value></Test>").unwrap();
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_deserialize_year() {
        // Arrange
        #[derive(Deserialize)]
        struct Test {
            #[serde(deserialize_with = "deserialize_year", default)]
            value: Option<i32>,
        }

        // Act & Assert
        let result: Test =
            quick_xml::de::from_str("<Test><value>Mar/10/1997</value></Test>").unwrap();
        assert_eq!(result.value, Some(1997));

        let result: Test = quick_xml::de::from_str("<Test><value>2005</value></Test>").unwrap();
        assert_eq!(result.value, Some(2005));

        let result: Test = quick_xml::de::from_str("<Test><value>TBA</value></Test>").unwrap();
        assert_eq!(result.value, None);

        let result: Test = quick_xml::de::from_str("<Test></Test>").unwrap();
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_deserialize_air_date() {
        // Arrange
        #[derive(Deserialize)]
        struct Test {
            #[serde(deserialize_with = "deserialize_air_date", default)]
            value: AirDate,
        }

        // Act & Assert
        let result: Test =
            quick_xml::de::from_str("<Test><value>2006-09-28</value></Test>").unwrap();
        assert_eq!(result.value.date(), NaiveDate::from_ymd_opt(2006, 9, 28));

        let result: Test =
            quick_xml::de::from_str("<Test><value>2022-12-32</value></Test>").unwrap();
        assert_eq!(result.value, AirDate::Unknown);

        let result: Test = quick_xml::de::from_str("<Test></Test>").unwrap();
        assert_eq!(result.value, AirDate::Unknown);
    }

    #[test]
    fn test_parse_network_with_country_attribute() {
        // Arrange
        let xml = r#"<Showinfo><showid>1</showid><network country="US">UPN</network></Showinfo>"#;

        // Act
        let record: DetailShowRecord = quick_xml::de::from_str(xml).unwrap();

        // Assert
        let network = record.network.unwrap();
        assert_eq!(network.name, "UPN");
        assert_eq!(network.country.as_deref(), Some("US"));
    }

    #[test]
    fn test_parse_season_group_number_from_attribute() {
        // Arrange
        let xml = r#"<Show>
<name>Test</name>
<totalseasons>1</totalseasons>
<Episodelist>
<Season no="3">
<episode><epnum>1</epnum><seasonnum>09</seasonnum><title>A</title></episode>
<episode><epnum>2</epnum><seasonnum>10</seasonnum><title>B</title></episode>
</Season>
</Episodelist>
</Show>"#;

        // Act
        let response: EpisodeListResponse = quick_xml::de::from_str(xml).unwrap();

        // Assert
        assert_eq!(response.name, "Test");
        assert_eq!(response.totalseasons, 1);
        let seasons = response.episode_list.unwrap().seasons;
        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].number, 3);
        assert_eq!(seasons[0].episodes.len(), 2);
        assert_eq!(seasons[0].episodes[1].seasonnum, 10);
        assert_eq!(seasons[0].episodes[1].title, "B");
    }

    #[test]
    fn test_parse_empty_genres() {
        // Arrange
        let xml = "<Results><show><showid>2032</showid><genres/></show></Results>";

        // Act
        let response: SearchResults = quick_xml::de::from_str(xml).unwrap();

        // Assert
        assert_eq!(response.shows.len(), 1);
        let genres = response
            .shows
            .into_iter()
            .next()
            .unwrap()
            .genres
            .map(Genres::into_names)
            .unwrap_or_default();
        assert!(genres.is_empty());
    }
}

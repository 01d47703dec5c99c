//! TVRage API utility functions.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::instrument;

use super::api::LocalTvRageApi;
use super::types::{Episode, Episodes, Show};

/// Last and next episode of the best search match for a show name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// First show returned by the search.
    pub show: Show,
    /// All episodes of the show, in feed order.
    pub episodes: Episodes,
    /// Most recently aired episode.
    pub last: Option<Episode>,
    /// Next episode to air.
    pub next: Option<Episode>,
}

/// Searches for `name` and fetches the episode list of the first match.
///
/// Returns `None` when the search matches no show.
///
/// # Errors
///
/// Returns an error if the search or the episode list request fails.
#[instrument(skip_all, fields(name = %name))]
pub async fn lookup_first_match(
    api: &(impl LocalTvRageApi + Sync),
    name: &str,
) -> Result<Option<(Show, Episodes)>> {
    let shows = api
        .search(name)
        .await
        .with_context(|| format!("show search failed for {name:?}"))?;

    let Some(show) = shows.into_iter().next() else {
        tracing::debug!("No show matched");
        return Ok(None);
    };

    let episodes = api
        .episode_list(show.id)
        .await
        .with_context(|| format!("episode list failed for show {} ({})", show.name, show.id))?;

    Ok(Some((show, episodes)))
}

/// Searches for `name` and works out the last/next episodes of the first match.
///
/// Returns `None` when the search matches no show.
///
/// # Errors
///
/// Returns an error if the search or the episode list request fails.
pub async fn lookup_schedule(
    api: &(impl LocalTvRageApi + Sync),
    name: &str,
    now: DateTime<Utc>,
) -> Result<Option<Schedule>> {
    let Some((show, episodes)) = lookup_first_match(api, name).await? else {
        return Ok(None);
    };

    let last = episodes.last_aired(now).cloned();
    let next = episodes.next_to_air(now).cloned();

    tracing::debug!(
        show_id = show.id,
        episodes = episodes.len(),
        has_last = last.is_some(),
        has_next = next.is_some(),
        "Schedule resolved"
    );

    Ok(Some(Schedule {
        show,
        episodes,
        last,
        next,
    }))
}

//! `TvRageApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{Episodes, Show};

/// TVRage feed API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TvRageApi: Send)]
pub trait LocalTvRageApi {
    /// Searches shows by name (`full_search.php`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or XML decoding fails.
    async fn search(&self, name: &str) -> Result<Vec<Show>>;

    /// Looks up a single show by ID (`showinfo.php`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or XML decoding fails.
    async fn show(&self, id: u64) -> Result<Show>;

    /// Fetches all episodes of a show (`episode_list.php`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or XML decoding fails.
    async fn episode_list(&self, id: u64) -> Result<Episodes>;
}

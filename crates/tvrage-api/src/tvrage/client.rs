//! `TvRageClient` - TVRage feed API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use super::api::LocalTvRageApi;
use super::decode::{DecodeError, Feed, decode_detail, decode_episodes, decode_search};
use super::types::{Episodes, Show};

/// Default base URL of the feeds.
const DEFAULT_BASE_URL: &str = "http://services.tvrage.com/feeds/";

/// Show search feed path.
const SEARCH_PATH: &str = "full_search.php";

/// Show info feed path.
const SHOW_INFO_PATH: &str = "showinfo.php";

/// Episode list feed path.
const EPISODE_LIST_PATH: &str = "episode_list.php";

/// Default number of retries after a failed request.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay between retries.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of body characters included in decode error messages.
const BODY_PREVIEW_CHARS: usize = 500;

/// TVRage feed API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvRageClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Base URL, always ending in `/`.
    base_url: Url,
    /// Retries after the first attempt.
    max_retries: u32,
    /// Delay before each retry.
    retry_delay: Duration,
}

/// Builder for `TvRageClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvRageClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    max_retries: Option<u32>,
    retry_delay: Option<Duration>,
    timeout: Option<Duration>,
}

impl TvRageClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            max_retries: None,
            retry_delay: None,
            timeout: None,
        }
    }

    /// Overrides the feeds base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the number of retries after a failed request (default: 3).
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the delay between retries (default: 2s).
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TvRageClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(TvRageClient {
            http_client,
            base_url,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
        })
    }
}

impl TvRageClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TvRageClientBuilder {
        TvRageClientBuilder::new()
    }

    /// Resolves a feed path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid feed URL for {path}"))
    }

    /// Builds a decode error message with a preview of the response body.
    fn decode_error_context(feed: Feed, body: &str) -> String {
        let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        format!(
            "{} response decoding failed (len={}): {}",
            feed,
            body.len(),
            preview
        )
    }

    /// Sends a GET request with retry logic and decodes the body.
    ///
    /// Transport errors, body read errors, HTTP 429 and 5xx responses are
    /// retried up to `max_retries` times. Other 4xx responses and decode
    /// errors fail immediately, as repeating them yields the same result.
    async fn request_with_retry<T, F>(
        &self,
        feed: Feed,
        url: &Url,
        query: &[(&str, String)],
        decode: F,
    ) -> Result<T>
    where
        F: Fn(&str) -> std::result::Result<T, DecodeError>,
    {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay).await;
            }

            let send_result = self.http_client.get(url.clone()).query(query).send().await;
            let response = match send_result {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(%feed, attempt, error = %e, "Request failed, will retry");
                    last_err =
                        Some(anyhow::Error::new(e).context(format!("{feed} request failed")));
                    continue;
                }
            };

            let status = response.status();
            tracing::trace!(%feed, %status, headers = ?response.headers(), "Response headers");

            if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
                bail!("{feed} request rejected (HTTP {status})");
            }
            if !status.is_success() {
                tracing::warn!(
                    %feed,
                    attempt,
                    code = status.as_u16(),
                    "Unexpected HTTP status, will retry"
                );
                last_err = Some(anyhow::anyhow!("{feed} request failed (HTTP {status})"));
                continue;
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        %feed,
                        attempt,
                        error = %e,
                        "Failed to read response body, will retry"
                    );
                    last_err = Some(
                        anyhow::Error::new(e).context(format!("failed to read {feed} response")),
                    );
                    continue;
                }
            };

            tracing::debug!(%feed, body_len = body.len(), "Response body received");

            return decode(&body).with_context(|| Self::decode_error_context(feed, &body));
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("{feed} request failed after retries")))
    }
}

impl LocalTvRageApi for TvRageClient {
    #[instrument(skip_all, fields(name = %name))]
    async fn search(&self, name: &str) -> Result<Vec<Show>> {
        let url = self.endpoint(SEARCH_PATH)?;
        let shows = self
            .request_with_retry(
                Feed::Search,
                &url,
                &[("show", String::from(name))],
                decode_search,
            )
            .await?;
        tracing::debug!(matches = shows.len(), "Search completed");
        Ok(shows)
    }

    #[instrument(skip_all, fields(id = id))]
    async fn show(&self, id: u64) -> Result<Show> {
        let url = self.endpoint(SHOW_INFO_PATH)?;
        self.request_with_retry(Feed::Detail, &url, &[("sid", id.to_string())], decode_detail)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn episode_list(&self, id: u64) -> Result<Episodes> {
        let url = self.endpoint(EPISODE_LIST_PATH)?;
        let episodes = self
            .request_with_retry(
                Feed::EpisodeList,
                &url,
                &[("sid", id.to_string())],
                decode_episodes,
            )
            .await?;
        tracing::debug!(episodes = episodes.len(), "Episode list completed");
        Ok(episodes)
    }
}

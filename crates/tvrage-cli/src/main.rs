//! tvrage - TV show air date lookup CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{ApiConfig, AppConfig, resolve_config_path};
use tvrage_api::tvrage::{
    Episode, LocalTvRageApi, TvRageClient, lookup_first_match, lookup_schedule,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "tvrage", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// List every show matching each name.
    #[arg(short, long, conflicts_with = "episodes")]
    shows: bool,

    /// List every episode of the first show matching each name.
    #[arg(short, long)]
    episodes: bool,

    /// Show names to look up (e.g. "Supernatural").
    #[arg(required = true, value_name = "SHOW")]
    names: Vec<String>,
}

/// What to print for each show name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// First match with its last and next episodes.
    Schedule,
    /// All matching shows.
    Shows,
    /// All episodes of the first match.
    Episodes,
}

impl Cli {
    /// Returns the output mode selected by the flags.
    const fn mode(&self) -> Mode {
        if self.shows {
            Mode::Shows
        } else if self.episodes {
            Mode::Episodes
        } else {
            Mode::Schedule
        }
    }
}

/// Builds the TVRage client from the `[api]` config table.
///
/// # Errors
///
/// Returns an error if `base_url` is not a valid URL or the client fails to build.
fn build_client(config: &ApiConfig) -> Result<TvRageClient> {
    let user_agent = config.user_agent.clone().unwrap_or_else(|| {
        String::from(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    });
    let mut builder = TvRageClient::builder().user_agent(user_agent);

    if let Some(raw) = &config.base_url {
        let url = Url::parse(raw).with_context(|| format!("invalid api.base_url: {raw}"))?;
        builder = builder.base_url(url);
    }
    if let Some(retries) = config.max_retries {
        builder = builder.max_retries(retries);
    }
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().context("failed to build TVRage API client")
}

/// Formats a `LAST`/`NEXT` line for an optional episode.
fn describe_episode(label: &str, episode: Option<&Episode>, now: DateTime<Utc>) -> String {
    match episode.and_then(|e| e.delta(now).map(|delta| (e, delta))) {
        Some((e, delta)) => format!("{label}: {e} ({}, {delta})", e.air_date),
        None => format!("{label}: Unknown"),
    }
}

/// Prints the first match for `name` with its last and next episodes.
///
/// # Errors
///
/// Returns an error if an API request fails.
#[instrument(skip_all)]
async fn run_schedule(client: &TvRageClient, name: &str, now: DateTime<Utc>) -> Result<()> {
    let Some(schedule) = lookup_schedule(client, name, now).await? else {
        tracing::info!("No show found for {name:?}");
        return Ok(());
    };

    tracing::info!("{}", schedule.show);
    tracing::info!("{}", describe_episode("LAST", schedule.last.as_ref(), now));
    tracing::info!("{}", describe_episode("NEXT", schedule.next.as_ref(), now));
    Ok(())
}

/// Prints every show matching `name`, numbered.
///
/// # Errors
///
/// Returns an error if the search request fails.
#[instrument(skip_all)]
async fn run_shows(client: &TvRageClient, name: &str) -> Result<()> {
    let shows = client
        .search(name)
        .await
        .with_context(|| format!("show search failed for {name:?}"))?;

    if shows.is_empty() {
        tracing::info!("No show found for {name:?}");
        return Ok(());
    }

    for (i, show) in (1..).zip(&shows) {
        tracing::info!("{i:>3}. {show} (id={})", show.id);
    }
    tracing::info!("Total: {} shows", shows.len());
    Ok(())
}

/// Prints every episode of the first show matching `name`, numbered.
///
/// # Errors
///
/// Returns an error if the search or the episode list request fails.
#[instrument(skip_all)]
async fn run_episodes(client: &TvRageClient, name: &str) -> Result<()> {
    let Some((show, episodes)) = lookup_first_match(client, name).await? else {
        tracing::info!("No show found for {name:?}");
        return Ok(());
    };

    tracing::info!("{show}");
    for (i, episode) in (1..).zip(&episodes) {
        tracing::info!("{i:>4}. {episode} ({})", episode.air_date);
    }
    tracing::info!("Total: {} episodes", episodes.len());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
/// Failed lookups are logged per show and do not stop the remaining ones.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.dir.as_ref())?;
    let config = AppConfig::load(&config_path)?;
    let client = build_client(&config.api)?;

    let mode = cli.mode();
    let now = Utc::now();
    for name in &cli.names {
        let result = match mode {
            Mode::Schedule => run_schedule(&client, name, now).await,
            Mode::Shows => run_shows(&client, name).await,
            Mode::Episodes => run_episodes(&client, name).await,
        };
        if let Err(e) = result {
            tracing::error!("Lookup failed for {name:?}: {e:#}");
        }
    }

    Ok(())
}

//! API client library for the TVRage feeds.
//!
//! Decodes the show search, show info and episode list XML feeds and
//! works out the last aired and next upcoming episode of a show.

/// TVRage feed decoding, episode scheduling and HTTP client.
pub mod tvrage;

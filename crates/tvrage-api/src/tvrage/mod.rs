//! TVRage API client module.
//!
//! Decodes the `full_search.php`, `showinfo.php` and `episode_list.php`
//! feeds and picks last/next episodes relative to a reference instant.

mod api;
mod client;
mod date;
mod decode;
mod schedule;
mod types;
mod util;
pub(crate) mod xml;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTvRageApi, TvRageApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TvRageClient, TvRageClientBuilder};
pub use date::{AirDate, parse_year};
pub use decode::{DecodeError, Feed, decode_detail, decode_episodes, decode_search};
pub use schedule::{delta_days, format_delta};
pub use types::{Episode, Episodes, Show};
pub use util::{Schedule, lookup_first_match, lookup_schedule};

//! Airport → travel-wiki page matcher.
//!
//! Reads a TSV of airports, searches the wiki for every airport's IATA code,
//! scores the result titles against the airport and city names and writes a
//! TSV of `airportId  url  rank` rows.

pub mod airport;
pub mod config;
mod error;
mod macros;
pub mod parse;
pub mod process;
pub mod progress;
pub mod rank;
pub mod request;
pub mod score;
pub mod terms;
pub mod tsv;

pub use error::{Error, Result};

/// Seconds to wait between two search requests. The wiki blocks us if we go faster.
const REQUEST_DELAY_SECS: u64 = 30;
/// Seconds to wait before trying a failed request again.
const RETRY_DELAY_SECS: u64 = 10;
const FETCH_TIMEOUT_SECS: u64 = 100;
/// Failed attempts per airport on top of the first one before the run gives up.
const MAX_RETRIES: usize = 5;
const SEARCH_BASE_URL: &str = "http://wikitravel.org/wiki/en";
const USER_AGENT: &str = concat!("wikimatch/", env!("CARGO_PKG_VERSION"));

pub const INPUT_PATH: &str = "airports.tsv";
pub const OUTPUT_PATH: &str = "wikitravel_search.tsv";

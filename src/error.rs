use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Bad row, expected at least 4 fields but got {0}")]
    BadRow(usize),
    #[error("Airport id must be a positive integer, got: {0:?}")]
    InvalidAirportId(String),
    #[error("Airport {0} serves no cities")]
    NoServedCities(u64),

    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Gave up on airport {airport_id} after {attempts} failed attempts")]
    RetriesExhausted { airport_id: u64, attempts: usize },
    #[error("Stopped before finishing airport {0}")]
    Cancelled(u64),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Tsv Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Regex Error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Failures worth another request after the retry delay.
    ///
    /// Everything that can go wrong between sending the search request and
    /// extracting candidates from the page is retried, timeouts included.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_)
                | Error::HttpStatus { .. }
                | Error::Reqwest(_)
                | Error::ParseMissingSelector(_)
                | Error::RuntimeJoin(_)
        )
    }

    /// Row-level rejections that are logged and skipped.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            Error::BadRow(_) | Error::InvalidAirportId(_) | Error::NoServedCities(_)
        )
    }
}

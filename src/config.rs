use std::time::Duration;

use crate::{
    FETCH_TIMEOUT_SECS, MAX_RETRIES, REQUEST_DELAY_SECS, RETRY_DELAY_SECS, SEARCH_BASE_URL,
    USER_AGENT,
};

/// Everything the batch run needs to know up front.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Wait after every search request, matched or not.
    pub request_delay: Duration,
    /// Wait before re-requesting a page that failed.
    pub retry_delay: Duration,
    pub fetch_timeout: Duration,
    pub max_retries: usize,
    /// Everything in front of `/index.php` of the search URL.
    pub search_base_url: String,
    pub user_agent: String,
    /// Airport id a previous run stopped at. Rows before it are skipped.
    pub start_id: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(REQUEST_DELAY_SECS),
            retry_delay: Duration::from_secs(RETRY_DELAY_SECS),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            max_retries: MAX_RETRIES,
            search_base_url: SEARCH_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            start_id: None,
        }
    }
}

impl Settings {
    pub fn with_start_id(mut self, start_id: Option<u64>) -> Self {
        self.start_id = start_id;
        self
    }

    pub fn with_search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }

    pub fn with_delays(mut self, request_delay: Duration, retry_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_politeness_limits() {
        let settings = Settings::default();
        assert_eq!(settings.request_delay, Duration::from_secs(30));
        assert_eq!(settings.retry_delay, Duration::from_secs(10));
        assert_eq!(settings.fetch_timeout, Duration::from_secs(100));
        assert_eq!(settings.max_retries, 5);
        assert!(settings.start_id.is_none());
    }
}

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{config::Settings, Error, Result};

/// Anything that can turn a search URL into page HTML.
#[async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

/// Builds the full-text search URL for an IATA code:
/// `<base>/index.php?title=Special:Search&search={{IATA|<code>}}&fulltext=Search&offset=0&limit=50`.
pub fn search_url(base_url: &str, iata_code: &str) -> Result<Url> {
    let endpoint = format!("{}/index.php", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&endpoint).map_err(|e| Error::InvalidUrl(format!("{endpoint}: {e}")))?;
    url.query_pairs_mut()
        .append_pair("title", "Special:Search")
        .append_pair("search", &format!("{{{{IATA|{iata_code}}}}}"))
        .append_pair("fulltext", "Search")
        .append_pair("offset", "0")
        .append_pair("limit", "50");
    Ok(url)
}

/// Fetches pages over HTTP with the configured timeout and user agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.fetch_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Requests a page and returns a `Result<String>` containing the HTML.
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = res.text().await.map_err(|e| classify(e, url))?;
        Ok(html)
    }
}

fn classify(err: reqwest::Error, url: &Url) -> Error {
    if err.is_timeout() {
        Error::Timeout(url.to_string())
    } else {
        Error::Reqwest(err)
    }
}

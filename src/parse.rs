use reqwest::Url;
use scraper::{Html, Selector};
use tokio::task::spawn_blocking;

use crate::{rank::Candidate, Error, Result};

/// Container every search result page has, even when nothing was found.
const BODY_SELECTOR: &str = "#bodyContent";
/// Result links inside the container.
const RESULT_LINK_SELECTOR: &str = "ul li a";

/// Attempts to parse a search result page off the async runtime, since `Html` is not `Send`.
pub async fn parse_results(html: String, page_url: Url) -> Result<Vec<Candidate>> {
    let candidates = spawn_blocking(move || extract_candidates(&html, &page_url)).await??;
    Ok(candidates)
}

/// Extracts `(title, href)` of every result link. Relative links are resolved against `page_url`.
///
/// A page without the result container is an error. Anchors without an `href` are ignored and
/// anchors without a `title` get an empty one.
pub fn extract_candidates(html: &str, page_url: &Url) -> Result<Vec<Candidate>> {
    let doc = Html::parse_document(html);

    let body_selector = create_selector(BODY_SELECTOR)?;
    let link_selector = create_selector(RESULT_LINK_SELECTOR)?;

    let body = doc
        .select(&body_selector)
        .next()
        .ok_or_else(|| Error::ParseMissingSelector(BODY_SELECTOR.into()))?;

    let candidates = body
        .select(&link_selector)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let url = page_url
                .join(href)
                .map(String::from)
                .unwrap_or_else(|_| href.to_string());
            let title = a.value().attr("title").unwrap_or_default();
            Some(Candidate::new(title, url))
        })
        .collect();

    Ok(candidates)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

use std::{borrow::Cow, sync::OnceLock};

use regex::{Regex, RegexBuilder};

use crate::{airport::AirportRecord, Error, Result};

/// Words and punctuation that say nothing about where an airport is.
const NOISE: &str = r"(?i)International|Airport|heliport|\(|\)|:";

/// A case insensitive pattern searched for in candidate titles.
/// A lower `tier` is a more important term.
#[derive(Debug, Clone)]
pub struct MatchTerm {
    pub pattern: Regex,
    pub tier: usize,
    text: String,
}

impl MatchTerm {
    /// The term is matched literally, regex metacharacters in `text` are escaped.
    pub fn new(text: &str, tier: usize) -> Result<Self> {
        let pattern = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern,
            tier,
            text: text.to_string(),
        })
    }

    /// The term as it was extracted, before escaping.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_match(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }
}

/// Builds the ordered term list for an airport:
/// first airport name token, every served city, then the rest of the name.
///
/// Airports that serve no city are rejected with [`Error::NoServedCities`].
pub fn extract_terms(airport: &AirportRecord) -> Result<Vec<MatchTerm>> {
    let name = strip_noise(&airport.name);
    let cities = strip_noise(&airport.served_cities);

    let cities: Vec<&str> = cities
        .split(',')
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .collect();
    if cities.is_empty() {
        return Err(Error::NoServedCities(airport.id));
    }

    // The name is important since the wiki doesn't always list the city it serves.
    let mut name_tokens = name.split_whitespace();
    let primary = name_tokens.next();

    primary
        .into_iter()
        .chain(cities)
        .chain(name_tokens)
        .enumerate()
        .map(|(tier, text)| MatchTerm::new(text, tier))
        .collect()
}

fn strip_noise(text: &str) -> Cow<'_, str> {
    static NOISE_RE: OnceLock<Regex> = OnceLock::new();
    NOISE_RE
        .get_or_init(|| Regex::new(NOISE).expect("noise pattern is valid"))
        .replace_all(text, "")
}

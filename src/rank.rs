use crate::{score::score_title, terms::MatchTerm};

/// One link from the search result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub url: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A candidate page that matched at least one term of an airport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    pub airport_id: u64,
    pub url: String,
    pub rank: u32,
    pub title: String,
}

/// Scores every candidate and returns the ones with a non-zero rank,
/// best first. Equal ranks keep the order they had on the page.
pub fn rank_candidates(
    airport_id: u64,
    candidates: &[Candidate],
    terms: &[MatchTerm],
) -> Vec<ScoredMatch> {
    let mut ranked: Vec<ScoredMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            let rank = score_title(&candidate.title, terms);
            (rank > 0).then(|| ScoredMatch {
                airport_id,
                url: candidate.url.clone(),
                rank,
                title: candidate.title.clone(),
            })
        })
        .collect();

    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.rank.cmp(&a.rank));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{airport::AirportRecord, terms::extract_terms};

    fn sfo_terms() -> Vec<MatchTerm> {
        extract_terms(&AirportRecord {
            id: 1,
            iata_code: "SFO".into(),
            name: "San Francisco International Airport".into(),
            served_cities: "San Francisco".into(),
        })
        .unwrap()
    }

    #[test]
    fn drops_zero_rank_candidates() {
        let candidates = [
            Candidate::new("San Francisco travel guide", "/wiki/San_Francisco"),
            Candidate::new("France", "/wiki/France"),
        ];
        let ranked = rank_candidates(1, &candidates, &sfo_terms());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].url, "/wiki/San_Francisco");
        assert_eq!(ranked[0].rank, 1501);
        assert_eq!(ranked[0].airport_id, 1);
    }

    #[test]
    fn sorts_descending_and_keeps_page_order_on_ties() {
        let candidates = [
            Candidate::new("Francisco", "/a"),
            Candidate::new("San Jose", "/b"),
            Candidate::new("francisco again", "/c"),
            Candidate::new("San Francisco", "/d"),
            Candidate::new("Santa Cruz", "/e"),
        ];
        let ranked = rank_candidates(1, &candidates, &sfo_terms());
        let order: Vec<(&str, u32)> = ranked.iter().map(|m| (m.url.as_str(), m.rank)).collect();

        assert_eq!(
            order,
            [("/d", 1501), ("/b", 500), ("/e", 500), ("/a", 1), ("/c", 1)]
        );
    }

    #[test]
    fn no_candidates_or_no_matches_yield_nothing() {
        assert!(rank_candidates(1, &[], &sfo_terms()).is_empty());
        assert!(rank_candidates(1, &[Candidate::new("Oslo", "/o")], &sfo_terms()).is_empty());
    }

    #[test]
    fn ranking_the_same_page_twice_is_identical() {
        let candidates = [
            Candidate::new("San Francisco", "/d"),
            Candidate::new("Francisco", "/a"),
        ];
        let terms = sfo_terms();
        assert_eq!(
            rank_candidates(1, &candidates, &terms),
            rank_candidates(1, &candidates, &terms)
        );
    }
}

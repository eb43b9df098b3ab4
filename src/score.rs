use crate::terms::MatchTerm;

/// Bonus for a title containing the airport's primary name token.
pub const AIRPORT_NAME_BONUS: u32 = 500;
/// Bonus for a title containing the first served city.
pub const FIRST_CITY_BONUS: u32 = 1000;

/// Scores a candidate title against an ordered term list.
///
/// The airport name and the first city carry fixed bonuses, every other term
/// is worth `terms.len() - tier`. This keeps broad names like a country far
/// below a title that matches both airport and city.
pub fn score_title(title: &str, terms: &[MatchTerm]) -> u32 {
    let term_count = terms.len();
    terms
        .iter()
        .filter(|term| term.is_match(title))
        .map(|term| match term.tier {
            0 => AIRPORT_NAME_BONUS,
            1 => FIRST_CITY_BONUS,
            tier => term_count.saturating_sub(tier) as u32,
        })
        .sum()
}

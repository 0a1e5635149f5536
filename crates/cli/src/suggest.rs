use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};

/// Closest entity names to a misspelled one, best first
pub(crate) fn suggest<'a>(query: &str, names: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    let mut scored: Vec<(&str, u32)> = names
        .filter_map(|name| {
            let haystack = Utf32String::from(name);
            pattern
                .score(haystack.slice(..), &mut matcher)
                .map(|score| (name, score))
        })
        .collect();

    // Score descending, then name for a stable order
    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}

//! Brute-force search over concrete candidate choices.
//!
//! Every combination of one candidate per requirement is searched separately, so
//! the work grows with the product of the candidate-list sizes. Nothing here
//! bounds that product: callers check [`combination_count`] first. When "any one
//! of these entities" is acceptable, [`PathFinder::find_path`] answers the same
//! question in a single search.

use crate::finder::PathFinder;
use itertools::Itertools;
use serde::Serialize;

/// Winning path plus the concrete entities chosen for the requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePath {
    pub path: Vec<String>,

    /// One entity per requirement, duplicates collapsed, first occurrence kept
    pub chosen: Vec<String>,
}

/// Number of combinations a candidate search would try (saturating)
pub fn combination_count<S>(candidates: &[Vec<S>]) -> usize {
    candidates
        .iter()
        .fold(1usize, |acc, list| acc.saturating_mul(list.len()))
}

impl PathFinder<'_> {
    /// Shortest path from `start` to `end` passing through one chosen entity of
    /// every candidate list. The first combination wins ties.
    pub fn find_path_with_candidates<S: AsRef<str>>(
        &self,
        start: &str,
        end: &str,
        candidates: &[Vec<S>],
    ) -> Option<CandidatePath> {
        let combinations: Vec<Vec<&str>> = if candidates.is_empty() {
            vec![Vec::new()]
        } else {
            candidates
                .iter()
                .map(|list| list.iter().map(|name| name.as_ref().trim()))
                .multi_cartesian_product()
                .collect()
        };

        log::debug!(
            "Trying {} candidate combinations for {start} -> {end}",
            combinations.len()
        );

        let mut best: Option<CandidatePath> = None;
        for combination in combinations {
            let required: Vec<&str> = combination.into_iter().unique().collect();
            let Some(path) = self.find_path_through(start, end, &required) else {
                continue;
            };
            let shorter = best
                .as_ref()
                .map_or(true, |current| path.len() < current.path.len());
            if shorter {
                best = Some(CandidatePath {
                    path,
                    chosen: required.into_iter().map(String::from).collect(),
                });
            }
        }

        best
    }
}

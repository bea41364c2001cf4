//! Confidence scoring for search results.

use serde::{Deserialize, Serialize};

use crate::search::Candidate;

/// Edit distances above this value carry no confidence.
pub const MAX_SCORED_DISTANCE: usize = 5;

/// A scored keyword prediction for one dialect word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordPrediction {
    /// Canonical vocabulary form.
    pub keyword: String,
    /// Confidence on a 0..=5 scale; 5 means an exact match.
    pub score: u8,
}

/// Convert an edit distance into a bounded confidence score.
///
/// Distance 0 scores 5; every additional edit costs one point; anything
/// beyond [`MAX_SCORED_DISTANCE`] is a long shot and scores 0.
pub fn confidence(distance: usize) -> u8 {
    if distance > MAX_SCORED_DISTANCE {
        0
    } else {
        (MAX_SCORED_DISTANCE - distance) as u8
    }
}

/// Score the top-ranked candidate of a search result.
///
/// The first candidate holds the canonical estimates for the original input
/// word; its matches are truncated to `max_return` entries and mapped to
/// scored predictions. An empty candidate list yields an empty result.
pub fn score_candidates(candidates: &[Candidate], max_return: usize) -> Vec<KeywordPrediction> {
    let Some(first) = candidates.first() else {
        return Vec::new();
    };

    first
        .matches
        .iter()
        .take(max_return)
        .map(|m| KeywordPrediction {
            keyword: m.canonical.clone(),
            score: confidence(m.distance),
        })
        .collect()
}

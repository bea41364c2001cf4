//! Tiered rewrite search over the vocabulary.
//!
//! The search perturbs a normalized dialect word with substitution rules,
//! tier by tier, looking for the vocabulary form it can reach with the
//! smallest edit distance. It is a bounded best-first expansion: only
//! rewrites that strictly improve on the candidate they were derived from
//! are explored further, and after every tier the working set is compacted
//! down to the candidates at the minimum distance found so far.

use std::sync::Arc;

use ahash::AHashSet;

use crate::error::Result;
use crate::rules::RuleTiers;
use crate::vocabulary::{VocabularyIndex, VocabularyMatch};

/// A variant of the input word produced during search, together with its
/// best known distance to the vocabulary.
///
/// Candidates are ephemeral: they live for a single search invocation.
/// `matches` holds every canonical form tied at `distance` for this variant,
/// deduplicated and sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub variant: String,
    pub matches: Vec<VocabularyMatch>,
    pub distance: usize,
}

/// Tier-bounded best-first rewrite search.
///
/// The vocabulary is shared read-only across searches; a search never
/// mutates it, so batches of words can run in parallel against the same
/// index.
pub struct RewriteSearch {
    index: Arc<VocabularyIndex>,
    tiers: RuleTiers,
    distinct_distances: usize,
}

impl RewriteSearch {
    /// Create a new search over the given vocabulary and rule tiers.
    pub fn new(index: Arc<VocabularyIndex>, tiers: RuleTiers) -> Self {
        RewriteSearch {
            index,
            tiers,
            distinct_distances: 1,
        }
    }

    /// Set how many distinct distance values each vocabulary lookup keeps.
    pub fn with_distinct_distances(mut self, distinct_distances: usize) -> Self {
        self.distinct_distances = distinct_distances;
        self
    }

    /// Get the vocabulary index backing this search.
    pub fn index(&self) -> &Arc<VocabularyIndex> {
        &self.index
    }

    /// Run the rewrite search for a normalized word.
    ///
    /// Returns the candidates tied at the minimal distance found, sorted
    /// ascending by distance, deduplicated by variant (first occurrence
    /// wins). The unmodified word is the seed candidate, so the result never
    /// has a worse distance than the plain vocabulary lookup and is never
    /// empty.
    ///
    /// Two behaviors are load-bearing and kept exactly:
    ///
    /// - A rewrite is appended only when it strictly improves on the
    ///   candidate it was derived from, even if it would still beat the
    ///   global minimum. This bounds branching; the compaction step keeps
    ///   the global minimum authoritative.
    /// - The search stops at the first distance-0 hit. Later tiers are never
    ///   consulted once an exact match exists, even a coincidental one, so a
    ///   distance-0 result carries no semantic verification.
    pub fn search(&self, word: &str) -> Result<Vec<Candidate>> {
        let seed = self.lookup(word)?;
        let mut min_distance = seed.distance;
        let mut working = vec![seed];

        for tier in self.tiers.iter() {
            // The worklist grows while it is being visited: candidates
            // appended during a tier pass are expanded in that same pass.
            let mut position = 0;

            while position < working.len() {
                let variant = working[position].variant.clone();
                let parent_distance = working[position].distance;
                position += 1;

                if parent_distance > min_distance {
                    continue;
                }

                for rule in tier {
                    if !variant.contains(rule.source.as_str()) {
                        continue;
                    }

                    for replacement in &rule.replacements {
                        let rewritten = variant
                            .replacen(rule.source.as_str(), replacement, 1)
                            .trim()
                            .to_string();
                        let candidate = self.lookup(&rewritten)?;

                        if candidate.distance < parent_distance {
                            if candidate.distance < min_distance {
                                min_distance = candidate.distance;
                            }
                            working.push(candidate);
                        }
                    }
                }
            }

            working = compact(working, min_distance);

            if min_distance == 0 {
                break;
            }
        }

        Ok(working)
    }

    fn lookup(&self, variant: &str) -> Result<Candidate> {
        let (matches, distance) = self.index.nearest(variant, self.distinct_distances)?;

        Ok(Candidate {
            variant: variant.to_string(),
            matches,
            distance,
        })
    }
}

/// Keep only candidates at the minimum distance, deduplicated by variant
/// (first occurrence wins), sorted ascending by distance.
fn compact(candidates: Vec<Candidate>, min_distance: usize) -> Vec<Candidate> {
    let mut seen: AHashSet<String> = AHashSet::new();
    let mut kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|candidate| {
            candidate.distance == min_distance && seen.insert(candidate.variant.clone())
        })
        .collect();

    kept.sort_by_key(|candidate| candidate.distance);
    kept
}

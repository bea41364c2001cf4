//! Vocabulary of known keyword forms and nearest-neighbor lookup.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrefwoordError};
use crate::levenshtein::levenshtein_distance;
use crate::normalize::Normalizer;

/// A single canonical keyword together with its precomputed comparison form.
///
/// Entries are immutable: the vocabulary is loaded once at startup and shared
/// read-only by all searches. The serde aliases accept vocabulary files
/// produced with the `modified`/`trefwoord` field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Normalized comparison form, produced by the [`Normalizer`].
    #[serde(alias = "modified")]
    pub normalized: String,
    /// Canonical display form shown to reviewers.
    #[serde(alias = "trefwoord")]
    pub canonical: String,
}

/// A canonical form together with its edit distance to the looked-up word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyMatch {
    pub canonical: String,
    pub distance: usize,
}

/// Read-only index over all known vocabulary entries.
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    entries: Vec<VocabularyEntry>,
}

impl VocabularyIndex {
    /// Create an index from prepared entries.
    pub fn from_entries(entries: Vec<VocabularyEntry>) -> Self {
        VocabularyIndex { entries }
    }

    /// Create an index from canonical words, deriving the comparison forms
    /// with the given normalizer.
    pub fn from_canonical_words<I, S>(normalizer: &Normalizer, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = words
            .into_iter()
            .map(|word| VocabularyEntry {
                normalized: normalizer.normalize(word.as_ref(), false, true),
                canonical: word.as_ref().to_string(),
            })
            .collect();

        VocabularyIndex { entries }
    }

    /// Load a vocabulary from a JSON file (an array of entry objects).
    ///
    /// An empty or malformed vocabulary is a configuration error, raised
    /// here once at startup rather than per word.
    pub fn load_from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let entries: Vec<VocabularyEntry> = serde_json::from_reader(reader)
            .map_err(|e| TrefwoordError::configuration(format!("malformed vocabulary: {e}")))?;

        if entries.is_empty() {
            return Err(TrefwoordError::configuration("vocabulary is empty"));
        }

        Ok(VocabularyIndex { entries })
    }

    /// Number of entries in the vocabulary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the vocabulary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all entries.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Find the vocabulary entries closest to `word` under edit distance.
    ///
    /// `limit_distinct_distances` restricts the result to entries whose
    /// distance is among the N smallest *distinct* distance values observed;
    /// ties at the boundary distance are all kept. The result is
    /// deduplicated by canonical form (smallest distance per form wins) and
    /// sorted ascending by distance; vocabulary order breaks ties, so the
    /// ordering is deterministic. The returned minimum is taken over the
    /// filtered result set.
    ///
    /// Fails only when the vocabulary is empty; otherwise at least one match
    /// is returned.
    pub fn nearest(
        &self,
        word: &str,
        limit_distinct_distances: usize,
    ) -> Result<(Vec<VocabularyMatch>, usize)> {
        if self.entries.is_empty() {
            return Err(TrefwoordError::configuration("vocabulary is empty"));
        }

        let mut scored: Vec<(usize, &VocabularyEntry)> = self
            .entries
            .iter()
            .map(|entry| (levenshtein_distance(word, &entry.normalized), entry))
            .collect();

        if limit_distinct_distances > 0 {
            let mut distinct: Vec<usize> = scored.iter().map(|(d, _)| *d).collect();
            distinct.sort_unstable();
            distinct.dedup();
            distinct.truncate(limit_distinct_distances);

            if let Some(&boundary) = distinct.last() {
                scored.retain(|(d, _)| *d <= boundary);
            }
        }

        // Deduplicate by canonical form: the same keyword may be listed
        // under several normalized spellings.
        let mut by_canonical: AHashMap<&str, usize> = AHashMap::new();
        let mut matches: Vec<VocabularyMatch> = Vec::new();

        for (distance, entry) in scored {
            match by_canonical.get(entry.canonical.as_str()) {
                Some(&index) => {
                    if distance < matches[index].distance {
                        matches[index].distance = distance;
                    }
                }
                None => {
                    by_canonical.insert(entry.canonical.as_str(), matches.len());
                    matches.push(VocabularyMatch {
                        canonical: entry.canonical.clone(),
                        distance,
                    });
                }
            }
        }

        matches.sort_by_key(|m| m.distance);
        let min_distance = matches.first().map(|m| m.distance).unwrap_or_default();

        Ok((matches, min_distance))
    }
}

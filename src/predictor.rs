//! High-level keyword prediction facade.
//!
//! [`KeywordPredictor`] wires the normalizer, the rewrite search and the
//! scorer together behind a single entry point, the way callers consume the
//! library: raw attestation in, scored predictions out.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize::Normalizer;
use crate::rules::RuleTiers;
use crate::score::{KeywordPrediction, score_candidates};
use crate::search::RewriteSearch;
use crate::vocabulary::VocabularyIndex;

/// Configuration for the keyword predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Maximum number of predictions to return per word.
    pub max_return: usize,
    /// Distinct distance values each vocabulary lookup keeps.
    pub distinct_distances: usize,
    /// Keep only the first spelling of " - "-separated alternatives.
    pub split_variants: bool,
    /// Strip hyphens, periods and whitespace before comparison.
    pub strip_separators: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        PredictorConfig {
            max_return: 1,
            distinct_distances: 1,
            split_variants: true,
            strip_separators: true,
        }
    }
}

/// Rule-based dialect-to-keyword predictor.
///
/// The vocabulary index is shared read-only; one predictor can serve any
/// number of words, sequentially or in parallel.
pub struct KeywordPredictor {
    normalizer: Normalizer,
    search: RewriteSearch,
    config: PredictorConfig,
}

impl KeywordPredictor {
    /// Create a predictor with the default configuration.
    pub fn new(index: Arc<VocabularyIndex>, tiers: RuleTiers) -> Result<Self> {
        Self::with_config(index, tiers, PredictorConfig::default())
    }

    /// Create a predictor with a custom configuration.
    pub fn with_config(
        index: Arc<VocabularyIndex>,
        tiers: RuleTiers,
        config: PredictorConfig,
    ) -> Result<Self> {
        let normalizer = Normalizer::new()?;
        let search =
            RewriteSearch::new(index, tiers).with_distinct_distances(config.distinct_distances);

        Ok(KeywordPredictor {
            normalizer,
            search,
            config,
        })
    }

    /// Get the predictor configuration.
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Normalize a raw attestation with the configured flags.
    pub fn normalize(&self, raw_word: &str) -> String {
        self.normalizer.normalize(
            raw_word,
            self.config.split_variants,
            self.config.strip_separators,
        )
    }

    /// Predict keywords for a raw dialect word.
    pub fn predict(&self, raw_word: &str) -> Result<Vec<KeywordPrediction>> {
        let cleaned = self.normalize(raw_word);
        self.predict_cleaned(&cleaned)
    }

    /// Predict keywords for an already-normalized word.
    pub fn predict_cleaned(&self, cleaned: &str) -> Result<Vec<KeywordPrediction>> {
        let candidates = self.search.search(cleaned)?;
        Ok(score_candidates(&candidates, self.config.max_return))
    }

    /// Predict keywords for a batch of already-normalized words.
    ///
    /// Each word's search is independent; the batch runs in parallel over
    /// the shared vocabulary.
    pub fn predict_cleaned_batch(
        &self,
        cleaned_words: &[String],
    ) -> Result<Vec<Vec<KeywordPrediction>>> {
        cleaned_words
            .par_iter()
            .map(|word| self.predict_cleaned(word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RewriteRule;
    use crate::vocabulary::VocabularyEntry;

    fn index(pairs: &[(&str, &str)]) -> Arc<VocabularyIndex> {
        let entries = pairs
            .iter()
            .map(|(normalized, canonical)| VocabularyEntry {
                normalized: normalized.to_string(),
                canonical: canonical.to_string(),
            })
            .collect();
        Arc::new(VocabularyIndex::from_entries(entries))
    }

    fn laaien_tiers() -> RuleTiers {
        RuleTiers::new(vec![vec![RewriteRule::new("ai", &["aai"])]])
    }

    #[test]
    fn test_predict_exact_rewrite() {
        let predictor =
            KeywordPredictor::new(index(&[("laaien", "lawaaien")]), laaien_tiers()).unwrap();

        let predictions = predictor.predict("laien").unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].keyword, "lawaaien");
        assert_eq!(predictions[0].score, 5);
    }

    #[test]
    fn test_predict_normalizes_first() {
        let predictor =
            KeywordPredictor::new(index(&[("laaien", "lawaaien")]), laaien_tiers()).unwrap();

        // Markup, clitics and the secondary spelling are stripped before
        // the search runs.
        let predictions = predictor.predict("'t <i>la-ien</i> - flaaien").unwrap();
        assert_eq!(predictions[0].keyword, "lawaaien");
        assert_eq!(predictions[0].score, 5);
    }

    #[test]
    fn test_predict_far_word_scores_zero() {
        let predictor = KeywordPredictor::new(
            index(&[("abcdefghij", "abcdefghij")]),
            RuleTiers::default(),
        )
        .unwrap();

        let predictions = predictor.predict("zzz").unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].score, 0);
    }

    #[test]
    fn test_max_return_limits_predictions() {
        let config = PredictorConfig {
            max_return: 2,
            distinct_distances: 2,
            ..Default::default()
        };
        let predictor = KeywordPredictor::with_config(
            index(&[("hoes", "hoes"), ("hoed", "hoed"), ("hoek", "hoek")]),
            RuleTiers::default(),
            config,
        )
        .unwrap();

        let predictions = predictor.predict("hoes").unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].keyword, "hoes");
        assert_eq!(predictions[0].score, 5);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let predictor =
            KeywordPredictor::new(index(&[("laaien", "lawaaien")]), laaien_tiers()).unwrap();

        let words: Vec<String> = ["laien", "laaien", "zzz"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        let batch = predictor.predict_cleaned_batch(&words).unwrap();
        for (word, batch_result) in words.iter().zip(&batch) {
            let sequential = predictor.predict_cleaned(word).unwrap();
            assert_eq!(batch_result, &sequential);
        }
    }

    #[test]
    fn test_empty_vocabulary_fails_before_search() {
        let predictor = KeywordPredictor::new(
            Arc::new(VocabularyIndex::from_entries(Vec::new())),
            RuleTiers::saxon(),
        )
        .unwrap();

        assert!(predictor.predict("hoes").is_err());
    }
}

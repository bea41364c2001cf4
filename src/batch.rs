//! Batch processing of uploaded dialect word lists.
//!
//! One upload is a plain-text file with one word per line. The batch
//! pipeline deduplicates and sorts the words, normalizes them, runs the
//! rule-based predictor per word in parallel, invokes the phonetic
//! predictor once for the whole batch, and renders one tab-separated row
//! per word.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::phonetic::{PHONETIC_SCORE, PhoneticPredictor};
use crate::predictor::KeywordPredictor;
use crate::score::KeywordPrediction;

/// Header line of the TSV report.
pub const OUTPUT_HEADER: &str = "Dialect Word\tFirst Estimate\tSecond Estimate";

/// One emitted row per uploaded dialect word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    /// The raw dialect word as uploaded.
    pub dialect_word: String,
    /// Top rule-based prediction, if the search produced any.
    pub rule_based: Option<KeywordPrediction>,
    /// Phonetic transliteration, if the external predictor resolved one.
    pub phonetic: Option<String>,
}

impl OutputRow {
    /// Render the row as tab-separated fields.
    ///
    /// The rule-based placeholder is a bare `-`; the phonetic placeholder is
    /// `- (-)`. Resolved estimates carry their confidence in parentheses
    /// (computed for the rule-based column, the fixed constant for the
    /// phonetic one).
    pub fn to_tsv(&self) -> String {
        let first_estimate = match &self.rule_based {
            Some(prediction) => format!("{} ({})", prediction.keyword, prediction.score),
            None => "-".to_string(),
        };
        let second_estimate = match &self.phonetic {
            Some(transliteration) => format!("{transliteration} ({PHONETIC_SCORE})"),
            None => "- (-)".to_string(),
        };

        format!("{}\t{}\t{}", self.dialect_word, first_estimate, second_estimate)
    }
}

/// Read an uploaded word list: one word per line, trimmed, deduplicated and
/// sorted; empty lines are dropped.
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = BTreeSet::new();

    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_string());
        }
    }

    Ok(words.into_iter().collect())
}

/// Run both predictors over a batch of raw dialect words.
///
/// The phonetic predictor is called once for the whole batch; the rule-based
/// predictor runs per word in parallel. Rows are aligned with the input
/// order.
pub fn process_words(
    predictor: &KeywordPredictor,
    phonetic: &dyn PhoneticPredictor,
    raw_words: &[String],
) -> Result<Vec<OutputRow>> {
    let cleaned: Vec<String> = raw_words.iter().map(|w| predictor.normalize(w)).collect();

    let transliterations = phonetic.transliterate_batch(&cleaned)?;
    let rule_based = predictor.predict_cleaned_batch(&cleaned)?;

    let rows = raw_words
        .iter()
        .zip(rule_based)
        .zip(transliterations)
        .map(|((raw_word, mut predictions), transliteration)| OutputRow {
            dialect_word: raw_word.clone(),
            rule_based: if predictions.is_empty() {
                None
            } else {
                Some(predictions.remove(0))
            },
            phonetic: transliteration,
        })
        .collect();

    Ok(rows)
}

/// Write rows as a TSV report, header first.
pub fn write_rows<W: Write>(writer: &mut W, rows: &[OutputRow]) -> Result<()> {
    writeln!(writer, "{OUTPUT_HEADER}")?;
    for row in rows {
        writeln!(writer, "{}", row.to_tsv())?;
    }

    Ok(())
}

/// Process an uploaded word-list file into a TSV report file.
///
/// Returns the number of processed words.
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
    predictor: &KeywordPredictor,
    phonetic: &dyn PhoneticPredictor,
    input: P,
    output: Q,
) -> Result<usize> {
    let words = read_word_list(input)?;
    info!("processing {} dialect words", words.len());

    let rows = process_words(predictor, phonetic, &words)?;

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, &rows)?;
    writer.flush()?;

    info!("wrote {} rows", rows.len());
    Ok(rows.len())
}

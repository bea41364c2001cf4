//! Word normalization for dialect attestations.
//!
//! Raw dialect entries carry markup, clitic fragments, alternative spellings
//! and typographic noise that must not reach the edit-distance comparison.
//! [`Normalizer`] reduces a raw attestation to the canonical comparison form.
//! The step order is fixed; rearranging it changes which fragments survive.

use regex::Regex;

use crate::error::Result;

/// Combining diacritic code points stripped from compound letters. The base
/// letter itself is kept.
const COMBINING_MARKS: [char; 7] = [
    '\u{0300}', // grave
    '\u{0302}', // circumflex
    '\u{0303}', // tilde
    '\u{0304}', // macron
    '\u{0306}', // breve
    '\u{0308}', // diaeresis
    '\u{030C}', // caron
];

/// Separator used when an entry records two alternative spellings.
const VARIANT_SEPARATOR: &str = " - ";

/// Deterministic cleanup of raw dialect attestations.
///
/// `normalize` is pure and total: it never fails, and in the worst case
/// returns an empty string. Re-applying it to its own output yields the same
/// output.
#[derive(Debug)]
pub struct Normalizer {
    markup: Regex,
    leading_clitic: Regex,
    trailing_clitic: Regex,
    reflexive: Regex,
    edge_hyphens: Regex,
    punctuation: Regex,
    separators: Regex,
}

impl Normalizer {
    /// Create a new normalizer, compiling the fixed cleanup patterns.
    pub fn new() -> Result<Self> {
        Ok(Normalizer {
            // Inline markup such as <u>, <i>, <b>.
            markup: compile(r"<[^>]*>")?,
            // Clitic fragments like "'t ", "'n ", "'s " at the start...
            leading_clitic: compile(r"^[’`'ʼ]*[tns]\s")?,
            // ...and their mirrored form ", 't" at the end.
            trailing_clitic: compile(r",\s[’`'ʼ][tns]$")?,
            // Trailing reflexive fragment.
            reflexive: compile(r"em/zich$")?,
            // Hyphens at the edges or in parentheses.
            edge_hyphens: compile(r"^[-‑]+|\([-‑]\)|[-‑]+$")?,
            punctuation: compile(r"[*!?,`’‘'ʼ/()0-9]")?,
            separators: compile(r"[-‑–.\s]")?,
        })
    }

    /// Clean a raw dialect attestation into its comparison form.
    ///
    /// When `split_variants` is set and the entry records two alternative
    /// spellings (as in "laau - flaau"), only the first spelling is kept.
    /// When `strip_separators` is set, all hyphen-like characters, periods
    /// and whitespace are removed, producing the tight form used for
    /// distance comparison.
    pub fn normalize(&self, raw: &str, split_variants: bool, strip_separators: bool) -> String {
        let mut word: String = raw
            .chars()
            .filter(|c| !COMBINING_MARKS.contains(c))
            .collect();

        word = self.markup.replace_all(&word, "").trim().to_string();
        word = self.leading_clitic.replace_all(&word, "").trim().to_string();
        word = self
            .trailing_clitic
            .replace_all(&word, "")
            .trim()
            .to_string();
        word = self.reflexive.replace_all(&word, "").trim().to_string();
        word = self.edge_hyphens.replace_all(&word, "").trim().to_string();
        word = self.punctuation.replace_all(&word, "").trim().to_string();

        if split_variants
            && let Some(index) = word.find(VARIANT_SEPARATOR)
        {
            word.truncate(index);
            word = word.trim().to_string();
        }

        if strip_separators {
            word = self.separators.replace_all(&word, "").to_string();
        }

        word.trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| crate::error::TrefwoordError::Anyhow(anyhow::Error::from(e)))
}

//! External phonetic transliteration boundary.
//!
//! The phonetic predictor is an opaque external capability: a batch of
//! cleaned words goes in, an aligned list of transliterations comes out,
//! with `None` for words the tool could not resolve. The core never treats
//! an unresolved word as an error; the row builder renders it as the
//! documented placeholder.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use ahash::AHashMap;
use log::warn;
use tempfile::NamedTempFile;

use crate::error::{Result, TrefwoordError};

/// Fixed confidence reported for phonetic transliterations.
pub const PHONETIC_SCORE: u8 = 3;

/// A batch transliteration capability.
pub trait PhoneticPredictor: Send + Sync {
    /// Transliterate a batch of cleaned words. The result is aligned with
    /// the input; `None` marks a word the predictor could not resolve.
    fn transliterate_batch(&self, words: &[String]) -> Result<Vec<Option<String>>>;
}

/// Predictor used when no phonetic model is configured.
#[derive(Debug, Default)]
pub struct UnavailablePredictor;

impl PhoneticPredictor for UnavailablePredictor {
    fn transliterate_batch(&self, words: &[String]) -> Result<Vec<Option<String>>> {
        Ok(vec![None; words.len()])
    }
}

/// Shells out to a phonetisaurus-style grapheme-to-phoneme tool.
///
/// The tool reads a word-list file (one word per line) and writes
/// tab-separated `word<TAB>transliteration` lines to stdout; words it cannot
/// process are simply missing from the output.
pub struct CommandPredictor {
    program: String,
    model_path: PathBuf,
}

impl CommandPredictor {
    /// Create a predictor invoking `phonetisaurus-apply` with the given
    /// model.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        CommandPredictor {
            program: "phonetisaurus-apply".to_string(),
            model_path: model_path.into(),
        }
    }

    /// Override the program invoked for the batch.
    pub fn with_program<S: Into<String>>(mut self, program: S) -> Self {
        self.program = program.into();
        self
    }
}

impl PhoneticPredictor for CommandPredictor {
    fn transliterate_batch(&self, words: &[String]) -> Result<Vec<Option<String>>> {
        // The tool accepts files as input, so the batch is written to a
        // temporary word list first.
        let mut word_list = NamedTempFile::new()?;
        for word in words {
            writeln!(word_list, "{word}")?;
        }
        word_list.flush()?;

        let output = Command::new(&self.program)
            .arg("--model")
            .arg(&self.model_path)
            .arg("--word_list")
            .arg(word_list.path())
            .arg("-n")
            .arg("1")
            .output()
            .map_err(|e| {
                TrefwoordError::phonetic(format!("failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            warn!("{} exited with {}", self.program, output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(align_output(&stdout, words))
    }
}

/// Align tab-separated tool output with the input word list, filling the
/// blanks for words the tool did not return.
fn align_output(stdout: &str, words: &[String]) -> Vec<Option<String>> {
    let mut resolved: AHashMap<&str, &str> = AHashMap::new();

    for line in stdout.lines() {
        let mut fields = line.split('\t');
        if let (Some(word), Some(transliteration)) = (fields.next(), fields.next())
            && !transliteration.is_empty()
        {
            resolved.insert(word, transliteration);
        }
    }

    words
        .iter()
        .map(|word| resolved.get(word.as_str()).map(|t| t.to_string()))
        .collect()
}

//! Command line argument parsing for the trefwoord CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Trefwoord - dialect-to-keyword prediction
#[derive(Parser, Debug, Clone)]
#[command(name = "trefwoord")]
#[command(about = "Predict standardized keywords for dialect word lists")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TrefwoordArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TrefwoordArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for prediction results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict keywords for a single dialect word
    Predict(PredictArgs),

    /// Process a word-list file into a TSV report
    Process(ProcessArgs),

    /// Show the normalized form of a word
    Normalize(NormalizeArgs),
}

/// Arguments for single-word prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Dialect word to predict keywords for
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Vocabulary JSON file (array of normalized/canonical entries)
    #[arg(long, value_name = "FILE")]
    pub vocabulary: PathBuf,

    /// Rule tiers JSON file (defaults to the built-in Saxon tiers)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Maximum number of predictions to return
    #[arg(short, long, default_value = "1")]
    pub max_return: usize,

    /// Distinct distance values each vocabulary lookup keeps
    #[arg(long, default_value = "1")]
    pub distinct_distances: usize,
}

/// Arguments for batch processing
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Input word list (plain text, one word per line)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output TSV report path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Vocabulary JSON file (array of normalized/canonical entries)
    #[arg(long, value_name = "FILE")]
    pub vocabulary: PathBuf,

    /// Rule tiers JSON file (defaults to the built-in Saxon tiers)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Phonetic model file; without it the phonetic column stays empty
    #[arg(long, value_name = "FST")]
    pub phonetic_model: Option<PathBuf>,

    /// Program invoked for phonetic transliteration
    #[arg(long, default_value = "phonetisaurus-apply")]
    pub phonetic_program: String,
}

/// Arguments for the normalize helper
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Word to normalize
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Keep only the first spelling of " - "-separated alternatives
    #[arg(long)]
    pub split: bool,

    /// Keep hyphens, periods and whitespace instead of stripping them
    #[arg(long)]
    pub keep_separators: bool,
}

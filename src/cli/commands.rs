//! Command implementations for the trefwoord CLI.

use std::sync::Arc;

use log::info;

use crate::batch;
use crate::cli::args::*;
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::phonetic::{CommandPredictor, PhoneticPredictor, UnavailablePredictor};
use crate::predictor::{KeywordPredictor, PredictorConfig};
use crate::rules::RuleTiers;
use crate::score::KeywordPrediction;
use crate::vocabulary::VocabularyIndex;

/// Execute a CLI command.
pub fn execute_command(args: TrefwoordArgs) -> Result<()> {
    match &args.command {
        Command::Predict(predict_args) => predict_word(predict_args.clone(), &args),
        Command::Process(process_args) => process_word_list(process_args.clone(), &args),
        Command::Normalize(normalize_args) => normalize_word(normalize_args.clone(), &args),
    }
}

/// Predict keywords for a single dialect word.
fn predict_word(args: PredictArgs, cli_args: &TrefwoordArgs) -> Result<()> {
    let index = Arc::new(VocabularyIndex::load_from_json_file(&args.vocabulary)?);
    info!("loaded {} vocabulary entries", index.len());

    let tiers = load_tiers(args.rules.as_deref())?;
    let config = PredictorConfig {
        max_return: args.max_return,
        distinct_distances: args.distinct_distances,
        ..Default::default()
    };
    let predictor = KeywordPredictor::with_config(index, tiers, config)?;

    let predictions = predictor.predict(&args.word)?;
    output_predictions(&args.word, &predictions, cli_args)
}

/// Process a word-list file into a TSV report.
fn process_word_list(args: ProcessArgs, cli_args: &TrefwoordArgs) -> Result<()> {
    let index = Arc::new(VocabularyIndex::load_from_json_file(&args.vocabulary)?);
    info!("loaded {} vocabulary entries", index.len());

    let tiers = load_tiers(args.rules.as_deref())?;
    let predictor = KeywordPredictor::new(index, tiers)?;

    let phonetic: Box<dyn PhoneticPredictor> = match &args.phonetic_model {
        Some(model) => {
            Box::new(CommandPredictor::new(model).with_program(args.phonetic_program.clone()))
        }
        None => Box::new(UnavailablePredictor),
    };

    let count = batch::process_file(&predictor, phonetic.as_ref(), &args.input, &args.output)?;

    if cli_args.verbosity() > 0 {
        println!(
            "Processed {count} words into {}",
            args.output.display()
        );
    }

    Ok(())
}

/// Show the normalized form of a word.
fn normalize_word(args: NormalizeArgs, cli_args: &TrefwoordArgs) -> Result<()> {
    let normalizer = Normalizer::new()?;
    let normalized = normalizer.normalize(&args.word, args.split, !args.keep_separators);

    match cli_args.output_format {
        OutputFormat::Human => println!("{normalized}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(&normalized)?),
    }

    Ok(())
}

fn load_tiers(path: Option<&std::path::Path>) -> Result<RuleTiers> {
    match path {
        Some(path) => RuleTiers::load_from_json_file(path),
        None => Ok(RuleTiers::saxon()),
    }
}

fn output_predictions(
    word: &str,
    predictions: &[KeywordPrediction],
    cli_args: &TrefwoordArgs,
) -> Result<()> {
    match cli_args.output_format {
        OutputFormat::Human => {
            if predictions.is_empty() {
                println!("{word}\t-");
            } else {
                for prediction in predictions {
                    println!("{word}\t{} ({})", prediction.keyword, prediction.score);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(predictions)?);
        }
    }

    Ok(())
}

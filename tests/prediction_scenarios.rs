//! Integration tests for the dialect-to-keyword prediction pipeline.

use std::io::Write;
use std::sync::Arc;

use trefwoord::batch::{self, OUTPUT_HEADER};
use trefwoord::error::{Result, TrefwoordError};
use trefwoord::normalize::Normalizer;
use trefwoord::phonetic::UnavailablePredictor;
use trefwoord::predictor::{KeywordPredictor, PredictorConfig};
use trefwoord::rules::{RewriteRule, RuleTiers};
use trefwoord::vocabulary::{VocabularyEntry, VocabularyIndex};

fn vocabulary(pairs: &[(&str, &str)]) -> Arc<VocabularyIndex> {
    let entries = pairs
        .iter()
        .map(|(normalized, canonical)| VocabularyEntry {
            normalized: normalized.to_string(),
            canonical: canonical.to_string(),
        })
        .collect();
    Arc::new(VocabularyIndex::from_entries(entries))
}

#[test]
fn test_rewrite_recovers_exact_keyword() -> Result<()> {
    // "laien" is distance 1 from the vocabulary form "laaien"; the ai -> aai
    // rule closes the gap to an exact match with full confidence.
    let index = vocabulary(&[("laaien", "lawaaien")]);
    let tiers = RuleTiers::new(vec![vec![RewriteRule::new("ai", &["aai"])]]);
    let predictor = KeywordPredictor::new(index, tiers)?;

    let predictions = predictor.predict("laien")?;
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].keyword, "lawaaien");
    assert_eq!(predictions[0].score, 5);

    Ok(())
}

#[test]
fn test_saxon_tiers_chain_within_one_pass() -> Result<()> {
    // "oetdôn" needs two independent tier-1 rewrites (oet -> uit and
    // dôn -> doen); the second applies to a candidate created during the
    // same pass.
    let index = vocabulary(&[("uitdoen", "uitdoen")]);
    let predictor = KeywordPredictor::new(index, RuleTiers::saxon())?;

    let predictions = predictor.predict("oetdôn")?;
    assert_eq!(predictions[0].keyword, "uitdoen");
    assert_eq!(predictions[0].score, 5);

    Ok(())
}

#[test]
fn test_distant_word_scores_zero() -> Result<()> {
    // No rule brings "xyzxyzxyz" anywhere near the vocabulary, so whatever
    // keyword is reported carries zero confidence.
    let index = vocabulary(&[("lawaaien", "lawaaien")]);
    let predictor = KeywordPredictor::new(index, RuleTiers::saxon())?;

    let predictions = predictor.predict("xyzxyzxyz")?;
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].score, 0);

    Ok(())
}

#[test]
fn test_tied_keywords_are_both_reported() -> Result<()> {
    let index = vocabulary(&[("hoes", "hoes"), ("hoed", "hoed")]);
    let config = PredictorConfig {
        max_return: 5,
        ..Default::default()
    };
    let predictor = KeywordPredictor::with_config(index, RuleTiers::default(), config)?;

    // "hoek" is distance 1 from both entries; the tie is kept, deduplicated
    // and reported in deterministic vocabulary order.
    let predictions = predictor.predict("hoek")?;
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].keyword, "hoes");
    assert_eq!(predictions[1].keyword, "hoed");
    assert_eq!(predictions[0].score, predictions[1].score);

    Ok(())
}

#[test]
fn test_empty_vocabulary_fails_at_load_time() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[]").unwrap();
    file.flush().unwrap();

    match VocabularyIndex::load_from_json_file(file.path()) {
        Err(TrefwoordError::Configuration(_)) => {}
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_normalizer_is_idempotent_on_real_attestations() -> Result<()> {
    let normalizer = Normalizer::new()?;
    let attestations = [
        "'t hu\u{0304}s",
        "<i>loopn</i>",
        "laau - flaau",
        "waskn em/zich",
        "(-)an-doon!",
    ];

    for raw in attestations {
        let once = normalizer.normalize(raw, true, true);
        assert_eq!(normalizer.normalize(&once, true, true), once);
    }

    Ok(())
}

#[test]
fn test_batch_pipeline_writes_report() -> Result<()> {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(input, "laien\nzzz\nlaien\n").unwrap();
    input.flush().unwrap();
    let output = tempfile::NamedTempFile::new().unwrap();

    let index = vocabulary(&[("laaien", "lawaaien")]);
    let tiers = RuleTiers::new(vec![vec![RewriteRule::new("ai", &["aai"])]]);
    let predictor = KeywordPredictor::new(index, tiers)?;

    let count = batch::process_file(
        &predictor,
        &UnavailablePredictor,
        input.path(),
        output.path(),
    )?;
    // Duplicate input words collapse into one row.
    assert_eq!(count, 2);

    let report = std::fs::read_to_string(output.path())?;
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], OUTPUT_HEADER);
    assert_eq!(lines[1], "laien\tlawaaien (5)\t- (-)");
    // "zzz" is far from everything: zero confidence, phonetic placeholder.
    assert_eq!(lines[2], "zzz\tlawaaien (0)\t- (-)");

    Ok(())
}

#[test]
fn test_search_result_never_worse_than_baseline() -> Result<()> {
    let index = vocabulary(&[("uitdoen", "uitdoen"), ("lawaaien", "lawaaien")]);
    let predictor = KeywordPredictor::new(index.clone(), RuleTiers::saxon())?;

    for word in ["oetdôn", "laaien", "hoes", "uitdoen"] {
        let cleaned = predictor.normalize(word);
        let (_, baseline) = index.nearest(&cleaned, 1)?;
        let predictions = predictor.predict_cleaned(&cleaned)?;

        // A score implies a distance; the search can only improve on the
        // plain lookup, so the score can only rise.
        let baseline_score = if baseline > 5 { 0 } else { (5 - baseline) as u8 };
        assert!(predictions[0].score >= baseline_score);
    }

    Ok(())
}

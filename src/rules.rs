//! Tiered orthographic substitution rules.
//!
//! A rule tier is an ordered list of rewrite rules; the tiers themselves are
//! ordered and applied in a fixed sequence during search. Tier order is a
//! correctness-relevant constant: multi-character patterns come first, then
//! vowel-cluster patterns, then single diacritic characters.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrefwoordError};

/// A single substitution rule: a source substring and the ordered list of
/// replacements tried for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub source: String,
    pub replacements: Vec<String>,
}

impl RewriteRule {
    /// Create a new rewrite rule.
    pub fn new<S: Into<String>>(source: S, replacements: &[&str]) -> Self {
        RewriteRule {
            source: source.into(),
            replacements: replacements.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// An ordered sequence of rule tiers.
///
/// The JSON representation is a list of lists of rule objects; maps are not
/// used, so rule order within a tier stays explicit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTiers {
    tiers: Vec<Vec<RewriteRule>>,
}

impl RuleTiers {
    /// Create a tier sequence from prepared tiers.
    pub fn new(tiers: Vec<Vec<RewriteRule>>) -> Self {
        RuleTiers { tiers }
    }

    /// Load rule tiers from a JSON file.
    pub fn load_from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader)
            .map_err(|e| TrefwoordError::configuration(format!("malformed rule tiers: {e}")))
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Check whether there are no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Iterate over the tiers in application order.
    pub fn iter(&self) -> impl Iterator<Item = &[RewriteRule]> {
        self.tiers.iter().map(|tier| tier.as_slice())
    }

    /// The built-in substitution tiers, optimized for Low Saxon dialect
    /// spellings.
    ///
    /// Tier 1 holds multi-letter patterns, tier 2 vowel clusters, tier 3
    /// single accented characters (including the `ﬂ`/`ﬁ` ligatures that
    /// occasionally survive OCR).
    pub fn saxon() -> Self {
        let tier_one = vec![
            RewriteRule::new("tien", &["tje"]),
            RewriteRule::new("fien", &["fje"]),
            RewriteRule::new("dôn", &["doen"]),
            RewriteRule::new("dôk", &["doek"]),
            RewriteRule::new("êln", &["elen"]),
            RewriteRule::new("eln", &["elen"]),
            RewriteRule::new("êrn", &["eren"]),
            RewriteRule::new("ern", &["eren"]),
            RewriteRule::new("nie", &["nieuw"]),
            RewriteRule::new("nij", &["nieuw"]),
            RewriteRule::new("oet", &["uit"]),
            RewriteRule::new("erg", &["erig"]),
            RewriteRule::new("iee", &["ie", "ij"]),
        ];

        let tier_two = vec![
            RewriteRule::new("üü", &["uu", "eu", "ui", "oo", "oe", "ie", "u", "o"]),
            RewriteRule::new("ůů", &["uu", "ui", "oe", "eu"]),
            RewriteRule::new("uu", &["ui", "eu", "oe", "u"]),
            RewriteRule::new("öö", &["oe", "aa", "ee", "eu", "oo", "u", "o"]),
            RewriteRule::new("òl", &["ol", "ou"]),
            RewriteRule::new("ôê", &["oe", "uu", "ui", "oo"]),
            RewriteRule::new("óó", &["o"]),
            RewriteRule::new("ån", &["aan"]),
            RewriteRule::new("îê", &["ij", "ie", "ee"]),
            RewriteRule::new("ïe", &["ij"]),
            RewriteRule::new("iè", &["ee", "ie", "e", "i"]),
            RewriteRule::new("ie", &["ij", "ee", "e", "i"]),
            RewriteRule::new("èe", &["aa", "ee", "oo", "ei", "e", "a"]),
            RewriteRule::new("eè", &["aa", "ee", "oo", "ei", "e", "a"]),
            RewriteRule::new("èu", &["eu", "aa", "oo", "oe", "o"]),
            RewriteRule::new("oa", &["aa", "oo", "a", "o"]),
            RewriteRule::new("oe", &["ui"]),
            RewriteRule::new("eu", &["oo", "oe", "ui", "a", "o"]),
            RewriteRule::new("ij", &["ee", "ie", "ei"]),
        ];

        let tier_three = vec![
            RewriteRule::new("ﬂ", &["fl"]),
            RewriteRule::new("ﬁ", &["fi"]),
            RewriteRule::new("à", &["a", "e"]),
            RewriteRule::new("á", &["a", "e"]),
            RewriteRule::new("â", &["a", "e"]),
            RewriteRule::new("ä", &["ee", "a", "e", "o", "u", "ë"]),
            RewriteRule::new("å", &["aa", "a", "e"]),
            RewriteRule::new("é", &["ee", "a", "e", "i"]),
            RewriteRule::new("ê", &["e", "a", "i"]),
            RewriteRule::new("ë", &["e", "i"]),
            RewriteRule::new("ē", &["a"]),
            RewriteRule::new("è", &["ee", "e", "a"]),
            RewriteRule::new("ì", &["i"]),
            RewriteRule::new("í", &["i", "a"]),
            RewriteRule::new("î", &["ie", "ij", "i", "a"]),
            RewriteRule::new("ï", &["i"]),
            RewriteRule::new("ȋ", &["i"]),
            RewriteRule::new("ñ", &["n"]),
            RewriteRule::new("ò", &["oe", "oo", "ou", "eu", "o", "a", "u"]),
            RewriteRule::new("ó", &["oo", "o", "u"]),
            RewriteRule::new("ô", &["oe", "o", "e", "a"]),
            RewriteRule::new("ö", &["oeu", "oe", "eu", "ee", "aa", "a", "e", "i", "o", "u"]),
            RewriteRule::new("ō", &["oe", "a", "e", "o", "u"]),
            RewriteRule::new("ǒ", &["o"]),
            RewriteRule::new("ȫ", &["o"]),
            RewriteRule::new("ù", &["u", "e"]),
            RewriteRule::new("ú", &["ui", "ie", "u"]),
            RewriteRule::new("û", &["oe", "eu", "ui", "uu", "u", "e", "o"]),
            RewriteRule::new("ü", &["ui", "oe", "eu", "u", "o", "i", "e"]),
            RewriteRule::new("ů", &["ui", "o", "u"]),
        ];

        RuleTiers::new(vec![tier_one, tier_two, tier_three])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_saxon_tiers_shape() {
        let tiers = RuleTiers::saxon();
        assert_eq!(tiers.len(), 3);

        let sizes: Vec<usize> = tiers.iter().map(|tier| tier.len()).collect();
        assert_eq!(sizes, vec![13, 19, 30]);
    }

    #[test]
    fn test_saxon_tier_order_is_most_specific_first() {
        let tiers = RuleTiers::saxon();
        let all: Vec<&[RewriteRule]> = tiers.iter().collect();

        // Multi-letter patterns in tier 1, single characters in tier 3.
        assert!(all[0].iter().all(|r| r.source.chars().count() >= 3));
        assert!(all[2].iter().all(|r| r.source.chars().count() == 1));
    }

    #[test]
    fn test_replacement_order_is_preserved() {
        let tiers = RuleTiers::saxon();
        let vowel_tier = tiers.iter().nth(1).expect("vowel tier present");
        let ie = vowel_tier
            .iter()
            .find(|r| r.source == "ie")
            .expect("ie rule present");

        assert_eq!(ie.replacements, vec!["ij", "ee", "e", "i"]);
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let tiers = RuleTiers::new(vec![vec![
            RewriteRule::new("ai", &["aai", "ei"]),
            RewriteRule::new("oe", &["ui"]),
        ]]);

        let json = serde_json::to_string(&tiers).unwrap();
        let parsed: RuleTiers = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tiers);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[[{{"source": "ai", "replacements": ["aai"]}}]]"#
        )
        .unwrap();
        file.flush().unwrap();

        let tiers = RuleTiers::load_from_json_file(file.path()).unwrap();
        assert_eq!(tiers.len(), 1);
        let first: Vec<&[RewriteRule]> = tiers.iter().collect();
        assert_eq!(first[0][0].source, "ai");
    }

    #[test]
    fn test_load_malformed_tiers_is_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        file.flush().unwrap();

        match RuleTiers::load_from_json_file(file.path()) {
            Err(crate::error::TrefwoordError::Configuration(_)) => {}
            other => panic!("expected configuration error, got {other:?}"),
        }
    }
}

//! Pattern & Lexicon Bank.
//!
//! Read-only rule data for the classifier: NFR shape patterns, per-category
//! keyword lexicons, the FR action-verb lexicon and the signal weights used
//! for confidence scoring. The bank is a versioned JSON document; the built-in
//! one is embedded at compile time and compiled once per process.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};
use validator::Validate;

use super::preprocess::{FeatureSet, TextPreprocessor};
use crate::error::{AppError, Result};

const BUILTIN_BANK_JSON: &str = include_str!("../../data/default_bank.json");

// NOTE: expect() is acceptable here: the embedded bank is covered by tests and
// a classifier without rules has nothing meaningful to return.
static BUILTIN_BANK: LazyLock<PatternBank> = LazyLock::new(|| {
    PatternBank::builtin().expect("Invalid built-in pattern bank")
});

/// Non-functional quality attribute.
///
/// Declaration order is the tie-break precedence: when two categories score
/// the same number of keyword hits, the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NfrCategory {
    Performance,
    Security,
    Usability,
    Reliability,
    Scalability,
    Maintainability,
    /// A shape pattern fired but no category keyword did
    Unspecified,
}

impl NfrCategory {
    /// Scoreable categories in tie-break precedence order.
    pub const PRECEDENCE: [NfrCategory; 6] = [
        NfrCategory::Performance,
        NfrCategory::Security,
        NfrCategory::Usability,
        NfrCategory::Reliability,
        NfrCategory::Scalability,
        NfrCategory::Maintainability,
    ];

    /// Every category including `Unspecified`.
    pub const ALL: [NfrCategory; 7] = [
        NfrCategory::Performance,
        NfrCategory::Security,
        NfrCategory::Usability,
        NfrCategory::Reliability,
        NfrCategory::Scalability,
        NfrCategory::Maintainability,
        NfrCategory::Unspecified,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NfrCategory::Performance => "performance",
            NfrCategory::Security => "security",
            NfrCategory::Usability => "usability",
            NfrCategory::Reliability => "reliability",
            NfrCategory::Scalability => "scalability",
            NfrCategory::Maintainability => "maintainability",
            NfrCategory::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for NfrCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a lexicon term is evidence for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconTarget {
    Nfr(NfrCategory),
    FrVerb,
}

/// One normalized lexicon term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Term in lemma space (multi-word terms are space-joined lemmas)
    pub term: String,
    pub target: LexiconTarget,
    /// Relative strength of this term, multiplied into the signal weight
    pub weight: f32,
}

/// Base strength of each signal type plus the no-signal floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SignalWeights {
    #[validate(range(min = 0.0, max = 1.0))]
    pub pattern: f32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub keyword: f32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub verb: f32,
    /// Confidence assigned by the FR fallback rule when nothing fired
    #[validate(range(min = 0.0, max = 1.0))]
    pub fallback: f32,
}

fn default_weight() -> f32 {
    1.0
}

/// A named NFR shape pattern as written in the bank file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatternDefinition {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub regex: String,
    #[serde(default = "default_weight")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub weight: f32,
}

/// A lexicon term, either bare or with an explicit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermSpec {
    Plain(String),
    Weighted {
        term: String,
        #[serde(default = "default_weight")]
        weight: f32,
    },
}

impl TermSpec {
    fn parts(&self) -> (&str, f32) {
        match self {
            TermSpec::Plain(term) => (term.as_str(), 1.0),
            TermSpec::Weighted { term, weight } => (term.as_str(), *weight),
        }
    }
}

/// On-disk shape of a pattern bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BankDefinition {
    #[validate(length(min = 1))]
    pub version: String,
    #[validate(nested)]
    pub weights: SignalWeights,
    #[validate(nested)]
    pub patterns: Vec<PatternDefinition>,
    pub categories: BTreeMap<NfrCategory, Vec<TermSpec>>,
    pub fr_verbs: Vec<TermSpec>,
}

/// A compiled shape pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
    pub weight: f32,
}

/// Keyword lexicon for one NFR category.
#[derive(Debug, Clone)]
pub struct CategoryLexicon {
    pub category: NfrCategory,
    terms: HashMap<String, LexiconEntry>,
    phrases: Vec<LexiconEntry>,
}

impl CategoryLexicon {
    /// Distinct entries present in the features, in first-occurrence order.
    ///
    /// `lemma_line` is the full lemma sequence, space-joined and padded with a
    /// space on both ends, used for multi-word phrases.
    pub fn hits<'a>(&'a self, features: &FeatureSet, lemma_line: &str) -> Vec<&'a LexiconEntry> {
        let mut seen = HashSet::new();
        let mut hits: Vec<&LexiconEntry> = features
            .content_lemmas()
            .filter_map(|lemma| self.terms.get(lemma))
            .filter(|entry| seen.insert(entry.term.as_str()))
            .collect();

        hits.extend(
            self.phrases
                .iter()
                .filter(|entry| lemma_line.contains(&format!(" {} ", entry.term))),
        );
        hits
    }

    pub fn len(&self) -> usize {
        self.terms.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The compiled, read-only rule set.
#[derive(Debug, Clone)]
pub struct PatternBank {
    version: String,
    weights: SignalWeights,
    patterns: Vec<CompiledPattern>,
    categories: Vec<CategoryLexicon>,
    fr_verbs: HashMap<String, LexiconEntry>,
}

impl PatternBank {
    /// Process-wide built-in bank.
    pub fn shared() -> &'static PatternBank {
        &BUILTIN_BANK
    }

    /// Parse and compile the embedded default bank.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_BANK_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let definition: BankDefinition = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid pattern bank definition: {}", e)))?;
        Self::from_definition(definition)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read pattern bank {}: {}", path.display(), e))
        })?;
        let bank = Self::from_json_str(&json)?;
        info!("Loaded pattern bank v{} from {}", bank.version, path.display());
        Ok(bank)
    }

    /// Validate and compile a bank definition.
    pub fn from_definition(definition: BankDefinition) -> Result<Self> {
        definition.validate()?;
        check_weights(&definition.weights)?;

        let normalizer = TextPreprocessor::new();
        let weights = definition.weights;

        let mut names = HashSet::new();
        let mut patterns = Vec::with_capacity(definition.patterns.len());
        for def in &definition.patterns {
            if !names.insert(def.name.as_str()) {
                return Err(AppError::Config(format!("Duplicate pattern name: {}", def.name)));
            }
            let regex = Regex::new(&def.regex)
                .map_err(|e| AppError::Config(format!("Pattern '{}' does not compile: {}", def.name, e)))?;
            check_signal_floor("Pattern", &def.name, weights.pattern * def.weight, weights.fallback)?;
            patterns.push(CompiledPattern {
                name: def.name.clone(),
                regex,
                weight: def.weight,
            });
        }

        if definition.categories.is_empty() {
            return Err(AppError::Config("Pattern bank defines no NFR categories".to_string()));
        }
        let mut categories = Vec::with_capacity(definition.categories.len());
        // BTreeMap iteration follows NfrCategory order, i.e. precedence order
        for (category, specs) in &definition.categories {
            if *category == NfrCategory::Unspecified {
                return Err(AppError::Config(
                    "'unspecified' cannot carry keywords".to_string(),
                ));
            }
            if specs.is_empty() {
                return Err(AppError::Config(format!("Category '{}' has no terms", category)));
            }

            let mut lexicon = CategoryLexicon {
                category: *category,
                terms: HashMap::new(),
                phrases: Vec::new(),
            };
            for spec in specs {
                let entry = normalize_entry(&normalizer, spec, LexiconTarget::Nfr(*category))?;
                check_signal_floor("Keyword", &entry.term, weights.keyword * entry.weight, weights.fallback)?;
                if entry.term.contains(' ') {
                    lexicon.phrases.push(entry);
                } else {
                    lexicon.terms.insert(entry.term.clone(), entry);
                }
            }
            categories.push(lexicon);
        }

        if definition.fr_verbs.is_empty() {
            return Err(AppError::Config("Pattern bank defines no FR verbs".to_string()));
        }
        let mut fr_verbs = HashMap::new();
        for spec in &definition.fr_verbs {
            let entry = normalize_entry(&normalizer, spec, LexiconTarget::FrVerb)?;
            if entry.term.contains(' ') {
                return Err(AppError::Config(format!(
                    "FR verb '{}' must be a single word",
                    spec.parts().0
                )));
            }
            check_signal_floor("FR verb", &entry.term, weights.verb * entry.weight, weights.fallback)?;
            fr_verbs.insert(entry.term.clone(), entry);
        }

        debug!(
            "Compiled pattern bank v{}: {} patterns, {} categories, {} verbs",
            definition.version,
            patterns.len(),
            categories.len(),
            fr_verbs.len()
        );

        Ok(Self {
            version: definition.version,
            weights: definition.weights,
            patterns,
            categories,
            fr_verbs,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn weights(&self) -> &SignalWeights {
        &self.weights
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Category lexicons in tie-break precedence order.
    pub fn categories(&self) -> &[CategoryLexicon] {
        &self.categories
    }

    pub fn fr_verb(&self, lemma: &str) -> Option<&LexiconEntry> {
        self.fr_verbs.get(lemma)
    }

    pub fn fr_verb_count(&self) -> usize {
        self.fr_verbs.len()
    }

    /// FR verb base forms, in no particular order.
    pub fn fr_verbs(&self) -> impl Iterator<Item = &str> {
        self.fr_verbs.keys().map(String::as_str)
    }
}

/// Every signal weight must be at least the no-signal floor, otherwise a
/// matched signal could score below an empty match.
fn check_weights(weights: &SignalWeights) -> Result<()> {
    let weakest = weights.pattern.min(weights.keyword).min(weights.verb);
    if weights.fallback > weakest {
        return Err(AppError::Config(format!(
            "Fallback confidence {} exceeds the weakest signal weight {}",
            weights.fallback, weakest
        )));
    }
    Ok(())
}

/// A matched signal, once scaled by its term or pattern weight, must not
/// score below the no-signal floor.
fn check_signal_floor(kind: &str, name: &str, scaled: f32, fallback: f32) -> Result<()> {
    if scaled + f32::EPSILON < fallback {
        return Err(AppError::Config(format!(
            "{} '{}' scores {} which is below the fallback confidence {}",
            kind, name, scaled, fallback
        )));
    }
    Ok(())
}

fn normalize_entry(
    normalizer: &TextPreprocessor,
    spec: &TermSpec,
    target: LexiconTarget,
) -> Result<LexiconEntry> {
    let (raw, weight) = spec.parts();
    if !(0.0..=1.0).contains(&weight) {
        return Err(AppError::Config(format!(
            "Term '{}' has weight {} outside [0, 1]",
            raw, weight
        )));
    }

    let term = raw
        .split_whitespace()
        .map(|word| normalizer.normalize_word(word))
        .collect::<Vec<_>>()
        .join(" ");
    if term.is_empty() {
        return Err(AppError::Config(format!("Empty lexicon term for {:?}", target)));
    }

    Ok(LexiconEntry { term, target, weight })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_compiles() {
        let bank = PatternBank::builtin().expect("built-in bank");

        assert_eq!(bank.version(), "1.0.0");
        assert!(!bank.patterns().is_empty());
        assert_eq!(bank.categories().len(), 6);
        assert!(bank.fr_verb("register").is_some());
    }

    #[test]
    fn test_categories_in_precedence_order() {
        let order: Vec<NfrCategory> = PatternBank::shared()
            .categories()
            .iter()
            .map(|c| c.category)
            .collect();

        assert_eq!(order, NfrCategory::PRECEDENCE.to_vec());
    }

    #[test]
    fn test_terms_are_lemmatized_at_load() {
        let json = r#"{
            "version": "fixture",
            "weights": { "pattern": 0.6, "keyword": 0.5, "verb": 0.6, "fallback": 0.1 },
            "patterns": [],
            "categories": { "scalability": ["Users", "concurrent sessions"] },
            "fr_verbs": ["Deleting"]
        }"#;
        let bank = PatternBank::from_json_str(json).expect("fixture bank");

        let scalability = &bank.categories()[0];
        assert!(scalability.terms.contains_key("user"));
        assert_eq!(scalability.phrases[0].term, "concurrent session");
        assert!(bank.fr_verb("delete").is_some());
    }

    #[test]
    fn test_weighted_term_spec() {
        let json = r#"{
            "version": "fixture",
            "weights": { "pattern": 0.6, "keyword": 0.5, "verb": 0.6, "fallback": 0.1 },
            "patterns": [{ "name": "p", "regex": "x", "weight": 0.5 }],
            "categories": { "security": [{ "term": "secure", "weight": 0.25 }, "encrypt"] },
            "fr_verbs": [{ "term": "add" }]
        }"#;
        let bank = PatternBank::from_json_str(json).expect("fixture bank");

        let security = &bank.categories()[0];
        assert_eq!(security.terms["secure"].weight, 0.25);
        assert_eq!(security.terms["encrypt"].weight, 1.0);
        assert_eq!(bank.fr_verb("add").map(|e| e.weight), Some(1.0));
        assert_eq!(bank.patterns()[0].weight, 0.5);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(NfrCategory::Performance.label(), "performance");
        assert_eq!(NfrCategory::Unspecified.to_string(), "unspecified");
        assert!(NfrCategory::Performance < NfrCategory::Security);
        assert!(NfrCategory::Maintainability < NfrCategory::Unspecified);
    }
}

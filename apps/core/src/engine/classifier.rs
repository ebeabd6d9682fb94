//! Classifier - ordered decision table over a pattern bank.
//!
//! Evaluation order is fixed: shape patterns, then NFR keywords, then FR
//! action verbs, then the FR fallback. Confidence is a saturating
//! combination of the weights of the signals backing the decision.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::lexicon::{LexiconEntry, NfrCategory, PatternBank};
use super::preprocess::FeatureSet;

/// Functional or non-functional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RequirementType {
    #[serde(rename = "FR")]
    Functional,
    #[serde(rename = "NFR")]
    NonFunctional,
}

impl RequirementType {
    pub fn code(&self) -> &'static str {
        match self {
            RequirementType::Functional => "FR",
            RequirementType::NonFunctional => "NFR",
        }
    }
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Classification of a single candidate requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The requirement proper that was classified
    pub requirement_text: String,
    /// Full source sentence
    pub original: String,
    /// "So that" clause, carried for display only
    pub rationale: Option<String>,
    /// 1-based input line (0 when classified directly)
    pub source_line: usize,
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    /// Present iff `requirement_type` is NFR
    pub nfr_category: Option<NfrCategory>,
    /// Certainty in [0, 1], two decimals
    pub confidence: f32,
    /// Every signal that fired, e.g. `pattern:within_time`, `keyword:security:secure`, `verb:register`
    pub matched_signals: BTreeSet<String>,
    pub verbs: Vec<String>,
    pub nouns: Vec<String>,
}

impl ClassificationResult {
    pub fn is_functional(&self) -> bool {
        self.requirement_type == RequirementType::Functional
    }

    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// A keyword hit tagged with its category.
struct KeywordHit<'b> {
    category: NfrCategory,
    entry: &'b LexiconEntry,
}

/// Classify one feature set. Never fails.
pub fn classify(features: &FeatureSet, bank: &PatternBank) -> ClassificationResult {
    let weights = bank.weights();
    let mut signals = BTreeSet::new();

    // 1. Shape patterns over the candidate text
    let mut pattern_weights = Vec::new();
    for pattern in bank.patterns() {
        if pattern.regex.is_match(features.text()) {
            signals.insert(format!("pattern:{}", pattern.name));
            pattern_weights.push(weights.pattern * pattern.weight);
        }
    }

    // 2. Keyword hits per category, categories already in precedence order
    let lemma_line = format!(" {} ", features.lemmas.join(" "));
    let mut keyword_hits: Vec<KeywordHit> = Vec::new();
    let mut best: Option<(NfrCategory, usize)> = None;
    for lexicon in bank.categories() {
        let hits = lexicon.hits(features, &lemma_line);
        let count = hits.len();
        if count > 0 && best.map_or(true, |(_, top)| count > top) {
            best = Some((lexicon.category, count));
        }
        keyword_hits.extend(hits.into_iter().map(|entry| KeywordHit {
            category: lexicon.category,
            entry,
        }));
    }
    for hit in &keyword_hits {
        signals.insert(format!("keyword:{}:{}", hit.category, hit.entry.term));
    }

    // 4. Action verbs, collected up front so NFR results still list them
    let mut verb_hits: Vec<&LexiconEntry> = Vec::new();
    for lemma in features.verb_lemmas() {
        if let Some(entry) = bank.fr_verb(lemma) {
            if signals.insert(format!("verb:{}", entry.term)) {
                verb_hits.push(entry);
            }
        }
    }

    // 3. Decision
    let (requirement_type, nfr_category, confidence) =
        if !pattern_weights.is_empty() || best.is_some() {
            let category = best.map_or(NfrCategory::Unspecified, |(category, _)| category);
            let evidence = pattern_weights
                .iter()
                .copied()
                .chain(keyword_hits.iter().map(|hit| weights.keyword * hit.entry.weight));
            (RequirementType::NonFunctional, Some(category), saturating_sum(evidence))
        } else if !verb_hits.is_empty() {
            let evidence = verb_hits.iter().map(|entry| weights.verb * entry.weight);
            (RequirementType::Functional, None, saturating_sum(evidence))
        } else if features.is_empty() {
            // 5. Fallback; degenerate input carries no evidence at all
            (RequirementType::Functional, None, 0.0)
        } else {
            (RequirementType::Functional, None, weights.fallback)
        };

    ClassificationResult {
        requirement_text: features.candidate.text.clone(),
        original: features.candidate.original.clone(),
        rationale: features.candidate.rationale.clone(),
        source_line: features.candidate.source_line,
        requirement_type,
        nfr_category,
        confidence: round_confidence(confidence),
        matched_signals: signals,
        verbs: features.verbs(),
        nouns: features.nouns(),
    }
}

/// Noisy-OR: `1 - Π(1 - wᵢ)`. Monotone in every weight and bounded by 1.
fn saturating_sum(weights: impl Iterator<Item = f32>) -> f32 {
    1.0 - weights.fold(1.0, |miss, w| miss * (1.0 - w.clamp(0.0, 1.0)))
}

fn round_confidence(value: f32) -> f32 {
    ((value * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

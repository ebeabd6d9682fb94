//! Requirement Analyzer - orchestrates one analysis.
//!
//! Extraction, preprocessing, classification and aggregation over a
//! borrowed pattern bank. Holds no per-call state, so one analyzer can be
//! shared across threads.

use std::time::Instant;
use tracing::{debug, info};

use super::classifier::classify;
use super::extractor::RequirementExtractor;
use super::lexicon::PatternBank;
use super::preprocess::TextPreprocessor;
use super::report::ClassificationReport;

/// Runs the full pipeline against one pattern bank
pub struct RequirementAnalyzer<'b> {
    bank: &'b PatternBank,
    extractor: RequirementExtractor,
    preprocessor: TextPreprocessor,
}

impl Default for RequirementAnalyzer<'static> {
    fn default() -> Self {
        Self::new(PatternBank::shared())
    }
}

impl<'b> RequirementAnalyzer<'b> {
    pub fn new(bank: &'b PatternBank) -> Self {
        Self {
            bank,
            extractor: RequirementExtractor::new(),
            preprocessor: TextPreprocessor::with_verbs(bank.fr_verbs()),
        }
    }

    pub fn bank(&self) -> &PatternBank {
        self.bank
    }

    /// Classify every requirement found in `text`
    pub fn analyze(&self, text: &str) -> ClassificationReport {
        let start = Instant::now();

        let results = self
            .extractor
            .extract(text)
            .map(|candidate| {
                let features = self.preprocessor.process(candidate);
                let result = classify(&features, self.bank);
                debug!(
                    "Line {}: {} {:?} ({:.2}) <- {:?}",
                    result.source_line,
                    result.requirement_type,
                    result.nfr_category,
                    result.confidence,
                    result.matched_signals
                );
                result
            })
            .collect();

        let report = ClassificationReport::from_results(results);
        info!(
            "{} [bank v{}, {} ms]",
            report.summary(),
            self.bank.version(),
            start.elapsed().as_millis()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classifier::RequirementType;
    use crate::engine::lexicon::NfrCategory;

    #[test]
    fn test_mixed_story_file() {
        let analyzer = RequirementAnalyzer::default();
        let input = "As a user, I want to register an account so that I can log in.\n\
                     The system must load within 2 seconds.\n\
                     As an admin, I want to delete user accounts.";

        let report = analyzer.analyze(input);

        assert_eq!(report.len(), 3);
        assert_eq!(report.summary.functional, 2);
        assert_eq!(report.summary.non_functional, 1);
        assert_eq!(report.summary.category_count(NfrCategory::Performance), 1);
        assert_eq!(report.results[0].rationale.as_deref(), Some("I can log in"));
        assert_eq!(report.results[1].requirement_type, RequirementType::NonFunctional);
        assert_eq!(report.results[2].source_line, 3);
    }

    #[test]
    fn test_custom_bank_is_used() {
        let json = r#"{
            "version": "fixture",
            "weights": { "pattern": 0.6, "keyword": 0.5, "verb": 0.6, "fallback": 0.1 },
            "patterns": [],
            "categories": { "usability": ["colour"] },
            "fr_verbs": ["paint"]
        }"#;
        let bank = PatternBank::from_json_str(json).expect("fixture bank");
        let analyzer = RequirementAnalyzer::new(&bank);

        let report = analyzer.analyze("Paint the wall. Pick a colour.");

        assert_eq!(analyzer.bank().version(), "fixture");
        assert_eq!(report.results[0].requirement_type, RequirementType::Functional);
        assert_eq!(report.results[0].confidence, 0.6);
        assert_eq!(report.results[1].nfr_category, Some(NfrCategory::Usability));
    }

    #[test]
    fn test_whitespace_only_input() {
        let report = RequirementAnalyzer::default().analyze("  \n\n\t ");

        assert!(report.is_empty());
        assert_eq!(report.summary.total, 0);
    }
}

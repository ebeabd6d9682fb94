//! Classification Report - output structure of one analysis.
//!
//! Holds the per-requirement results in input order plus summary counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::classifier::{ClassificationResult, RequirementType};
use super::lexicon::NfrCategory;

/// Aggregate counts for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub functional: usize,
    pub non_functional: usize,
    /// NFR count per category; every category is present, zero or not
    pub by_category: BTreeMap<NfrCategory, usize>,
}

impl ReportSummary {
    fn zeroed() -> Self {
        Self {
            total: 0,
            functional: 0,
            non_functional: 0,
            by_category: NfrCategory::ALL.iter().map(|c| (*c, 0)).collect(),
        }
    }

    pub fn category_count(&self, category: NfrCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Ordered classification results for one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Results in input order
    pub results: Vec<ClassificationResult>,
    pub summary: ReportSummary,
}

impl Default for ClassificationReport {
    fn default() -> Self {
        Self::from_results(Vec::new())
    }
}

impl ClassificationReport {
    /// Aggregate results, keeping their order.
    pub fn from_results(results: Vec<ClassificationResult>) -> Self {
        let mut summary = ReportSummary::zeroed();
        for result in &results {
            summary.total += 1;
            match result.requirement_type {
                RequirementType::Functional => summary.functional += 1,
                RequirementType::NonFunctional => {
                    summary.non_functional += 1;
                    let category = result.nfr_category.unwrap_or(NfrCategory::Unspecified);
                    *summary.by_category.entry(category).or_insert(0) += 1;
                }
            }
        }
        Self { results, summary }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// FR results in input order
    pub fn functional(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter().filter(|r| r.is_functional())
    }

    /// NFR results in input order
    pub fn non_functional(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter().filter(|r| !r.is_functional())
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        let categories: Vec<String> = self
            .summary
            .by_category
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(category, count)| format!("{}={}", category, count))
            .collect();

        format!(
            "Requirements: {}, FR: {}, NFR: {}{}",
            self.summary.total,
            self.summary.functional,
            self.summary.non_functional,
            if categories.is_empty() {
                String::new()
            } else {
                format!(" ({})", categories.join(", "))
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn result(text: &str, category: Option<NfrCategory>) -> ClassificationResult {
        ClassificationResult {
            requirement_text: text.to_string(),
            original: text.to_string(),
            rationale: None,
            source_line: 1,
            requirement_type: if category.is_some() {
                RequirementType::NonFunctional
            } else {
                RequirementType::Functional
            },
            nfr_category: category,
            confidence: 0.6,
            matched_signals: BTreeSet::new(),
            verbs: vec![],
            nouns: vec![],
        }
    }

    #[test]
    fn test_empty_report() {
        let report = ClassificationReport::default();

        assert!(report.is_empty());
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.by_category.len(), 7);
        assert!(report.summary.by_category.values().all(|c| *c == 0));
    }

    #[test]
    fn test_counts_and_order() {
        let report = ClassificationReport::from_results(vec![
            result("a", Some(NfrCategory::Security)),
            result("b", None),
            result("c", Some(NfrCategory::Security)),
            result("d", Some(NfrCategory::Unspecified)),
        ]);

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.functional, 1);
        assert_eq!(report.summary.non_functional, 3);
        assert_eq!(report.summary.category_count(NfrCategory::Security), 2);
        assert_eq!(report.summary.category_count(NfrCategory::Unspecified), 1);
        assert_eq!(report.summary.category_count(NfrCategory::Performance), 0);

        let nfr: Vec<&str> = report.non_functional().map(|r| r.requirement_text.as_str()).collect();
        assert_eq!(nfr, vec!["a", "c", "d"]);
        let fr: Vec<&str> = report.functional().map(|r| r.requirement_text.as_str()).collect();
        assert_eq!(fr, vec!["b"]);
    }

    #[test]
    fn test_summary_line() {
        let report = ClassificationReport::from_results(vec![
            result("a", Some(NfrCategory::Performance)),
            result("b", None),
        ]);

        assert_eq!(report.summary(), "Requirements: 2, FR: 1, NFR: 1 (performance=1)");
        assert_eq!(ClassificationReport::default().summary(), "Requirements: 0, FR: 0, NFR: 0");
    }
}

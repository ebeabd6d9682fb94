//! Rule-based classification of requirement statements into functional (FR)
//! and non-functional (NFR) requirements, with an NFR quality category and a
//! confidence score per requirement.
//!
//! ```rust,ignore
//! let report = reqclass_core::analyze("The system must load within 2 seconds.");
//! assert_eq!(report.summary.non_functional, 1);
//! ```

pub mod engine;
pub mod error;
pub mod logging;
pub mod render;
pub mod text_extract;

pub use engine::{
    ClassificationReport, ClassificationResult, NfrCategory, PatternBank, RequirementAnalyzer,
    RequirementType,
};
pub use error::{AppError, Result};

/// Classify every requirement in `text` against the built-in pattern bank.
pub fn analyze(text: &str) -> ClassificationReport {
    RequirementAnalyzer::default().analyze(text)
}

#[cfg(test)]
mod tests;

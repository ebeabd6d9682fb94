//! # Engine Module
//!
//! Rule-based FR/NFR classification of requirement statements.
//! Pure, synchronous and deterministic; the only shared state is the
//! read-only pattern bank.
//!
//! ## Components
//! - `extractor`: sentence splitting and user-story prefix stripping
//! - `preprocess`: tokens, stop words, lemmas and POS tags
//! - `lexicon`: pattern & lexicon bank (versioned JSON)
//! - `classifier`: ordered decision table and confidence scoring
//! - `report`: output data structure
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod classifier;
pub mod extractor;
pub mod lexicon;
pub mod preprocess;
pub mod report;

pub use analyzer::RequirementAnalyzer;
pub use classifier::{classify, ClassificationResult, RequirementType};
pub use extractor::{CandidateRequirement, RequirementExtractor};
pub use lexicon::{LexiconEntry, LexiconTarget, NfrCategory, PatternBank};
pub use preprocess::{FeatureSet, TextPreprocessor};
pub use report::{ClassificationReport, ReportSummary};

//! Test Module
//!
//! Cross-module test suite for the requirement classifier.
//!
//! ## Test Categories
//! - `engine_tests`: end-to-end scenarios and universal properties of `analyze`
//! - `bank_tests`: pattern bank loading, validation and substitution
//! - `text_extract_tests`: file decoding feeding the analyzer

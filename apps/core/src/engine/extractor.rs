//! Requirement extraction from user-story text.
//!
//! Splits raw text into one candidate per sentence, strips the narrative
//! lead-in ("As a <role>, I want to") and sets the "so that" benefit clause
//! aside so only the requirement proper is classified.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::iter::Enumerate;
use std::str::Lines;
use std::sync::LazyLock;

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]|\d+[.)]|\(\d+\))\s+").expect("Invalid regex: list marker")
});

static ROLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^as\s+(?:an?|the)\s+[^,]*?,\s*").expect("Invalid regex: role prefix")
});

static ROLE_PREFIX_NO_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^as\s+(?:an?|the)\s+.+?\s+(i\s+(?:want|need|would\s+like|wish|can|should|must|am)\b)")
        .expect("Invalid regex: role prefix without comma")
});

static WANT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^i\s+(?:(?:want|need|would\s+like|wish)(?:\s+to)?(?:\s+be\s+able\s+to)?|(?:should|must)\s+be\s+able\s+to|am\s+able\s+to|can)\s+",
    )
    .expect("Invalid regex: want clause")
});

static RATIONALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[,;]?\s+so\s+that\s+").expect("Invalid regex: rationale delimiter")
});

/// A single extracted requirement statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRequirement {
    /// The requirement proper, lead-in and rationale removed
    pub text: String,
    /// 1-based line of the input the statement came from (0 when not extracted)
    pub source_line: usize,
    /// The full sentence as written
    pub original: String,
    /// The "so that ..." benefit clause, if any
    pub rationale: Option<String>,
}

impl CandidateRequirement {
    pub fn new(text: impl Into<String>, source_line: usize) -> Self {
        let text = text.into();
        Self {
            original: text.clone(),
            text,
            source_line,
            rationale: None,
        }
    }
}

/// Splits user-story text into candidate requirements.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequirementExtractor;

impl RequirementExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Lazily extract candidates from `text`, one pass, in input order.
    pub fn extract<'t>(&self, text: &'t str) -> Candidates<'t> {
        Candidates {
            lines: text.lines().enumerate(),
            pending: VecDeque::new(),
        }
    }
}

/// Single-pass iterator over the candidates of one input.
pub struct Candidates<'t> {
    lines: Enumerate<Lines<'t>>,
    pending: VecDeque<CandidateRequirement>,
}

impl Iterator for Candidates<'_> {
    type Item = CandidateRequirement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(candidate) = self.pending.pop_front() {
                return Some(candidate);
            }
            let (index, line) = self.lines.next()?;
            let line = LIST_MARKER.find(line).map_or(line, |m| &line[m.end()..]);
            self.pending.extend(
                split_sentences(line)
                    .into_iter()
                    .filter_map(|sentence| candidate_from_sentence(sentence, index + 1)),
            );
        }
    }
}

/// Split on terminal punctuation followed by whitespace or end of line.
/// Decimals ("99.9%") and abbreviations without a following space stay intact.
fn split_sentences(line: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?' | ';') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                let end = idx + c.len_utf8();
                sentences.push(&line[start..end]);
                start = end;
            }
        }
    }
    if start < line.len() {
        sentences.push(&line[start..]);
    }

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn candidate_from_sentence(sentence: &str, source_line: usize) -> Option<CandidateRequirement> {
    let (main, rationale) = match RATIONALE.find(sentence) {
        Some(m) => (&sentence[..m.start()], Some(trim_statement(&sentence[m.end()..]))),
        None => (sentence, None),
    };

    let text = trim_statement(strip_narrative(main.trim()));
    if text.is_empty() {
        return None;
    }

    Some(CandidateRequirement {
        text: text.to_string(),
        source_line,
        original: sentence.to_string(),
        rationale: rationale.filter(|r| !r.is_empty()).map(str::to_string),
    })
}

fn strip_narrative(sentence: &str) -> &str {
    let rest = if let Some(m) = ROLE_PREFIX.find(sentence) {
        &sentence[m.end()..]
    } else if let Some(caps) = ROLE_PREFIX_NO_COMMA.captures(sentence) {
        caps.get(1).map_or(sentence, |g| &sentence[g.start()..])
    } else {
        sentence
    };

    WANT_CLAUSE.find(rest).map_or(rest, |m| &rest[m.end()..])
}

fn trim_statement(s: &str) -> &str {
    s.trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ';' | ',' | ':') || c.is_whitespace())
        .trim_matches('"')
        .trim()
}

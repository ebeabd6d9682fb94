//! Plain-text rendering of a classification report.

use std::fmt::Write;

use crate::engine::ClassificationReport;

const RULE_WIDTH: usize = 60;

/// Render a report as a two-list text document (FR first, then NFR).
pub fn render_text(report: &ClassificationReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let thin = "-".repeat(RULE_WIDTH);

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "REQUIREMENT CLASSIFICATION");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Total: {}  |  Functional: {}  |  Non-functional: {}",
        report.summary.total, report.summary.functional, report.summary.non_functional
    );

    let _ = writeln!(out, "\nFUNCTIONAL REQUIREMENTS ({})", report.summary.functional);
    let _ = writeln!(out, "{}", thin);
    if report.summary.functional == 0 {
        let _ = writeln!(out, "  (none)");
    }
    for (i, result) in report.functional().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} [{}%]",
            i + 1,
            result.requirement_text,
            result.confidence_percent()
        );
        if let Some(rationale) = &result.rationale {
            let _ = writeln!(out, "     so that {}", rationale);
        }
    }

    let _ = writeln!(out, "\nNON-FUNCTIONAL REQUIREMENTS ({})", report.summary.non_functional);
    let _ = writeln!(out, "{}", thin);
    if report.summary.non_functional == 0 {
        let _ = writeln!(out, "  (none)");
    }
    for (i, result) in report.non_functional().enumerate() {
        let category = result
            .nfr_category
            .map(|c| c.label().to_uppercase())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>3}. [{}] {} [{}%]",
            i + 1,
            category,
            result.original,
            result.confidence_percent()
        );
    }

    let _ = writeln!(out, "{}", rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RequirementAnalyzer;

    #[test]
    fn test_render_lists() {
        let report = RequirementAnalyzer::default().analyze(
            "As a user, I want to register an account.\nThe system must load within 2 seconds.",
        );

        let text = render_text(&report);

        assert!(text.contains("REQUIREMENT CLASSIFICATION"));
        assert!(text.contains("FUNCTIONAL REQUIREMENTS (1)"));
        assert!(text.contains("  1. register an account [60%]"));
        assert!(text.contains("[PERFORMANCE] The system must load within 2 seconds."));
    }

    #[test]
    fn test_render_empty_report() {
        let text = render_text(&ClassificationReport::default());

        assert!(text.contains("Total: 0"));
        assert_eq!(text.matches("(none)").count(), 2);
    }
}

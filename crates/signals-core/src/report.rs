//! # Report Module
//!
//! Plain text rendering of an [`AnalysisResult`].
//!
//! The layout mirrors the JSON response: a summary block, category scores,
//! field signals and warnings, each in its own section. Empty sections print
//! `(none)` rather than disappearing so the shape is always the same.

use crate::analysis::AnalysisResult;

impl AnalysisResult {
    /// Format as plain text with the standard template.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str("│ SUMMARY                             │\n");
        output.push_str(&format!("│ - phase: {}\n", self.phase));
        output.push_str(&format!(
            "│ - coverage: {:.0}% ({} confidence)\n",
            self.coverage * 100.0,
            self.confidence
        ));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ CATEGORY SCORES                     │\n");

        if self.category_scores.is_empty() {
            output.push_str("│ - (none)                            │\n");
        } else {
            for score in &self.category_scores {
                output.push_str(&format!(
                    "│ - {}: {:.2} [{} credits]\n",
                    score.category, score.average_grade, score.total_credits
                ));
            }
        }

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ FIELD SIGNALS                       │\n");

        if self.field_signals.is_empty() {
            output.push_str("│ - (none)                            │\n");
        } else {
            for signal in &self.field_signals {
                let categories = signal
                    .contributors
                    .categories
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                output.push_str(&format!(
                    "│ - {}: {:.2} {} ({} evidence: {})\n",
                    signal.field,
                    signal.score,
                    signal.signal_strength,
                    signal.evidence_level,
                    categories
                ));
            }
        }

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ WARNINGS                            │\n");

        let warnings = self.warnings();
        if warnings.is_empty() {
            output.push_str("│ - (none)                            │\n");
        } else {
            for warning in warnings {
                output.push_str(&format!("│ - {}\n", warning));
            }
        }

        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::analysis::{GradeInput, analyze};
    use crate::catalogue::{Catalogue, Phase};
    use crate::fields::FieldWeights;

    #[test]
    fn to_text_format() {
        let grades = vec![
            GradeInput::new("Databases", 15.0),
            GradeInput::new("Business Fundamentals", 14.0),
        ];
        let result = analyze(
            Phase::FIRST,
            &grades,
            &Catalogue::builtin(),
            &FieldWeights::builtin(),
        );
        let text = result.to_text();

        assert!(text.contains("SUMMARY"));
        assert!(text.contains("CATEGORY SCORES"));
        assert!(text.contains("FIELD SIGNALS"));
        assert!(text.contains("WARNINGS"));
        assert!(text.contains("coverage: 15% (Low confidence)"));
        assert!(text.contains("Data: 15.00 [6 credits]"));
        assert!(text.contains("Data Analytics: 14.60 Strong (Complete evidence: Data, Business)"));
        assert!(text.contains("Very low coverage (15%)"));
    }

    #[test]
    fn to_text_empty_sections() {
        let result = analyze(
            Phase::SECOND,
            &[],
            &Catalogue::builtin(),
            &FieldWeights::builtin(),
        );
        let text = result.to_text();
        assert_eq!(text.matches("(none)").count(), 3);
    }
}

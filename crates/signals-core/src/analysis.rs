//! # Analysis Engine
//!
//! Scores graded courses against the catalogue and blends category averages
//! into career-field signals.
//!
//! The engine is a pure function of its inputs:
//! - Only courses unlocked at the current phase AND graded are scored
//! - Categories and fields with nothing to score are omitted, never zero-filled
//! - Non-fatal conditions become warnings; there is no error path
//!
//! Inputs are expected to have passed [`crate::validation::validate`].

use crate::catalogue::{Category, CourseCatalogue, CourseRecord, Phase};
use crate::fields::FieldWeightTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// THRESHOLDS
// =============================================================================

/// Field score at or above which a signal is Strong.
pub const STRONG_THRESHOLD: f64 = 14.0;
/// Field score at or above which a signal is Consistent.
pub const CONSISTENT_THRESHOLD: f64 = 11.0;
/// Coverage at or above which confidence is High.
pub const HIGH_CONFIDENCE_COVERAGE: f64 = 0.7;
/// Coverage at or above which confidence is Medium.
pub const MEDIUM_CONFIDENCE_COVERAGE: f64 = 0.4;
/// Non-zero coverage below this raises a low coverage warning.
pub const LOW_COVERAGE_WARNING: f64 = 0.2;

// =============================================================================
// INPUT
// =============================================================================

/// A grade supplied for one course, on the 0-20 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeInput {
    pub course_name: String,
    pub grade: f64,
}

impl GradeInput {
    /// Create a new grade input.
    pub fn new(course_name: impl Into<String>, grade: f64) -> Self {
        Self {
            course_name: course_name.into(),
            grade,
        }
    }
}

// =============================================================================
// CLASSIFICATIONS
// =============================================================================

/// How strongly a field score points toward that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalStrength {
    Strong,
    Consistent,
    Emerging,
}

/// Whether every category a field needs was graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceLevel {
    Complete,
    Partial,
}

/// Trust in the result, derived from coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

macro_rules! display_as_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        })*
    };
}

display_as_debug!(SignalStrength, EvidenceLevel, Confidence);

/// Classify a field score. Lower bounds are inclusive.
#[must_use]
pub fn signal_strength(score: f64) -> SignalStrength {
    if score >= STRONG_THRESHOLD {
        SignalStrength::Strong
    } else if score >= CONSISTENT_THRESHOLD {
        SignalStrength::Consistent
    } else {
        SignalStrength::Emerging
    }
}

/// Classify coverage. Lower bounds are inclusive.
#[must_use]
pub fn confidence_for(coverage: f64) -> Confidence {
    if coverage >= HIGH_CONFIDENCE_COVERAGE {
        Confidence::High
    } else if coverage >= MEDIUM_CONFIDENCE_COVERAGE {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Round to two decimal places. Exact ties go to the even digit, so
/// `0.125` becomes `0.12` and `0.375` becomes `0.38`.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Credit-weighted average for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub average_grade: f64,
    pub total_credits: u32,
}

/// What fed a field score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributors {
    /// Contributing categories, in field table order.
    pub categories: Vec<Category>,
    /// Contributing course names, in catalogue order.
    pub courses: Vec<String>,
}

/// A scored career field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSignal {
    pub field: String,
    pub score: f64,
    pub signal_strength: SignalStrength,
    pub contributors: Contributors,
    pub evidence_level: EvidenceLevel,
}

/// Advisory conditions raised during analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisWarning {
    /// The catalogue has nothing unlocked at this phase.
    NoEligibleCourses(Phase),
    /// Grades were given but none belong to an eligible course.
    NoMatchingGrades,
    /// Coverage is above zero but under [`LOW_COVERAGE_WARNING`].
    LowCoverage(f64),
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::NoEligibleCourses(phase) => {
                write!(f, "No courses available for phase {phase}")
            }
            AnalysisWarning::NoMatchingGrades => f.write_str(
                "Grades were submitted but none matched eligible courses for this phase",
            ),
            AnalysisWarning::LowCoverage(coverage) => write!(
                f,
                "Very low coverage ({:.0}%): Results may not be representative",
                coverage * 100.0
            ),
        }
    }
}

/// Complete result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub phase: Phase,
    pub coverage: f64,
    pub confidence: Confidence,
    pub category_scores: Vec<CategoryScore>,
    pub field_signals: Vec<FieldSignal>,
    /// Present only when at least one warning was raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl AnalysisResult {
    /// Warnings as a slice; empty when none were raised.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or_default()
    }

    /// Whether `warning` was raised.
    #[must_use]
    pub fn has_warning(&self, warning: &AnalysisWarning) -> bool {
        let text = warning.to_string();
        self.warnings().iter().any(|w| *w == text)
    }

    /// Score for `category`, if it was graded.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.category_scores.iter().find(|s| s.category == category)
    }

    /// Signal for the named field, if it was scored.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSignal> {
        self.field_signals.iter().find(|s| s.field == name)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Running totals for one category.
struct CategoryTally {
    category: Category,
    weighted_sum: f64,
    credits: u32,
}

/// Run the analysis for `phase` over `grades`.
///
/// Repeated course names resolve to the last grade given.
pub fn analyze<C, F>(
    phase: Phase,
    grades: &[GradeInput],
    catalogue: &C,
    fields: &F,
) -> AnalysisResult
where
    C: CourseCatalogue,
    F: FieldWeightTable,
{
    let mut warnings = Vec::new();

    let mut grade_map: BTreeMap<&str, f64> = BTreeMap::new();
    for g in grades {
        grade_map.insert(g.course_name.as_str(), g.grade);
    }

    let eligible: Vec<&CourseRecord> = catalogue.eligible(phase).collect();
    if eligible.is_empty() {
        warnings.push(AnalysisWarning::NoEligibleCourses(phase));
    }

    let total_credits: u32 = eligible.iter().map(|c| c.credits).sum();
    let mut completed_credits: u32 = 0;

    // Tallies keep first-appearance (catalogue) order for stable tie-breaking.
    let mut tallies: Vec<CategoryTally> = Vec::new();
    let mut graded: Vec<&CourseRecord> = Vec::new();

    for course in &eligible {
        let Some(&grade) = grade_map.get(course.name.as_str()) else {
            continue;
        };

        completed_credits = completed_credits.saturating_add(course.credits);
        graded.push(course);

        let contribution = grade * f64::from(course.credits);
        match tallies.iter_mut().find(|t| t.category == course.category) {
            Some(tally) => {
                tally.weighted_sum += contribution;
                tally.credits = tally.credits.saturating_add(course.credits);
            }
            None => tallies.push(CategoryTally {
                category: course.category,
                weighted_sum: contribution,
                credits: course.credits,
            }),
        }
    }

    if !grades.is_empty() && completed_credits == 0 {
        warnings.push(AnalysisWarning::NoMatchingGrades);
    }

    let mut category_scores: Vec<CategoryScore> = tallies
        .iter()
        .map(|t| CategoryScore {
            category: t.category,
            average_grade: round2(t.weighted_sum / f64::from(t.credits)),
            total_credits: t.credits,
        })
        .collect();

    let coverage = if total_credits > 0 {
        round2(f64::from(completed_credits) / f64::from(total_credits))
    } else {
        0.0
    };
    if coverage > 0.0 && coverage < LOW_COVERAGE_WARNING {
        warnings.push(AnalysisWarning::LowCoverage(coverage));
    }

    let averages: BTreeMap<Category, f64> = category_scores
        .iter()
        .map(|s| (s.category, s.average_grade))
        .collect();

    let mut field_signals: Vec<FieldSignal> = fields
        .entries()
        .iter()
        .filter_map(|profile| {
            let mut weighted_sum = 0.0;
            let mut total_weight = 0.0;
            let mut contributing = Vec::new();

            for w in &profile.weights {
                if let Some(&average) = averages.get(&w.category) {
                    weighted_sum += average * w.weight;
                    total_weight += w.weight;
                    contributing.push(w.category);
                }
            }

            if contributing.is_empty() || total_weight <= 0.0 {
                return None;
            }

            let raw_score = weighted_sum / total_weight;
            let present: BTreeSet<Category> = contributing.iter().copied().collect();
            let evidence_level = if present == profile.required_categories() {
                EvidenceLevel::Complete
            } else {
                EvidenceLevel::Partial
            };
            let courses = graded
                .iter()
                .filter(|c| present.contains(&c.category))
                .map(|c| c.name.clone())
                .collect();

            Some(FieldSignal {
                field: profile.name.clone(),
                score: round2(raw_score),
                // Classified before rounding: 13.996 reports as 14.0 but stays Consistent.
                signal_strength: signal_strength(raw_score),
                contributors: Contributors {
                    categories: contributing,
                    courses,
                },
                evidence_level,
            })
        })
        .collect();

    // Stable sorts: ties keep catalogue / field table order.
    category_scores.sort_by(|a, b| b.average_grade.total_cmp(&a.average_grade));
    field_signals.sort_by(|a, b| b.score.total_cmp(&a.score));

    AnalysisResult {
        phase,
        coverage,
        confidence: confidence_for(coverage),
        category_scores,
        field_signals,
        warnings: (!warnings.is_empty())
            .then(|| warnings.iter().map(ToString::to_string).collect()),
    }
}

// =============================================================================
// TESTS
// =============================================================================

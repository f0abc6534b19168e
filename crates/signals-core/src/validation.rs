//! # Request Validation
//!
//! Boundary checks that run before the analysis engine.
//!
//! The catalogue is passed in rather than looked up globally, so whichever
//! catalogue the caller loaded decides which course names are valid.

use crate::analysis::GradeInput;
use crate::catalogue::{CourseCatalogue, Phase};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Lowest accepted grade.
pub const MIN_GRADE: f64 = 0.0;
/// Highest accepted grade.
pub const MAX_GRADE: f64 = 20.0;

/// An analysis request as received from a caller.
///
/// `current_phase` is kept as a wide integer so out-of-range values reach
/// [`validate`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub current_phase: i64,
    pub grades: Vec<GradeInput>,
}

impl AnalysisRequest {
    /// Create a new request.
    pub fn new(current_phase: i64, grades: Vec<GradeInput>) -> Self {
        Self {
            current_phase,
            grades,
        }
    }
}

/// A request that passed every boundary check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub phase: Phase,
    pub grades: Vec<GradeInput>,
}

/// Check a request against `catalogue`.
///
/// Returns the first problem found: the phase first, then each grade in
/// input order (range before name).
pub fn validate<C: CourseCatalogue>(
    request: AnalysisRequest,
    catalogue: &C,
) -> Result<ValidatedRequest, ValidationError> {
    let phase = Phase::try_from(request.current_phase)?;

    for g in &request.grades {
        if !is_valid_grade(g.grade) {
            return Err(ValidationError::GradeOutOfRange {
                course_name: g.course_name.clone(),
                grade: g.grade,
            });
        }
        if catalogue.find_by_name(&g.course_name).is_none() {
            return Err(ValidationError::UnknownCourse(g.course_name.clone()));
        }
    }

    Ok(ValidatedRequest {
        phase,
        grades: request.grades,
    })
}

/// Whether `grade` is a finite value in `0..=20`.
#[must_use]
pub fn is_valid_grade(grade: f64) -> bool {
    grade.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&grade)
}

// =============================================================================
// TESTS
// =============================================================================

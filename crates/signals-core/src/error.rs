//! # Errors
//!
//! Error types for reference data loading and request validation.
//!
//! The analysis engine itself has no error path: once a request has been
//! validated it always produces a result. Everything that can fail happens
//! either at startup (reference data) or at the request boundary.

use crate::catalogue::{Category, CourseId, UnknownCategory};
use thiserror::Error;

/// Invalid course catalogue data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    #[error("duplicate course id {0}")]
    DuplicateId(CourseId),

    #[error("duplicate course name '{0}'")]
    DuplicateName(String),

    #[error("course {0} has an empty name")]
    EmptyName(CourseId),

    #[error("course '{0}' must carry at least one credit")]
    ZeroCredits(String),
}

/// Invalid field weighting data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldTableError {
    #[error("field name must not be empty")]
    EmptyFieldName,

    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    #[error("field '{0}' has no category weights")]
    NoWeights(String),

    #[error("field '{field}' lists category '{category}' more than once")]
    DuplicateCategory { field: String, category: Category },

    #[error("field '{field}' has invalid weight {weight} for '{category}' (must be finite and > 0)")]
    InvalidWeight {
        field: String,
        category: Category,
        weight: f64,
    },
}

/// Failure converting reference data from its JSON representation.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected} at {location}")]
    Shape {
        expected: &'static str,
        location: String,
    },

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    FieldTable(#[from] FieldTableError),
}

/// A request rejected at the boundary, before analysis runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("phase must be between 1 and 3, got {0}")]
    PhaseOutOfRange(i64),

    #[error("grade for '{course_name}' must be between 0 and 20, got {grade}")]
    GradeOutOfRange { course_name: String, grade: f64 },

    #[error("unknown course '{0}'")]
    UnknownCourse(String),
}

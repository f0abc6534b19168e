//! # Signals Core
//!
//! The pure analysis engine behind Career Signals.
//!
//! A student's grades are scored against a fixed curriculum (the
//! [`Catalogue`]) and the resulting category averages are blended into
//! career-field signals using a [`FieldWeights`] table.
//!
//! ## Layout
//!
//! - [`catalogue`]: course records, categories and phases
//! - [`fields`]: the field weighting table
//! - [`analysis`]: the engine itself
//! - [`validation`]: request checks performed before the engine runs
//! - [`formats`]: JSON conversion of reference data
//! - [`report`]: plain text rendering of results
//!
//! ## Example
//!
//! ```
//! use signals_core::{analyze, Catalogue, FieldWeights, GradeInput, Phase};
//!
//! let catalogue = Catalogue::builtin();
//! let fields = FieldWeights::builtin();
//! let grades = vec![
//!     GradeInput::new("Databases", 12.0),
//!     GradeInput::new("Data Processing & Analysis", 15.0),
//! ];
//!
//! let result = analyze(Phase::FIRST, &grades, &catalogue, &fields);
//! assert_eq!(result.category_scores[0].average_grade, 13.0);
//! ```

pub mod analysis;
pub mod catalogue;
pub mod error;
pub mod fields;
pub mod formats;
pub mod report;
pub mod validation;

pub use analysis::{
    AnalysisResult, AnalysisWarning, CategoryScore, Confidence, Contributors, EvidenceLevel,
    FieldSignal, GradeInput, SignalStrength, analyze, confidence_for, round2, signal_strength,
};
pub use catalogue::{
    Catalogue, Category, CourseCatalogue, CourseId, CourseRecord, Phase, UnknownCategory,
};
pub use error::{CatalogueError, FieldTableError, FormatError, ValidationError};
pub use fields::{CategoryWeight, FieldProfile, FieldWeightTable, FieldWeights};
pub use formats::{
    catalogue_from_json, catalogue_to_json, field_weights_from_json, field_weights_to_json,
    field_weights_value,
};
pub use validation::{
    AnalysisRequest, MAX_GRADE, MIN_GRADE, ValidatedRequest, is_valid_grade, validate,
};

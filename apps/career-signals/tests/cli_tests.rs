//! Integration tests for Career Signals CLI commands.
//!
//! Uses tempfile for testing file-based operations.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use career_signals::cli::{
    Cli, CliError, Commands, analyze_file, cmd_analyze, cmd_courses, cmd_fields, render_courses,
    render_fields,
};
use career_signals::config::{ConfigError, DataArgs, ReferenceData, ServerConfig};
use clap::Parser;
use signals_core::{
    Category, Confidence, CourseCatalogue, EvidenceLevel, FieldWeights, FormatError, Phase,
    ValidationError,
};
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Two phase-1 grades against the built-in catalogue.
fn create_grades_json(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "grades.json",
        r#"[
            {"course_name": "Databases", "grade": 15},
            {"course_name": "Business Fundamentals", "grade": 14}
        ]"#,
    )
}

fn create_catalogue_json(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "catalogue.json",
        r#"[
            {"id": 10, "course_name": "Statistics", "category": "Data", "phase": 1, "credits": 5},
            {"id": 11, "course_name": "Secure Coding", "category": "Security", "phase": 2, "credits": 5}
        ]"#,
    )
}

fn create_fields_json(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "fields.json",
        r#"{
            "Analyst": {"Data": 1.0},
            "Defender": {"Security": 0.8, "Data": 0.2}
        }"#,
    )
}

// =============================================================================
// ANALYZE COMMAND TESTS
// =============================================================================

#[test]
fn test_analyze_file_with_builtin_data() {
    let temp = create_temp_dir();
    let grades = create_grades_json(&temp);

    let result = analyze_file(1, &grades, &ReferenceData::builtin()).unwrap();
    assert_eq!(result.phase, Phase::FIRST);
    assert!((result.coverage - 0.15).abs() < 1e-9);
    assert_eq!(result.confidence, Confidence::Low);
    assert_eq!(result.category_scores.len(), 2);
    assert_eq!(result.category_scores[0].category, Category::Data);
    assert_eq!(result.warnings().len(), 1);
}

#[test]
fn test_analyze_file_with_custom_data() {
    let temp = create_temp_dir();
    let catalogue = create_catalogue_json(&temp);
    let fields = create_fields_json(&temp);
    let grades = write_file(
        &temp,
        "grades.json",
        r#"[{"course_name": "Statistics", "grade": 16}]"#,
    );

    let data = ReferenceData::load(Some(&catalogue), Some(&fields)).unwrap();
    let result = analyze_file(2, &grades, &data).unwrap();

    assert!((result.coverage - 0.5).abs() < 1e-9);
    assert_eq!(result.confidence, Confidence::Medium);
    let analyst = result.field("Analyst").unwrap();
    assert_eq!(analyst.evidence_level, EvidenceLevel::Complete);
    let defender = result.field("Defender").unwrap();
    assert_eq!(defender.evidence_level, EvidenceLevel::Partial);
    assert!((defender.score - 16.0).abs() < 1e-9);
}

#[test]
fn test_analyze_rejects_unknown_course() {
    let temp = create_temp_dir();
    let grades = write_file(
        &temp,
        "grades.json",
        r#"[{"course_name": "Astrology", "grade": 10}]"#,
    );

    let err = analyze_file(1, &grades, &ReferenceData::builtin()).unwrap_err();
    match err {
        CliError::Validation(ValidationError::UnknownCourse(name)) => {
            assert_eq!(name, "Astrology");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_analyze_rejects_bad_phase() {
    let temp = create_temp_dir();
    let grades = create_grades_json(&temp);

    let err = analyze_file(0, &grades, &ReferenceData::builtin()).unwrap_err();
    assert!(matches!(
        err,
        CliError::Validation(ValidationError::PhaseOutOfRange(0))
    ));
}

#[test]
fn test_analyze_reports_malformed_grades() {
    let temp = create_temp_dir();
    let grades = write_file(&temp, "grades.json", "{not json");

    let err = analyze_file(1, &grades, &ReferenceData::builtin()).unwrap_err();
    assert!(matches!(err, CliError::ParseGrades { .. }));
    assert!(err.to_string().contains("grades.json"));
}

#[test]
fn test_analyze_reports_missing_grades_file() {
    let temp = create_temp_dir();
    let missing = temp.path().join("absent.json");

    let err = analyze_file(1, &missing, &ReferenceData::builtin()).unwrap_err();
    assert!(matches!(err, CliError::ReadGrades { .. }));
}

#[test]
fn test_cmd_analyze_text_and_json() {
    let temp = create_temp_dir();
    let grades = create_grades_json(&temp);
    let data = DataArgs::default();

    assert!(cmd_analyze(2, &grades, &data, false).is_ok());
    assert!(cmd_analyze(2, &grades, &data, true).is_ok());
}

// =============================================================================
// COURSES / FIELDS COMMAND TESTS
// =============================================================================

#[test]
fn test_render_courses_filters_by_phase_and_category() {
    let data = ReferenceData::builtin();
    let text = render_courses(&data, Some(Phase::SECOND), Some(Category::Security));

    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("Legal Frameworks"));
    assert!(!text.contains("Cyber Resilience"));
}

#[test]
fn test_render_courses_reports_empty_selection() {
    let temp = create_temp_dir();
    let catalogue = create_catalogue_json(&temp);
    let data = ReferenceData::load(Some(&catalogue), None).unwrap();

    let text = render_courses(&data, Some(Phase::THIRD), None);
    assert_eq!(text, "No courses match.\n");
}

#[test]
fn test_cmd_courses_validates_filters() {
    let data = DataArgs::default();

    assert!(cmd_courses(Some(1), Some("data"), &data, false).is_ok());
    assert!(cmd_courses(None, None, &data, true).is_ok());
    assert!(matches!(
        cmd_courses(Some(5), None, &data, false),
        Err(CliError::Validation(ValidationError::PhaseOutOfRange(5)))
    ));
    assert!(matches!(
        cmd_courses(None, Some("Gardening"), &data, false),
        Err(CliError::UnknownCategory(_))
    ));
}

#[test]
fn test_render_fields_lists_weights_in_order() {
    let text = render_fields(&FieldWeights::builtin());
    let first = text.lines().next().unwrap();

    assert_eq!(first, "Data Science: Data 0.5, Programming 0.3, Business 0.2");
    assert_eq!(text.lines().count(), 7);
}

#[test]
fn test_cmd_fields_with_custom_table() {
    let temp = create_temp_dir();
    let fields = create_fields_json(&temp);
    let data = DataArgs {
        catalogue: None,
        fields: Some(fields),
    };

    assert!(cmd_fields(&data, false).is_ok());
    assert!(cmd_fields(&data, true).is_ok());
}

// =============================================================================
// REFERENCE DATA LOADING TESTS
// =============================================================================

#[test]
fn test_load_defaults_to_builtin() {
    let data = ReferenceData::load(None, None).unwrap();
    assert_eq!(data, ReferenceData::builtin());
    assert_eq!(data.catalogue.len(), 41);
}

#[test]
fn test_load_missing_catalogue_file() {
    let temp = create_temp_dir();
    let missing = temp.path().join("nope.json");

    let err = ReferenceData::load(Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_load_rejects_duplicate_course_ids() {
    let temp = create_temp_dir();
    let catalogue = write_file(
        &temp,
        "catalogue.json",
        r#"[
            {"id": 1, "course_name": "A", "category": "Data", "phase": 1, "credits": 3},
            {"id": 1, "course_name": "B", "category": "Data", "phase": 1, "credits": 3}
        ]"#,
    );

    let err = ReferenceData::load(Some(&catalogue), None).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Data {
            source: FormatError::Catalogue(_),
            ..
        }
    ));
}

#[test]
fn test_load_rejects_unknown_field_category() {
    let temp = create_temp_dir();
    let fields = write_file(&temp, "fields.json", r#"{"Chef": {"Cooking": 1.0}}"#);

    let err = ReferenceData::load(None, Some(&fields)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Data {
            source: FormatError::UnknownCategory(_),
            ..
        }
    ));
}

// =============================================================================
// ARGUMENT PARSING TESTS
// =============================================================================

#[test]
fn test_parse_analyze_command() {
    let cli = Cli::try_parse_from([
        "career-signals",
        "analyze",
        "--phase",
        "2",
        "--grades",
        "grades.json",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Analyze {
            phase,
            grades,
            json,
            ..
        } => {
            assert_eq!(phase, 2);
            assert_eq!(grades, PathBuf::from("grades.json"));
            assert!(json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_serve_with_rate_limit() {
    let cli = Cli::try_parse_from([
        "career-signals",
        "serve",
        "--host",
        "0.0.0.0",
        "--port",
        "9100",
        "--rate-limit",
        "30",
    ])
    .unwrap();

    let Commands::Serve(args) = cli.command else {
        panic!("expected serve command");
    };
    let config = ServerConfig::from_args(args).unwrap();
    assert_eq!(config.bind_address(), "0.0.0.0:9100");
    assert_eq!(config.rate_limit.map(|n| n.get()), Some(30));
    assert_eq!(config.data.catalogue.len(), 41);
}

#[test]
fn test_parse_rejects_zero_rate_limit() {
    let parsed = Cli::try_parse_from(["career-signals", "serve", "--rate-limit", "0"]);
    assert!(parsed.is_err());
}

//! # Command Line Interface
//!
//! `career-signals <command>`:
//!
//! - `serve`: run the HTTP API
//! - `analyze`: score a JSON grades file
//! - `courses`: list the catalogue
//! - `fields`: show the field weight table
//!
//! Each command has a `cmd_*` function so it can be driven without spawning
//! the binary.

use crate::api::{AppState, create_router};
use crate::config::{ConfigError, DataArgs, ReferenceData, ServeArgs, ServerConfig};
use clap::{Parser, Subcommand};
use signals_core::{
    AnalysisRequest, AnalysisResult, Category, CourseCatalogue, FieldWeightTable, FormatError,
    GradeInput, Phase, UnknownCategory, ValidationError, analyze, field_weights_to_json,
    validate,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read grades file {}: {source}", .path.display())]
    ReadGrades {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid grades file {}: {source}", .path.display())]
    ParseGrades {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "career-signals")]
#[command(version, about = "Curriculum progress scoring and career field signals", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Analyze grades from a JSON file
    Analyze {
        /// Current curriculum phase (1-3)
        #[arg(long)]
        phase: i64,
        /// JSON array of {"course_name", "grade"} objects
        #[arg(long)]
        grades: PathBuf,
        #[command(flatten)]
        data: DataArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List catalogue courses
    Courses {
        /// Only courses introduced in this phase
        #[arg(long)]
        phase: Option<i64>,
        /// Only courses in this category
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        data: DataArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the field weight table
    Fields {
        #[command(flatten)]
        data: DataArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Serve(args) => cmd_serve(ServerConfig::from_args(args)?).await,
        Commands::Analyze {
            phase,
            grades,
            data,
            json,
        } => cmd_analyze(phase, &grades, &data, json),
        Commands::Courses {
            phase,
            category,
            data,
            json,
        } => cmd_courses(phase, category.as_deref(), &data, json),
        Commands::Fields { data, json } => cmd_fields(&data, json),
    }
}

// =============================================================================
// SERVE
// =============================================================================

/// Run the API server until Ctrl-C.
pub async fn cmd_serve(config: ServerConfig) -> Result<(), CliError> {
    let bind_address = config.bind_address();
    let mut state = AppState::from(config.data);
    if let Some(per_minute) = config.rate_limit {
        info!(per_minute = per_minute.get(), "Rate limiting enabled");
        state = state.with_rate_limit(per_minute);
    }

    let app = create_router(state);
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(address = %listener.local_addr()?, requested = %bind_address, "Career Signals API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

// =============================================================================
// ANALYZE
// =============================================================================

/// Read a grades file, validate it and run the analysis.
pub fn analyze_file(
    phase: i64,
    grades_path: &Path,
    data: &ReferenceData,
) -> Result<AnalysisResult, CliError> {
    let text = std::fs::read_to_string(grades_path).map_err(|source| CliError::ReadGrades {
        path: grades_path.to_path_buf(),
        source,
    })?;
    let grades: Vec<GradeInput> =
        serde_json::from_str(&text).map_err(|source| CliError::ParseGrades {
            path: grades_path.to_path_buf(),
            source,
        })?;

    let validated = validate(AnalysisRequest::new(phase, grades), &data.catalogue)?;
    Ok(analyze(
        validated.phase,
        &validated.grades,
        &data.catalogue,
        &data.fields,
    ))
}

pub fn cmd_analyze(
    phase: i64,
    grades_path: &Path,
    data_args: &DataArgs,
    json_mode: bool,
) -> Result<(), CliError> {
    let data = ReferenceData::from_args(data_args)?;
    let result = analyze_file(phase, grades_path, &data)?;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", result.to_text());
    }
    Ok(())
}

// =============================================================================
// COURSES / FIELDS
// =============================================================================

/// Render the filtered course list as text.
pub fn render_courses(
    data: &ReferenceData,
    phase: Option<Phase>,
    category: Option<Category>,
) -> String {
    let courses = data.catalogue.filter(phase, category);
    if courses.is_empty() {
        return "No courses match.\n".to_string();
    }

    let mut output = String::new();
    for course in courses {
        output.push_str(&format!(
            "{:>3}  {:<42} {:<22} phase {}  {:>2} credits\n",
            course.id, course.name, course.category, course.phase, course.credits
        ));
    }
    output
}

pub fn cmd_courses(
    phase: Option<i64>,
    category: Option<&str>,
    data_args: &DataArgs,
    json_mode: bool,
) -> Result<(), CliError> {
    let phase = phase.map(Phase::try_from).transpose()?;
    let category = category.map(str::parse::<Category>).transpose()?;
    let data = ReferenceData::from_args(data_args)?;

    if json_mode {
        let courses = data.catalogue.filter(phase, category);
        println!("{}", serde_json::to_string_pretty(&courses)?);
    } else {
        print!("{}", render_courses(&data, phase, category));
    }
    Ok(())
}

/// Render the field weight table as text.
pub fn render_fields<F: FieldWeightTable>(fields: &F) -> String {
    let mut output = String::new();
    for profile in fields.entries() {
        let weights = profile
            .weights
            .iter()
            .map(|w| format!("{} {}", w.category, w.weight))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("{}: {}\n", profile.name, weights));
    }
    output
}

pub fn cmd_fields(data_args: &DataArgs, json_mode: bool) -> Result<(), CliError> {
    let data = ReferenceData::from_args(data_args)?;

    if json_mode {
        println!("{}", field_weights_to_json(&data.fields)?);
    } else {
        print!("{}", render_fields(&data.fields));
    }
    Ok(())
}

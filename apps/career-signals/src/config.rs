//! # Configuration
//!
//! Command line flags with environment fallbacks, resolved into the values
//! the server and commands run with.
//!
//! | Flag | Environment | Default |
//! |---|---|---|
//! | `--host` | `CAREER_SIGNALS_HOST` | `127.0.0.1` |
//! | `--port` | `CAREER_SIGNALS_PORT` | `8000` |
//! | `--rate-limit` | `CAREER_SIGNALS_RATE_LIMIT` | unlimited |
//! | `--catalogue` | `CAREER_SIGNALS_CATALOGUE` | built-in curriculum |
//! | `--fields` | `CAREER_SIGNALS_FIELDS` | built-in field table |
//!
//! Reference data is read once here; nothing reloads it later.

use clap::Args;
use signals_core::{
    Catalogue, CourseCatalogue, FieldWeights, FormatError, catalogue_from_json,
    field_weights_from_json,
};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// ERRORS
// =============================================================================

/// Failure resolving configuration or loading reference data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid reference data in {}: {source}", .path.display())]
    Data { path: PathBuf, source: FormatError },
}

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Where to load reference data from.
#[derive(Debug, Clone, Default, Args)]
pub struct DataArgs {
    /// Course catalogue JSON file (defaults to the built-in curriculum)
    #[arg(long, env = "CAREER_SIGNALS_CATALOGUE")]
    pub catalogue: Option<PathBuf>,

    /// Field weight table JSON file (defaults to the built-in table)
    #[arg(long, env = "CAREER_SIGNALS_FIELDS")]
    pub fields: Option<PathBuf>,
}

/// Arguments of the `serve` command.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "CAREER_SIGNALS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "CAREER_SIGNALS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum requests per minute across all clients
    #[arg(long, env = "CAREER_SIGNALS_RATE_LIMIT")]
    pub rate_limit: Option<NonZeroU32>,

    #[command(flatten)]
    pub data: DataArgs,
}

// =============================================================================
// RESOLVED CONFIGURATION
// =============================================================================

/// Catalogue and field table the process runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub catalogue: Catalogue,
    pub fields: FieldWeights,
}

impl ReferenceData {
    /// The built-in curriculum and field table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            catalogue: Catalogue::builtin(),
            fields: FieldWeights::builtin(),
        }
    }

    /// Load reference data, falling back to the built-in data for any path
    /// that is `None`.
    pub fn load(catalogue: Option<&Path>, fields: Option<&Path>) -> Result<Self, ConfigError> {
        let catalogue = match catalogue {
            Some(path) => {
                let catalogue = catalogue_from_json(&read(path)?).map_err(|source| {
                    ConfigError::Data {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                info!(path = %path.display(), courses = catalogue.len(), "Loaded course catalogue");
                catalogue
            }
            None => Catalogue::builtin(),
        };

        let fields = match fields {
            Some(path) => {
                let fields = field_weights_from_json(&read(path)?).map_err(|source| {
                    ConfigError::Data {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                info!(path = %path.display(), fields = fields.len(), "Loaded field weight table");
                fields
            }
            None => FieldWeights::builtin(),
        };

        Ok(Self { catalogue, fields })
    }

    /// Load using the paths in `args`.
    pub fn from_args(args: &DataArgs) -> Result<Self, ConfigError> {
        Self::load(args.catalogue.as_deref(), args.fields.as_deref())
    }
}

/// Everything `serve` needs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit: Option<NonZeroU32>,
    pub data: ReferenceData,
}

impl ServerConfig {
    /// Resolve arguments, loading reference data.
    pub fn from_args(args: ServeArgs) -> Result<Self, ConfigError> {
        let data = ReferenceData::from_args(&args.data)?;
        Ok(Self {
            host: args.host,
            port: args.port,
            rate_limit: args.rate_limit,
            data,
        })
    }

    /// `host:port` for logging.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

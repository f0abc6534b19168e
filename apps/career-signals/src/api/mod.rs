//! # HTTP API
//!
//! axum server exposing the catalogue, the field table and the analysis
//! engine.
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | GET | `/` | welcome message |
//! | GET | `/health` | liveness and loaded data sizes |
//! | GET | `/courses` | catalogue, filterable by `phase` and `category` |
//! | GET | `/courses/{id}` | one course |
//! | GET | `/fields` | field weight table |
//! | POST | `/analysis` | validate grades and run the analysis |
//!
//! Reference data lives in [`AppState`] behind `Arc` and is never mutated,
//! so handlers need no locking.

mod error;
mod handlers;
mod rate_limit;

pub use error::{ApiError, ApiResult};
pub use rate_limit::{GlobalLimiter, limiter};

use crate::config::ReferenceData;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use signals_core::{Catalogue, FieldWeights};
use std::num::NonZeroU32;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<Catalogue>,
    pub fields: Arc<FieldWeights>,
    pub limiter: Option<Arc<GlobalLimiter>>,
}

impl AppState {
    /// State over the given reference data, without rate limiting.
    #[must_use]
    pub fn new(catalogue: Catalogue, fields: FieldWeights) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            fields: Arc::new(fields),
            limiter: None,
        }
    }

    /// State over the built-in curriculum and field table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from(ReferenceData::builtin())
    }

    /// Limit the whole API to `per_minute` requests per minute.
    #[must_use]
    pub fn with_rate_limit(mut self, per_minute: NonZeroU32) -> Self {
        self.limiter = Some(Arc::new(limiter(per_minute)));
        self
    }
}

impl From<ReferenceData> for AppState {
    fn from(data: ReferenceData) -> Self {
        Self::new(data.catalogue, data.fields)
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/courses", get(handlers::list_courses))
        .route("/courses/{id}", get(handlers::get_course))
        .route("/fields", get(handlers::list_fields))
        .route("/analysis", post(handlers::run_analysis))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

//! Global request rate limiting.
//!
//! One token bucket shared by every client. Requests over the quota get 429
//! with a `Retry-After` header (whole seconds, at least 1).

use super::{AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use tracing::warn;

/// Unkeyed limiter shared across all requests.
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Build a limiter allowing `per_minute` requests per minute.
#[must_use]
pub fn limiter(per_minute: NonZeroU32) -> GlobalLimiter {
    RateLimiter::direct(Quota::per_minute(per_minute))
}

/// Middleware rejecting requests once the quota is spent.
pub async fn enforce(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(limiter) = state.limiter.as_deref() else {
        return Ok(next.run(req).await);
    };

    match limiter.check() {
        Ok(()) => Ok(next.run(req).await),
        Err(not_until) => {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            let retry_after_secs = wait.as_secs().max(1);
            warn!(
                path = %req.uri().path(),
                retry_after_secs,
                "Rate limit exceeded"
            );
            Err(ApiError::RateLimited { retry_after_secs })
        }
    }
}

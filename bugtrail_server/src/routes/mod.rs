//! Axum router construction.

mod api;
mod health;

use axum::{Router, middleware};
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete router: health, `/api` routes, CORS and trace layers.
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api", api::router())
        .layer(ServiceBuilder::new().layer(cors::cors_layer(
            state.config.cors_allowed_origins.as_deref(),
        )))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

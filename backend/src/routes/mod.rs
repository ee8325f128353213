//! API route definitions

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::middleware::auth_middleware;
use crate::AppState;

/// Build all API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/auth", auth_routes())
        .nest("/analyses", analysis_routes(state))
}

/// Public authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(handlers::auth::send_otp))
        .route("/verify-otp", post(handlers::auth::verify_otp))
}

/// Analysis routes, all behind authentication
fn analysis_routes(state: AppState) -> Router<AppState> {
    let max_image_bytes = state.config.upload.max_image_bytes;
    Router::new()
        .route(
            "/",
            post(handlers::analysis::analyze).get(handlers::analysis::list_analyses),
        )
        .route("/:id", get(handlers::analysis::get_analysis))
        .layer(DefaultBodyLimit::max(max_image_bytes))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

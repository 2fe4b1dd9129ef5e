//! Router construction for the Log Pose server.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use logpose_core::ports::WaypointStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::AdminSecret;
use crate::handlers;

/// Build the full axum router with all routes and middleware.
pub fn build_router(store: Arc<dyn WaypointStore>, secret: AdminSecret) -> Router {
    let api = Router::new()
        .route(
            "/api/current",
            get(handlers::waypoints::get_current).post(handlers::waypoints::set_current),
        )
        .route(
            "/api/locations",
            get(handlers::waypoints::list_waypoints).post(handlers::waypoints::replace_waypoints),
        )
        .route("/api/auth/verify", post(handlers::waypoints::verify_secret));

    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(api)
        .layer(Extension(store))
        .layer(Extension(secret))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
}

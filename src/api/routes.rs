use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Review feed
        .route("/reviews", get(handlers::get_reviews))
        .route("/reviews", post(handlers::create_review))
        .route("/reviews/:id", delete(handlers::delete_review))
        .route("/reviews/import", post(handlers::import_reviews))
        // Profile
        .route("/profile", get(handlers::get_profile))
        .route("/profile", put(handlers::update_profile))
        .route("/profile/interests", post(handlers::toggle_interest))
        .route("/profile/searches", post(handlers::record_search))
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        // Request ids must be assigned before the trace layer opens its span
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

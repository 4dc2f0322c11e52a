use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{Category, RecommendedReview, Review, UserProfile};
use crate::services::ingest::{self, ImportSummary, RawReviewRecord};
use crate::services::recommendations;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub title: String,
    pub content: String,
    pub rating: u8,
    pub category: Category,
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewFilter {
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct ImportReviewsRequest {
    pub records: Vec<RawReviewRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub preferred_rating_min: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleInterestRequest {
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct RecordSearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct RecordSearchResponse {
    pub extracted_terms: Vec<String>,
    pub search_history: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Get the review feed, optionally filtered to one category
pub async fn get_reviews(
    State(state): State<AppState>,
    Query(filter): Query<ReviewFilter>,
) -> Json<Vec<Review>> {
    let inner = state.inner.read().await;
    let reviews: Vec<Review> = inner
        .reviews
        .iter()
        .filter(|r| filter.category.map_or(true, |c| r.category == c))
        .cloned()
        .collect();
    Json(reviews)
}

/// Post a new review to the top of the feed
pub async fn create_review(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Review title cannot be empty".to_string(),
        ));
    }
    if request.content.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Review content cannot be empty".to_string(),
        ));
    }
    if request.author.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Author name cannot be empty".to_string(),
        ));
    }
    if !(1..=5).contains(&request.rating) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between 1 and 5, got {}",
            request.rating
        )));
    }

    let review = Review::new(
        request.title,
        request.content,
        request.rating,
        request.category,
        request.author,
    );

    let mut inner = state.inner.write().await;
    inner.reviews.insert(0, review.clone());

    Ok((StatusCode::CREATED, Json(review)))
}

/// Delete a review by id
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let mut inner = state.inner.write().await;
    let before = inner.reviews.len();
    inner.reviews.retain(|r| r.id != id);

    if inner.reviews.len() == before {
        return Err(AppError::NotFound(format!("No review with id {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Bulk-import raw dataset records into the feed
pub async fn import_reviews(
    State(state): State<AppState>,
    Json(request): Json<ImportReviewsRequest>,
) -> Json<ImportSummary> {
    let mut inner = state.inner.write().await;
    let (reviews, summary) = ingest::import_records(&inner.reviews, &request.records);
    inner.reviews.extend(reviews);

    tracing::info!(
        imported = summary.imported,
        duplicates = summary.duplicates,
        invalid = summary.invalid,
        "Bulk import finished"
    );

    Json(summary)
}

/// Get the user profile
pub async fn get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    let inner = state.inner.read().await;
    Json(inner.profile.clone())
}

/// Update profile name and/or minimum preferred rating
pub async fn update_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Display name cannot be empty".to_string(),
            ));
        }
    }
    if let Some(min) = request.preferred_rating_min {
        if !(1..=5).contains(&min) {
            return Err(AppError::InvalidInput(format!(
                "Minimum rating must be between 1 and 5, got {}",
                min
            )));
        }
    }

    let mut inner = state.inner.write().await;
    if let Some(name) = request.name {
        inner.profile.name = name;
    }
    if let Some(min) = request.preferred_rating_min {
        inner.profile.preferred_rating_min = min;
    }
    Ok(Json(inner.profile.clone()))
}

/// Toggle an interest category on the profile
pub async fn toggle_interest(
    State(state): State<AppState>,
    Json(request): Json<ToggleInterestRequest>,
) -> Json<UserProfile> {
    let mut inner = state.inner.write().await;
    let active = inner.profile.toggle_interest(request.category);

    tracing::debug!(category = %request.category, active, "Interest toggled");
    Json(inner.profile.clone())
}

/// Record a search query in the profile history
pub async fn record_search(
    State(state): State<AppState>,
    Json(request): Json<RecordSearchRequest>,
) -> AppResult<Json<RecordSearchResponse>> {
    if request.query.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let mut inner = state.inner.write().await;
    let extracted_terms = inner.profile.record_search(&request.query);

    Ok(Json(RecordSearchResponse {
        extracted_terms,
        search_history: inner.profile.search_history.clone(),
    }))
}

/// Rank the feed against the profile and return the top matches
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<Vec<RecommendedReview>> {
    let inner = state.inner.read().await;
    let matches = recommendations::recommend(&inner.reviews, &inner.profile);

    tracing::info!(
        request_id = %request_id,
        reviews = inner.reviews.len(),
        matches = matches.len(),
        "Recommendations computed"
    );

    Json(matches)
}

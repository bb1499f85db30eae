use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MoodPreferences, Recommendation, ResolvedRecommendation},
    routes::AppState,
    services::recommendations,
};

/// Upper bound on recommendations resolved per request
const MAX_BATCH_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub results: Vec<ResolvedRecommendation>,
}

/// Handler resolving model-produced recommendations to catalog records
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ResolveRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if request.recommendations.len() > MAX_BATCH_SIZE {
        return Err(AppError::InvalidInput(format!(
            "At most {} recommendations can be resolved at once",
            MAX_BATCH_SIZE
        )));
    }

    tracing::info!(
        request_id = %request_id,
        count = request.recommendations.len(),
        "Processing resolve request"
    );

    let results =
        recommendations::resolve_recommendations(state.catalog.clone(), request.recommendations)
            .await;

    Ok(Json(RecommendationResponse { results }))
}

/// Handler for the mood questionnaire: ask the model, then resolve
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(prefs): Json<MoodPreferences>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(request_id = %request_id, "Processing mood recommendation request");

    let results = recommendations::recommend_for_mood(
        state.recommender.clone(),
        state.catalog.clone(),
        &prefs,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        count = results.len(),
        "Mood recommendations completed"
    );

    Ok(Json(RecommendationResponse { results }))
}

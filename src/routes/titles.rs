use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CatalogList, CatalogRecord, MediaKind, TitleDetails},
    routes::AppState,
    services::title_search,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    /// Omitted: search movies and series together
    #[serde(default)]
    kind: Option<MediaKind>,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<CatalogRecord>>> {
    let records = title_search::search_titles(state.catalog.clone(), params.kind, &params.q).await?;
    Ok(Json(records))
}

/// Handler for GET /titles/:kind/:id
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(MediaKind, u64)>,
) -> AppResult<Json<TitleDetails>> {
    let details = title_search::title_details(state.catalog.clone(), kind, id).await?;
    Ok(Json(details))
}

/// Handler for GET /titles/:kind/lists/:list
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path((kind, list)): Path<(MediaKind, CatalogList)>,
) -> AppResult<Json<Vec<CatalogRecord>>> {
    let records = title_search::browse_list(state.catalog.clone(), kind, list).await?;
    Ok(Json(records))
}

/// TMDB catalog provider
///
/// Title search per kind (/search/movie, /search/tv) or across both
/// (/search/multi), title details with release certifications, and the
/// curated browse lists. Responses are not cached here; every call hits the
/// API.
use crate::{
    error::{AppError, AppResult},
    models::{CatalogList, CatalogRecord, MediaKind, TitleDetails, TmdbDetails, TmdbSearchResponse},
    services::providers::CatalogSearch,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Extra sections fetched with a details request, used for the age rating
const DETAILS_APPENDS: &str = "release_dates,content_ratings";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, kind: MediaKind) -> String {
        format!("{}/search/{}", self.api_url, kind.path_segment())
    }

    fn multi_search_url(&self) -> String {
        format!("{}/search/multi", self.api_url)
    }

    fn details_url(&self, kind: MediaKind, id: u64) -> String {
        format!("{}/{}/{}", self.api_url, kind.path_segment(), id)
    }

    fn list_url(&self, kind: MediaKind, list: CatalogList) -> AppResult<String> {
        let path = list.path(kind).ok_or_else(|| {
            AppError::InvalidInput(format!("No {:?} list for {}", list, kind))
        })?;
        Ok(format!("{}/{}", self.api_url, path))
    }

    /// GET with the API key attached; 404 becomes `NotFound`, any other
    /// non-success status becomes `ExternalApi`
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB has no resource at {}", url)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

fn require_query(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait::async_trait]
impl CatalogSearch for TmdbProvider {
    async fn search(&self, kind: MediaKind, title: &str) -> AppResult<Vec<CatalogRecord>> {
        require_query(title)?;

        let search: TmdbSearchResponse = self
            .get_json(&self.search_url(kind), &[("query", title)])
            .await?;
        let records = search.into_records(kind);

        tracing::info!(
            query = %title,
            kind = %kind,
            results = records.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(records)
    }

    async fn search_all(&self, title: &str) -> AppResult<Vec<CatalogRecord>> {
        require_query(title)?;

        let search: TmdbSearchResponse = self
            .get_json(&self.multi_search_url(), &[("query", title)])
            .await?;
        let hits = search.results.len();
        let records = search.into_multi_records();

        tracing::info!(
            query = %title,
            hits,
            results = records.len(),
            provider = "tmdb",
            "Multi search completed"
        );

        Ok(records)
    }

    async fn details(&self, kind: MediaKind, id: u64) -> AppResult<TitleDetails> {
        let raw: TmdbDetails = self
            .get_json(
                &self.details_url(kind, id),
                &[("append_to_response", DETAILS_APPENDS)],
            )
            .await?;
        let details = raw.into_details(kind);

        tracing::info!(
            id,
            kind = %kind,
            age_rating = %details.age_rating,
            provider = "tmdb",
            "Title details fetched"
        );

        Ok(details)
    }

    async fn list(&self, kind: MediaKind, list: CatalogList) -> AppResult<Vec<CatalogRecord>> {
        let url = self.list_url(kind, list)?;
        let page: TmdbSearchResponse = self
            .get_json(&url, &[("language", "en-US"), ("page", "1")])
            .await?;
        let records = page.into_records(kind);

        tracing::info!(
            list = ?list,
            kind = %kind,
            results = records.len(),
            provider = "tmdb",
            "Catalog list fetched"
        );

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

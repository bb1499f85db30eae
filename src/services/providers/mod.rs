/// External data providers
///
/// The catalog (title search) and the language model (recommendation
/// source) sit behind traits so the batch logic can be exercised without
/// network access and either side can be swapped.
use crate::{
    error::AppResult,
    models::{CatalogList, CatalogRecord, MediaKind, Recommendation, TitleDetails},
};

pub mod gemini;
pub mod tmdb;

pub use gemini::{parse_recommendations, GeminiProvider};
pub use tmdb::TmdbProvider;

/// Read access to a media catalog
///
/// Search results are returned in the catalog's own relevance order; the
/// resolver treats the first one as the default match.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search one kind partition by title
    async fn search(&self, kind: MediaKind, title: &str) -> AppResult<Vec<CatalogRecord>>;

    /// Search both partitions at once; each record keeps its own kind
    async fn search_all(&self, title: &str) -> AppResult<Vec<CatalogRecord>>;

    /// Full details for one title, including its age rating
    async fn details(&self, kind: MediaKind, id: u64) -> AppResult<TitleDetails>;

    /// First page of a curated list
    async fn list(&self, kind: MediaKind, list: CatalogList) -> AppResult<Vec<CatalogRecord>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Source of model-generated recommendations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Ask for recommendations; the prompt defines what is wanted
    async fn recommend(&self, prompt: &str) -> AppResult<Vec<Recommendation>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

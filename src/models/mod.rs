mod catalog;
mod preferences;
mod recommendation;

pub use catalog::{
    CatalogList, CatalogRecord, MediaKind, TitleDetails, TmdbDetails, TmdbSearchItem,
    TmdbSearchResponse,
};
pub use preferences::MoodPreferences;
pub use recommendation::{
    Recommendation, RecommendationMatch, ResolutionResult, ResolvedRecommendation,
};

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Catalog partition a title lives in
///
/// The catalog indexes movies and series separately: each kind has its own
/// search endpoint and its own genre codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    #[serde(alias = "tv")]
    Series,
}

impl MediaKind {
    /// Path segment used by the catalog's search endpoints
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

/// Curated catalog lists shown on the front page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogList {
    /// Movies currently in cinemas
    NowPlaying,
    /// Series with an episode airing soon
    OnTheAir,
    TopRated,
}

impl CatalogList {
    /// Catalog path for this list, or `None` when the kind has no such list
    pub fn path(&self, kind: MediaKind) -> Option<String> {
        let list = match (self, kind) {
            (CatalogList::NowPlaying, MediaKind::Movie) => "now_playing",
            (CatalogList::OnTheAir, MediaKind::Series) => "on_the_air",
            (CatalogList::TopRated, _) => "top_rated",
            _ => return None,
        };
        Some(format!("{}/{}", kind.path_segment(), list))
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
        }
    }
}

/// A single catalog search result
///
/// Records are created fresh for every search and are never mutated by the
/// resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRecord {
    /// Catalog identifier, unique within a kind
    pub id: u64,
    pub kind: MediaKind,
    pub display_title: String,
    /// Date-like text whose first four characters are the year
    pub release_date: Option<String>,
    pub genre_ids: Vec<u32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
}

impl CatalogRecord {
    /// Leading four characters of the release date, if there are that many
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|date| date.get(..4))
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw response from GET /search/{movie|tv}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchItem>,
}

impl TmdbSearchResponse {
    /// Records of a single-kind search or list, in response order
    pub fn into_records(self, kind: MediaKind) -> Vec<CatalogRecord> {
        self.results
            .into_iter()
            .map(|item| item.into_record(kind))
            .collect()
    }

    /// Records of a /search/multi response. Hits that are neither a movie nor
    /// a series (people, collections) are dropped.
    pub fn into_multi_records(self) -> Vec<CatalogRecord> {
        self.results
            .into_iter()
            .filter_map(|item| {
                let kind = item.media_kind()?;
                Some(item.into_record(kind))
            })
            .collect()
    }
}

/// One search hit. Movies carry `title`/`release_date`, series carry
/// `name`/`first_air_date`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Only set by /search/multi: "movie", "tv" or "person"
    #[serde(default)]
    pub media_type: Option<String>,
}

impl TmdbSearchItem {
    /// Kind reported by a multi search hit; people and unknown types are `None`
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self.media_type.as_deref() {
            Some("movie") => Some(MediaKind::Movie),
            Some("tv") => Some(MediaKind::Series),
            _ => None,
        }
    }

    /// Converts a search hit into a record of the kind it was searched under
    pub fn into_record(self, kind: MediaKind) -> CatalogRecord {
        let (display_title, release_date) = match kind {
            MediaKind::Movie => (self.title.or(self.name), self.release_date),
            MediaKind::Series => (self.name.or(self.title), self.first_air_date),
        };

        CatalogRecord {
            id: self.id,
            kind,
            display_title: display_title.unwrap_or_default(),
            // TMDB sends "" for unknown dates
            release_date: release_date.filter(|date| !date.is_empty()),
            genre_ids: self.genre_ids,
            overview: self.overview.filter(|text| !text.is_empty()),
            poster_path: self.poster_path,
            vote_average: self.vote_average,
        }
    }
}

/// Full record for one title, as shown on its details page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleDetails {
    #[serde(flatten)]
    pub record: CatalogRecord,
    pub genres: Vec<String>,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub vote_count: Option<u64>,
    /// Indian certification, "NR" when listed without one, otherwise
    /// "18+" / "All Ages" from the adult flag
    pub age_rating: String,
}

/// Region whose certification is reported as the age rating
const RATING_REGION: &str = "IN";

/// Raw response from GET /{movie|tv}/{id}?append_to_response=release_dates,content_ratings
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub release_dates: Option<TmdbResults<TmdbCountryReleases>>,
    #[serde(default)]
    pub content_ratings: Option<TmdbResults<TmdbContentRating>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TmdbResults<T> {
    #[serde(default)]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCountryReleases {
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<TmdbReleaseDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbReleaseDate {
    #[serde(default)]
    pub certification: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbContentRating {
    pub iso_3166_1: String,
    #[serde(default)]
    pub rating: Option<String>,
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_string)
}

impl TmdbDetails {
    /// Movies read the first regional release's certification, series the
    /// regional content rating. A region entry without a value is "NR"; no
    /// region entry at all falls back to the adult flag.
    pub fn age_rating(&self, kind: MediaKind) -> String {
        let regional = match kind {
            MediaKind::Movie => self
                .release_dates
                .as_ref()
                .and_then(|dates| {
                    dates
                        .results
                        .iter()
                        .find(|r| r.iso_3166_1 == RATING_REGION)
                })
                .and_then(|region| region.release_dates.first())
                .map(|release| non_empty(release.certification.as_deref())),
            MediaKind::Series => self
                .content_ratings
                .as_ref()
                .and_then(|ratings| {
                    ratings
                        .results
                        .iter()
                        .find(|r| r.iso_3166_1 == RATING_REGION)
                })
                .map(|region| non_empty(region.rating.as_deref())),
        };

        match regional {
            Some(rating) => rating.unwrap_or_else(|| "NR".to_string()),
            None if self.adult => "18+".to_string(),
            None => "All Ages".to_string(),
        }
    }

    pub fn into_details(self, kind: MediaKind) -> TitleDetails {
        let age_rating = self.age_rating(kind);
        let (display_title, release_date) = match kind {
            MediaKind::Movie => (self.title.or(self.name), self.release_date),
            MediaKind::Series => (self.name.or(self.title), self.first_air_date),
        };

        TitleDetails {
            record: CatalogRecord {
                id: self.id,
                kind,
                display_title: display_title.unwrap_or_default(),
                release_date: release_date.filter(|date| !date.is_empty()),
                genre_ids: self.genres.iter().map(|g| g.id).collect(),
                overview: self.overview.filter(|text| !text.is_empty()),
                poster_path: self.poster_path,
                vote_average: self.vote_average,
            },
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            tagline: self.tagline.filter(|text| !text.is_empty()),
            runtime_minutes: self.runtime,
            number_of_seasons: self.number_of_seasons,
            vote_count: self.vote_count,
            age_rating,
        }
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::CatalogRecord;

/// A title suggested by the language model, plus whatever hints it gave
///
/// Field names follow the JSON the model is asked to produce. Everything is
/// untrusted: wrong shapes degrade to empty/absent values instead of failing
/// the whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Free-text kind label ("Movie", "TV Show", "Documentary", ...)
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_year: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_genres",
        skip_serializing_if = "Option::is_none"
    )]
    pub genres: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
}

impl Recommendation {
    pub fn new(title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn with_release_year(mut self, year: impl Into<String>) -> Self {
        self.release_year = Some(year.into());
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = Some(genres.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether there is anything to search for
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Whether the model supplied any disambiguating hint
    pub fn has_hints(&self) -> bool {
        self.release_year.is_some() || self.genres.is_some()
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Accepts `"2010"` or `2010`; an empty string counts as no year at all.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(year) if !year.is_empty() => Some(year),
        Value::Number(year) if year.is_u64() => Some(year.to_string()),
        _ => None,
    })
}

/// Accepts a list of names or a single name. Non-string list entries are
/// dropped; an empty list is kept as present.
fn lenient_genres<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(name) if !name.is_empty() => Some(vec![name]),
        _ => None,
    })
}

/// Outcome of matching one recommendation against its search results
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionResult {
    Matched(CatalogRecord),
    Unmatched,
}

impl ResolutionResult {
    pub fn record(&self) -> Option<&CatalogRecord> {
        match self {
            ResolutionResult::Matched(record) => Some(record),
            ResolutionResult::Unmatched => None,
        }
    }
}

/// Per-recommendation outcome of a batch, including upstream failures
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationMatch {
    Matched { record: CatalogRecord },
    Unmatched,
    /// The catalog search failed; the caller renders a placeholder
    Unavailable { error: String },
}

impl From<ResolutionResult> for RecommendationMatch {
    fn from(result: ResolutionResult) -> Self {
        match result {
            ResolutionResult::Matched(record) => RecommendationMatch::Matched { record },
            ResolutionResult::Unmatched => RecommendationMatch::Unmatched,
        }
    }
}

/// A recommendation paired with what the catalog made of it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedRecommendation {
    pub recommendation: Recommendation,
    pub outcome: RecommendationMatch,
}

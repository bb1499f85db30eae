use serde::{Deserialize, Serialize};

/// Answers from the mood questionnaire
///
/// Every question can be skipped, so every field is optional. Free-text
/// answers ("Other" in the UI) arrive already substituted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MoodPreferences {
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub true_events: Option<String>,
    #[serde(default)]
    pub popularity: Option<String>,
    /// Minimum catalog rating on a 0-10 scale
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// A year or a range such as "2010-2020"
    #[serde(default)]
    pub release_years: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_all_skipped() {
        let prefs: MoodPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, MoodPreferences::default());
    }

    #[test]
    fn test_partial_answers() {
        let json = r#"{
            "type": "TV Show",
            "genres": ["Comedy", "Drama"],
            "min_rating": 7.5
        }"#;

        let prefs: MoodPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.content_type.as_deref(), Some("TV Show"));
        assert_eq!(prefs.genres, vec!["Comedy", "Drama"]);
        assert_eq!(prefs.min_rating, Some(7.5));
        assert_eq!(prefs.tone, None);
    }
}

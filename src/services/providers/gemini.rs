/// Gemini recommendation provider
///
/// Sends a single-turn prompt to generateContent asking for JSON output and
/// parses the first candidate's text into recommendations.
use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    services::providers::RecommendationSource,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }
}

#[async_trait::async_trait]
impl RecommendationSource for GeminiProvider {
    async fn recommend(&self, prompt: &str) -> AppResult<Vec<Recommendation>> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .http_client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let generated: GenerateResponse = response.json().await?;
        let text = generated.first_text().ok_or_else(|| {
            AppError::ExternalApi("Gemini response contained no text".to_string())
        })?;

        let recommendations = parse_recommendations(&text)?;

        tracing::info!(
            model = %self.model,
            recommendations = recommendations.len(),
            provider = "gemini",
            "Recommendations generated"
        );

        Ok(recommendations)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Parses model output into recommendations
///
/// Accepts a bare JSON array or an object with a `recommendations` array,
/// optionally wrapped in a markdown code fence. Entries that are not objects
/// are skipped.
pub fn parse_recommendations(text: &str) -> AppResult<Vec<Recommendation>> {
    let value: Value = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        tracing::warn!(error = %e, "Model output is not valid JSON");
        AppError::ExternalApi(format!("Model output is not valid JSON: {}", e))
    })?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("recommendations") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(AppError::ExternalApi(
                    "Model output is not a recommendation list".to_string(),
                ))
            }
        },
        _ => {
            return Err(AppError::ExternalApi(
                "Model output is not a recommendation list".to_string(),
            ))
        }
    };

    let total = items.len();
    let recommendations: Vec<Recommendation> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if recommendations.len() < total {
        tracing::debug!(
            skipped = total - recommendations.len(),
            "Skipped malformed recommendation entries"
        );
    }

    Ok(recommendations)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // The info string ("json") may be followed by a newline or, for one-line
    // fences, directly by the body
    let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    inner.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let text = r#"[
            {"title": "Inception", "type": "Movie", "release_year": "2010", "genres": ["Sci-Fi"], "reason": "Dreams."},
            {"title": "Dark", "type": "TV Show", "reason": "Time loops."}
        ]"#;

        let recs = parse_recommendations(text).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "Inception");
        assert_eq!(recs[1].kind, "TV Show");
        assert_eq!(recs[1].release_year, None);
    }

    #[test]
    fn test_parse_wrapped_object() {
        let text = r#"{"recommendations": [{"title": "Heat", "type": "Movie"}]}"#;

        let recs = parse_recommendations(text).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Heat");
    }

    #[test]
    fn test_parse_fenced_output() {
        let text = "```json\n[{\"title\": \"Up\", \"type\": \"Movie\"}]\n```";

        let recs = parse_recommendations(text).unwrap();
        assert_eq!(recs[0].title, "Up");
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let text = r#"["Inception", 42, {"title": "Heat", "type": "Movie"}]"#;

        let recs = parse_recommendations(text).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Heat");
    }

    #[test]
    fn test_plain_text_is_an_error() {
        let result = parse_recommendations("Sorry, I can only talk about movies.");
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_object_without_list_is_an_error() {
        let result = parse_recommendations(r#"{"response": "Hello!"}"#);
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  [1, 2] "), "[1, 2]");
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
    }

    #[test]
    fn test_strip_one_line_fence() {
        assert_eq!(strip_code_fence("```json [1] ```"), "[1]");
        assert_eq!(strip_code_fence("```[1]```"), "[1]");
    }

    #[test]
    fn test_parse_one_line_fenced_output() {
        let text = "```json [{\"title\":\"Up\",\"type\":\"Movie\"}] ```";

        let recs = parse_recommendations(text).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Up");
        assert_eq!(recs[0].kind, "Movie");
    }

    #[test]
    fn test_generate_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_first_text_extraction() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "[]"}], "role": "model"}}
            ]
        }"#;

        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text().as_deref(), Some("[]"));

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_text(), None);
    }

    #[test]
    fn test_generate_url() {
        let provider = GeminiProvider::new(
            "key".to_string(),
            "https://generativelanguage.googleapis.com/".to_string(),
            "gemini-2.0-flash-001".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            provider.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-001:generateContent"
        );
    }
}

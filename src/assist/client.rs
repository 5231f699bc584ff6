//! Best-effort client for the Gemini `generateContent` endpoint. Every
//! failure path degrades to a safe default; nothing in here may surface
//! an error to a handler. Single-shot requests: no retry, no backoff,
//! no caching.

use std::time::Duration;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;
use utoipa::ToSchema;

use crate::config::Config;
use crate::model::trip::{Trip, TripCategory};

/// Returned instead of an error whenever insight generation fails.
pub const INSIGHTS_FALLBACK: &str =
    "Failed to generate AI insights. Please check your connection.";

/// Returned without issuing a request when there are no trips to analyze.
pub const NO_DATA_MESSAGE: &str = "No data available for insights.";

const SYSTEM_INSTRUCTION: &str =
    "You are a corporate expense analyst. Provide professional, concise insights.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TripSuggestion {
    #[schema(example = "Airport transfer for client visit")]
    pub purpose: String,
    #[schema(example = "Client Meeting")]
    pub category: TripCategory,
}

#[derive(Clone)]
pub struct AssistClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl AssistClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.gemini_base_url,
            &config.gemini_model,
            &config.gemini_api_key,
        )
    }

    /// Free-text analysis of the full trip list. Never errors: any
    /// failure returns [`INSIGHTS_FALLBACK`].
    pub async fn trip_insights(&self, trips: &[Trip]) -> String {
        let data = serde_json::to_string(trips).unwrap_or_else(|_| "[]".to_string());
        let prompt = format!(
            "Analyze the following taxi trip data for employees and provide a summary \
             of spending patterns, potential areas for cost-saving, and any unusual \
             activity.\nData: {data}"
        );

        match self.generate(&prompt, Some(SYSTEM_INSTRUCTION), None).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Insight generation failed");
                INSIGHTS_FALLBACK.to_string()
            }
        }
    }

    /// Structured purpose/category autofill for a pickup/dropoff pair.
    /// Callers validate both strings are non-empty before invoking; any
    /// failure or malformed structured response yields `None`.
    pub async fn suggest_trip_details(
        &self,
        pickup: &str,
        dropoff: &str,
    ) -> Option<TripSuggestion> {
        let prompt = format!(
            "Based on a trip from \"{pickup}\" to \"{dropoff}\", suggest a likely \
             business purpose and category."
        );
        let generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "purpose": { "type": "STRING" },
                    "category": {
                        "type": "STRING",
                        "description": "One of: Client Meeting, Office Commute, Event, Other"
                    }
                },
                "required": ["purpose", "category"]
            }
        });

        let text = match self.generate(&prompt, None, Some(generation_config)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Trip suggestion failed");
                return None;
            }
        };

        // An unknown category string counts as malformed.
        match serde_json::from_str::<TripSuggestion>(&text) {
            Ok(suggestion) => Some(suggestion),
            Err(e) => {
                warn!(error = %e, "Trip suggestion response did not match schema");
                None
            }
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        generation_config: Option<Value>,
    ) -> anyhow::Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        if let Some(system) = system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }
        if let Some(config) = generation_config {
            body["generationConfig"] = config;
        }

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("generateContent request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("generateContent returned {status}"));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Malformed generateContent response body")?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow!("Response contained no candidates"))
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) refuses connections immediately, so these tests
    // exercise the network-failure path without real traffic.
    fn unreachable_client() -> AssistClient {
        AssistClient::new("http://127.0.0.1:9", "gemini-3-flash-preview", "test-key")
    }

    #[actix_web::test]
    async fn insights_fall_back_on_network_error() {
        let client = unreachable_client();
        let text = client.trip_insights(&[]).await;
        assert_eq!(text, INSIGHTS_FALLBACK);
    }

    #[actix_web::test]
    async fn suggestion_is_none_on_network_error() {
        let client = unreachable_client();
        let suggestion = client.suggest_trip_details("Office", "Airport").await;
        assert!(suggestion.is_none());
    }

    #[test]
    fn suggestion_with_unknown_category_is_malformed() {
        let parsed = serde_json::from_str::<TripSuggestion>(
            r#"{"purpose": "Commute", "category": "Carpool"}"#,
        );
        assert!(parsed.is_err());

        let parsed = serde_json::from_str::<TripSuggestion>(
            r#"{"purpose": "Morning commute", "category": "Office Commute"}"#,
        );
        assert_eq!(
            parsed.unwrap(),
            TripSuggestion {
                purpose: "Morning commute".to_string(),
                category: TripCategory::OfficeCommute,
            }
        );
    }
}

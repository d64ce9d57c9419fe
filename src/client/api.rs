//! HTTP client for the word-game backend.
//!
//! The backend exposes four endpoints: `/echo` submits a word and returns
//! the bot's turn, `/reset` starts a fresh game session, and
//! `/remove_question` and `/update_rating` record feedback on individual
//! messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::animation::Turn;
use crate::{PonderError, Result};

/// Response code marking a reply that does not relate to the user's word.
const UNRELATED_CODE: &str = "UNRELATED";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Configuration from the environment, `PONDER_API_URL` overriding the
    /// default local backend.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PONDER_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self {
            base_url,
            ..Default::default()
        }
    }
}

/// One turn as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub response: String,
    /// Raw staged-thought payload; see [`TurnResponse::thought_stages`].
    #[serde(default)]
    pub train_of_thought: Option<Value>,
    #[serde(default)]
    pub response_code: Option<String>,
}

impl TurnResponse {
    pub fn is_unrelated(&self) -> bool {
        self.response_code.as_deref() == Some(UNRELATED_CODE)
    }

    /// Thought stages as an ordered list of word sets. Anything that is
    /// not an array of arrays of strings counts as absent, so a malformed
    /// payload degrades to the plain reveal rather than an error.
    pub fn thought_stages(&self) -> Option<Vec<Vec<String>>> {
        let stages = self.train_of_thought.as_ref()?.as_array()?;
        stages
            .iter()
            .map(|stage| {
                stage
                    .as_array()?
                    .iter()
                    .map(|word| word.as_str().map(str::to_string))
                    .collect()
            })
            .collect()
    }

    pub fn to_turn(&self) -> Turn {
        Turn {
            final_text: self.response.clone(),
            thought_stages: self.thought_stages(),
        }
    }
}

/// Async client over the backend endpoints.
#[derive(Debug, Clone)]
pub struct ChatApi {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ChatApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PonderError::ConfigError(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Submit one user word and fetch the bot's turn.
    pub async fn send_word(&self, message: &str) -> Result<TurnResponse> {
        let response = self
            .http
            .post(self.url("/echo"))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PonderError::TransportError(format!(
                "backend returned {}",
                response.status()
            )));
        }

        response
            .json::<TurnResponse>()
            .await
            .map_err(|e| PonderError::PayloadError(e.to_string()))
    }

    /// Start a fresh game session.
    pub async fn reset(&self) -> Result<()> {
        self.check(self.http.post(self.url("/reset")).send().await?)
    }

    /// Clear the unrelated marker recorded for a message.
    pub async fn dismiss_question(&self, message_id: Uuid, word: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("/remove_question"))
            .json(&serde_json::json!({
                "message_id": message_id,
                "word": word,
            }))
            .send()
            .await?;
        self.check(response)
    }

    /// Record a like/dislike rating for a message.
    pub async fn rate(&self, message_id: Uuid, word: &str, liked: bool) -> Result<()> {
        let response = self
            .http
            .post(self.url("/update_rating"))
            .json(&serde_json::json!({
                "message_id": message_id,
                "word": word,
                "rating": (if liked { 1.0 } else { 0.0 }),
            }))
            .send()
            .await?;
        self.check(response)
    }

    fn check(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(PonderError::TransportError(format!(
                "backend returned {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> TurnResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_a_full_payload() {
        let response = parse(json!({
            "response": "olive",
            "train_of_thought": [["tree", "oil"], ["oil"], []],
            "response_code": "OK",
        }));

        assert_eq!(response.response, "olive");
        assert!(!response.is_unrelated());
        assert_eq!(
            response.thought_stages(),
            Some(vec![
                vec!["tree".to_string(), "oil".to_string()],
                vec!["oil".to_string()],
                vec![],
            ])
        );
    }

    #[test]
    fn missing_fields_default_to_absent() {
        let response = parse(json!({ "response": "hm" }));
        assert!(response.thought_stages().is_none());
        assert!(!response.is_unrelated());
    }

    #[test]
    fn unrelated_code_is_detected() {
        let response = parse(json!({ "response": "?", "response_code": "UNRELATED" }));
        assert!(response.is_unrelated());
    }

    #[test]
    fn malformed_stages_count_as_absent() {
        // not an array at all
        let response = parse(json!({ "response": "x", "train_of_thought": "soon" }));
        assert!(response.thought_stages().is_none());

        // an array of non-arrays
        let response = parse(json!({ "response": "x", "train_of_thought": ["a", "b"] }));
        assert!(response.thought_stages().is_none());

        // a non-string buried inside a stage
        let response = parse(json!({ "response": "x", "train_of_thought": [["a", 3]] }));
        assert!(response.thought_stages().is_none());
    }

    #[test]
    fn to_turn_carries_text_and_stages() {
        let response = parse(json!({
            "response": "olive",
            "train_of_thought": [["tree"]],
        }));

        let turn = response.to_turn();
        assert_eq!(turn.final_text, "olive");
        assert_eq!(turn.thought_stages, Some(vec![vec!["tree".to_string()]]));
    }

    #[test]
    fn env_override_wins() {
        std::env::set_var("PONDER_API_URL", "http://example.test:9999");
        let config = ClientConfig::from_env();
        std::env::remove_var("PONDER_API_URL");

        assert_eq!(config.base_url, "http://example.test:9999");
    }
}

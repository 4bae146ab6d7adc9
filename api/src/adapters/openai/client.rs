//! OpenAI-compatible chat completions client
//!
//! Every call asks the model for a single JSON object. Some models still wrap
//! their answer in a Markdown code fence, which is stripped before parsing.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::ModerationVerdict;
use crate::domain::ports::{ContentClassifier, TextGenerator};
use crate::error::AiError;

/// Implementation of the language model ports over HTTP
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        request_timeout: Duration,
    ) -> Result<Self, AiError> {
        let http = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AiError::Malformed(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(AiError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(AiError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(AiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Send one system + user exchange and parse the reply as a JSON object
    async fn complete_json(
        &self,
        instructions: &str,
        input: &str,
    ) -> Result<serde_json::Value, AiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instructions,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            temperature: 0.2,
        };

        tracing::debug!(
            model = %self.model,
            input_length = input.len(),
            "Calling language model"
        );

        let response = self
            .http
            .post(self.api_url("/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let completion: ChatResponse = self.handle_response(response).await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)?;

        tracing::debug!(
            model = %self.model,
            response_length = content.len(),
            "Language model response received"
        );

        parse_model_json(&content)
    }
}

#[async_trait]
impl ContentClassifier for OpenAiClient {
    async fn classify(
        &self,
        content: &str,
        instructions: &str,
    ) -> Result<ModerationVerdict, AiError> {
        let value = self.complete_json(instructions, content).await?;
        verdict_from_value(value)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate_json(
        &self,
        instructions: &str,
        input: &str,
    ) -> Result<serde_json::Value, AiError> {
        self.complete_json(instructions, input).await
    }
}

/// Request types for the chat completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn fence_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").ok())
        .as_ref()
}

/// Parse model output into a JSON object, tolerating a surrounding code fence
pub(crate) fn parse_model_json(raw: &str) -> Result<serde_json::Value, AiError> {
    let body = fence_pattern()
        .and_then(|re| re.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
        .trim();

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AiError::Malformed(e.to_string()))?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(AiError::Malformed(format!(
            "expected a JSON object, got: {}",
            value
        )))
    }
}

/// Interpret a JSON object as a moderation verdict
pub(crate) fn verdict_from_value(value: serde_json::Value) -> Result<ModerationVerdict, AiError> {
    serde_json::from_value::<ModerationVerdict>(value)
        .map(ModerationVerdict::normalized)
        .map_err(|e| AiError::Malformed(format!("invalid moderation verdict: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_json() {
        let value = parse_model_json(r#"{"tags": ["Anxiety"]}"#).unwrap();
        assert_eq!(value, json!({"tags": ["Anxiety"]}));
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"flagged\": false}\n```";
        assert_eq!(parse_model_json(raw).unwrap(), json!({"flagged": false}));

        let bare_fence = "  ```\n{\"summary\": \"ok\"}\n```  ";
        assert_eq!(
            parse_model_json(bare_fence).unwrap(),
            json!({"summary": "ok"})
        );
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(matches!(
            parse_model_json(r#"["Anxiety"]"#),
            Err(AiError::Malformed(_))
        ));
        assert!(matches!(
            parse_model_json("I think this is fine"),
            Err(AiError::Malformed(_))
        ));
    }

    #[test]
    fn test_verdict_from_value() {
        let verdict = verdict_from_value(json!({
            "flagged": true,
            "reason": "threat of violence",
            "categories": ["violence"]
        }))
        .unwrap();
        assert_eq!(
            verdict,
            ModerationVerdict::flagged("threat of violence", vec!["violence".to_string()])
        );

        let clean = verdict_from_value(json!({"flagged": false, "reason": ""})).unwrap();
        assert_eq!(clean, ModerationVerdict::clean());
    }

    #[test]
    fn test_verdict_requires_flagged() {
        assert!(matches!(
            verdict_from_value(json!({"reason": "unclear"})),
            Err(AiError::Malformed(_))
        ));
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = OpenAiClient::new(
            "https://api.example.test/v1/".to_string(),
            "sk-test".to_string(),
            "test-model".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.api_url("/chat/completions"),
            "https://api.example.test/v1/chat/completions"
        );
    }
}

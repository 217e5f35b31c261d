//! Vision inference client
//!
//! Sends the analysis request to a hosted OpenAI-compatible vision model
//! and returns its answer verbatim. The endpoint is treated as a black
//! box: the call may fail, and a successful answer is untrusted text that
//! the response parser must handle defensively. One synchronous round
//! trip per analysis; no timeout, retry, or cancellation.

use reqwest::Client;
use serde::Deserialize;

use crate::config::InferenceConfig;
use crate::error::{AppError, AppResult};
use shared::{AnalysisRequest, RawModelResponse};

/// Client for the vision inference endpoint
#[derive(Clone)]
pub struct VisionClient {
    api_endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    http_client: Client,
}

/// Chat-completions response payload
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl VisionClient {
    /// Create a client from the inference configuration
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            api_endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            http_client: Client::new(),
        }
    }

    /// Send one analysis request and return the raw model answer
    pub async fn infer(&self, request: &AnalysisRequest) -> AppResult<RawModelResponse> {
        let url = format!("{}/chat/completions", self.api_endpoint);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": request.prompt },
                    { "type": "image_url", "image_url": { "url": request.image_data_url } },
                ],
            }],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "top_p": self.top_p,
        });

        tracing::debug!("Sending analysis request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Inference(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Inference(format!("Failed to parse response: {}", e)))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Inference("Response contained no completion".to_string()))?;

        tracing::debug!("Received model answer ({} chars)", text.len());

        Ok(RawModelResponse::from(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> InferenceConfig {
        InferenceConfig {
            api_endpoint: "https://api.example.com/v1/".to_string(),
            api_key: "test-key".to_string(),
            model: "test-vision-model".to_string(),
            max_tokens: 400,
            temperature: 0.2,
            top_p: 0.5,
        }
    }

    #[test]
    fn test_endpoint_trailing_slash_is_normalized() {
        let client = VisionClient::new(&test_config());
        assert_eq!(client.api_endpoint, "https://api.example.com/v1");
    }

    #[test]
    fn test_completion_payload_deserializes() {
        let payload = r#"{"choices":[{"message":{"role":"assistant","content":"Rice Type: Basmati"}}]}"#;
        let completion: ChatCompletionResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(
            completion.choices[0].message.content.as_deref(),
            Some("Rice Type: Basmati")
        );
    }

    #[test]
    fn test_completion_without_content() {
        let payload = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let completion: ChatCompletionResponse = serde_json::from_str(payload).unwrap();
        assert!(completion.choices[0].message.content.is_none());
    }
}

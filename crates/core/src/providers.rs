use crate::error::{CompletionError, EmbedError};
use crate::traits::{TextCompleter, TextEmbedder};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Embedding port over an OpenAI-compatible `/v1/embeddings` endpoint.
/// Provider wire details stay inside this type; the rest of the engine only
/// sees the `TextEmbedder` contract.
pub struct OpenAiEmbedder {
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
    client: Client,
}

impl OpenAiEmbedder {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            dimensions,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl TextEmbedder for OpenAiEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "input": text,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmbedError::ProviderResponse {
                provider: "openai".to_string(),
                details: response.status().to_string(),
            });
        }

        let parsed: Value = response.json().await?;
        let values = parsed
            .pointer("/data/0/embedding")
            .and_then(Value::as_array)
            .ok_or_else(|| EmbedError::ProviderResponse {
                provider: "openai".to_string(),
                details: "response has no embedding array".to_string(),
            })?;

        let vector: Vec<f32> = values
            .iter()
            .filter_map(Value::as_f64)
            .map(|value| value as f32)
            .collect();

        if vector.len() != self.dimensions {
            return Err(EmbedError::ProviderResponse {
                provider: "openai".to_string(),
                details: format!(
                    "expected {} dimensions, got {}",
                    self.dimensions,
                    vector.len()
                ),
            });
        }

        Ok(vector)
    }
}

/// Completion port over an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAiCompleter {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAiCompleter {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl TextCompleter for OpenAiCompleter {
    async fn complete(&self, instruction: &str) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": instruction }],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CompletionError::ProviderResponse {
                provider: "openai".to_string(),
                details: response.status().to_string(),
            });
        }

        let parsed: Value = response.json().await?;
        parsed
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|content| content.to_string())
            .ok_or_else(|| CompletionError::ProviderResponse {
                provider: "openai".to_string(),
                details: "response has no message content".to_string(),
            })
    }
}

/// Placeholder completer for offline runs: retrieval still works, but asking
/// for synthesis reports that no backend is configured.
pub struct UnconfiguredCompleter;

#[async_trait]
impl TextCompleter for UnconfiguredCompleter {
    async fn complete(&self, _instruction: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable(
            "set an API endpoint and key to enable answer synthesis".to_string(),
        ))
    }
}

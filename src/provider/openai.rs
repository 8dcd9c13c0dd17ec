// src/provider/openai.rs — OpenAI Chat Completions provider (also serves compatible endpoints)

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, ModelProvider, TokenUsage};
use crate::infra::config::ProviderConfig;
use crate::infra::errors::ProphetError;

pub struct OpenAIProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl OpenAIProvider {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from config, reading the API key from the configured env var.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProphetError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProphetError::MissingApiKey {
                env_var: config.api_key_env.clone(),
            })?;
        Ok(Self::with_base_url(api_key, config.base_url.clone()))
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProphetError> {
        let body = build_body(&request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProphetError::provider("openai", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProphetError::provider(
                "openai",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        let resp: serde_json::Value = response.json().await.map_err(|e| {
            ProphetError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        parse_response(&resp)
    }
}

/// Serialize a request into the Chat Completions body.
pub(crate) fn build_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect();

    serde_json::json!({
        "model": request.model,
        "messages": messages,
    })
}

/// Pull the first choice's text and the usage block out of a response body.
pub(crate) fn parse_response(resp: &serde_json::Value) -> Result<ChatResponse, ProphetError> {
    let choice = resp["choices"].get(0).ok_or_else(|| {
        ProphetError::provider("openai", "Response contained no choices".to_string())
    })?;

    // A null content (e.g. refusals) is an empty completion, not a failure.
    let content = choice["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string();

    let usage = TokenUsage {
        input_tokens: token_count(&resp["usage"]["prompt_tokens"]),
        output_tokens: token_count(&resp["usage"]["completion_tokens"]),
    };

    Ok(ChatResponse { content, usage })
}

/// Missing or non-numeric counts read as 0; counts past `u32::MAX` clamp to it.
fn token_count(value: &serde_json::Value) -> u32 {
    value
        .as_u64()
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

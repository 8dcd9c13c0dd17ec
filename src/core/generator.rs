// src/core/generator.rs — Single in-character completion

use std::sync::Arc;

use crate::infra::errors::ProphetError;
use crate::provider::{ChatRequest, Message, ModelProvider, TokenUsage};

/// Sends one completion request to the primary model.
pub struct Generator {
    provider: Arc<dyn ModelProvider>,
    model_id: String,
}

/// A generated reply and what it cost.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub usage: TokenUsage,
}

impl Generator {
    pub fn new(provider: Arc<dyn ModelProvider>, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
        }
    }

    /// `[system] + history + [user message]`, history passed through untouched.
    ///
    /// Provider failures propagate; there is no local retry here.
    pub async fn generate(
        &self,
        system: &str,
        history: &[Message],
        message: &str,
    ) -> Result<Candidate, ProphetError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(system));
        messages.extend_from_slice(history);
        messages.push(Message::user(message));

        let response = self
            .provider
            .chat(ChatRequest {
                model: self.model_id.clone(),
                messages,
            })
            .await?;

        tracing::debug!(
            model = %self.model_id,
            chars = response.content.len(),
            tokens = response.usage.total(),
            "Generated candidate",
        );

        Ok(Candidate {
            text: response.content,
            usage: response.usage,
        })
    }
}

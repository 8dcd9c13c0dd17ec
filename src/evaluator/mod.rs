// src/evaluator/mod.rs — Independent quality gate over candidate replies

pub mod parser;
pub mod prompt;

use std::sync::Arc;

use crate::core::types::Verdict;
use crate::infra::errors::ProphetError;
use crate::persona::PersonaBrief;
use crate::provider::{ChatRequest, Message, ModelProvider, TokenUsage};

/// Judges one candidate reply with a separate completion on the evaluation model.
pub struct Evaluator {
    provider: Arc<dyn ModelProvider>,
    model_id: String,
    brief: Arc<PersonaBrief>,
}

/// A verdict and the tokens spent reaching it.
#[derive(Debug, Clone)]
pub struct EvalResult {
    pub verdict: Verdict,
    pub usage: TokenUsage,
}

impl Evaluator {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        model_id: impl Into<String>,
        brief: Arc<PersonaBrief>,
    ) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            brief,
        }
    }

    /// Evaluate `reply` as an answer to `message` given `history`.
    ///
    /// Malformed model output never surfaces as an error (see
    /// [`parser::parse_verdict`]). Transport failures do.
    pub async fn evaluate(
        &self,
        reply: &str,
        message: &str,
        history: &[Message],
    ) -> Result<EvalResult, ProphetError> {
        let response = self
            .provider
            .chat(ChatRequest {
                model: self.model_id.clone(),
                messages: vec![
                    Message::system(self.brief.evaluator()),
                    Message::user(prompt::build_user_prompt(reply, message, history)),
                ],
            })
            .await?;

        let verdict = parser::parse_verdict(&response.content);
        tracing::debug!(
            model = %self.model_id,
            acceptable = verdict.is_acceptable,
            tokens = response.usage.total(),
            "Evaluated candidate",
        );

        Ok(EvalResult {
            verdict,
            usage: response.usage,
        })
    }
}

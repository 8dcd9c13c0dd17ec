// src/provider/mod.rs — Model provider layer

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::ProphetError;

/// Core trait that all model providers implement.
///
/// One request, one completion. Transport failures come back as
/// `ProphetError::Provider`; callers decide whether they are fatal.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> &str;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProphetError>;
}

#[cfg(test)]
mockall::mock! {
    pub Provider {}

    #[async_trait]
    impl ModelProvider for Provider {
        fn id(&self) -> &str;
        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProphetError>;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    /// Completion text; empty when the provider returned no content.
    pub content: String,
    pub usage: TokenUsage,
}

/// One conversation turn, as exchanged with both the chat surface and the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Saturates at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── TokenUsage tests ───────────────────────────────────────

    #[test]
    fn test_token_usage_total() {
        let u = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(u.total(), 150);
    }

    #[test]
    fn test_token_usage_add() {
        let mut u = TokenUsage::default();
        u.add(&TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
        });
        u.add(&TokenUsage {
            input_tokens: 1,
            output_tokens: 2,
        });
        assert_eq!(u.input_tokens, 11);
        assert_eq!(u.output_tokens, 7);
    }

    #[test]
    fn test_token_usage_saturates() {
        let mut u = TokenUsage {
            input_tokens: u32::MAX - 1,
            output_tokens: 10,
        };
        assert_eq!(u.total(), u32::MAX);

        u.add(&TokenUsage {
            input_tokens: 5,
            output_tokens: u32::MAX,
        });
        assert_eq!(u.input_tokens, u32::MAX);
        assert_eq!(u.output_tokens, u32::MAX);
    }

    // ─── Message tests ──────────────────────────────────────────

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("rules").role, Role::System);
        assert_eq!(Message::user("Hello").role, Role::User);
        let m = Message::assistant("Mortals… forever amusing.");
        assert_eq!(m.role, Role::Assistant);
        assert_eq!(m.content, "Mortals… forever amusing.");
    }

    #[test]
    fn test_message_wire_shape() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));

        let back: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"ok"}"#).unwrap();
        assert_eq!(back, Message::assistant("ok"));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<Message, _> =
            serde_json::from_str(r#"{"role":"tool","content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}

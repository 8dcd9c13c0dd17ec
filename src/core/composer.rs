// src/core/composer.rs — System instruction assembly for the generator

use std::sync::Arc;

use crate::persona::PersonaBrief;

/// A phrase that, when present in the user's message, forces an extra directive.
#[derive(Debug, Clone)]
pub struct Trigger {
    phrase: String,
    directive: String,
}

impl Trigger {
    pub fn new(phrase: &str, directive: &str) -> Self {
        Self {
            phrase: phrase.to_lowercase(),
            directive: directive.to_string(),
        }
    }

    /// Case-insensitive substring match.
    pub fn matches(&self, message: &str) -> bool {
        message.to_lowercase().contains(&self.phrase)
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }
}

/// Builds the system instruction for each generator call.
///
/// Holds no per-turn state: the same message always yields the same instruction.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    brief: Arc<PersonaBrief>,
    trigger: Option<Trigger>,
}

impl PromptComposer {
    pub fn new(brief: Arc<PersonaBrief>, trigger: Option<Trigger>) -> Self {
        Self { brief, trigger }
    }

    /// Rubric plus persona context, before any per-message augmentation.
    pub fn base_instruction(&self) -> &str {
        self.brief.responder()
    }

    /// Instruction for the first attempt at answering `message`.
    pub fn compose(&self, message: &str) -> String {
        let base = self.base_instruction();
        match &self.trigger {
            Some(trigger) if trigger.matches(message) => {
                tracing::debug!(phrase = trigger.phrase(), "Trigger phrase matched");
                format!("{}\n\n{}", base, trigger.directive())
            }
            _ => base.to_string(),
        }
    }

    /// Instruction for a retry: the base instruction plus the rejected reply and the
    /// reason, both verbatim. The trigger directive applies to the first attempt only.
    pub fn compose_retry(&self, rejected_reply: &str, feedback: &str) -> String {
        let base = self.base_instruction();
        let mut prompt =
            String::with_capacity(base.len() + rejected_reply.len() + feedback.len() + 160);
        prompt.push_str(base);
        prompt.push_str("\n\n## Previous answer rejected\n");
        prompt.push_str("You just tried to reply, but the quality control rejected your reply\n");
        prompt.push_str("## Your attempted answer:\n");
        prompt.push_str(rejected_reply);
        prompt.push_str("\n\n## Reason for rejection:\n");
        prompt.push_str(feedback);
        prompt.push_str("\n\n");
        prompt
    }
}

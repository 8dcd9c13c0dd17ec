// src/evaluator/prompt.rs — User prompt for the evaluation model

use crate::provider::{Message, Role};

/// Output contract appended to every evaluation request.
pub const FORMAT_INSTRUCTION: &str =
    "Reply in the following JSON format: {\"is_acceptable\": true/false, \"feedback\": \"...\"}";

const EMPTY_HISTORY: &str = "(no earlier messages)";

/// History as plain "Speaker: text" lines, one per turn.
pub fn render_history(history: &[Message]) -> String {
    if history.is_empty() {
        return EMPTY_HISTORY.to_string();
    }
    history
        .iter()
        .map(|m| format!("{}: {}", speaker(m.role), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Assistant => "Agent",
        Role::System => "System",
    }
}

/// Conversation so far, the triggering message, the candidate reply, then the format contract.
pub fn build_user_prompt(reply: &str, message: &str, history: &[Message]) -> String {
    let mut prompt = format!(
        "Here's the conversation between the User and the Agent: \n\n{}\n\n",
        render_history(history)
    );
    prompt.push_str(&format!(
        "Here's the latest message from the User: \n\n{}\n\n",
        message
    ));
    prompt.push_str(&format!(
        "Here's the latest response from the Agent: \n\n{}\n\n",
        reply
    ));
    prompt.push_str("Please evaluate the response, replying with whether it is acceptable and your feedback.");
    prompt.push_str("\n\n");
    prompt.push_str(FORMAT_INSTRUCTION);
    prompt
}

// src/evaluator/parser.rs — Parse evaluator output into a Verdict, failing closed

use crate::core::types::Verdict;

/// Parse the evaluation model's raw completion.
///
/// Expected format (the whole completion, optionally inside a ``` fence):
/// ```text
/// {"is_acceptable": true, "feedback": "notes"}
/// ```
///
/// Total: anything that does not decode into that shape yields a rejecting
/// verdict whose feedback carries the raw text and the decode error.
pub fn parse_verdict(raw: &str) -> Verdict {
    match decode_verdict(raw) {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::warn!(error = %e, "Evaluator output was not a valid verdict; rejecting");
            unparseable(raw, &e.to_string())
        }
    }
}

/// Strict decode: both fields required with the right types. Extra fields are ignored.
pub(crate) fn decode_verdict(raw: &str) -> Result<Verdict, serde_json::Error> {
    serde_json::from_str(strip_code_fence(raw.trim()))
}

/// The sentinel verdict for output that could not be decoded.
pub(crate) fn unparseable(raw: &str, reason: &str) -> Verdict {
    Verdict::reject(format!(
        "Failed to parse model output: {}\nError: {}",
        raw, reason
    ))
}

/// "```json\n{...}\n```" → "{...}". Anything else is returned unchanged.
fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return s;
    };
    // Drop the info string ("json") on the opening line.
    match body.split_once('\n') {
        Some((_info, inner)) => inner.trim(),
        None => body.trim(),
    }
}

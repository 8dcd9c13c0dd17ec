// src/core/types.rs — Core domain types

use serde::{Deserialize, Serialize};

use crate::provider::TokenUsage;

/// The evaluator's judgement of one candidate reply. Also the wire shape the
/// evaluation model is asked to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_acceptable: bool,
    pub feedback: String,
}

impl Verdict {
    pub fn reject(feedback: impl Into<String>) -> Self {
        Self {
            is_acceptable: false,
            feedback: feedback.into(),
        }
    }
}

/// Retry controller state. `Attempting(n)` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Attempting(u8),
    Accepted,
    Exhausted,
}

impl AttemptState {
    pub fn start() -> Self {
        AttemptState::Attempting(1)
    }

    /// Transition after evaluating the candidate of the current attempt.
    /// Terminal states stay put.
    pub fn next(self, acceptable: bool, max_attempts: u8) -> Self {
        match self {
            AttemptState::Attempting(_) if acceptable => AttemptState::Accepted,
            AttemptState::Attempting(n) if n < max_attempts => AttemptState::Attempting(n + 1),
            AttemptState::Attempting(_) => AttemptState::Exhausted,
            terminal => terminal,
        }
    }
}

impl std::fmt::Display for AttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptState::Attempting(n) => write!(f, "attempting({})", n),
            AttemptState::Accepted => write!(f, "accepted"),
            AttemptState::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// How a turn ended. Callers of `respond()` never see this; `run_turn()` exposes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The evaluator passed the returned reply.
    Accepted,
    /// Every attempt was rejected; the returned reply is the last one generated.
    Exhausted,
}

/// Result of one controller invocation.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub reply: String,
    pub outcome: TurnOutcome,
    /// Candidates generated (and evaluated) this turn.
    pub attempts: u8,
    /// Generator and evaluator usage combined.
    pub usage: TokenUsage,
}

/// Lifecycle events for progress display.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    AttemptStart { attempt: u8, max_attempts: u8 },
    Rejected { attempt: u8, feedback: String },
    Accepted { attempt: u8 },
    Exhausted { attempts: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_on_first() {
        assert_eq!(AttemptState::start().next(true, 3), AttemptState::Accepted);
    }

    #[test]
    fn test_reject_advances() {
        assert_eq!(
            AttemptState::Attempting(1).next(false, 3),
            AttemptState::Attempting(2)
        );
        assert_eq!(
            AttemptState::Attempting(2).next(false, 3),
            AttemptState::Attempting(3)
        );
    }

    #[test]
    fn test_reject_at_bound_exhausts() {
        assert_eq!(
            AttemptState::Attempting(3).next(false, 3),
            AttemptState::Exhausted
        );
        assert_eq!(
            AttemptState::Attempting(1).next(false, 1),
            AttemptState::Exhausted
        );
    }

    #[test]
    fn test_accept_at_bound() {
        assert_eq!(
            AttemptState::Attempting(3).next(true, 3),
            AttemptState::Accepted
        );
    }

    #[test]
    fn test_terminal_states_are_absorbing() {
        assert_eq!(AttemptState::Accepted.next(false, 3), AttemptState::Accepted);
        assert_eq!(AttemptState::Exhausted.next(true, 3), AttemptState::Exhausted);
    }

    #[test]
    fn test_always_terminates_within_bound() {
        for max in 1..=10u8 {
            let mut state = AttemptState::start();
            let mut steps = 0;
            while matches!(state, AttemptState::Attempting(_)) {
                state = state.next(false, max);
                steps += 1;
            }
            assert_eq!(steps, max as usize);
            assert_eq!(state, AttemptState::Exhausted);
        }
    }

    #[test]
    fn test_verdict_reject() {
        let v = Verdict::reject("too kind");
        assert!(!v.is_acceptable);
        assert_eq!(v.feedback, "too kind");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(AttemptState::Attempting(2).to_string(), "attempting(2)");
        assert_eq!(AttemptState::Exhausted.to_string(), "exhausted");
    }
}

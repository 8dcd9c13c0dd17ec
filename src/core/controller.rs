// src/core/controller.rs — Generate, evaluate, retry with feedback

use tracing::Instrument;

use super::composer::PromptComposer;
use super::generator::Generator;
use super::types::{AttemptState, ProgressEvent, TurnOutcome, TurnReport};
use crate::evaluator::Evaluator;
use crate::infra::errors::ProphetError;
use crate::provider::{Message, TokenUsage};
use crate::util::preview;

pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// Drives one user turn through at most `max_attempts` generate/evaluate rounds.
///
/// Holds no per-turn state; a single controller can serve any number of turns.
pub struct RetryController {
    composer: PromptComposer,
    generator: Generator,
    evaluator: Evaluator,
    max_attempts: u8,
    on_progress: Option<Box<dyn Fn(ProgressEvent) + Send + Sync>>,
}

impl RetryController {
    /// `max_attempts` below 1 is raised to 1.
    pub fn new(
        composer: PromptComposer,
        generator: Generator,
        evaluator: Evaluator,
        max_attempts: u8,
    ) -> Self {
        Self {
            composer,
            generator,
            evaluator,
            max_attempts: max_attempts.max(1),
            on_progress: None,
        }
    }

    /// Set a callback for attempt lifecycle events.
    pub fn with_progress(mut self, cb: impl Fn(ProgressEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    /// Reply text only. Accepted and exhausted turns look the same to the caller.
    pub async fn respond(&self, message: &str, history: &[Message]) -> Result<String, ProphetError> {
        Ok(self.run_turn(message, history).await?.reply)
    }

    /// Run one turn to completion.
    ///
    /// `history` is the conversation before `message`; it is read, never modified.
    /// Every candidate is evaluated exactly once. A rejected candidate is fed back,
    /// with the evaluator's feedback, into the next generation on top of the base
    /// instruction. When every attempt
    /// is rejected the last candidate is returned with [`TurnOutcome::Exhausted`].
    pub async fn run_turn(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<TurnReport, ProphetError> {
        let span = tracing::info_span!("turn", id = %uuid::Uuid::new_v4());
        self.attempt_loop(message, history).instrument(span).await
    }

    async fn attempt_loop(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<TurnReport, ProphetError> {
        let mut system = self.composer.compose(message);
        let mut usage = TokenUsage::default();
        let mut state = AttemptState::start();

        loop {
            let AttemptState::Attempting(attempt) = state else {
                break;
            };
            self.emit(ProgressEvent::AttemptStart {
                attempt,
                max_attempts: self.max_attempts,
            });

            let candidate = self.generator.generate(&system, history, message).await?;
            usage.add(&candidate.usage);

            let eval = self
                .evaluator
                .evaluate(&candidate.text, message, history)
                .await?;
            usage.add(&eval.usage);

            state = state.next(eval.verdict.is_acceptable, self.max_attempts);
            match state {
                AttemptState::Accepted => {
                    if attempt > 1 {
                        tracing::info!(attempt, "Reply accepted after retry");
                    } else {
                        tracing::debug!("Reply accepted on first attempt");
                    }
                    self.emit(ProgressEvent::Accepted { attempt });
                    return Ok(TurnReport {
                        reply: candidate.text,
                        outcome: TurnOutcome::Accepted,
                        attempts: attempt,
                        usage,
                    });
                }
                AttemptState::Exhausted => {
                    tracing::warn!(
                        attempts = attempt,
                        feedback = %preview(&eval.verdict.feedback, 120),
                        "All attempts rejected; returning last candidate",
                    );
                    self.emit(ProgressEvent::Rejected {
                        attempt,
                        feedback: eval.verdict.feedback,
                    });
                    self.emit(ProgressEvent::Exhausted { attempts: attempt });
                    return Ok(TurnReport {
                        reply: candidate.text,
                        outcome: TurnOutcome::Exhausted,
                        attempts: attempt,
                        usage,
                    });
                }
                AttemptState::Attempting(_) => {
                    tracing::debug!(
                        attempt,
                        feedback = %preview(&eval.verdict.feedback, 120),
                        "Reply rejected",
                    );
                    system = self
                        .composer
                        .compose_retry(&candidate.text, &eval.verdict.feedback);
                    self.emit(ProgressEvent::Rejected {
                        attempt,
                        feedback: eval.verdict.feedback,
                    });
                }
            }
        }

        // `state` only leaves Attempting through the returns above.
        Err(ProphetError::Other(anyhow::anyhow!(
            "retry loop ended in state {}",
            state
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::persona::{PersonaBrief, PersonaContext, Rubrics};
    use crate::provider::{ChatResponse, MockProvider};

    fn brief() -> Arc<PersonaBrief> {
        let rubrics = Rubrics {
            responder: "You are the Prophet.".into(),
            evaluator: "You are the critic.".into(),
        };
        Arc::new(PersonaBrief::build(&PersonaContext::default(), &rubrics))
    }

    fn controller(gen: MockProvider, eval: MockProvider, max: u8) -> RetryController {
        let brief = brief();
        RetryController::new(
            PromptComposer::new(brief.clone(), None),
            Generator::new(Arc::new(gen), "main"),
            Evaluator::new(Arc::new(eval), "eval", brief),
            max,
        )
    }

    fn text(content: &str) -> Result<ChatResponse, ProphetError> {
        Ok(ChatResponse {
            content: content.into(),
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        })
    }

    #[tokio::test]
    async fn test_accept_first_attempt() {
        let mut gen = MockProvider::new();
        gen.expect_chat().times(1).returning(|_| text("Mortals…"));
        let mut eval = MockProvider::new();
        eval.expect_chat()
            .times(1)
            .returning(|_| text(r#"{"is_acceptable": true, "feedback": "good"}"#));

        let report = controller(gen, eval, 3).run_turn("Hello", &[]).await.unwrap();
        assert_eq!(report.reply, "Mortals…");
        assert_eq!(report.outcome, TurnOutcome::Accepted);
        assert_eq!(report.attempts, 1);
        assert_eq!(report.usage.total(), 4);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_candidate() {
        let mut gen = MockProvider::new();
        let n = Arc::new(Mutex::new(0));
        let counter = n.clone();
        gen.expect_chat().times(3).returning(move |_| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            text(&format!("reply {}", *n))
        });
        let mut eval = MockProvider::new();
        eval.expect_chat()
            .times(3)
            .returning(|_| text(r#"{"is_acceptable": false, "feedback": "no"}"#));

        let report = controller(gen, eval, 3).run_turn("Hello", &[]).await.unwrap();
        assert_eq!(report.reply, "reply 3");
        assert_eq!(report.outcome, TurnOutcome::Exhausted);
        assert_eq!(report.attempts, 3);
    }

    #[tokio::test]
    async fn test_zero_max_attempts_clamped() {
        let mut gen = MockProvider::new();
        gen.expect_chat().times(1).returning(|_| text("only"));
        let mut eval = MockProvider::new();
        eval.expect_chat()
            .times(1)
            .returning(|_| text("garbage"));

        let c = controller(gen, eval, 0);
        assert_eq!(c.max_attempts(), 1);
        assert_eq!(c.respond("Hello", &[]).await.unwrap(), "only");
    }

    #[tokio::test]
    async fn test_progress_events() {
        let mut gen = MockProvider::new();
        gen.expect_chat().times(2).returning(|_| text("r"));
        let mut eval = MockProvider::new();
        let calls = Arc::new(Mutex::new(0));
        let c2 = calls.clone();
        eval.expect_chat().times(2).returning(move |_| {
            let mut c = c2.lock().unwrap();
            *c += 1;
            if *c == 1 {
                text(r#"{"is_acceptable": false, "feedback": "flat"}"#)
            } else {
                text(r#"{"is_acceptable": true, "feedback": "ok"}"#)
            }
        });

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let c = controller(gen, eval, 3).with_progress(move |e| {
            sink.lock().unwrap().push(format!("{:?}", e));
        });
        let report = c.run_turn("Hello", &[]).await.unwrap();
        assert_eq!(report.attempts, 2);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert!(events[0].starts_with("AttemptStart { attempt: 1"));
        assert!(events[1].contains("flat"));
        assert!(events[2].starts_with("AttemptStart { attempt: 2"));
        assert!(events[3].starts_with("Accepted { attempt: 2"));
    }

    #[tokio::test]
    async fn test_generator_error_aborts_turn() {
        let mut gen = MockProvider::new();
        gen.expect_chat()
            .times(1)
            .returning(|_| Err(ProphetError::provider("mock", "down")));
        let mut eval = MockProvider::new();
        eval.expect_chat().times(0);

        let err = controller(gen, eval, 3).respond("Hello", &[]).await.unwrap_err();
        assert!(err.is_transport());
    }
}

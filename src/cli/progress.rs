// src/cli/progress.rs — Terminal progress renderer for retry attempts

use crate::core::types::ProgressEvent;
use crate::util::preview;

/// One stderr line per event, so stdout carries only replies.
pub fn format_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::AttemptStart {
            attempt,
            max_attempts,
        } => format!("[attempt {}/{}] generating...", attempt, max_attempts),
        ProgressEvent::Rejected { attempt, feedback } => {
            format!("[attempt {}] rejected: {}", attempt, preview(feedback, 100))
        }
        ProgressEvent::Accepted { attempt } => format!("[attempt {}] accepted", attempt),
        ProgressEvent::Exhausted { attempts } => {
            format!("[gate] {} attempt(s) rejected; keeping the last reply", attempts)
        }
    }
}

/// Build a progress callback that writes formatted output to stderr.
/// Returns a closure suitable for `RetryController::with_progress()`.
pub fn terminal_progress() -> impl Fn(ProgressEvent) + Send + Sync + 'static {
    |event| eprintln!("{}", format_event(&event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_start() {
        let line = format_event(&ProgressEvent::AttemptStart {
            attempt: 2,
            max_attempts: 3,
        });
        assert_eq!(line, "[attempt 2/3] generating...");
    }

    #[test]
    fn test_rejected_is_single_line() {
        let line = format_event(&ProgressEvent::Rejected {
            attempt: 1,
            feedback: "too kind\nand too short".into(),
        });
        assert_eq!(line, "[attempt 1] rejected: too kind and too short");
    }

    #[test]
    fn test_exhausted() {
        let line = format_event(&ProgressEvent::Exhausted { attempts: 3 });
        assert!(line.contains("3 attempt(s)"));
    }
}

// src/cli/ask.rs — One-shot turn

use crate::core::controller::RetryController;
use crate::core::types::TurnOutcome;

/// Answer `message` with empty history and print the reply to stdout.
pub async fn run_ask(controller: &RetryController, message: &str) -> anyhow::Result<()> {
    let report = controller.run_turn(message, &[]).await?;
    println!("{}", report.reply);

    if report.outcome == TurnOutcome::Exhausted {
        tracing::info!(attempts = report.attempts, "Reply returned without passing the gate");
    }
    tracing::debug!(tokens = report.usage.total(), "Turn usage");
    Ok(())
}

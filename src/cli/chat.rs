// src/cli/chat.rs — Interactive REPL

use crate::core::controller::RetryController;
use crate::core::types::{TurnOutcome, TurnReport};
use crate::provider::{Message, Role};
use crate::util::preview;

/// Conversation state for one chat session.
///
/// History only grows by whole turns: a failed turn leaves it untouched.
pub struct ChatSession {
    greeting: String,
    history: Vec<Message>,
    turns: u32,
    exhausted: u32,
    total_tokens: u32,
}

impl ChatSession {
    /// Starts with the greeting as the first assistant turn.
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            history: vec![Message::assistant(greeting.clone())],
            greeting,
            turns: 0,
            exhausted: 0,
            total_tokens: 0,
        }
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn record(&mut self, message: &str, report: &TurnReport) {
        self.history.push(Message::user(message));
        self.history.push(Message::assistant(report.reply.clone()));
        self.turns += 1;
        self.total_tokens = self.total_tokens.saturating_add(report.usage.total());
        if report.outcome == TurnOutcome::Exhausted {
            self.exhausted += 1;
        }
    }

    /// Back to just the greeting.
    pub fn reset(&mut self) {
        self.history = vec![Message::assistant(self.greeting.clone())];
    }
}

/// What the REPL does after a slash command.
#[derive(Debug, PartialEq, Eq)]
pub enum SlashOutcome {
    Continue,
    Quit,
}

/// Run the interactive chat REPL.
pub async fn run_chat(controller: &RetryController, greeting: &str) -> anyhow::Result<()> {
    let mut session = ChatSession::new(greeting);
    println!("{}\n", session.greeting());

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        if trimmed.starts_with('/') {
            if handle_slash_command(trimmed, &mut session, controller) == SlashOutcome::Quit {
                break;
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        match controller.run_turn(trimmed, session.history()).await {
            Ok(report) => {
                println!("{}\n", report.reply);
                session.record(trimmed, &report);
            }
            Err(e) => {
                eprintln!("[error] {}", e);
            }
        }
    }

    eprintln!(
        "\nSession total: {} turn(s), {} exhausted, {} tokens",
        session.turns, session.exhausted, session.total_tokens,
    );
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

fn handle_slash_command(
    input: &str,
    session: &mut ChatSession,
    controller: &RetryController,
) -> SlashOutcome {
    let cmd = input.split_whitespace().next().unwrap_or(input);

    match cmd {
        "/quit" | "/exit" => return SlashOutcome::Quit,

        "/status" => {
            eprintln!("  Max attempts: {}", controller.max_attempts());
            eprintln!(
                "  Session: {} turn(s) | {} exhausted | {} tokens",
                session.turns, session.exhausted, session.total_tokens
            );
            eprintln!("  History: {} message(s)", session.history.len());
        }

        "/history" => {
            for (i, m) in session.history.iter().enumerate() {
                let who = match m.role {
                    Role::User => "you",
                    Role::Assistant => "prophet",
                    Role::System => "system",
                };
                eprintln!("  {}. {}: {}", i + 1, who, preview(&m.content, 80));
            }
        }

        "/reset" => {
            session.reset();
            eprintln!("  History cleared.");
        }

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /status            Show session status & settings");
            eprintln!("  /history           Show the conversation so far");
            eprintln!("  /reset             Forget everything but the greeting");
            eprintln!("  /help              Show this help");
            eprintln!("  /quit, quit, exit  End session");
        }

        _ => {
            eprintln!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
    SlashOutcome::Continue
}

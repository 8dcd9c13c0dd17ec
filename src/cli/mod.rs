// src/cli/mod.rs — CLI definition (clap derive)

pub mod ask;
pub mod brief;
pub mod chat;
pub mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "prophet",
    about = "In-character chat agent with an LLM quality gate",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the actor, journal and rules documents
    #[arg(long, global = true)]
    pub context_dir: Option<PathBuf>,

    /// Model for in-character replies
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Model for the quality gate
    #[arg(long, global = true)]
    pub eval_model: Option<String>,

    /// Attempts per turn before the last reply is returned anyway
    #[arg(long, global = true)]
    pub max_attempts: Option<u8>,

    /// Verbose logging and per-attempt progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Interactive chat session (default)
    Chat,
    /// Answer one message with no prior history
    Ask {
        /// The message
        #[arg(required = true, trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Print the instruction built from the loaded context
    Brief {
        /// Print the evaluator's instruction instead
        #[arg(long)]
        evaluator: bool,
    },
}

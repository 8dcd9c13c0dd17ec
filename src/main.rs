// src/main.rs — prophet entry point

use std::sync::Arc;

use clap::Parser;

use prophet::cli::{Cli, Commands};
use prophet::core::composer::PromptComposer;
use prophet::core::controller::RetryController;
use prophet::core::generator::Generator;
use prophet::evaluator::Evaluator;
use prophet::infra::config::Config;
use prophet::infra::logger;
use prophet::persona::PersonaBrief;
use prophet::provider::openai::OpenAIProvider;
use prophet::provider::ModelProvider;

#[tokio::main]
async fn main() {
    // .env values win over the inherited environment
    dotenvy::dotenv_override().ok();

    let cli = Cli::parse();

    // Respects RUST_LOG / PROPHET_LOG
    logger::init_logging(logger::level_for(cli.verbose));

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;

    // A missing or unreadable context document aborts here; no partial persona.
    let brief = Arc::new(PersonaBrief::from_config(&config.persona)?);

    if let Some(Commands::Brief { evaluator }) = &cli.command {
        prophet::cli::brief::run_brief(&brief, *evaluator);
        return Ok(());
    }

    let provider: Arc<dyn ModelProvider> = Arc::new(OpenAIProvider::from_config(&config.provider)?);
    tracing::info!(
        provider = provider.id(),
        main = %config.models.main,
        eval = %config.models.eval,
        max_attempts = config.quality.max_attempts,
        "Starting",
    );

    let mut controller = RetryController::new(
        PromptComposer::new(brief.clone(), config.trigger.to_trigger()),
        Generator::new(provider.clone(), config.models.main.clone()),
        Evaluator::new(provider, config.models.eval.clone(), brief),
        config.quality.max_attempts,
    );
    if cli.verbose {
        controller = controller.with_progress(prophet::cli::progress::terminal_progress());
    }

    match cli.command {
        Some(Commands::Ask { message }) => {
            prophet::cli::ask::run_ask(&controller, &message.join(" ")).await
        }
        Some(Commands::Chat) | None => {
            prophet::cli::chat::run_chat(&controller, &config.chat.greeting).await
        }
        Some(Commands::Brief { .. }) => Ok(()),
    }
}

/// File, then environment, then flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env_overrides()?;

    if let Some(ref dir) = cli.context_dir {
        config.persona.context_dir = dir.clone();
    }
    if let Some(ref model) = cli.model {
        config.models.main = model.clone();
    }
    if let Some(ref model) = cli.eval_model {
        config.models.eval = model.clone();
    }
    if let Some(n) = cli.max_attempts {
        config.quality.max_attempts = n;
    }
    config.validate()?;
    Ok(config)
}

// src/infra/errors.rs — Error types for prophet

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProphetError {
    // Provider errors (fatal for the current turn)
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    // Startup errors (fatal for the process)
    #[error("Context document {}: {message}", path.display())]
    Context { path: PathBuf, message: String },

    #[error("No API key found. Set {env_var} or add it to .env.")]
    MissingApiKey { env_var: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProphetError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn context(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Context {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for failures raised by the model provider during a turn.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProphetError::Provider { .. })
    }

    /// True for failures that must abort startup.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            ProphetError::Context { .. }
                | ProphetError::MissingApiKey { .. }
                | ProphetError::Config(_)
        )
    }
}

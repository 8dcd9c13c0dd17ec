// src/infra/config.rs — Configuration loading (TOML + env overrides)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::composer::Trigger;
use crate::infra::errors::ProphetError;
use crate::infra::paths;

pub const MAIN_MODEL_ENV: &str = "MAIN_MODEL";
pub const EVAL_MODEL_ENV: &str = "EVAL_MODEL";
pub const MAX_ATTEMPTS_ENV: &str = "PROPHET_MAX_ATTEMPTS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub quality: QualityConfig,

    #[serde(default)]
    pub persona: PersonaConfig,

    #[serde(default)]
    pub trigger: TriggerConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Model that writes in-character replies.
    pub main: String,
    /// Model that judges them.
    pub eval: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            main: "gpt-4o-mini".into(),
            eval: "gpt-3.5-turbo".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Total attempts per turn, including the first one.
    pub max_attempts: u8,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub context_dir: PathBuf,
    /// Actor exports (JSON), relative to `context_dir`.
    pub actors: Vec<PathBuf>,
    /// Journal and backstory text files, relative to `context_dir`.
    pub journals: Vec<PathBuf>,
    /// Rules reference text, relative to `context_dir`.
    pub rules: PathBuf,
    /// Replaces the built-in responder rubric.
    pub rubric: Option<PathBuf>,
    /// Replaces the built-in evaluator rubric.
    pub evaluator_rubric: Option<PathBuf>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            context_dir: PathBuf::from("persona"),
            actors: [
                "actors/jabari.json",
                "actors/oksana-aleksandrovna.json",
                "actors/orpheus-belcourt.json",
                "actors/stella-belcourt.json",
                "actors/umniy-sobaka.json",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            journals: [
                "journals/orpheus_public_journal.txt",
                "journals/orpheus_private_journal.txt",
                "journals/orpheus_stella_backstory.txt",
                "journals/sobaka_backstory.txt",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            rules: PathBuf::from("dead_laws.txt"),
            rubric: None,
            evaluator_rubric: None,
        }
    }
}

impl PersonaConfig {
    /// Join a configured document path onto `context_dir` (absolute paths pass through).
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.context_dir.join(relative)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub enabled: bool,
    pub phrase: String,
    pub directive: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            phrase: "patent".into(),
            directive: "Everything in your reply needs to be in pig latin - \
                        it is mandatory that you respond only and entirely in pig latin"
                .into(),
        }
    }
}

impl TriggerConfig {
    /// The active trigger, if enabled and non-empty.
    pub fn to_trigger(&self) -> Option<Trigger> {
        if !self.enabled || self.phrase.trim().is_empty() {
            return None;
        }
        Some(Trigger::new(&self.phrase, &self.directive))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// First assistant turn of every chat session.
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Bombaclot Prophet, ancient Celestial at your service. \
                       Pose thy questions and endure my timeless mockery."
                .into(),
        }
    }
}

impl Config {
    /// Load config: explicit path, then PROPHET_HOME / platform config dir, then defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match paths::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply MAIN_MODEL / EVAL_MODEL / PROPHET_MAX_ATTEMPTS from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ProphetError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ProphetError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(model) = non_empty(MAIN_MODEL_ENV) {
            self.models.main = model;
        }
        if let Some(model) = non_empty(EVAL_MODEL_ENV) {
            self.models.eval = model;
        }
        if let Some(raw) = non_empty(MAX_ATTEMPTS_ENV) {
            self.quality.max_attempts = raw.trim().parse().map_err(|_| {
                ProphetError::Config(format!("{MAX_ATTEMPTS_ENV} must be 1-255, got '{raw}'"))
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ProphetError> {
        if self.quality.max_attempts == 0 {
            return Err(ProphetError::Config(
                "quality.max_attempts must be at least 1".into(),
            ));
        }
        if self.models.main.trim().is_empty() || self.models.eval.trim().is_empty() {
            return Err(ProphetError::Config("model ids must not be empty".into()));
        }
        Ok(())
    }
}

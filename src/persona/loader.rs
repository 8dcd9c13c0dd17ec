// src/persona/loader.rs — Load context documents once at startup

use std::path::Path;

use super::roster::{self, RosterEntry};
use crate::infra::config::PersonaConfig;
use crate::infra::errors::ProphetError;

/// Everything read from the context documents, before any rubric is applied.
#[derive(Debug, Clone, Default)]
pub struct PersonaContext {
    pub roster: Vec<RosterEntry>,
    /// Journals and backstories, joined by blank lines in configured order.
    pub journal: String,
    pub rules: String,
}

impl PersonaContext {
    pub fn roster_summary(&self) -> String {
        roster::roster_summary(&self.roster)
    }
}

/// Read every configured document. Any missing or malformed file aborts the load.
pub fn load_context(config: &PersonaConfig) -> Result<PersonaContext, ProphetError> {
    let mut roster = Vec::with_capacity(config.actors.len());
    for actor in &config.actors {
        let path = config.resolve(actor);
        let raw = read_document(&path)?;
        let entry =
            roster::parse_actor(&raw).map_err(|msg| ProphetError::context(&path, msg))?;
        tracing::debug!(path = %path.display(), name = %entry.name, "Loaded actor");
        roster.push(entry);
    }

    let journals = config
        .journals
        .iter()
        .map(|j| read_document(&config.resolve(j)))
        .collect::<Result<Vec<_>, _>>()?;

    let rules = read_document(&config.resolve(&config.rules))?;

    tracing::info!(
        actors = roster.len(),
        journals = journals.len(),
        rules_chars = rules.len(),
        "Persona context loaded",
    );

    Ok(PersonaContext {
        roster,
        journal: journals.join("\n\n"),
        rules,
    })
}

pub(crate) fn read_document(path: &Path) -> Result<String, ProphetError> {
    std::fs::read_to_string(path).map_err(|e| ProphetError::context(path, e.to_string()))
}

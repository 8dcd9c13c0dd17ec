// src/persona/brief.rs — Wrap loaded context into the responder and evaluator briefs

use std::path::Path;

use super::loader::{self, PersonaContext};
use crate::infra::config::PersonaConfig;
use crate::infra::errors::ProphetError;

const DEFAULT_RUBRIC: &str = include_str!("../../templates/persona.md");
const DEFAULT_EVALUATOR_RUBRIC: &str = include_str!("../../templates/evaluator.md");

pub const SECTION_ROSTER: &str = "## Party Members and Familiars:";
pub const SECTION_JOURNAL: &str = "## Party Journal:";
pub const SECTION_RULES: &str = "## Pathfinder 2e Combat Rules Context:";

const RESPONDER_CLOSING: &str = "With this context, please chat with the user, always staying \
     in character as an Ancient Celestial of Undetermined Alignment.";
const EVALUATOR_CLOSING: &str = "With this context, please critique the latest response, \
     replying with whether the response is acceptable and your feedback.";

/// The two rubric texts the briefs are wrapped in.
#[derive(Debug, Clone)]
pub struct Rubrics {
    pub responder: String,
    pub evaluator: String,
}

impl Default for Rubrics {
    fn default() -> Self {
        Self {
            responder: DEFAULT_RUBRIC.to_string(),
            evaluator: DEFAULT_EVALUATOR_RUBRIC.to_string(),
        }
    }
}

impl Rubrics {
    /// Built-in rubrics, each replaced by its configured file when one is set.
    pub fn load(config: &PersonaConfig) -> Result<Self, ProphetError> {
        Ok(Self {
            responder: load_rubric(config.rubric.as_deref(), DEFAULT_RUBRIC)?,
            evaluator: load_rubric(config.evaluator_rubric.as_deref(), DEFAULT_EVALUATOR_RUBRIC)?,
        })
    }
}

fn load_rubric(path: Option<&Path>, builtin: &str) -> Result<String, ProphetError> {
    match path {
        Some(p) => loader::read_document(p),
        None => Ok(builtin.to_string()),
    }
}

/// Process-wide persona text. Built once, then shared read-only behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PersonaBrief {
    responder: String,
    evaluator: String,
}

impl PersonaBrief {
    pub fn build(ctx: &PersonaContext, rubrics: &Rubrics) -> Self {
        Self {
            responder: wrap(&rubrics.responder, ctx, RESPONDER_CLOSING),
            evaluator: wrap(&rubrics.evaluator, ctx, EVALUATOR_CLOSING),
        }
    }

    /// Load rubrics and context documents named by `config` and build both briefs.
    pub fn from_config(config: &PersonaConfig) -> Result<Self, ProphetError> {
        let rubrics = Rubrics::load(config)?;
        let ctx = loader::load_context(config)?;
        Ok(Self::build(&ctx, &rubrics))
    }

    /// System instruction base for the in-character generator.
    pub fn responder(&self) -> &str {
        &self.responder
    }

    /// System prompt for the evaluator.
    pub fn evaluator(&self) -> &str {
        &self.evaluator
    }
}

/// rubric, then roster → journal → rules, then the closing line.
fn wrap(rubric: &str, ctx: &PersonaContext, closing: &str) -> String {
    let roster = ctx.roster_summary();
    let mut out = String::with_capacity(
        rubric.len() + roster.len() + ctx.journal.len() + ctx.rules.len() + 256,
    );
    out.push_str(rubric);
    for (label, body) in [
        (SECTION_ROSTER, roster.as_str()),
        (SECTION_JOURNAL, ctx.journal.as_str()),
        (SECTION_RULES, ctx.rules.as_str()),
    ] {
        out.push_str("\n\n");
        out.push_str(label);
        out.push('\n');
        out.push_str(body);
    }
    out.push_str("\n\n");
    out.push_str(closing);
    out
}

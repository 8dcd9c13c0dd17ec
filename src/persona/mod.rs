// src/persona/mod.rs — Persona context and briefs

pub mod brief;
pub mod loader;
pub mod roster;

pub use brief::{PersonaBrief, Rubrics};
pub use loader::{load_context, PersonaContext};

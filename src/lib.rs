// src/lib.rs — Library root for prophet

pub mod cli;
pub mod core;
pub mod evaluator;
pub mod infra;
pub mod persona;
pub mod provider;
pub mod util;

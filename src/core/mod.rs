// src/core/mod.rs — Turn pipeline: compose, generate, evaluate, retry

pub mod composer;
pub mod controller;
pub mod generator;
pub mod types;

//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod output;
pub mod plot;
pub mod solve;

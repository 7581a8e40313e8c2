//! CLI: public listing views and event administration
//!
//! This crate provides the `townboard` command-line interface, the caller
//! surface over the core policy and the store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use error::{CliError, CliResult};

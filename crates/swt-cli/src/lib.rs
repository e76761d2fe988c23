//! Smart-working calendar CLI library.
//!
//! This crate provides the CLI interface for the smart-working calendar.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;

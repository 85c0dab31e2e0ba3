//! Caselink CLI library.
//!
//! This library provides the core functionality for the `caselink` command-line
//! interface: configuration profiles, the local or remote record source, command
//! execution and output formatting.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use backend::Backend;
pub use cli::{Cli, Command};
pub use config::{Config, Profile};
pub use error::{CliError, Result};
pub use output::Formatter;

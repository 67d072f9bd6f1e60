//! docgraph CLI library.
//!
//! Command-line and interactive front end for the document service: uploads
//! CSV and PDF documents, asks questions about them and renders the relation
//! graph extracted from PDFs.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

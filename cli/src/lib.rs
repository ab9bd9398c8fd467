//! `smartfit` command-line interface.
//!
//! Two subcommands: `demo` ranks the built-in sample resumes, `rank` ranks
//! resume files from disk. Both print a grid table; `rank --json` prints the
//! same `{"matches": [...]}` body the HTTP service returns.

pub mod cli;
pub mod commands;
pub mod data;
pub mod table;

pub use cli::{Cli, Commands};
pub use commands::run;

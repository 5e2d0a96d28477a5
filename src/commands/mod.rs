//! Command handlers for the castsum CLI.
//!
//! Each submodule handles one subcommand; dispatch stays in main.rs.

pub mod clean;
pub mod completions;
pub mod config;
pub mod info;
pub mod summarize;

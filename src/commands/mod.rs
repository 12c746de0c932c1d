//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod bank;
pub mod completions;
pub mod geometry;
pub mod run;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("could not read {0}: {1}")]
    FileRead(String, std::io::Error),
    #[error("could not parse event JSON {0}: {1}")]
    EventParse(String, serde_json::Error),
}

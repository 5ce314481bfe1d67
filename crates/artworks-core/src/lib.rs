//! Shared building blocks for the artwork dataset tools.
//!
//! Holds the record and row models, the error type, command-line settings
//! and the plain-text output formatting used by every task.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

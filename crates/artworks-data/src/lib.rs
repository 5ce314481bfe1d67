//! Dataset reading layer for the artwork tools.
//!
//! Detects whether an input file is a JSON array or newline-delimited JSON,
//! streams its records one at a time, projects painting rows and feeds the
//! counting sinks.

pub mod counter;
pub mod format;
pub mod projector;
pub mod reader;

pub use artworks_core as core;

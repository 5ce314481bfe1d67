//! SQLite side of the artwork tools.
//!
//! Creates and fills the `paintings` table and provides the read-only
//! inspection helpers used to check the result.

pub mod error;
pub mod inspect;
pub mod paintings;

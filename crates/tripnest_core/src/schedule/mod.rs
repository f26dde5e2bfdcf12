//! Schedule parsing and calendar helpers.
//!
//! # Responsibility
//! - Turn user-entered date text into calendar dates.
//! - Keep the "invalid date" outcome a value, never an error.

pub mod date_parser;

//! Utility functions shared across layers.
//!
//! - [`flag`] - Lenient boolean parsing for query strings and form fields
//! - [`like_pattern`] - Escaping user input for SQL `LIKE` patterns

pub mod flag;
pub mod like_pattern;

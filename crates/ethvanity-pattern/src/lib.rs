//! Ethvanity Pattern Matching
//!
//! The match predicate for vanity address search: suffix, prefix, contains,
//! and OR-combinations of several patterns, all case-insensitive by
//! construction.

mod difficulty;
mod matcher;

pub use difficulty::{combined_difficulty, expected_attempts, format_difficulty};
pub use matcher::{Pattern, PatternError, PatternKind, PatternMatcher, ADDRESS_HEX_LEN};

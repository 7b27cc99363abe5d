//! Difficulty calculation for vanity patterns

use crate::matcher::{Pattern, PatternKind, ADDRESS_HEX_LEN};

/// Size of the hex alphabet a bare address is drawn over
const ALPHABET_SIZE: f64 = 16.0;

/// Expected number of attempts for a single pattern to match.
pub fn expected_attempts(pattern: &Pattern) -> f64 {
    let len = pattern.value().len();
    let fixed_positions = ALPHABET_SIZE.powi(len as i32);

    match pattern.kind() {
        PatternKind::Suffix | PatternKind::Prefix => fixed_positions,
        PatternKind::Contains => {
            // The pattern may start at any of the remaining positions
            let positions = (ADDRESS_HEX_LEN - len + 1) as f64;
            fixed_positions / positions
        }
    }
}

/// Expected attempts for an OR over several patterns.
///
/// Per-attempt match rates add; the patterns are rare enough that overlap
/// between them is negligible.
pub fn combined_difficulty(patterns: &[Pattern]) -> f64 {
    let rate: f64 = patterns.iter().map(|p| 1.0 / expected_attempts(p)).sum();
    if rate > 0.0 {
        1.0 / rate
    } else {
        f64::INFINITY
    }
}

/// Format difficulty as human-readable string
pub fn format_difficulty(difficulty: f64) -> String {
    if difficulty >= 1e15 {
        format!("{:.2}P", difficulty / 1e15)
    } else if difficulty >= 1e12 {
        format!("{:.2}T", difficulty / 1e12)
    } else if difficulty >= 1e9 {
        format!("{:.2}G", difficulty / 1e9)
    } else if difficulty >= 1e6 {
        format!("{:.2}M", difficulty / 1e6)
    } else if difficulty >= 1e3 {
        format!("{:.2}K", difficulty / 1e3)
    } else {
        format!("{:.0}", difficulty)
    }
}

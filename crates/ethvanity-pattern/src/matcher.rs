//! Pattern matching implementation

use serde::Serialize;
use thiserror::Error;

/// Length of a bare Ethereum address in hex characters.
pub const ADDRESS_HEX_LEN: usize = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("pattern contains invalid character '{0}' (addresses are hex: 0-9 a-f)")]
    InvalidCharacter(char),
    #[error("pattern too long (max {0} characters)")]
    PatternTooLong(usize),
}

/// Where in the address the pattern must appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternKind {
    /// Match at end of address
    Suffix,
    /// Match at start of address (after the 0x prefix)
    Prefix,
    /// Match anywhere in address
    Contains,
}

/// A pattern to search for.
///
/// Normalized exactly once at construction: trimmed and lower-cased, so the
/// stored value is always comparable against the lowercase hex form of a
/// candidate address. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    value: String,
    kind: PatternKind,
}

impl Pattern {
    /// Build a pattern, normalizing and validating the raw user string.
    pub fn new(kind: PatternKind, value: &str) -> Result<Self, PatternError> {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        if value.len() > ADDRESS_HEX_LEN {
            return Err(PatternError::PatternTooLong(ADDRESS_HEX_LEN));
        }
        if let Some(c) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(PatternError::InvalidCharacter(c));
        }
        Ok(Self { value, kind })
    }

    /// Suffix pattern (the default relation)
    pub fn suffix(value: &str) -> Result<Self, PatternError> {
        Self::new(PatternKind::Suffix, value)
    }

    /// Prefix pattern
    pub fn prefix(value: &str) -> Result<Self, PatternError> {
        Self::new(PatternKind::Prefix, value)
    }

    /// Contains pattern
    pub fn contains(value: &str) -> Result<Self, PatternError> {
        Self::new(PatternKind::Contains, value)
    }

    /// The normalized (lowercase) pattern value
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Check an address against this pattern. Pure; no side effects.
    ///
    /// Expects the bare lowercase hex form, but tolerates a 0x prefix and
    /// mixed case (EIP-55 display form) by normalizing before comparing.
    /// The already-lowercase path stays allocation-free.
    pub fn matches(&self, address: &str) -> bool {
        let bare = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address);

        if bare.bytes().any(|b| b.is_ascii_uppercase()) {
            self.matches_bare(&bare.to_ascii_lowercase())
        } else {
            self.matches_bare(bare)
        }
    }

    fn matches_bare(&self, bare: &str) -> bool {
        match self.kind {
            PatternKind::Suffix => bare.ends_with(&self.value),
            PatternKind::Prefix => bare.starts_with(&self.value),
            PatternKind::Contains => bare.contains(&self.value),
        }
    }
}

/// Predicate over candidate addresses: an OR of one or more patterns.
///
/// Immutable once built, so it is shared by all search workers without
/// synchronization.
#[derive(Debug, Clone, Serialize)]
pub struct PatternMatcher {
    patterns: Vec<Pattern>,
}

impl PatternMatcher {
    /// Create a matcher over the given patterns. At least one is required.
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, PatternError> {
        if patterns.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        Ok(Self { patterns })
    }

    /// Create a matcher with a single pattern
    pub fn single(pattern: Pattern) -> Self {
        Self {
            patterns: vec![pattern],
        }
    }

    /// Check if an address matches any pattern.
    /// Returns the index of the first matching pattern, or None.
    pub fn matches(&self, address: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.matches(address))
    }

    /// Get all patterns
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_match() {
        let matcher = PatternMatcher::single(Pattern::suffix("dead").unwrap());

        assert!(matcher
            .matches("1234567890abcdef1234567890abcdef1234dead")
            .is_some());
        assert!(matcher
            .matches("1234567890abcdef1234567890abcdef12341234")
            .is_none());
    }

    #[test]
    fn test_prefix_match() {
        let matcher = PatternMatcher::single(Pattern::prefix("dead").unwrap());

        assert!(matcher
            .matches("deadbeef1234567890abcdef1234567890abcdef")
            .is_some());
        // 0x display prefix is not part of the address body
        assert!(matcher
            .matches("0xdeadbeef1234567890abcdef1234567890abcdef")
            .is_some());
        assert!(matcher
            .matches("abcd1234567890abcdef1234567890abcdef1234")
            .is_none());
    }

    #[test]
    fn test_contains_match() {
        let matcher = PatternMatcher::single(Pattern::contains("cafe").unwrap());

        assert!(matcher
            .matches("1234cafe567890abcdef1234567890abcdef1234")
            .is_some());
        assert!(matcher
            .matches("1234567890abcdef1234567890abcdef12341234")
            .is_none());
    }

    #[test]
    fn test_case_insensitive_by_construction() {
        // Mixed-case input on both sides normalizes to the same form
        let pattern = Pattern::suffix("MAGA").unwrap();
        assert_eq!(pattern.value(), "maga");

        assert!(pattern.matches("1111567890abcdef1234567890abcdef1234maga"));
        // EIP-55 checksummed display form also matches
        assert!(pattern.matches("0x1111567890AbCdEf1234567890aBcDeF1234MaGa"));
        assert!(!pattern.matches("1111567890abcdef1234567890abcdef1234magb"));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(Pattern::suffix(""), Err(PatternError::EmptyPattern));
        assert_eq!(Pattern::suffix("   "), Err(PatternError::EmptyPattern));
        assert_eq!(Pattern::suffix("\t\n"), Err(PatternError::EmptyPattern));
    }

    #[test]
    fn test_invalid_character_rejected() {
        assert_eq!(
            Pattern::suffix("xyz"),
            Err(PatternError::InvalidCharacter('x'))
        );
        assert_eq!(
            Pattern::prefix("0xab"),
            Err(PatternError::InvalidCharacter('x'))
        );
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "a".repeat(41);
        assert_eq!(
            Pattern::suffix(&long),
            Err(PatternError::PatternTooLong(ADDRESS_HEX_LEN))
        );
        assert!(Pattern::suffix(&"a".repeat(40)).is_ok());
    }

    #[test]
    fn test_matching_is_pure() {
        let pattern = Pattern::suffix("ab").unwrap();
        let addr = "1234567890abcdef1234567890abcdef123456ab";
        let first = pattern.matches(addr);
        let second = pattern.matches(addr);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_construction_is_idempotent() {
        let a = Pattern::suffix(" CaFe ").unwrap();
        let b = Pattern::suffix(" CaFe ").unwrap();
        assert_eq!(a, b);

        let addr = "1234567890abcdef1234567890abcdef1234cafe";
        assert_eq!(a.matches(addr), b.matches(addr));
    }

    #[test]
    fn test_multi_pattern_or() {
        let matcher = PatternMatcher::new(vec![
            Pattern::suffix("aa").unwrap(),
            Pattern::suffix("bb").unwrap(),
        ])
        .unwrap();

        assert_eq!(
            matcher.matches("1234567890abcdef1234567890abcdef123456aa"),
            Some(0)
        );
        assert_eq!(
            matcher.matches("1234567890abcdef1234567890abcdef123456bb"),
            Some(1)
        );
        assert_eq!(
            matcher.matches("1234567890abcdef1234567890abcdef123456cc"),
            None
        );
    }

    #[test]
    fn test_empty_matcher_rejected() {
        assert!(matches!(
            PatternMatcher::new(vec![]),
            Err(PatternError::EmptyPattern)
        ));
    }
}

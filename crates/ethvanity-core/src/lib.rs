//! Ethvanity Core Engine
//!
//! The vanity address search engine: candidate keypair sources, the
//! multi-threaded generate-derive-test loop, cancellation, and attempt
//! accounting.

mod cancel;
mod search;
mod source;
mod stats;

pub use cancel::CancelToken;
pub use search::{SearchConfig, SearchError, SearchOutcome, VanitySearch, VanityWallet};
pub use source::{Candidate, KeypairSource, OsKeypairSource};
pub use stats::SearchStats;

// Re-exports for convenience
pub use ethvanity_crypto::{Address, EthKeypair, KeyError};
pub use ethvanity_pattern::{
    combined_difficulty, expected_attempts, format_difficulty, Pattern, PatternError, PatternKind,
    PatternMatcher,
};

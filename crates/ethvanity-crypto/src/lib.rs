//! Ethvanity Crypto Primitives
//!
//! Keypair generation and Ethereum address derivation for vanity search.

pub mod address;
pub mod hash;
pub mod secp256k1;

pub use self::address::Address;
pub use self::secp256k1::{EthKeypair, KeyError};

// Re-export for use by other crates
pub use hex;

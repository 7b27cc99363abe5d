//! Candidate keypair sources

use ethvanity_crypto::{Address, EthKeypair, KeyError};

/// One candidate drawn from a source: a keypair and its derived address.
///
/// Owned exclusively by the attempt that drew it. A non-matching candidate
/// is dropped at the end of the iteration (the secret key wipes itself);
/// a matching one is handed to the caller as the single search result.
pub struct Candidate {
    pub keypair: EthKeypair,
    pub address: Address,
}

/// An unbounded, lazy sequence of independent random keypairs.
///
/// Every `draw` yields a fresh value; previous draws are never cached and
/// cannot be replayed. Implementations other than [`OsKeypairSource`]
/// exist so tests can script deterministic sequences.
pub trait KeypairSource {
    fn draw(&mut self) -> Result<Candidate, KeyError>;
}

/// Draws keypairs from the operating system's secure random source.
///
/// Stateless: draws share nothing, so each worker holds its own copy
/// purely for the `&mut` in the trait signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeypairSource;

impl KeypairSource for OsKeypairSource {
    fn draw(&mut self) -> Result<Candidate, KeyError> {
        let keypair = EthKeypair::generate()?;
        let address = Address::from_keypair(&keypair);
        Ok(Candidate { keypair, address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_are_independent() {
        let mut source = OsKeypairSource;
        let a = source.draw().unwrap();
        let b = source.draw().unwrap();
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_address_matches_keypair() {
        let mut source = OsKeypairSource;
        let candidate = source.draw().unwrap();
        assert_eq!(candidate.address, Address::from_keypair(&candidate.keypair));
        assert_eq!(candidate.address.to_hex().len(), 40);
    }
}

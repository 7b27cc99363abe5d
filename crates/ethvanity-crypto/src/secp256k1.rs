//! secp256k1 keypair generation for Ethereum accounts

use k256::{PublicKey, SecretKey};
use rand_core::{OsRng, RngCore};
use thiserror::Error;
use zeroize::Zeroize;

#[derive(Error, Debug)]
pub enum KeyError {
    /// The OS secure random source failed. Fatal for a running search:
    /// attempts drawn from untrusted entropy would be real, weak keys.
    #[error("system entropy source unavailable")]
    EntropyUnavailable,
    #[error("invalid private key")]
    InvalidPrivateKey,
}

/// A secp256k1 keypair backing one Ethereum account.
///
/// The secret key is wiped from memory on drop. Deliberately no `Debug`
/// impl: discarded candidates must never reach a log line.
#[derive(Clone)]
pub struct EthKeypair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl EthKeypair {
    /// Generate a new keypair from OS entropy.
    ///
    /// Uses the fallible entropy path so an unavailable CSPRNG surfaces as
    /// [`KeyError::EntropyUnavailable`] instead of a panic. A drawn value of
    /// zero or above the group order is redrawn (probability ~2^-128).
    pub fn generate() -> Result<Self, KeyError> {
        let mut bytes = [0u8; 32];
        loop {
            OsRng
                .try_fill_bytes(&mut bytes)
                .map_err(|_| KeyError::EntropyUnavailable)?;

            if let Ok(secret_key) = SecretKey::from_bytes((&bytes).into()) {
                bytes.zeroize();
                let public_key = secret_key.public_key();
                return Ok(Self {
                    secret_key,
                    public_key,
                });
            }
        }
    }

    /// Create from a raw 32-byte private key.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let secret_key =
            SecretKey::from_bytes(bytes.into()).map_err(|_| KeyError::InvalidPrivateKey)?;
        let public_key = secret_key.public_key();
        Ok(Self {
            secret_key,
            public_key,
        })
    }

    /// Get the private key as bytes
    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.secret_key.to_bytes().into()
    }

    /// Get the uncompressed public key (65 bytes: 0x04 || x || y)
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        use k256::elliptic_curve::sec1::ToEncodedPoint;
        let point = self.public_key.to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Get just the X and Y coordinates (64 bytes, no SEC1 tag)
    pub fn public_key_xy(&self) -> [u8; 64] {
        let uncompressed = self.public_key_uncompressed();
        let mut result = [0u8; 64];
        result.copy_from_slice(&uncompressed[1..65]);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let kp = EthKeypair::generate().unwrap();
        assert_eq!(kp.private_key_bytes().len(), 32);
        assert_eq!(kp.public_key_uncompressed().len(), 65);
        assert_eq!(kp.public_key_uncompressed()[0], 0x04);
    }

    #[test]
    fn test_generation_is_independent() {
        let a = EthKeypair::generate().unwrap();
        let b = EthKeypair::generate().unwrap();
        assert_ne!(a.private_key_bytes(), b.private_key_bytes());
    }

    #[test]
    fn test_known_vector() {
        // Private key = 1 maps to the generator point G
        let privkey_hex = "0000000000000000000000000000000000000000000000000000000000000001";
        let mut privkey = [0u8; 32];
        hex::decode_to_slice(privkey_hex, &mut privkey).unwrap();

        let kp = EthKeypair::from_bytes(&privkey).unwrap();
        let pubkey = kp.public_key_uncompressed();

        assert_eq!(
            hex::encode(&pubkey[1..33]),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_zero_key_rejected() {
        let zero = [0u8; 32];
        assert!(matches!(
            EthKeypair::from_bytes(&zero),
            Err(KeyError::InvalidPrivateKey)
        ));
    }
}

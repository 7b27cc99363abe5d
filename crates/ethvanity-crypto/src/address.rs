//! Ethereum address derivation and display encoding

use std::fmt;

use crate::hash::keccak256;
use crate::secp256k1::EthKeypair;

/// A 20-byte Ethereum account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address([u8; 20]);

impl Address {
    /// Derive from a keypair: last 20 bytes of Keccak-256(pubkey x || y).
    pub fn from_keypair(keypair: &EthKeypair) -> Self {
        let hash = keccak256(&keypair.public_key_xy());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..32]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Bare lowercase hex, no 0x prefix. The form patterns are matched
    /// against, so case-insensitivity holds by construction.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// EIP-55 checksummed display form with 0x prefix.
    pub fn to_checksummed(&self) -> String {
        eip55_checksum(&self.0)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksummed())
    }
}

/// EIP-55 mixed-case checksum encoding for Ethereum addresses
pub fn eip55_checksum(address: &[u8; 20]) -> String {
    let hex_addr = hex::encode(address);
    let hash = keccak256(hex_addr.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in hex_addr.chars().enumerate() {
        let hash_nibble = if i % 2 == 0 {
            (hash[i / 2] >> 4) & 0x0F
        } else {
            hash[i / 2] & 0x0F
        };

        if hash_nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eip55_checksum() {
        let addr = hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let mut addr_arr = [0u8; 20];
        addr_arr.copy_from_slice(&addr);

        let checksummed = eip55_checksum(&addr_arr);
        assert_eq!(checksummed, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn test_derivation_known_vector() {
        // Known address for private key = 1
        let mut privkey = [0u8; 32];
        privkey[31] = 1;
        let kp = EthKeypair::from_bytes(&privkey).unwrap();
        let addr = Address::from_keypair(&kp);

        assert_eq!(addr.to_hex(), "7e5f4552091a69125d5dfcb7b8c2659029395bdf");
        assert_eq!(
            addr.to_checksummed().to_lowercase(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_hex_form_is_lowercase() {
        let addr = Address::from([0xAB; 20]);
        assert_eq!(addr.to_hex(), "ab".repeat(20));
        assert_eq!(addr.to_hex().len(), 40);
    }
}

//! Wallet Address Value Object
//!
//! An Algorand address is 58 characters of RFC 4648 base32 (no padding)
//! encoding 36 bytes: the 32-byte Ed25519 public key followed by a 4-byte
//! checksum, which is the tail of SHA-512/256 over the public key.
//!
//! Parsing validates length, alphabet, and checksum, so a constructed
//! `WalletAddress` always carries a well-formed public key. The address is
//! immutable once bound to a user and serves as the unique identity key.

use std::fmt;
use std::str::FromStr;

use platform::crypto::{base32_decode, base32_encode, sha512_256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Encoded address length in characters
pub const ADDRESS_LENGTH: usize = 58;

/// Ed25519 public key length in bytes
const PUBLIC_KEY_LENGTH: usize = 32;

/// Checksum length in bytes
const CHECKSUM_LENGTH: usize = 4;

/// Decoded address length: public key + checksum
const DECODED_LENGTH: usize = PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH;

/// Wallet address parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletAddressError {
    #[error("address must be {ADDRESS_LENGTH} characters, got {0}")]
    InvalidLength(usize),

    #[error("address is not valid base32")]
    InvalidEncoding,

    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// Validated wallet address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress {
    encoded: String,
    public_key: [u8; PUBLIC_KEY_LENGTH],
}

impl WalletAddress {
    /// Parse and validate an encoded address.
    pub fn parse(s: &str) -> Result<Self, WalletAddressError> {
        if s.len() != ADDRESS_LENGTH {
            return Err(WalletAddressError::InvalidLength(s.len()));
        }

        let decoded = base32_decode(s).map_err(|_| WalletAddressError::InvalidEncoding)?;
        if decoded.len() != DECODED_LENGTH {
            return Err(WalletAddressError::InvalidEncoding);
        }

        let (public_key, checksum) = decoded.split_at(PUBLIC_KEY_LENGTH);
        if Self::checksum(public_key) != checksum {
            return Err(WalletAddressError::ChecksumMismatch);
        }

        let mut pk = [0u8; PUBLIC_KEY_LENGTH];
        pk.copy_from_slice(public_key);

        Ok(Self {
            encoded: s.to_string(),
            public_key: pk,
        })
    }

    /// Build the canonical address for an Ed25519 public key.
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> Self {
        let mut decoded = Vec::with_capacity(DECODED_LENGTH);
        decoded.extend_from_slice(public_key);
        decoded.extend_from_slice(&Self::checksum(public_key));

        Self {
            encoded: base32_encode(&decoded),
            public_key: *public_key,
        }
    }

    /// The encoded 58-character form.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The Ed25519 public key embedded in the address.
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.public_key
    }

    /// Last 4 bytes of SHA-512/256 over the public key.
    fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LENGTH] {
        let digest = sha512_256(public_key);
        let mut checksum = [0u8; CHECKSUM_LENGTH];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LENGTH..]);
        checksum
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoded)
    }
}

impl FromStr for WalletAddress {
    type Err = WalletAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = WalletAddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.encoded
    }
}

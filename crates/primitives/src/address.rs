//! Canonical account address encoding.
//!
//! An address is the base32 (RFC 4648, no padding) encoding of the 32-byte public key followed
//! by a 4-byte checksum, the last 4 bytes of SHA-512/256 over the public key.

use std::{fmt, str::FromStr};

use borsh::{BorshDeserialize, BorshSerialize};
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};
use thiserror::Error;

/// Length of an account public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of the checksum appended to the public key before encoding.
const CHECKSUM_LEN: usize = 4;

/// Length of the encoded address string.
pub const ENCODED_ADDRESS_LEN: usize = 58;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid address length: expected {ENCODED_ADDRESS_LEN} chars, got {0}")]
    InvalidLength(usize),

    #[error("invalid base32 in address: {0}")]
    InvalidEncoding(String),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid public key length: expected {PUBLIC_KEY_LEN} bytes, got {0}")]
    InvalidPublicKeyLength(usize),
}

/// Account address in its canonical, human-readable string form.
///
/// Always holds a validated encoding; raw key bytes are converted at construction and never
/// stored.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Encodes a public key into its canonical address.
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> Self {
        let mut buf = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
        buf.extend_from_slice(public_key);
        buf.extend_from_slice(&checksum(public_key));
        Self(BASE32_NOPAD.encode(&buf))
    }

    /// Encodes a public key given as an arbitrary byte slice.
    pub fn from_public_key_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let public_key: [u8; PUBLIC_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidPublicKeyLength(bytes.len()))?;
        Ok(Self::from_public_key(&public_key))
    }

    /// Decodes the public key this address commits to.
    pub fn public_key(&self) -> Result<[u8; PUBLIC_KEY_LEN], AddressError> {
        let raw = BASE32_NOPAD
            .decode(self.0.as_bytes())
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        raw.get(..PUBLIC_KEY_LEN)
            .and_then(|key| key.try_into().ok())
            .ok_or(AddressError::InvalidPublicKeyLength(raw.len()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn checksum(public_key: &[u8; PUBLIC_KEY_LEN]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha512_256::digest(public_key);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    out
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ENCODED_ADDRESS_LEN {
            return Err(AddressError::InvalidLength(s.len()));
        }

        let raw = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        if raw.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
            return Err(AddressError::InvalidEncoding(format!(
                "decoded to {} bytes",
                raw.len()
            )));
        }

        let (key, sum) = raw.split_at(PUBLIC_KEY_LEN);
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(key);
        if checksum(&public_key) != sum {
            return Err(AddressError::ChecksumMismatch);
        }

        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

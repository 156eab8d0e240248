//! Raw block headers as delivered by the indexer and their conversion into [`BlockRecord`]s.
//!
//! Indexer payloads are loose: integers show up as numbers of any width or as decimal strings,
//! and the proposer may be raw key bytes, a wrapper around them, base64 or an already encoded
//! address. Everything is normalized here, and only here.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::{
    address::{Address, PUBLIC_KEY_LEN},
    block::BlockRecord,
};

/// An integer field in any of the shapes the indexer has been seen to use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInteger {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl RawInteger {
    /// Normalizes to `u64`. Negative, fractional, out-of-range and non-numeric values yield
    /// `None`.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Self::Unsigned(v) => Some(*v),
            Self::Signed(v) => u64::try_from(*v).ok(),
            Self::Float(v) => {
                if v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64 {
                    Some(*v as u64)
                } else {
                    None
                }
            }
            Self::Text(s) => s.trim().parse::<u64>().ok(),
        }
    }
}

impl From<u64> for RawInteger {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

/// A proposer field in any of its wire shapes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawProposer {
    Bytes(Vec<u8>),
    Wrapped {
        #[serde(rename = "publicKey")]
        public_key: Vec<u8>,
    },
    Text(String),
}

impl RawProposer {
    /// Resolves the proposer to its canonical address.
    ///
    /// Strings are first tried as an encoded address, then as base64 of the raw key.
    pub fn to_address(&self) -> Option<Address> {
        match self {
            Self::Bytes(bytes) | Self::Wrapped { public_key: bytes } => {
                Address::from_public_key_slice(bytes).ok()
            }
            Self::Text(s) => {
                if let Ok(addr) = s.parse::<Address>() {
                    return Some(addr);
                }
                let bytes = STANDARD.decode(s).ok()?;
                if bytes.len() != PUBLIC_KEY_LEN {
                    return None;
                }
                Address::from_public_key_slice(&bytes).ok()
            }
        }
    }
}

/// A block header exactly as the indexer returned it. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RawBlockHeader {
    pub round: Option<RawInteger>,
    pub timestamp: Option<RawInteger>,
    pub proposer: Option<RawProposer>,
    #[serde(alias = "proposerPayout")]
    pub proposer_payout: Option<RawInteger>,
}

impl BlockRecord {
    /// Converts a raw header, returning `None` if any field is missing or unusable or if the
    /// payout is not positive.
    pub fn from_raw(raw: &RawBlockHeader) -> Option<Self> {
        let round = raw.round.as_ref()?.to_u64()?;
        let timestamp = raw.timestamp.as_ref()?.to_u64()?;
        let proposer = raw.proposer.as_ref()?.to_address()?;
        let proposer_payout = raw.proposer_payout.as_ref()?.to_u64()?;
        if proposer_payout == 0 {
            return None;
        }

        Some(Self::new(round, timestamp, proposer, proposer_payout))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    const KEY: [u8; 32] = [9u8; 32];

    fn header(payout: serde_json::Value) -> RawBlockHeader {
        serde_json::from_value(json!({
            "round": 46512900u64,
            "timestamp": "1718000000",
            "proposer": KEY.to_vec(),
            "proposer-payout": payout,
        }))
        .unwrap()
    }

    #[test]
    fn test_integer_shapes() {
        let cases = [
            (json!(5), Some(5)),
            (json!(u64::MAX), Some(u64::MAX)),
            (json!(-1), None),
            (json!(7.0), Some(7)),
            (json!(7.5), None),
            (json!("42"), Some(42)),
            (json!(" 42 "), Some(42)),
            (json!("-3"), None),
            (json!("abc"), None),
        ];
        for (value, expected) in cases {
            let raw: RawInteger = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(raw.to_u64(), expected, "value {value}");
        }
    }

    #[test]
    fn test_proposer_shapes_agree() {
        let expected = Address::from_public_key(&KEY);
        let shapes = [
            json!(KEY.to_vec()),
            json!({ "publicKey": KEY.to_vec() }),
            json!(STANDARD.encode(KEY)),
            json!(expected.to_string()),
        ];
        for shape in shapes {
            let raw: RawProposer = serde_json::from_value(shape.clone()).unwrap();
            assert_eq!(raw.to_address(), Some(expected.clone()), "shape {shape}");
        }
    }

    #[test]
    fn test_unrecognized_proposer() {
        assert_eq!(RawProposer::Bytes(vec![1, 2, 3]).to_address(), None);
        assert_eq!(RawProposer::Text("hello".into()).to_address(), None);
        // Valid base64 of the wrong length.
        let short = STANDARD.encode([1u8; 16]);
        assert_eq!(RawProposer::Text(short).to_address(), None);
    }

    #[test]
    fn test_from_raw_accepts_valid_header() {
        let rec = BlockRecord::from_raw(&header(json!(1_000_000))).unwrap();
        assert_eq!(rec.round, 46512900);
        assert_eq!(rec.timestamp, 1718000000);
        assert_eq!(rec.proposer, Address::from_public_key(&KEY));
        assert_eq!(rec.proposer_payout, 1_000_000);
    }

    #[test]
    fn test_from_raw_rejects_non_positive_payout() {
        assert_eq!(BlockRecord::from_raw(&header(json!(0))), None);
        assert_eq!(BlockRecord::from_raw(&header(json!(-5))), None);
        assert_eq!(BlockRecord::from_raw(&header(json!("0"))), None);
    }

    #[test]
    fn test_from_raw_rejects_missing_fields() {
        let mut raw = header(json!(1));
        raw.timestamp = None;
        assert_eq!(BlockRecord::from_raw(&raw), None);

        let raw: RawBlockHeader = serde_json::from_value(json!({ "round": 1 })).unwrap();
        assert_eq!(BlockRecord::from_raw(&raw), None);
    }

    #[test]
    fn test_camel_case_payout_alias() {
        let raw: RawBlockHeader = serde_json::from_value(json!({
            "round": 1,
            "timestamp": 2,
            "proposer": KEY.to_vec(),
            "proposerPayout": 3,
        }))
        .unwrap();
        assert_eq!(BlockRecord::from_raw(&raw).unwrap().proposer_payout, 3);
    }

    proptest! {
        #[test]
        fn proptest_ingestion_is_deterministic(
            round in any::<u64>(),
            ts in any::<u64>(),
            key in any::<[u8; 32]>(),
            payout in any::<i64>(),
        ) {
            let raw = RawBlockHeader {
                round: Some(RawInteger::Unsigned(round)),
                timestamp: Some(RawInteger::Text(ts.to_string())),
                proposer: Some(RawProposer::Bytes(key.to_vec())),
                proposer_payout: Some(RawInteger::Signed(payout)),
            };
            let first = BlockRecord::from_raw(&raw);
            prop_assert_eq!(&first, &BlockRecord::from_raw(&raw));
            prop_assert_eq!(first.is_some(), payout > 0);
        }
    }
}

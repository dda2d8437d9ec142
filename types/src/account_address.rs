// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use rand::Rng;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A fixed-width opaque account identifier.
///
/// Collision probability between two independently generated addresses is
/// treated as zero throughout the ledger.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

impl AccountAddress {
    /// The number of bytes in an address.
    pub const LENGTH: usize = 20;

    /// The null identifier. Used as the `from` address of mint events and
    /// rejected as an ownership-transfer target.
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let buf: [u8; Self::LENGTH] = rng.gen();
        Self(buf)
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    pub fn into_bytes(self) -> [u8; Self::LENGTH] {
        self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex_literal(literal: &str) -> Result<Self, AccountAddressParseError> {
        let hex_str = literal
            .strip_prefix("0x")
            .ok_or(AccountAddressParseError)?;
        Self::from_hex(hex_str)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, AccountAddressParseError> {
        let bytes = hex::decode(hex_str).map_err(|_| AccountAddressParseError)?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for AccountAddress {
    type Error = AccountAddressParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| AccountAddressParseError)
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for AccountAddress {
    type Err = AccountAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(stripped) = s.strip_prefix("0x") {
            Self::from_hex(stripped)
        } else {
            Self::from_hex(s)
        }
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex_literal())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = <String>::deserialize(deserializer)?;
            AccountAddress::from_str(&s).map_err(D::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            AccountAddress::try_from(bytes.as_slice()).map_err(D::Error::custom)
        }
    }
}

#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("unable to parse account address")]
pub struct AccountAddressParseError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_literal_roundtrip() {
        let address = AccountAddress::random();
        let literal = address.to_hex_literal();
        assert!(literal.starts_with("0x"));
        assert_eq!(AccountAddress::from_hex_literal(&literal).unwrap(), address);
        assert_eq!(literal.parse::<AccountAddress>().unwrap(), address);
    }

    #[test]
    fn test_reject_bad_lengths() {
        assert!(AccountAddress::from_hex("00").is_err());
        assert!(AccountAddress::try_from([0u8; 21].as_slice()).is_err());
        assert!("0xzz".parse::<AccountAddress>().is_err());
    }

    #[test]
    fn test_json_shape() {
        let address = AccountAddress::new([0x11; 20]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address.to_hex_literal()));
        let decoded: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, address);
    }
}

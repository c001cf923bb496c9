use crate::errors::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const OCTET_COUNT: usize = 6;

/// A 48-bit hardware address in canonical form.
///
/// Textual input is accepted with `:` or `-` separators, in any case, and with
/// one or two hex digits per octet. Two inputs denoting the same 48-bit value
/// always produce equal `MacAddress` values and the same rendering
/// (`01:0b:0d:aa:bb:cc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; OCTET_COUNT]);

impl MacAddress {
    pub const fn new(octets: [u8; OCTET_COUNT]) -> Self {
        Self(octets)
    }

    /// Canonicalize a textual MAC address.
    ///
    /// Returns `None` unless the input splits into exactly six hex octets of
    /// one or two digits each.
    pub fn normalize(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut octets = [0u8; OCTET_COUNT];
        let mut count = 0;

        for part in raw.split([':', '-']) {
            if count == OCTET_COUNT {
                return None;
            }
            if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            octets[count] = u8::from_str_radix(part, 16).ok()?;
            count += 1;
        }

        (count == OCTET_COUNT).then_some(Self(octets))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; OCTET_COUNT]
    }

    pub fn is_broadcast(&self) -> bool {
        self.0 == [0xff; OCTET_COUNT]
    }
}

impl From<[u8; OCTET_COUNT]> for MacAddress {
    fn from(octets: [u8; OCTET_COUNT]) -> Self {
        Self(octets)
    }
}

impl FromStr for MacAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| DomainError::InvalidMacAddress(s.to_string()))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

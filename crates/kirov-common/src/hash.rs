//! Archive member name hashes.
//!
//! Mix archives do not store member names. Each index record carries a
//! 32-bit identifier instead, and callers usually know that identifier as an
//! eight digit hex string such as `"397C46E0"`.

use std::fmt;

use crate::{crc, Error, Result};

/// A 32-bit archive member identifier.
///
/// Stored signed because that is how index records are read from disk; the
/// [`Display`](fmt::Display) form is the unsigned hex spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameHash(pub i32);

impl NameHash {
    /// Create a name hash from the raw signed value.
    #[inline]
    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    /// Create a name hash from its unsigned spelling.
    #[inline]
    pub const fn from_unsigned(value: u32) -> Self {
        Self(value as i32)
    }

    /// The raw signed value as stored in index records.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// The unsigned view of the hash.
    #[inline]
    pub const fn unsigned(self) -> u32 {
        self.0 as u32
    }

    /// Parse a hex hash string.
    ///
    /// The string is read as a signed 32-bit value first. Values above
    /// `0x7FFFFFFF` overflow that parse and are then read as unsigned and
    /// reinterpreted, so `"B1D51F00"` and `"-4E2AE100"` name the same member.
    /// An optional `0x` prefix and surrounding whitespace are ignored.
    pub fn parse_hex(s: &str) -> Result<Self> {
        Self::lookup_candidates(s)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidNameHash(s.to_string()))
    }

    /// All interpretations of a hex hash string, in lookup order.
    ///
    /// The first element is the signed parse when it succeeds, followed by the
    /// unsigned-reinterpreted parse if it differs. Archive lookups try each in
    /// turn before reporting a miss.
    pub fn lookup_candidates(s: &str) -> Result<Vec<Self>> {
        let digits = strip_hex_prefix(s.trim());
        if digits.is_empty() {
            return Err(Error::InvalidNameHash(s.to_string()));
        }

        let mut candidates = Vec::with_capacity(2);
        if let Ok(signed) = i32::from_str_radix(digits, 16) {
            candidates.push(Self(signed));
        }
        if let Ok(unsigned) = u32::from_str_radix(digits, 16) {
            let reinterpreted = Self::from_unsigned(unsigned);
            if !candidates.contains(&reinterpreted) {
                candidates.push(reinterpreted);
            }
        }

        if candidates.is_empty() {
            return Err(Error::InvalidNameHash(s.to_string()));
        }
        Ok(candidates)
    }

    /// Compute the Tiberian Sun / Red Alert 2 identifier of a member name.
    ///
    /// The name is upper-cased with `/` normalized to `\`. Names whose length
    /// is not a multiple of four get the remainder appended as a byte and are
    /// then padded with copies of the first byte of the last partial group.
    pub fn from_name(name: &str) -> Self {
        let mut bytes: Vec<u8> = name
            .bytes()
            .map(|b| if b == b'/' { b'\\' } else { b.to_ascii_uppercase() })
            .collect();

        let len = bytes.len();
        let rem = len % 4;
        if rem != 0 {
            let group_start = len & !3;
            bytes.push(rem as u8);
            let fill = bytes[group_start];
            for _ in 0..(3 - rem) {
                bytes.push(fill);
            }
        }

        Self::from_unsigned(crc::hash_bytes(&bytes))
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

impl From<i32> for NameHash {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<u32> for NameHash {
    fn from(value: u32) -> Self {
        Self::from_unsigned(value)
    }
}

impl std::str::FromStr for NameHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.unsigned())
    }
}

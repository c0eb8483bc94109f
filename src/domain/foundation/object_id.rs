//! 12-byte object identifier in the document store's hex format.
//!
//! Layout of a generated id:
//!
//! | bytes | content                               |
//! |-------|---------------------------------------|
//! | 0..4  | Unix seconds, big-endian              |
//! | 4..9  | random bytes, fixed per process       |
//! | 9..12 | counter, big-endian, wraps at 2^24    |

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::ValidationError;

/// Number of raw bytes in an object id.
pub const OBJECT_ID_BYTES: usize = 12;

/// Number of hex characters in the textual form.
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_BYTES * 2;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Raw 12-byte identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OBJECT_ID_BYTES]);

impl ObjectId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        Self::from_parts(secs, *process_unique(), next_count())
    }

    /// The all-zero identifier.
    pub const fn nil() -> Self {
        Self([0; OBJECT_ID_BYTES])
    }

    /// Builds an id from the raw bytes.
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_BYTES]) -> Self {
        Self(bytes)
    }

    fn from_parts(secs: u32, unique: [u8; 5], counter: u32) -> Self {
        let mut bytes = [0u8; OBJECT_ID_BYTES];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&unique);
        bytes[9..12].copy_from_slice(&(counter & COUNTER_MASK).to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Parses the 24-character hex form. Case-insensitive.
    pub fn parse_str(s: &str) -> Result<Self, ValidationError> {
        Self::parse_field(s, "id")
    }

    /// Parses the hex form, attributing failures to `field`.
    pub fn parse_field(s: &str, field: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        if s.len() != OBJECT_ID_HEX_LEN {
            return Err(ValidationError::invalid_format(
                field,
                format!("expected {} hex characters, got {}", OBJECT_ID_HEX_LEN, s.len()),
            ));
        }

        let mut bytes = [0u8; OBJECT_ID_BYTES];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| {
            ValidationError::invalid_format(field, "does not conform to hex format")
        })?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    pub fn bytes(&self) -> [u8; OBJECT_ID_BYTES] {
        self.0
    }

    /// Returns true for the all-zero id.
    pub fn is_nil(&self) -> bool {
        self.0 == [0; OBJECT_ID_BYTES]
    }

    /// Unix seconds encoded in the first four bytes.
    pub fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Lower-case hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(serde::de::Error::custom)
    }
}

fn process_unique() -> &'static [u8; 5] {
    PROCESS_UNIQUE.get_or_init(|| {
        let random = Uuid::new_v4();
        let mut unique = [0u8; 5];
        unique.copy_from_slice(&random.as_bytes()[..5]);
        unique
    })
}

fn next_count() -> u32 {
    let counter = COUNTER.get_or_init(|| {
        let seed = *Uuid::new_v4().as_bytes();
        AtomicU32::new(u32::from_be_bytes([0, seed[0], seed[1], seed[2]]))
    });
    counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK
}

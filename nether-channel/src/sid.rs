//! Interned channel names
//!
//! Channels are addressed by a 64-bit XXH3 hash of their name. Hashing is
//! `const`, so well-known names are compile-time constants and can be used
//! directly as `match` patterns.

use core::fmt;

use xxhash_rust::const_xxh3;
use xxhash_rust::xxh3::Xxh3;

/// Hashed channel name
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StringId(u64);

impl StringId {
    /// Reserved "no name" id
    pub const INVALID: Self = Self(0);

    /// Hash a name into its id.
    pub const fn new(name: &str) -> Self {
        Self(const_xxh3::xxh3_64(name.as_bytes()))
    }

    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Id of `prefix` followed by the decimal digits of `n`.
    ///
    /// `StringId::concat_integer("apReference-camera", 2)` equals
    /// `StringId::new("apReference-camera2")` without allocating.
    pub fn concat_integer(prefix: &str, n: u32) -> Self {
        let mut digits = [0u8; 10];
        let mut start = digits.len();
        let mut rest = n;
        loop {
            start -= 1;
            digits[start] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }

        let mut hasher = Xxh3::new();
        hasher.update(prefix.as_bytes());
        hasher.update(&digits[start..]);
        Self(hasher.digest())
    }
}

impl fmt::Debug for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringId({:#018x})", self.0)
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

impl From<&str> for StringId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Root-motion reference channel every animation must carry
pub const ALIGN_CHANNEL: StringId = StringId::new("align");

/// Camera reference channels are named `apReference-camera1`, `-camera2`, ...
pub const CAMERA_REFERENCE_PREFIX: &str = "apReference-camera";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_and_runtime_hash_agree() {
        let name = String::from("align");
        assert_eq!(StringId::new(&name), ALIGN_CHANNEL);
        assert_eq!(
            ALIGN_CHANNEL.value(),
            xxhash_rust::xxh3::xxh3_64(b"align")
        );
    }

    #[test]
    fn test_concat_integer_matches_full_name() {
        for n in [0u32, 1, 2, 9, 10, 42, 1000, u32::MAX] {
            let full = format!("{}{}", CAMERA_REFERENCE_PREFIX, n);
            assert_eq!(
                StringId::concat_integer(CAMERA_REFERENCE_PREFIX, n),
                StringId::new(&full),
                "mismatch for {}",
                full
            );
        }
    }

    #[test]
    fn test_distinct_names_distinct_ids() {
        assert_ne!(StringId::new("lAnkle"), StringId::new("rAnkle"));
        assert!(StringId::new("lAnkle").is_valid());
        assert!(!StringId::INVALID.is_valid());
        assert_eq!(StringId::default(), StringId::INVALID);
    }
}

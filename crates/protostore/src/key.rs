//! Primary-key encoding
//!
//! A record's primary key is built from one or more scalar field values,
//! each rendered as a text token and appended to a [`KeyBuf`]. Keys are
//! compared by the storage engine as raw bytes, so the byte layout here is
//! a contract: changing it invalidates every key already on disk.
//!
//! ## Contract
//!
//! - String fields contribute their bytes unchanged.
//! - Bool fields contribute the literal `true` / `false`.
//! - Integer and enum fields are widened to 64 bits and rendered as decimal
//!   text (signed for int32/int64/enum, unsigned for uint32/uint64).
//! - Every token is terminated with a `0x00` byte; a `0x00` inside a token
//!   (only possible for string fields) is escaped as `0x00 0xFF`. This makes
//!   the composite layout self-delimiting — distinct field-value sequences
//!   never collide — while preserving byte order between keys.
//!
//! Decimal text does **not** sort numerically under byte comparison: the key
//! for id 20 precedes the keys for ids 3 and 7. Iteration order over
//! integer-keyed namespaces is lexicographic, not numeric.

/// Terminates every key token.
const TERMINATOR: u8 = 0x00;

/// Follows an escaped `0x00` inside a token.
const ESCAPE: u8 = 0xFF;

/// Incremental builder for a composite primary key.
///
/// Push one token per primary-key field, in ascending field-number order,
/// then take the finished key with [`KeyBuf::finish`].
///
/// # Examples
///
/// ```
/// use protostore::KeyBuf;
///
/// let mut key = KeyBuf::new();
/// key.push_int(42);
/// key.push_str("alice");
/// assert_eq!(key.finish(), b"42\x00alice\x00");
/// ```
#[derive(Debug, Default)]
pub struct KeyBuf {
    buf: Vec<u8>,
}

impl KeyBuf {
    /// Create an empty key buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string field token.
    pub fn push_str(&mut self, value: &str) {
        for &b in value.as_bytes() {
            self.buf.push(b);
            if b == TERMINATOR {
                self.buf.push(ESCAPE);
            }
        }
        self.buf.push(TERMINATOR);
    }

    /// Append a bool field token (`true` / `false`).
    pub fn push_bool(&mut self, value: bool) {
        self.push_token(if value { "true" } else { "false" });
    }

    /// Append a signed integer field token (int32/int64/enum, widened to i64).
    pub fn push_int(&mut self, value: i64) {
        self.push_token(&value.to_string());
    }

    /// Append an unsigned integer field token (uint32/uint64, widened to u64).
    pub fn push_uint(&mut self, value: u64) {
        self.push_token(&value.to_string());
    }

    /// Consume the builder and return the finished key bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Append a token known to contain no terminator bytes.
    fn push_token(&mut self, token: &str) {
        debug_assert!(!token.as_bytes().contains(&TERMINATOR));
        self.buf.extend_from_slice(token.as_bytes());
        self.buf.push(TERMINATOR);
    }
}

mod generator;

pub use generator::*;

use crate::{Base32Error, base32::{decode_base32, encode_base32, symbol_value}};
use core::{fmt, str::FromStr};

/// A standard 128-bit ULID: a 48-bit millisecond timestamp followed by 80
/// random bits, ordered by its big-endian byte representation.
///
/// ```text
///  Bit Index:  127            80 79           0
///              +----------------+-------------+
///  Field:      | timestamp (48) | random (80) |
///              +----------------+-------------+
///              |<-- MSB -- 128 bits -- LSB -->|
/// ```
///
/// This is the untyped primitive underneath [`crate::KindId`]. Its text form
/// is the canonical 26-symbol Crockford base32 string.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ulid {
    id: u128,
}

impl Ulid {
    /// Length of the canonical text encoding.
    pub const ENCODED_LEN: usize = 26;
    /// Length of the binary encoding.
    pub const BYTE_LEN: usize = 16;

    pub const TIMESTAMP_BITS: u32 = 48;
    pub const RANDOM_BITS: u32 = 80;

    pub const RANDOM_SHIFT: u32 = 0;
    pub const TIMESTAMP_SHIFT: u32 = Self::RANDOM_SHIFT + Self::RANDOM_BITS;

    pub const TIMESTAMP_MASK: u128 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const RANDOM_MASK: u128 = (1 << Self::RANDOM_BITS) - 1;

    /// Packs a timestamp (milliseconds since the Unix epoch) and a random
    /// value. Bits outside each field's width are discarded.
    #[must_use]
    pub const fn from_components(timestamp: u128, random: u128) -> Self {
        let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let r = (random & Self::RANDOM_MASK) << Self::RANDOM_SHIFT;
        Self { id: t | r }
    }

    /// Extracts the timestamp from the packed ID.
    #[must_use]
    pub const fn timestamp(&self) -> u128 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the random number from the packed ID.
    #[must_use]
    pub const fn random(&self) -> u128 {
        (self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK
    }

    #[must_use]
    pub const fn max_timestamp() -> u128 {
        Self::TIMESTAMP_MASK
    }

    #[must_use]
    pub const fn max_random() -> u128 {
        Self::RANDOM_MASK
    }

    /// Converts this type into its raw type representation
    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Converts a raw type into this type
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { id: raw }
    }

    /// Returns the big-endian byte representation.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.id.to_be_bytes()
    }

    /// Builds a ULID from its big-endian byte representation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self {
            id: u128::from_be_bytes(bytes),
        }
    }

    pub(crate) const fn has_random_room(&self, step: u128) -> bool {
        self.random() <= Self::max_random() - step
    }

    #[must_use]
    pub(crate) const fn increment_random(&self, step: u128) -> Self {
        Self::from_components(self.timestamp(), self.random() + step)
    }

    /// Generates a monotonic ULID from the calling thread's generator, yielding
    /// to the scheduler in the rare case the random part saturates within one
    /// millisecond.
    ///
    /// See [`ulid_mono`] to pick another [`Backoff`].
    #[must_use]
    pub fn now() -> Self {
        ulid_mono(Backoff::Yield)
    }

    /// Returns a formatter holding the 26-symbol Crockford base32 encoding.
    ///
    /// ```
    /// use kindid::Ulid;
    ///
    /// let id = Ulid::from_raw(2_424_242_424_242_424_242);
    /// assert_eq!(id.encode(), "000000000000023953MG16DJDJ");
    /// ```
    #[must_use]
    pub fn encode(&self) -> UlidFormatter {
        let mut buf = [0; Self::ENCODED_LEN];
        self.encode_to_buf(&mut buf);
        UlidFormatter { buf }
    }

    /// Encodes into a caller-provided buffer without allocating and returns a
    /// view over it.
    pub fn encode_to_buf<'buf>(&self, buf: &'buf mut [u8; Self::ENCODED_LEN]) -> &'buf str {
        encode_base32(&self.to_bytes(), buf);
        // SAFETY: `buf` holds only Crockford base32 symbols, which are ASCII
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Decodes the canonical 26-symbol text form. Lower-case input and the
    /// Crockford aliases (`O`, `I`, `L`) are accepted.
    ///
    /// # Errors
    ///
    /// - [`Base32Error::DecodeInvalidLen`] if the input is not 26 bytes
    /// - [`Base32Error::DecodeInvalidAscii`] if a byte is outside the alphabet
    /// - [`Base32Error::DecodeOverflow`] if the leading symbol is above `7`,
    ///   i.e. the text does not fit in 128 bits
    ///
    /// ```
    /// use kindid::{Base32Error, Ulid};
    ///
    /// let id = Ulid::decode("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
    /// assert_eq!(id.timestamp(), 1_469_922_850_259);
    ///
    /// assert!(matches!(
    ///     Ulid::decode("8ZZZZZZZZZZZZZZZZZZZZZZZZZ"),
    ///     Err(Base32Error::DecodeOverflow { .. })
    /// ));
    /// ```
    pub fn decode(s: impl AsRef<[u8]>) -> Result<Self, Base32Error> {
        let s = s.as_ref();
        if s.len() != Self::ENCODED_LEN {
            return Err(Base32Error::DecodeInvalidLen {
                len: s.len(),
                expected: Self::ENCODED_LEN,
            });
        }
        let raw = decode_base32(s)?;
        // The leading symbol carries 5 bits but only 3 fit in 128 bits.
        if symbol_value(s[0]).is_some_and(|v| v > 7) {
            return Err(Base32Error::DecodeOverflow {
                byte: char::from(s[0]),
            });
        }
        Ok(Self::from_raw(raw))
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode().as_str())
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulid")
            .field("id", &self.encode().as_str())
            .field("timestamp", &self.timestamp())
            .field("random", &self.random())
            .finish()
    }
}

impl FromStr for Ulid {
    type Err = Base32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(id: Ulid) -> Self {
        id.to_bytes()
    }
}

/// An owned, stack-allocated 26-symbol encoding of a [`Ulid`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UlidFormatter {
    buf: [u8; Ulid::ENCODED_LEN],
}

impl UlidFormatter {
    /// Returns a `&str` view of the base32 encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `self.buf` holds only Crockford base32 symbols, which are ASCII
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }

    /// Consumes the formatter and returns the raw buffer.
    #[must_use]
    pub const fn into_inner(self) -> [u8; Ulid::ENCODED_LEN] {
        self.buf
    }
}

impl fmt::Display for UlidFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for UlidFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl AsRef<str> for UlidFormatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for UlidFormatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for UlidFormatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ulid_max() {
        let id = Ulid::from_components(Ulid::max_timestamp(), Ulid::max_random());
        assert_eq!(id.timestamp(), Ulid::max_timestamp());
        assert_eq!(id.random(), Ulid::max_random());

        let encoded = id.encode();
        assert_eq!(encoded, "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
        let decoded = Ulid::decode(encoded.as_str()).unwrap();
        assert_eq!(id, decoded);
    }

    #[test]
    fn ulid_known() {
        let id = Ulid::from_components(1469922850259, 1012768647078601740696923);
        let encoded = id.encode();
        assert_eq!(encoded, "01ARZ3NDEKTSV4RRFFQ69G5FAV");
        let decoded = Ulid::decode(encoded.as_str()).unwrap();
        assert_eq!(decoded.timestamp(), 1469922850259);
        assert_eq!(decoded.random(), 1012768647078601740696923);

        let id = Ulid::from_components(1611559180765, 885339478614498720052741);
        assert_eq!(id.encode(), "01EWW6K6EXQDX5JV0E9CAHPXG5");
        assert_eq!(Ulid::decode("01EWW6K6EXQDX5JV0E9CAHPXG5").unwrap(), id);
    }

    #[test]
    fn ulid_zero() {
        let id = Ulid::from_components(0, 0);
        assert_eq!(id.encode(), "00000000000000000000000000");
        assert_eq!(Ulid::decode("00000000000000000000000000").unwrap(), id);
    }

    #[test]
    fn bytes_are_big_endian() {
        let id = Ulid::decode("01JBRQS1J5A085FYY2M7ZXWG00").unwrap();
        assert_eq!(
            id.to_bytes(),
            [1, 146, 241, 124, 134, 69, 80, 16, 87, 251, 194, 161, 255, 222, 64, 0]
        );
        assert_eq!(Ulid::from_bytes(id.to_bytes()), id);
        assert_eq!(id.timestamp(), 0x0192_F17C_8645);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            Ulid::decode("0"),
            Err(Base32Error::DecodeInvalidLen {
                len: 1,
                expected: 26
            })
        );
        assert!(Ulid::decode("01JBRQS1J5A085FYY2M7ZXWG000").is_err());
    }

    #[test]
    fn decode_rejects_overflow() {
        assert_eq!(
            Ulid::decode("ZZZZZZZZZZZZZZZZZZZZZZZZZZ"),
            Err(Base32Error::DecodeOverflow { byte: 'Z' })
        );
    }

    #[test]
    fn decode_accepts_alias_in_leading_position() {
        assert_eq!(
            Ulid::decode("O1ARZ3NDEKTSV4RRFFQ69G5FAV"),
            Ulid::decode("01ARZ3NDEKTSV4RRFFQ69G5FAV")
        );
    }

    #[test]
    fn decode_is_case_insensitive() {
        let upper = Ulid::decode("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        let lower: Ulid = "01arz3ndektsv4rrffq69g5fav".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower.to_string(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }
}

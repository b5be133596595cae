/// Errors produced while decoding Crockford base32 text into a [`Ulid`].
///
/// These are the primitive's own errors. [`crate::Error`] surfaces them
/// unchanged when decoding text, and wraps them with context on the
/// [`crate::KindId::from_ulid`] path.
///
/// [`Ulid`]: crate::Ulid
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base32Error {
    /// The input does not have the fixed encoded length.
    #[error("invalid length: expected {expected}, got {len}")]
    DecodeInvalidLen {
        /// Length of the rejected input.
        len: usize,
        /// Length required by the encoding.
        expected: usize,
    },

    /// The input contains a byte outside the Crockford alphabet.
    #[error("invalid ascii byte {byte:#04x} at index {index}")]
    DecodeInvalidAscii {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// The first symbol sets bits above the 128-bit range.
    #[error("decode overflow: leading symbol {byte:?} exceeds '7'")]
    DecodeOverflow {
        /// The leading symbol as written in the input.
        byte: char,
    },
}

use crate::Base32Error;

/// A result type defaulting to this crate's [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors produced by [`crate::KindId`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The destination buffer of [`crate::KindId::marshal_text_to`] does not
    /// have exactly the encoded length. Nothing was written.
    #[error("bad buffer size when marshaling: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Text carried neither this kind's `<short_ident>_` prefix nor the
    /// length of an unprefixed 26-symbol ULID.
    #[error("no prefix")]
    MissingPrefix,

    /// The value decoded cleanly but its last two bytes belong to another
    /// kind.
    #[error("invalid ulid suffix: expected {expected:#06x}, got {actual:#06x}")]
    InvalidSuffix { expected: u16, actual: u16 },

    /// A binary value was not 16 bytes long.
    #[error("invalid byte length: expected 16, got {len}")]
    InvalidByteLength { len: usize },

    /// [`crate::KindId::from_ulid`] could not parse its input.
    #[error("failed to parse ulid: {0}")]
    FromUlid(#[source] Base32Error),

    /// The base32 body of a text form is malformed.
    #[error(transparent)]
    Decode(#[from] Base32Error),
}

impl Error {
    /// The primitive decoding error underneath, if any.
    #[must_use]
    pub const fn base32(&self) -> Option<&Base32Error> {
        match self {
            Self::FromUlid(err) | Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

//! Kind-aware text and suffix routines over raw 16-byte values.
//!
//! [`crate::KindId`] is a typed wrapper around these; they take the kind as a
//! [`Descriptor`] so the same code serves kinds only known at runtime.

use crate::{ALPHABET, Base32Error, Descriptor, Error, Result, Ulid, base32::encode_base32};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Number of base32 symbols after the prefix in the short form.
///
/// The 26-symbol ULID form minus the two symbols that carry nothing but
/// suffix bits. The last body symbol still covers the high 6 bits of byte 14.
pub const BODY_LEN: usize = Ulid::ENCODED_LEN - 2;

/// Exact length of the short form for `kind`.
#[must_use]
pub const fn encoded_len(kind: &Descriptor<'_>) -> usize {
    kind.prefix_len() + BODY_LEN
}

/// Overwrites bytes 14 and 15 with the kind's tag.
pub const fn stamp(kind: &Descriptor<'_>, bytes: &mut [u8; 16]) {
    let [hi, lo] = kind.suffix();
    bytes[14] = hi;
    bytes[15] = lo;
}

/// Checks that bytes 14 and 15 carry the kind's tag.
///
/// # Errors
///
/// [`Error::InvalidSuffix`] when they do not.
pub fn check_suffix(kind: &Descriptor<'_>, bytes: &[u8; 16]) -> Result<()> {
    let actual = u16::from_be_bytes([bytes[14], bytes[15]]);
    if actual == kind.number {
        Ok(())
    } else {
        #[cfg(feature = "tracing")]
        tracing::trace!(kind = kind.ident, expected = kind.number, actual, "suffix mismatch");
        Err(Error::InvalidSuffix {
            expected: kind.number,
            actual,
        })
    }
}

/// Writes the short form `<short_ident>_<24 symbols>` of `bytes` into `dst`.
///
/// # Errors
///
/// [`Error::BufferSize`] unless `dst.len() == encoded_len(kind)`; `dst` is
/// left untouched in that case.
pub fn encode_to(kind: &Descriptor<'_>, bytes: &[u8; 16], dst: &mut [u8]) -> Result<()> {
    let expected = encoded_len(kind);
    if dst.len() != expected {
        return Err(Error::BufferSize {
            expected,
            actual: dst.len(),
        });
    }

    let (prefix, body) = dst.split_at_mut(kind.prefix_len());
    let (ident, separator) = prefix.split_at_mut(kind.short_ident.len());
    ident.copy_from_slice(kind.short_ident.as_bytes());
    separator[0] = Descriptor::SEPARATOR;

    let mut body_buf = [0; BODY_LEN];
    encode_body(bytes, &mut body_buf);
    body.copy_from_slice(&body_buf);
    Ok(())
}

/// Encodes the first 24 symbols of the ULID text form of `bytes`: bytes 0-13
/// and the high 6 bits of byte 14.
pub fn encode_body(bytes: &[u8; 16], body: &mut [u8; BODY_LEN]) {
    let mut full = [0; Ulid::ENCODED_LEN];
    encode_base32(bytes, &mut full);
    body.copy_from_slice(&full[..BODY_LEN]);
}

/// The two trailing ULID symbols implied by a kind's suffix: the low 2 bits
/// of byte 14 followed by byte 15.
#[must_use]
pub const fn suffix_symbols(kind: &Descriptor<'_>) -> [u8; 2] {
    let [hi, lo] = kind.suffix();
    [
        ALPHABET[(((hi & 0x03) << 3) | (lo >> 5)) as usize],
        ALPHABET[(lo & 0x1F) as usize],
    ]
}

/// Decodes either text form of an ID of `kind`.
///
/// - `<short_ident>_` + 24 symbols: the trailing symbols are re-derived from
///   the suffix before the full value is decoded
/// - 26 symbols without prefix: decoded as a plain ULID
/// - anything else: [`Error::MissingPrefix`]
///
/// Either way the decoded suffix must match the kind.
///
/// # Errors
///
/// - [`Error::MissingPrefix`] as above
/// - [`Error::Decode`] for a malformed body (wrong length, bad symbol,
///   overflow)
/// - [`Error::InvalidSuffix`] when the value belongs to another kind
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip_all, fields(kind = kind.ident, len = input.len()))
)]
pub fn decode(kind: &Descriptor<'_>, input: &[u8]) -> Result<[u8; 16]> {
    let ulid = if let Some(body) = strip_prefix(kind, input) {
        if body.len() != BODY_LEN {
            return Err(Error::Decode(Base32Error::DecodeInvalidLen {
                len: body.len(),
                expected: BODY_LEN,
            }));
        }
        let mut full = [0; Ulid::ENCODED_LEN];
        full[..BODY_LEN].copy_from_slice(body);
        full[BODY_LEN..].copy_from_slice(&suffix_symbols(kind));
        Ulid::decode(full)?
    } else if input.len() == Ulid::ENCODED_LEN {
        Ulid::decode(input)?
    } else {
        #[cfg(feature = "tracing")]
        tracing::trace!("neither prefixed nor a plain ulid");
        return Err(Error::MissingPrefix);
    };

    let bytes = ulid.to_bytes();
    check_suffix(kind, &bytes)?;
    Ok(bytes)
}

fn strip_prefix<'i>(kind: &Descriptor<'_>, input: &'i [u8]) -> Option<&'i [u8]> {
    let rest = input.strip_prefix(kind.short_ident.as_bytes())?;
    rest.strip_prefix(&[Descriptor::SEPARATOR])
}

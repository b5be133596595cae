pub mod text;
#[cfg(test)]
mod tests;

use crate::{Backoff, Descriptor, Error, Kind, Result, Ulid, ulid_mono};
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

/// A ULID that describes which entity kind it identifies.
///
/// The last two bytes always hold `K::NUMBER` big-endian. Every constructor
/// stamps them and every decoder verifies them, so a `KindId<K>` can never be
/// observed carrying another kind's tag.
///
/// Text comes in two forms:
///
/// - short: `<K::SHORT_IDENT>_` followed by 24 base32 symbols. The suffix is
///   implied by the prefix and not spelled out. This is what [`fmt::Display`]
///   and [`KindId::marshal_text`] produce.
/// - long: the plain 26-symbol ULID, for values exchanged with systems that
///   know nothing about kinds. Accepted on input only.
///
/// ```
/// use kindid::{Kind, KindId};
///
/// enum Test {}
///
/// impl Kind for Test {
///     const NUMBER: u16 = 0xFFFF;
///     const IDENT: &'static str = "test";
///     const SHORT_IDENT: &'static str = "tst";
/// }
///
/// let id = KindId::<Test>::must_from_ulid("01JBRQS1J5A085FYY2M7ZXWG00");
/// assert_eq!(id.to_string(), "tst_01JBRQS1J5A085FYY2M7ZXXZ");
/// assert_eq!(id.as_bytes()[14..], [0xFF, 0xFF]);
///
/// let parsed: KindId<Test> = "tst_01JBRQS1J5A085FYY2M7ZXXZ".parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[repr(transparent)]
pub struct KindId<K: Kind> {
    bytes: [u8; 16],
    _kind: PhantomData<fn() -> K>,
}

impl<K: Kind> KindId<K> {
    /// The kind as a runtime value.
    pub const KIND: Descriptor<'static> = Descriptor::of::<K>();

    /// Exact length of the short text form.
    pub const ENCODED_LEN: usize = text::encoded_len(&Self::KIND);

    const fn stamped(mut bytes: [u8; 16]) -> Self {
        text::stamp(&Self::KIND, &mut bytes);
        Self {
            bytes,
            _kind: PhantomData,
        }
    }

    /// Generates a new ID from the thread-local monotonic generator.
    #[must_use]
    pub fn make() -> Self {
        Self::make_with(Backoff::default())
    }

    /// Like [`KindId::make`], choosing how to wait out monotonic overflow.
    #[must_use]
    pub fn make_with(backoff: Backoff) -> Self {
        Self::from_ulid_value(ulid_mono(backoff))
    }

    /// Stamps this kind onto an existing ULID, replacing its last two bytes.
    #[must_use]
    pub const fn from_ulid_value(ulid: Ulid) -> Self {
        Self::stamped(ulid.to_bytes())
    }

    /// Parses `s` as a plain 26-symbol ULID and stamps this kind onto it. The
    /// input's own last two bytes are discarded.
    ///
    /// # Errors
    ///
    /// [`Error::FromUlid`] wrapping the ULID decoding error.
    pub fn from_ulid(s: impl AsRef<str>) -> Result<Self> {
        let ulid = Ulid::decode(s.as_ref()).map_err(Error::FromUlid)?;
        Ok(Self::from_ulid_value(ulid))
    }

    /// Like [`KindId::from_ulid`] for inputs that cannot be wrong, such as
    /// literals in source code.
    ///
    /// # Panics
    ///
    /// If `s` is not a valid ULID; the message carries the parse error.
    #[must_use]
    #[track_caller]
    pub fn must_from_ulid(s: impl AsRef<str>) -> Self {
        match Self::from_ulid(s) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Adopts 16 bytes read from storage.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSuffix`] if the bytes are tagged for another kind.
    pub fn from_bytes(bytes: [u8; 16]) -> Result<Self> {
        text::check_suffix(&Self::KIND, &bytes)?;
        Ok(Self {
            bytes,
            _kind: PhantomData,
        })
    }

    /// Parses either text form.
    ///
    /// # Errors
    ///
    /// See [`KindId::unmarshal_text`].
    pub fn parse(s: impl AsRef<[u8]>) -> Result<Self> {
        text::decode(&Self::KIND, s.as_ref()).map(|bytes| Self {
            bytes,
            _kind: PhantomData,
        })
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.bytes
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.bytes
    }

    /// The underlying ULID, suffix included.
    #[must_use]
    pub const fn ulid(&self) -> Ulid {
        Ulid::from_bytes(self.bytes)
    }

    /// Milliseconds since the Unix epoch at generation time.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        let b = &self.bytes;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    #[must_use]
    pub const fn kind(&self) -> Descriptor<'static> {
        Self::KIND
    }

    /// Length of `<short_ident>_`.
    #[must_use]
    pub const fn prefix_len() -> usize {
        Self::KIND.prefix_len()
    }

    /// Exact length of the short text form.
    #[must_use]
    pub const fn encoded_len() -> usize {
        Self::ENCODED_LEN
    }

    /// Writes the short text form into `dst` without allocating.
    ///
    /// # Errors
    ///
    /// [`Error::BufferSize`] unless `dst` is exactly
    /// [`KindId::encoded_len`] bytes long. Nothing is written then.
    pub fn marshal_text_to(&self, dst: &mut [u8]) -> Result<()> {
        text::encode_to(&Self::KIND, &self.bytes, dst)
    }

    /// Returns the short text form as bytes.
    ///
    /// # Errors
    ///
    /// Never in practice: the buffer is sized by [`KindId::encoded_len`].
    pub fn marshal_text(&self) -> Result<Vec<u8>> {
        let mut dst = vec![0; Self::ENCODED_LEN];
        self.marshal_text_to(&mut dst)?;
        Ok(dst)
    }

    /// Decodes either text form into `self`.
    ///
    /// - `<short_ident>_` + 24 symbols
    /// - 26 symbols, no prefix, last two bytes equal to this kind's tag
    ///
    /// On error `self` is left as it was.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingPrefix`] for input that is neither form
    /// - [`Error::Decode`] for a malformed base32 body
    /// - [`Error::InvalidSuffix`] for a value of another kind
    pub fn unmarshal_text(&mut self, text: &[u8]) -> Result<()> {
        self.bytes = text::decode(&Self::KIND, text)?;
        Ok(())
    }
}

impl<K: Kind> Default for KindId<K> {
    /// The nil ULID carrying this kind's suffix.
    fn default() -> Self {
        Self::stamped([0; 16])
    }
}

impl<K: Kind> Clone for KindId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Kind> Copy for KindId<K> {}

impl<K: Kind> PartialEq for KindId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<K: Kind> Eq for KindId<K> {}

impl<K: Kind> PartialOrd for KindId<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Kind> Ord for KindId<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl<K: Kind> Hash for KindId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<K: Kind> fmt::Display for KindId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut body = [0; text::BODY_LEN];
        text::encode_body(&self.bytes, &mut body);
        f.write_str(K::SHORT_IDENT)?;
        f.write_str("_")?;
        // SAFETY: `body` holds only Crockford base32 symbols, which are ASCII
        f.write_str(unsafe { core::str::from_utf8_unchecked(&body) })
    }
}

impl<K: Kind> fmt::Debug for KindId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KindId")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl<K: Kind> FromStr for KindId<K> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<K: Kind> TryFrom<&[u8]> for KindId<K> {
    type Error = Error;

    /// Interprets `value` as the 16-byte binary form.
    fn try_from(value: &[u8]) -> Result<Self> {
        let bytes: [u8; 16] = value
            .try_into()
            .map_err(|_| Error::InvalidByteLength { len: value.len() })?;
        Self::from_bytes(bytes)
    }
}

impl<K: Kind> From<Ulid> for KindId<K> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid_value(ulid)
    }
}

impl<K: Kind> From<KindId<K>> for Ulid {
    fn from(id: KindId<K>) -> Self {
        id.ulid()
    }
}

impl<K: Kind> From<KindId<K>> for [u8; 16] {
    fn from(id: KindId<K>) -> Self {
        id.bytes
    }
}

impl<K: Kind> AsRef<[u8]> for KindId<K> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

use core::fmt;

/// Describes an entity kind: the type parameter of [`crate::KindId`].
///
/// Implementations are zero-sized markers; everything the codec needs is an
/// associated constant, so a `KindId<K>` carries no state besides its bytes.
///
/// ```
/// use kindid::Kind;
///
/// pub enum Invoice {}
///
/// impl Kind for Invoice {
///     const NUMBER: u16 = 0x0102;
///     const IDENT: &'static str = "invoice";
///     const SHORT_IDENT: &'static str = "inv";
/// }
/// ```
///
/// `NUMBER` is expected to be unique per application. Nothing checks this:
/// two kinds sharing a number produce interchangeable binary values.
pub trait Kind {
    /// Tag stored big-endian in bytes 14 and 15 of every ID of this kind.
    const NUMBER: u16;

    /// Full name, used for SQL object names (`<IDENT>_id`).
    const IDENT: &'static str;

    /// Text prefix of the short form (`<SHORT_IDENT>_...`).
    const SHORT_IDENT: &'static str;
}

/// A kind as a runtime value.
///
/// Every [`Kind`] has one ([`Descriptor::of`]); tools that learn a kind at
/// runtime (e.g. from configuration) build one directly and use the same
/// codec and SQL routines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor<'a> {
    pub number: u16,
    pub ident: &'a str,
    pub short_ident: &'a str,
}

impl<'a> Descriptor<'a> {
    /// Separator between the short ident and the encoded body.
    pub const SEPARATOR: u8 = b'_';

    #[must_use]
    pub const fn new(number: u16, ident: &'a str, short_ident: &'a str) -> Self {
        Self {
            number,
            ident,
            short_ident,
        }
    }

    /// The big-endian suffix every ID of this kind ends with.
    #[must_use]
    pub const fn suffix(&self) -> [u8; 2] {
        self.number.to_be_bytes()
    }

    /// Length of `<short_ident>_`.
    #[must_use]
    pub const fn prefix_len(&self) -> usize {
        self.short_ident.len() + 1
    }
}

impl Descriptor<'static> {
    #[must_use]
    pub const fn of<K: Kind + ?Sized>() -> Self {
        Self::new(K::NUMBER, K::IDENT, K::SHORT_IDENT)
    }
}

impl fmt::Display for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}_, {:#06x})",
            self.ident, self.short_ident, self.number
        )
    }
}

//! Serde support.
//!
//! [`KindId`] serializes as its short text form and deserializes from either
//! text form. For binary formats or columns that store the raw value, use
//! [`as_bytes`] with `#[serde(with = "kindid::serde::as_bytes")]`.

use crate::{Kind, KindId};
use core::{fmt, marker::PhantomData};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

impl<K: Kind> Serialize for KindId<K> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de, K: Kind> Deserialize<'de> for KindId<K> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct TextVisitor<K>(PhantomData<fn() -> K>);

        impl<K: Kind> Visitor<'_> for TextVisitor<K> {
            type Value = KindId<K>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    f,
                    "a `{}_`-prefixed or plain ULID string",
                    K::SHORT_IDENT
                )
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                KindId::parse(v).map_err(E::custom)
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                KindId::parse(v).map_err(E::custom)
            }
        }

        d.deserialize_str(TextVisitor(PhantomData))
    }
}

/// Serializes the 16 raw bytes; deserializing checks the suffix.
pub mod as_bytes {
    use super::*;

    pub fn serialize<K, S>(id: &KindId<K>, s: S) -> Result<S::Ok, S::Error>
    where
        K: Kind,
        S: Serializer,
    {
        s.serialize_bytes(id.as_bytes())
    }

    pub fn deserialize<'de, K, D>(d: D) -> Result<KindId<K>, D::Error>
    where
        K: Kind,
        D: Deserializer<'de>,
    {
        struct BytesVisitor<K>(PhantomData<fn() -> K>);

        impl<'de, K: Kind> Visitor<'de> for BytesVisitor<K> {
            type Value = KindId<K>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("16 bytes")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                KindId::try_from(v).map_err(E::custom)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut bytes = [0u8; 16];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(de::Error::invalid_length(17, &self));
                }
                KindId::from_bytes(bytes).map_err(de::Error::custom)
            }
        }

        d.deserialize_bytes(BytesVisitor(PhantomData))
    }
}

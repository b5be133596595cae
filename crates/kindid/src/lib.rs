//! Self-describing ULIDs.
//!
//! A [`KindId<K>`] is a regular 128-bit ULID whose last two bytes are replaced
//! by a 16-bit tag naming the entity kind `K`. The tag makes raw values
//! recognizable anywhere they travel (logs, dumps, foreign keys), and lets
//! the text form drop those bytes in favor of a readable prefix:
//!
//! ```text
//! short: tst_01JBRQS1J5A085FYY2M7ZXXZ     <- prefix + 24 symbols
//! long:  01JBRQS1J5A085FYY2M7ZXXZZZ       <- plain 26-symbol ULID
//! bytes: 01 92 f1 7c 86 45 | 50 10 57 fb c2 a1 ff de | ff ff
//!        timestamp (ms)    | entropy                 | kind tag
//! ```
//!
//! [`sql::domain_sql`] renders a PostgreSQL domain enforcing the same tag in
//! the database.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`KindId`], plus byte-level
//!   helpers in `kindid::serde`
//! - `tracing`: trace-level spans and events on generation and decoding

mod base32;
mod error;
mod id;
mod kind;
#[cfg(feature = "serde")]
pub mod serde;
pub mod sql;
mod ulid;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::id::*;
pub use crate::kind::*;
pub use crate::ulid::*;

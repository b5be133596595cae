mod crockford;
mod error;

pub use crockford::ALPHABET;
pub(crate) use crockford::{decode_base32, encode_base32, symbol_value};
pub use error::*;

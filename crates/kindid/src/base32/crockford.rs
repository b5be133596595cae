use crate::Base32Error;

/// The Crockford base32 alphabet, in symbol-value order.
///
/// Only the alphabet is exported; encoding and decoding go through [`crate::Ulid`]
/// and [`crate::KindId`].
///
/// ```compile_fail
/// use kindid::encode_base32;
/// ```
///
/// ```compile_fail
/// use kindid::decode_base32;
/// ```
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;
const MASK: u16 = 0x1F;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Returns the 5-bit value of an input byte, or `None` if it is not part of
/// the alphabet (aliases included).
#[inline]
#[must_use]
pub(crate) const fn symbol_value(byte: u8) -> Option<u8> {
    match LOOKUP[byte as usize] {
        NO_VALUE => None,
        v => Some(v),
    }
}

/// Encodes `input` as big-endian bits into `buf`, left-padding with zero bits
/// so that `buf.len() * 5 >= input.len() * 8`.
///
/// The caller sizes `buf`; for 16 input bytes that is 26 symbols, of which
/// the first carries only 3 significant bits.
#[inline]
pub(crate) fn encode_base32(input: &[u8], buf: &mut [u8]) {
    let input_bits = input.len() * 8;
    let total_bits = buf.len() * BITS_PER_CHAR;
    debug_assert!(total_bits >= input_bits && total_bits - input_bits < BITS_PER_CHAR);

    let mut bits = total_bits - input_bits;
    let mut acc = 0_u16;
    let mut out = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            buf[out] = ALPHABET[((acc >> bits) & MASK) as usize];
            out += 1;
        }
    }
}

/// Decodes Crockford base32 symbols into a `u128`, most significant symbol
/// first. Bits shifted past the top of the integer are dropped; length and
/// overflow checks belong to the caller.
///
/// # Errors
///
/// Returns [`Base32Error::DecodeInvalidAscii`] for the first byte that is not
/// in the alphabet.
#[inline]
pub(crate) fn decode_base32(encoded: &[u8]) -> Result<u128, Base32Error> {
    let mut acc = 0_u128;
    for (index, &byte) in encoded.iter().enumerate() {
        let val = symbol_value(byte).ok_or(Base32Error::DecodeInvalidAscii { byte, index })?;
        acc = (acc << BITS_PER_CHAR) | u128::from(val);
    }
    Ok(acc)
}

//! Compacted subasset names
//!
//! Source: counterpartycore/lib/util.py (`expand_subasset_longname`)
//! A subasset long name (`PARENT.child`) is packed into a big-endian integer
//! where each character is a base-68 digit, one-indexed into the alphabet.

use crate::decoder::error::{DecodeError, DecodeResult};
use num::{BigUint, Integer, ToPrimitive, Zero};

/// Subasset alphabet; digit `n` maps to `SUBASSET_DIGITS[n - 1]`
pub const SUBASSET_DIGITS: &[u8; 67] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.-_@!";

/// Radix of the packed integer; digit 0 has no symbol
pub const SUBASSET_BASE: u8 = 68;

/// Expand a packed subasset integer into its name
///
/// # Examples
/// ```
/// use counterparty_decoder::codec::subasset_from_int;
/// use num::BigUint;
///
/// assert_eq!(subasset_from_int(BigUint::from(1u8)).unwrap(), "a");
/// assert_eq!(subasset_from_int(BigUint::from(2u8)).unwrap(), "b");
/// ```
pub fn subasset_from_int(mut n: BigUint) -> DecodeResult<String> {
    let base = BigUint::from(SUBASSET_BASE);
    let mut name = Vec::new();

    while !n.is_zero() {
        let (quotient, remainder) = n.div_rem(&base);
        let digit = remainder.to_usize().unwrap_or(0);
        if digit == 0 {
            return Err(DecodeError::InvalidSubassetEncoding(format!(
                "zero digit at position {} from the end",
                name.len()
            )));
        }
        name.push(SUBASSET_DIGITS[digit - 1]);
        n = quotient;
    }

    name.reverse();
    Ok(String::from_utf8_lossy(&name).into_owned())
}

/// Expand a big-endian byte string into a subasset name
pub fn subasset_from_bytes(bytes: &[u8]) -> DecodeResult<String> {
    subasset_from_int(BigUint::from_bytes_be(bytes))
}

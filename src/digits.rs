//! # Digit extraction
//!
//! Operands are written as decimal integers whose digits are the bits of
//! the pattern: `1010` is the pattern `1,0,1,0`, not one thousand and ten.
//! These helpers split such an integer into digits, pad it to a fixed
//! width, and fold digits back into an integer.
//!
//! `to_digits(0)` is the empty list; a zero operand only acquires its
//! digits through [`pad_zeros`].

use crate::bit::{AdderError, Bit};

/// Width of one operand, in bits.
pub const WIDTH: usize = 4;

/// Decimal digits of `n`, most significant first. Zero yields `[]`.
pub fn to_digits(mut n: u64) -> Vec<u64> {
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(n % 10);
        n /= 10;
    }
    digits.reverse();
    digits
}

/// Left-pads `digits` with zeros until it is `total` long.
///
/// A sequence already longer than `total` is an [`AdderError::Overflow`];
/// it is never truncated.
pub fn pad_zeros(total: usize, digits: &[u64]) -> Result<Vec<u64>, AdderError> {
    if digits.len() > total {
        return Err(AdderError::Overflow {
            width: total,
            len: digits.len(),
        });
    }
    let mut out = vec![0; total - digits.len()];
    out.extend_from_slice(digits);
    Ok(out)
}

/// Most decimal digits a `u64` can hold.
pub const MAX_DIGITS: usize = 20;

/// Folds digits back into an integer with `acc * 10 + d`.
///
/// Each element must be 0..=9; a result that does not fit a `u64` is an
/// [`AdderError::Overflow`].
pub fn from_digits(digits: &[u64]) -> Result<u64, AdderError> {
    digits.iter().try_fold(0u64, |acc, &d| {
        if d > 9 {
            return Err(AdderError::InvalidDigit { value: d });
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(d))
            .ok_or(AdderError::Overflow {
                width: MAX_DIGITS,
                len: digits.len(),
            })
    })
}

/// Same fold as [`from_digits`], over bits.
pub fn from_bits(bits: &[Bit]) -> Result<u64, AdderError> {
    let digits: Vec<u64> = bits.iter().map(|b| u64::from(*b)).collect();
    from_digits(&digits)
}

/// The four bits of a decimal-digit pattern, most significant first.
pub fn extract_bits(n: u64) -> Result<[Bit; WIDTH], AdderError> {
    let padded = pad_zeros(WIDTH, &to_digits(n))?;
    let mut bits = [Bit::Zero; WIDTH];
    for (slot, digit) in bits.iter_mut().zip(padded) {
        *slot = Bit::try_from(digit)?;
    }
    Ok(bits)
}

/// The four bits of a true binary value 0..=15, most significant first.
pub fn binary_bits(n: u8) -> Result<[Bit; WIDTH], AdderError> {
    if u32::from(n) >> WIDTH != 0 {
        return Err(AdderError::Overflow {
            width: WIDTH,
            len: (u8::BITS - n.leading_zeros()) as usize,
        });
    }
    let mut bits = [Bit::Zero; WIDTH];
    for (i, slot) in bits.iter_mut().enumerate() {
        *slot = Bit::from_bool((n >> (WIDTH - 1 - i)) & 1 == 1);
    }
    Ok(bits)
}

/// Writes the binary digits of `value` as a decimal-digit pattern: `5` becomes `101`.
///
/// Values needing more than [`MAX_DIGITS`] binary digits have no `u64`
/// pattern and fail with [`AdderError::Overflow`].
pub fn to_pattern(value: u64) -> Result<u64, AdderError> {
    let len = (u64::BITS - value.leading_zeros()) as usize;
    let digits: Vec<u64> = (0..len).rev().map(|i| (value >> i) & 1).collect();
    from_digits(&digits)
}

/// Reads a decimal-digit pattern as a binary number: `101` becomes `5`.
pub fn pattern_value(pattern: u64) -> Result<u64, AdderError> {
    to_digits(pattern).into_iter().try_fold(0, |acc, digit| {
        Bit::try_from(digit).map(|bit| (acc << 1) | u64::from(bit))
    })
}

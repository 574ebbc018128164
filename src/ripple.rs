//! # Ripple-carry adder
//!
//! Four full adders chained from the least to the most significant bit.
//! Each stage's carry feeds the next stage's carry-in; the final carry
//! becomes the fifth, most significant result bit.
//!
//! The primary surface, [`ripple_add`], keeps the decimal-digit
//! convention of the teaching examples: operands such as `1010` and the
//! result `10000` are decimal integers whose digits are bits.
//! [`ripple_add_binary`] runs the same gate chain over true binary values.
//!
//! ## Example
//!
//! ```rust
//! use ripple_adder::ripple::{ripple_add, ripple_add_binary};
//!
//! assert_eq!(ripple_add(1010, 101, 0).unwrap(), 1111);
//! assert_eq!(ripple_add(1111, 1, 0).unwrap(), 10000);
//! assert_eq!(ripple_add_binary(0b1111, 0b0001, 0).unwrap(), 16);
//! ```

use crate::adder::{full_add, AdderResult};
use crate::bit::{AdderError, Bit};
use crate::digits::{binary_bits, extract_bits, from_bits, WIDTH};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How operands and results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// `1010` means the bit pattern 1,0,1,0
    #[default]
    DecimalDigits,
    /// `10` means the value ten
    Binary,
}

impl Encoding {
    pub fn from_str(name: &str) -> Option<Self> {
        match name {
            "decimal" => Some(Encoding::DecimalDigits),
            "binary" => Some(Encoding::Binary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::DecimalDigits => "decimal",
            Encoding::Binary => "binary",
        }
    }
}

/// Everything one ripple evaluation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RippleTrace {
    pub a: [Bit; WIDTH],
    pub b: [Bit; WIDTH],
    pub carry_in: Bit,
    /// Full-adder results, least significant stage first
    pub stages: [AdderResult; WIDTH],
    /// Final carry then sum bits, most significant first
    pub bits: [Bit; WIDTH + 1],
    /// `bits` read as decimal digits (e.g. `10000`)
    pub pattern: u64,
    /// `bits` read as a binary number (e.g. `16`)
    pub value: u8,
}

/// Runs the full-adder chain over two MSB-first bit slices of equal width.
///
/// Returns the stage results least significant first.
pub fn ripple_chain(a: &[Bit], b: &[Bit], carry_in: Bit) -> Vec<AdderResult> {
    debug_assert_eq!(a.len(), b.len());
    let mut carry = carry_in;
    let mut stages = Vec::with_capacity(a.len());
    for (i, (&ai, &bi)) in a.iter().rev().zip(b.iter().rev()).enumerate() {
        let stage = full_add(ai, bi, carry);
        debug!(stage = i, a = %ai, b = %bi, carry_in = %carry, sum = %stage.sum, carry_out = %stage.carry, "full adder");
        carry = stage.carry;
        stages.push(stage);
    }
    stages
}

fn trace_bits(a: [Bit; WIDTH], b: [Bit; WIDTH], carry_in: Bit) -> Result<RippleTrace, AdderError> {
    let chain = ripple_chain(&a, &b, carry_in);
    let stages = [chain[0], chain[1], chain[2], chain[3]];
    let [fa0, fa1, fa2, fa3] = stages;
    let bits = [fa3.carry, fa3.sum, fa2.sum, fa1.sum, fa0.sum];
    let value = bits.iter().fold(0u8, |acc, b| (acc << 1) | b.as_u8());
    Ok(RippleTrace {
        a,
        b,
        carry_in,
        stages,
        bits,
        pattern: from_bits(&bits)?,
        value,
    })
}

/// Adds two decimal-digit patterns and returns the full trace.
pub fn ripple_trace(a: u64, b: u64, carry_in: i64) -> Result<RippleTrace, AdderError> {
    let a_bits = extract_bits(a)?;
    let b_bits = extract_bits(b)?;
    let carry = Bit::try_from(carry_in)?;
    trace_bits(a_bits, b_bits, carry)
}

/// Adds two true binary values 0..=15 and returns the full trace.
pub fn ripple_trace_binary(a: u8, b: u8, carry_in: i64) -> Result<RippleTrace, AdderError> {
    let a_bits = binary_bits(a)?;
    let b_bits = binary_bits(b)?;
    let carry = Bit::try_from(carry_in)?;
    trace_bits(a_bits, b_bits, carry)
}

/// Adds two decimal-digit patterns, e.g. `ripple_add(1010, 0101, 0) == 1111`.
pub fn ripple_add(a: u64, b: u64, carry_in: i64) -> Result<u64, AdderError> {
    ripple_trace(a, b, carry_in).map(|t| t.pattern)
}

/// Adds two binary values 0..=15 through the same gate chain; result is 0..=31.
pub fn ripple_add_binary(a: u8, b: u8, carry_in: i64) -> Result<u8, AdderError> {
    ripple_trace_binary(a, b, carry_in).map(|t| t.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_plus_zero() {
        assert_eq!(ripple_add(0, 0, 0).unwrap(), 0);
        let t = ripple_trace(0, 0, 0).unwrap();
        assert_eq!(t.bits, [Bit::Zero; 5]);
    }

    #[test]
    fn carry_ripples_through_every_stage() {
        let t = ripple_trace(1111, 1, 0).unwrap();
        assert_eq!(t.pattern, 10000);
        assert_eq!(t.value, 16);
        assert!(t.stages.iter().all(|s| s.carry == Bit::One));
        assert!(t.stages.iter().all(|s| s.sum == Bit::Zero));
    }

    #[test]
    fn sample_sums() {
        assert_eq!(ripple_add(1010, 101, 0).unwrap(), 1111);
        assert_eq!(ripple_add(1010, 101, 1).unwrap(), 10000);
        assert_eq!(ripple_add(1111, 1111, 1).unwrap(), 11111);
        assert_eq!(ripple_add(11, 1, 0).unwrap(), 100);
    }

    #[test]
    fn decimal_pattern_agrees_with_binary_value() {
        for a in 0..16u8 {
            for b in 0..16u8 {
                for c in 0..=1i64 {
                    let binary = ripple_trace_binary(a, b, c).unwrap();
                    assert_eq!(u64::from(binary.value), u64::from(a) + u64::from(b) + c as u64);
                    let pa = format!("{a:b}").parse::<u64>().unwrap();
                    let pb = format!("{b:b}").parse::<u64>().unwrap();
                    let decimal = ripple_trace(pa, pb, c).unwrap();
                    assert_eq!(decimal, binary);
                }
            }
        }
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert_eq!(ripple_add(1020, 1, 0), Err(AdderError::InvalidBit { value: 2 }));
        assert_eq!(ripple_add(1, 1, 2), Err(AdderError::InvalidBit { value: 2 }));
        assert_eq!(
            ripple_add(10101, 1, 0),
            Err(AdderError::Overflow { width: 4, len: 5 })
        );
        assert_eq!(
            ripple_add_binary(16, 0, 0),
            Err(AdderError::Overflow { width: 4, len: 5 })
        );
    }

    #[test]
    fn encoding_names() {
        assert_eq!(Encoding::from_str("binary"), Some(Encoding::Binary));
        assert_eq!(Encoding::from_str("hex"), None);
        assert_eq!(Encoding::default().as_str(), "decimal");
    }
}

//! # Half and full adders
//!
//! Both adders are built from the gate primitives only. The full adder is
//! the canonical two-half-adder composition: `b + carry_in` first, then
//! `a + s1`, with the two partial carries joined by an OR gate. The
//! netlist builder in [`crate::netlist`] emits the same structure, which
//! lets the two be checked against each other gate for gate.

use crate::bit::{AdderError, Bit};
use crate::gates::xor;
use serde::{Deserialize, Serialize};

/// Sum and carry produced by one adder evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdderResult {
    pub sum: Bit,
    pub carry: Bit,
}

/// Adds two validated bits.
///
/// `carry = a & b`, `sum = (a | b) & !(a & b)`.
pub fn half_add(a: Bit, b: Bit) -> AdderResult {
    AdderResult {
        sum: xor(a, b),
        carry: a & b,
    }
}

/// Adds two validated bits and an incoming carry.
pub fn full_add(a: Bit, b: Bit, carry_in: Bit) -> AdderResult {
    let first = half_add(b, carry_in);
    let second = half_add(a, first.sum);
    AdderResult {
        sum: second.sum,
        carry: first.carry | second.carry,
    }
}

/// Half adder over raw integers; rejects anything that is not 0 or 1.
pub fn half_adder(a: i64, b: i64) -> Result<AdderResult, AdderError> {
    Ok(half_add(Bit::try_from(a)?, Bit::try_from(b)?))
}

/// Full adder over raw integers; rejects anything that is not 0 or 1.
pub fn full_adder(a: i64, b: i64, carry_in: i64) -> Result<AdderResult, AdderError> {
    Ok(full_add(
        Bit::try_from(a)?,
        Bit::try_from(b)?,
        Bit::try_from(carry_in)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_adder_truth_table() {
        // (a, b) -> (sum, carry)
        let rows = [
            ((0, 0), (0, 0)),
            ((0, 1), (1, 0)),
            ((1, 0), (1, 0)),
            ((1, 1), (0, 1)),
        ];
        for ((a, b), (sum, carry)) in rows {
            let r = half_adder(a, b).unwrap();
            assert_eq!((r.sum.as_u8(), r.carry.as_u8()), (sum, carry), "half_adder({a},{b})");
        }
    }

    #[test]
    fn full_adder_is_xor_and_majority() {
        for a in 0..=1i64 {
            for b in 0..=1i64 {
                for c in 0..=1i64 {
                    let r = full_adder(a, b, c).unwrap();
                    let total = a + b + c;
                    assert_eq!(i64::from(r.sum), total % 2, "sum of ({a},{b},{c})");
                    assert_eq!(i64::from(r.carry), i64::from(total >= 2), "carry of ({a},{b},{c})");
                }
            }
        }
    }

    #[test]
    fn full_adder_matches_majority_helper() {
        use Bit::{One, Zero};
        for a in [Zero, One] {
            for b in [Zero, One] {
                for c in [Zero, One] {
                    assert_eq!(full_add(a, b, c).carry, Bit::majority(a, b, c));
                }
            }
        }
    }

    #[test]
    fn raw_adders_reject_bad_bits() {
        assert_eq!(half_adder(2, 0), Err(AdderError::InvalidBit { value: 2 }));
        assert_eq!(full_adder(0, 1, -1), Err(AdderError::InvalidBit { value: -1 }));
        assert_eq!(full_adder(0, 9, 1), Err(AdderError::InvalidBit { value: 9 }));
    }
}

//! Gate primitives over raw integers.
//!
//! Every input is validated before the gate fires, so a value outside
//! {0, 1} surfaces as [`AdderError::InvalidBit`] instead of flowing into
//! later gates.

use crate::bit::{AdderError, Bit};

pub fn and(a: i64, b: i64) -> Result<Bit, AdderError> {
    Ok(Bit::try_from(a)? & Bit::try_from(b)?)
}

pub fn or(a: i64, b: i64) -> Result<Bit, AdderError> {
    Ok(Bit::try_from(a)? | Bit::try_from(b)?)
}

/// NOT gate: 0 becomes 1, 1 becomes 0, anything else is rejected.
pub fn invert(a: i64) -> Result<Bit, AdderError> {
    Ok(!Bit::try_from(a)?)
}

/// XOR written with AND, OR and NOT only: `(a | b) & !(a & b)`.
pub fn xor(a: Bit, b: Bit) -> Bit {
    (a | b) & !(a & b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_or_truth_tables() {
        let rows = [(0, 0, 0, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 1)];
        for (a, b, want_and, want_or) in rows {
            assert_eq!(and(a, b).unwrap().as_u8(), want_and, "and({a},{b})");
            assert_eq!(or(a, b).unwrap().as_u8(), want_or, "or({a},{b})");
        }
    }

    #[test]
    fn invert_flips() {
        assert_eq!(invert(0), Ok(Bit::One));
        assert_eq!(invert(1), Ok(Bit::Zero));
    }

    #[test]
    fn invert_rejects_out_of_range() {
        assert_eq!(invert(2), Err(AdderError::InvalidBit { value: 2 }));
        assert_eq!(invert(-1), Err(AdderError::InvalidBit { value: -1 }));
    }

    #[test]
    fn binary_gates_reject_either_side() {
        assert_eq!(and(1, 7), Err(AdderError::InvalidBit { value: 7 }));
        assert_eq!(and(-3, 1), Err(AdderError::InvalidBit { value: -3 }));
        assert_eq!(or(0, 2), Err(AdderError::InvalidBit { value: 2 }));
        assert_eq!(or(5, 0), Err(AdderError::InvalidBit { value: 5 }));
    }

    #[test]
    fn xor_from_and_or_not() {
        use Bit::{One, Zero};
        assert_eq!(xor(Zero, Zero), Zero);
        assert_eq!(xor(Zero, One), One);
        assert_eq!(xor(One, Zero), One);
        assert_eq!(xor(One, One), Zero);
    }
}

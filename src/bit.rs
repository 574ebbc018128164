//! # Bit — the value every gate works on
//!
//! A [`Bit`] is either `0` or `1`. Raw integers only become bits through
//! [`Bit::try_from`], which rejects everything else with
//! [`AdderError::InvalidBit`]. Once validated, bits compose with the
//! ordinary `&`, `|` and `!` operators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use thiserror::Error;

/// A single binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Bit {
    Zero,
    One,
}

/// Errors raised by the gates, the digit helpers and the ripple chain.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdderError {
    /// A gate or digit received a value outside {0, 1}
    #[error("invalid bit: {value} is not 0 or 1")]
    InvalidBit { value: i128 },
    /// A digit slot held something other than 0..=9
    #[error("invalid digit: {value} is not 0..=9")]
    InvalidDigit { value: u64 },
    /// A digit sequence is wider than the slot it must fit into
    #[error("overflow: {len} digits do not fit in width {width}")]
    Overflow { width: usize, len: usize },
}

impl Bit {
    pub const fn from_bool(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    pub const fn as_bool(self) -> bool {
        matches!(self, Bit::One)
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// `1` if at least two of the three inputs are set.
    pub fn majority(a: Bit, b: Bit, c: Bit) -> Bit {
        (a & b) | (a & c) | (b & c)
    }
}

impl TryFrom<i64> for Bit {
    type Error = AdderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            _ => Err(AdderError::InvalidBit {
                value: i128::from(value),
            }),
        }
    }
}

impl TryFrom<u64> for Bit {
    type Error = AdderError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            _ => Err(AdderError::InvalidBit {
                value: i128::from(value),
            }),
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        Bit::from_bool(b)
    }
}

impl From<Bit> for u8 {
    fn from(b: Bit) -> Self {
        b.as_u8()
    }
}

impl From<Bit> for u64 {
    fn from(b: Bit) -> Self {
        u64::from(b.as_u8())
    }
}

impl From<Bit> for i64 {
    fn from(b: Bit) -> Self {
        i64::from(b.as_u8())
    }
}

impl BitAnd for Bit {
    type Output = Bit;
    fn bitand(self, rhs: Bit) -> Bit {
        Bit::from_bool(self.as_bool() && rhs.as_bool())
    }
}

impl BitOr for Bit {
    type Output = Bit;
    fn bitor(self, rhs: Bit) -> Bit {
        Bit::from_bool(self.as_bool() || rhs.as_bool())
    }
}

impl Not for Bit {
    type Output = Bit;
    fn not(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_accepts_only_zero_and_one() {
        assert_eq!(Bit::try_from(0i64), Ok(Bit::Zero));
        assert_eq!(Bit::try_from(1i64), Ok(Bit::One));
        assert_eq!(Bit::try_from(2i64), Err(AdderError::InvalidBit { value: 2 }));
        assert_eq!(Bit::try_from(-1i64), Err(AdderError::InvalidBit { value: -1 }));
        assert_eq!(
            Bit::try_from(u64::MAX),
            Err(AdderError::InvalidBit {
                value: i128::from(u64::MAX)
            })
        );
    }

    #[test]
    fn majority_needs_two() {
        use Bit::{One, Zero};
        assert_eq!(Bit::majority(Zero, Zero, One), Zero);
        assert_eq!(Bit::majority(One, Zero, One), One);
        assert_eq!(Bit::majority(One, One, One), One);
    }

    #[test]
    fn serde_uses_plain_integers() {
        let json = serde_json::to_string(&[Bit::One, Bit::Zero]).unwrap();
        assert_eq!(json, "[1,0]");
        let back: Vec<Bit> = serde_json::from_str("[0,1]").unwrap();
        assert_eq!(back, vec![Bit::Zero, Bit::One]);
        assert!(serde_json::from_str::<Bit>("3").is_err());
    }
}

//! # Equivalence checks
//!
//! Three independent renderings of the adder have to agree: the gate
//! netlist from [`crate::netlist`], the functional chain from
//! [`crate::ripple`], and plain integer addition.
//!
//! - [`exhaustive`] walks every `(a, b, carry_in)` for a given width,
//!   fanned out over Rayon.
//! - [`sample`] draws operands from a seeded ChaCha20 stream and pushes
//!   them through the decimal-digit surface; the same seed always yields
//!   the same cases and the same digest.

use crate::adder::{full_add, half_add};
use crate::bit::Bit;
use crate::digits::{pattern_value, to_pattern};
use crate::netlist::{Circuit, CircuitHash};
use crate::ripple::{ripple_add, ripple_chain};
use anyhow::{ensure, Result};
use blake3::Hasher;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Widest adder [`exhaustive`] will enumerate.
pub const MAX_EXHAUSTIVE_WIDTH: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub a: u64,
    pub b: u64,
    pub carry_in: u64,
    pub expected: u64,
    pub netlist: u64,
    pub functional: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub width: usize,
    pub cases: u64,
    pub gates: usize,
    pub depth: usize,
    pub circuit_hash: CircuitHash,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthRow {
    pub inputs: Vec<Bit>,
    pub sum: Bit,
    pub carry: Bit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReport {
    pub seed: u64,
    pub count: usize,
    pub failures: usize,
    /// Hex BLAKE3 over every `(a, b, carry_in, result)` in draw order
    pub digest: String,
}

fn bits_msb_first(value: u64, width: usize) -> impl Iterator<Item = Bit> {
    (0..width).rev().map(move |i| Bit::from_bool((value >> i) & 1 == 1))
}

fn bits_to_value(bits: &[Bit]) -> u64 {
    bits.iter().fold(0, |acc, b| (acc << 1) | u64::from(*b))
}

fn check_case(circuit: &Circuit, width: usize, a: u64, b: u64, c: u64) -> Option<Mismatch> {
    let a_bits: Vec<Bit> = bits_msb_first(a, width).collect();
    let b_bits: Vec<Bit> = bits_msb_first(b, width).collect();
    let carry_in = Bit::from_bool(c == 1);

    let mut inputs = Vec::with_capacity(2 * width + 1);
    inputs.extend_from_slice(&a_bits);
    inputs.extend_from_slice(&b_bits);
    inputs.push(carry_in);
    // a wrong-sized input is a mismatch too; report it as all-ones
    let netlist = circuit
        .eval(&inputs)
        .map(|out| bits_to_value(&out))
        .unwrap_or(u64::MAX);

    let stages = ripple_chain(&a_bits, &b_bits, carry_in);
    let mut out = Vec::with_capacity(width + 1);
    out.push(stages.last().map(|s| s.carry).unwrap_or(carry_in));
    out.extend(stages.iter().rev().map(|s| s.sum));
    let functional = bits_to_value(&out);

    let expected = a + b + c;
    if netlist == expected && functional == expected {
        return None;
    }
    Some(Mismatch {
        a,
        b,
        carry_in: c,
        expected,
        netlist,
        functional,
    })
}

/// Checks the `width`-bit netlist and functional chain against integer
/// addition for every input combination.
pub fn exhaustive(width: usize) -> Result<VerifyReport> {
    ensure!(
        (1..=MAX_EXHAUSTIVE_WIDTH).contains(&width),
        "width must be between 1 and {}, got {}",
        MAX_EXHAUSTIVE_WIDTH,
        width
    );
    let circuit = Circuit::ripple_carry(width);
    let span = 1u64 << width;
    let cases = span * span * 2;
    debug!(width, cases, gates = circuit.gates.len(), "exhaustive check");

    let mut mismatches: Vec<Mismatch> = (0..cases)
        .into_par_iter()
        .filter_map(|idx| {
            let c = idx & 1;
            let b = (idx >> 1) % span;
            let a = (idx >> 1) / span;
            check_case(&circuit, width, a, b, c)
        })
        .collect();
    mismatches.sort_by_key(|m| (m.a, m.b, m.carry_in));
    if !mismatches.is_empty() {
        warn!(width, count = mismatches.len(), "netlist disagrees with arithmetic");
    }

    Ok(VerifyReport {
        width,
        cases,
        gates: circuit.gates.len(),
        depth: circuit.depth(),
        circuit_hash: circuit.hash(),
        mismatches,
    })
}

pub fn half_adder_table() -> Vec<TruthRow> {
    let mut rows = Vec::with_capacity(4);
    for a in [Bit::Zero, Bit::One] {
        for b in [Bit::Zero, Bit::One] {
            let r = half_add(a, b);
            rows.push(TruthRow {
                inputs: vec![a, b],
                sum: r.sum,
                carry: r.carry,
            });
        }
    }
    rows
}

pub fn full_adder_table() -> Vec<TruthRow> {
    let mut rows = Vec::with_capacity(8);
    for a in [Bit::Zero, Bit::One] {
        for b in [Bit::Zero, Bit::One] {
            for c in [Bit::Zero, Bit::One] {
                let r = full_add(a, b, c);
                rows.push(TruthRow {
                    inputs: vec![a, b, c],
                    sum: r.sum,
                    carry: r.carry,
                });
            }
        }
    }
    rows
}

/// Runs `count` seeded random additions through [`ripple_add`].
pub fn sample(seed: u64, count: usize) -> Result<SampleReport> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut hasher = Hasher::new();
    let mut failures = 0usize;
    for _ in 0..count {
        let a: u64 = rng.gen_range(0..16);
        let b: u64 = rng.gen_range(0..16);
        let c: u64 = u64::from(rng.gen_bool(0.5));
        let pattern = ripple_add(to_pattern(a)?, to_pattern(b)?, c as i64)?;
        let value = pattern_value(pattern)?;
        if value != a + b + c {
            warn!(a, b, carry_in = c, pattern, "sampled sum is wrong");
            failures += 1;
        }
        for word in [a, b, c, pattern] {
            hasher.update(&word.to_le_bytes());
        }
    }
    Ok(SampleReport {
        seed,
        count,
        failures,
        digest: hex::encode(hasher.finalize().as_bytes()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_bit_adder_is_exhaustively_correct() {
        let report = exhaustive(4).unwrap();
        assert_eq!(report.cases, 512);
        assert_eq!(report.gates, 36);
        assert!(report.is_ok(), "mismatches: {:?}", report.mismatches);
    }

    #[test]
    fn other_widths_hold_too() {
        for width in [1, 2, 6] {
            assert!(exhaustive(width).unwrap().is_ok(), "width {width}");
        }
    }

    #[test]
    fn width_is_bounded() {
        assert!(exhaustive(0).is_err());
        assert!(exhaustive(MAX_EXHAUSTIVE_WIDTH + 1).is_err());
    }

    #[test]
    fn broken_netlist_is_reported() {
        let mut circuit = Circuit::ripple_carry(2);
        // swap the final carry OR for an AND
        let last = circuit.gates.len() - 1;
        if let crate::netlist::GateOp::Or(x, y) = circuit.gates[last].op {
            circuit.gates[last].op = crate::netlist::GateOp::And(x, y);
        }
        let m = check_case(&circuit, 2, 3, 1, 0).expect("carry should be lost");
        assert_eq!(m.expected, 4);
        assert_eq!(m.functional, 4);
        assert_ne!(m.netlist, 4);
    }

    #[test]
    fn truth_tables() {
        let half = half_adder_table();
        assert_eq!(half.len(), 4);
        assert_eq!(half[3].sum, Bit::Zero);
        assert_eq!(half[3].carry, Bit::One);
        let full = full_adder_table();
        assert_eq!(full.len(), 8);
        for row in &full {
            let ones = row.inputs.iter().filter(|b| **b == Bit::One).count();
            assert_eq!(row.sum, Bit::from_bool(ones % 2 == 1));
            assert_eq!(row.carry, Bit::from_bool(ones >= 2));
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let first = sample(7, 200).unwrap();
        let second = sample(7, 200).unwrap();
        let other = sample(8, 200).unwrap();
        assert_eq!(first.failures, 0);
        assert_eq!(first.digest, second.digest);
        assert_ne!(first.digest, other.digest);
    }
}

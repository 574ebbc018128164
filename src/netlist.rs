//! # Netlist — the adder as an explicit gate DAG
//!
//! The functional adders in [`crate::adder`] and [`crate::ripple`] compute
//! with gate primitives; this module writes the same circuits down as data
//! so they can be printed, stored, hashed and evaluated independently.
//!
//! ## Text format
//!
//! ```text
//! CIRCUIT v0
//! INPUTS n=<N>
//! GATES m=<M>
//! g0 = AND(i0,i1)
//! g1 = OR(i0,i1)
//! g2 = NOT(g0)
//! g3 = AND(g1,g2)
//! OUTPUTS = g3,g0
//! ```
//!
//! Inputs are `i0..iN-1`, gates `g0..gM-1` in evaluation order. A gate may
//! only reference inputs and earlier gates.
//!
//! ## Example
//!
//! ```rust
//! use ripple_adder::{Bit, Circuit};
//!
//! let half = Circuit::half_adder();
//! let out = half.eval(&[Bit::One, Bit::One]).unwrap();
//! assert_eq!(out, vec![Bit::Zero, Bit::One]); // sum, carry
//!
//! let again = Circuit::parse(&half.canonical_text()).unwrap();
//! assert_eq!(half.hash(), again.hash());
//! ```

use crate::bit::Bit;
use anyhow::{Context, Result};
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Hex-encoded BLAKE3 of the circuit's JSON rendering.
///
/// Two circuits with the same inputs, gates and outputs share a hash no
/// matter how their text was laid out.
pub type CircuitHash = String;

#[derive(Serialize)]
struct CircuitAtom<'a> {
    kind: &'static str,
    version: u32,
    inputs: usize,
    gates: &'a [Gate],
    outputs: &'a [Ref],
}

/// A combinational circuit of AND / OR / NOT gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of primary inputs (i0, i1, ..., iN-1)
    pub inputs: usize,
    /// Gates in evaluation order (g0, g1, ..., gM-1)
    pub gates: Vec<Gate>,
    /// Output references, most significant first
    pub outputs: Vec<Ref>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub op: GateOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateOp {
    And(Ref, Ref),
    Or(Ref, Ref),
    Not(Ref),
}

/// Reference to a primary input or to an earlier gate's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ref {
    Input(usize),
    Gate(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("invalid header")]
    InvalidHeader,
    #[error("invalid inputs line")]
    InvalidInputs,
    #[error("invalid gates line")]
    InvalidGates,
    #[error("invalid gate line: {0}")]
    InvalidGate(String),
    #[error("invalid outputs line")]
    InvalidOutputs,
    #[error("reference out of range")]
    RefOutOfRange,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("input length mismatch: expected {expected}, got {got}")]
    InputMismatch { expected: usize, got: usize },
    #[error("gate {gate} references something not yet computed")]
    RefOutOfRange { gate: usize },
}

impl Circuit {
    /// Inputs `[a, b]`, outputs `[sum, carry]`.
    pub fn half_adder() -> Self {
        let mut b = Builder::new(2);
        let (sum, carry) = b.half_adder(Ref::Input(0), Ref::Input(1));
        b.finish(vec![sum, carry])
    }

    /// Inputs `[a, b, carry_in]`, outputs `[sum, carry]`.
    pub fn full_adder() -> Self {
        let mut b = Builder::new(3);
        let (sum, carry) = b.full_adder(Ref::Input(0), Ref::Input(1), Ref::Input(2));
        b.finish(vec![sum, carry])
    }

    /// A `width`-bit ripple-carry adder.
    ///
    /// Inputs are `a` (MSB first), then `b` (MSB first), then the carry-in:
    /// `2 * width + 1` in total. Outputs are the final carry followed by the
    /// sum bits, MSB first: `width + 1` in total.
    pub fn ripple_carry(width: usize) -> Self {
        let mut b = Builder::new(2 * width + 1);
        let mut carry = Ref::Input(2 * width);
        let mut sums = Vec::with_capacity(width);
        for i in (0..width).rev() {
            let (sum, next) = b.full_adder(Ref::Input(i), Ref::Input(width + i), carry);
            sums.push(sum);
            carry = next;
        }
        let mut outputs = Vec::with_capacity(width + 1);
        outputs.push(carry);
        outputs.extend(sums.into_iter().rev());
        b.finish(outputs)
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let normalized: Vec<&str> = text
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        if normalized.len() < 4 || normalized[0] != "CIRCUIT v0" {
            return Err(ParseError::InvalidHeader);
        }
        let inputs = parse_kv_line(normalized[1], "INPUTS", "n=").ok_or(ParseError::InvalidInputs)?;
        let gates_count = parse_kv_line(normalized[2], "GATES", "m=").ok_or(ParseError::InvalidGates)?;
        let body = &normalized[3..];
        // exactly `m` gate lines, then OUTPUTS as the last line
        let outputs_at = body
            .iter()
            .position(|l| l.starts_with("OUTPUTS"))
            .ok_or(ParseError::InvalidOutputs)?;
        if outputs_at != gates_count {
            return Err(ParseError::InvalidGates);
        }
        if outputs_at + 1 != body.len() {
            return Err(ParseError::InvalidOutputs);
        }
        let mut gates = Vec::with_capacity(gates_count);
        for line in &body[..outputs_at] {
            let gate = parse_gate_line(line, gates.len())?;
            validate_gate_refs(&gate.op, inputs, gates.len())?;
            gates.push(gate);
        }
        let outputs = parse_outputs_line(body[outputs_at])?;
        outputs
            .iter()
            .try_for_each(|r| validate_ref(r, inputs, gates.len()))?;
        Ok(Circuit {
            inputs,
            gates,
            outputs,
        })
    }

    pub fn canonical_text(&self) -> String {
        let mut buf = String::new();
        // writing into a String cannot fail
        let _ = writeln!(buf, "CIRCUIT v0");
        let _ = writeln!(buf, "INPUTS n={}", self.inputs);
        let _ = writeln!(buf, "GATES m={}", self.gates.len());
        for (idx, gate) in self.gates.iter().enumerate() {
            let _ = writeln!(buf, "g{} = {}", idx, gate.op.format());
        }
        let _ = writeln!(buf, "OUTPUTS = {}", join_refs(&self.outputs));
        buf
    }

    pub fn hash(&self) -> CircuitHash {
        let atom = CircuitAtom {
            kind: "circuit",
            version: 0,
            inputs: self.inputs,
            gates: &self.gates,
            outputs: &self.outputs,
        };
        let mut hasher = Hasher::new();
        // plain structs and enums always serialize
        if let Ok(bytes) = serde_json::to_vec(&atom) {
            hasher.update(&bytes);
        }
        hex::encode(hasher.finalize().as_bytes())
    }

    pub fn eval(&self, inputs: &[Bit]) -> Result<Vec<Bit>, EvalError> {
        if inputs.len() != self.inputs {
            return Err(EvalError::InputMismatch {
                expected: self.inputs,
                got: inputs.len(),
            });
        }
        let mut values: Vec<Bit> = Vec::with_capacity(self.gates.len());
        for (idx, gate) in self.gates.iter().enumerate() {
            let get = |r: &Ref| resolve_ref(r, inputs, &values).ok_or(EvalError::RefOutOfRange { gate: idx });
            let value = match &gate.op {
                GateOp::And(x, y) => get(x)? & get(y)?,
                GateOp::Or(x, y) => get(x)? | get(y)?,
                GateOp::Not(x) => !get(x)?,
            };
            values.push(value);
        }
        self.outputs
            .iter()
            .map(|r| {
                resolve_ref(r, inputs, &values).ok_or(EvalError::RefOutOfRange {
                    gate: self.gates.len(),
                })
            })
            .collect()
    }

    /// Longest gate path from any input to any output.
    ///
    /// For the ripple-carry adder this grows linearly with the width, as
    /// the carry has to pass through every stage.
    pub fn depth(&self) -> usize {
        fn level(r: &Ref, depths: &[usize]) -> usize {
            match r {
                Ref::Input(_) => 0,
                Ref::Gate(g) => depths.get(*g).copied().unwrap_or(0),
            }
        }

        let mut depths: Vec<usize> = Vec::with_capacity(self.gates.len());
        for gate in &self.gates {
            let d = match &gate.op {
                GateOp::And(x, y) | GateOp::Or(x, y) => level(x, &depths).max(level(y, &depths)),
                GateOp::Not(x) => level(x, &depths),
            };
            depths.push(d + 1);
        }
        self.outputs
            .iter()
            .map(|r| level(r, &depths))
            .max()
            .unwrap_or(0)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.canonical_text())
            .with_context(|| format!("writing circuit to {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading circuit from {}", path.display()))?;
        Ok(Circuit::parse(&text)?)
    }
}

impl GateOp {
    fn format(&self) -> String {
        match self {
            GateOp::And(x, y) => format!("AND({},{})", format_ref(x), format_ref(y)),
            GateOp::Or(x, y) => format!("OR({},{})", format_ref(x), format_ref(y)),
            GateOp::Not(x) => format!("NOT({})", format_ref(x)),
        }
    }
}

struct Builder {
    inputs: usize,
    gates: Vec<Gate>,
}

impl Builder {
    fn new(inputs: usize) -> Self {
        Builder {
            inputs,
            gates: Vec::new(),
        }
    }

    fn push(&mut self, op: GateOp) -> Ref {
        self.gates.push(Gate { op });
        Ref::Gate(self.gates.len() - 1)
    }

    /// Returns `(sum, carry)`; sum is AND(OR(a,b), NOT(AND(a,b))).
    fn half_adder(&mut self, a: Ref, b: Ref) -> (Ref, Ref) {
        let carry = self.push(GateOp::And(a, b));
        let any = self.push(GateOp::Or(a, b));
        let not_both = self.push(GateOp::Not(carry));
        let sum = self.push(GateOp::And(any, not_both));
        (sum, carry)
    }

    /// Returns `(sum, carry)`; `b + carry_in` first, then `a + s1`.
    fn full_adder(&mut self, a: Ref, b: Ref, carry_in: Ref) -> (Ref, Ref) {
        let (s1, c1) = self.half_adder(b, carry_in);
        let (s2, c2) = self.half_adder(a, s1);
        let carry = self.push(GateOp::Or(c1, c2));
        (s2, carry)
    }

    fn finish(self, outputs: Vec<Ref>) -> Circuit {
        Circuit {
            inputs: self.inputs,
            gates: self.gates,
            outputs,
        }
    }
}

fn parse_kv_line(line: &str, prefix: &str, key: &str) -> Option<usize> {
    if !line.starts_with(prefix) {
        return None;
    }
    line.split_whitespace()
        .find_map(|part| part.strip_prefix(key))
        .and_then(|value| usize::from_str(value).ok())
}

fn parse_gate_line(line: &str, idx: usize) -> Result<Gate, ParseError> {
    let invalid = || ParseError::InvalidGate(line.to_string());
    let (lhs, rhs) = line.split_once('=').ok_or_else(invalid)?;
    if lhs.trim() != format!("g{}", idx) {
        return Err(invalid());
    }
    let op = parse_gate_op(rhs.trim()).ok_or_else(invalid)?;
    Ok(Gate { op })
}

fn parse_gate_op(text: &str) -> Option<GateOp> {
    if let Some(rest) = text.strip_prefix("AND(") {
        let (x, y) = parse_ref_pair(rest.strip_suffix(')')?)?;
        return Some(GateOp::And(x, y));
    }
    if let Some(rest) = text.strip_prefix("OR(") {
        let (x, y) = parse_ref_pair(rest.strip_suffix(')')?)?;
        return Some(GateOp::Or(x, y));
    }
    if let Some(rest) = text.strip_prefix("NOT(") {
        let x = parse_ref(rest.strip_suffix(')')?.trim())?;
        return Some(GateOp::Not(x));
    }
    None
}

fn parse_ref_pair(text: &str) -> Option<(Ref, Ref)> {
    match parse_ref_list(text)?.as_slice() {
        [x, y] => Some((*x, *y)),
        _ => None,
    }
}

fn parse_ref_list(text: &str) -> Option<Vec<Ref>> {
    text.split(',').map(|part| parse_ref(part.trim())).collect()
}

fn parse_ref(text: &str) -> Option<Ref> {
    if let Some(i) = text.strip_prefix('i') {
        return usize::from_str(i).ok().map(Ref::Input);
    }
    if let Some(g) = text.strip_prefix('g') {
        return usize::from_str(g).ok().map(Ref::Gate);
    }
    None
}

fn parse_outputs_line(line: &str) -> Result<Vec<Ref>, ParseError> {
    let (lhs, rhs) = line.split_once('=').ok_or(ParseError::InvalidOutputs)?;
    if lhs.trim() != "OUTPUTS" {
        return Err(ParseError::InvalidOutputs);
    }
    parse_ref_list(rhs.trim()).ok_or(ParseError::InvalidOutputs)
}

fn format_ref(r: &Ref) -> String {
    match r {
        Ref::Input(i) => format!("i{}", i),
        Ref::Gate(i) => format!("g{}", i),
    }
}

fn join_refs(list: &[Ref]) -> String {
    list.iter().map(format_ref).collect::<Vec<_>>().join(",")
}

fn validate_gate_refs(op: &GateOp, inputs: usize, gate_idx: usize) -> Result<(), ParseError> {
    match op {
        GateOp::And(x, y) | GateOp::Or(x, y) => {
            validate_ref(x, inputs, gate_idx)?;
            validate_ref(y, inputs, gate_idx)
        }
        GateOp::Not(x) => validate_ref(x, inputs, gate_idx),
    }
}

fn validate_ref(r: &Ref, inputs: usize, gate_idx: usize) -> Result<(), ParseError> {
    match r {
        Ref::Input(i) if *i < inputs => Ok(()),
        Ref::Gate(i) if *i < gate_idx => Ok(()),
        _ => Err(ParseError::RefOutOfRange),
    }
}

fn resolve_ref(r: &Ref, inputs: &[Bit], gates: &[Bit]) -> Option<Bit> {
    match r {
        Ref::Input(i) => inputs.get(*i).copied(),
        Ref::Gate(i) => gates.get(*i).copied(),
    }
}

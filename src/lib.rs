//! # ripple_adder
//!
//! **A 4-bit ripple-carry adder built from AND, OR and NOT.**
//!
//! Every bit of every sum is computed by gate primitives composed bottom
//! up: half-adders from gates, full-adders from two half-adders and an OR,
//! and the ripple chain from four full-adders with the carry passed from
//! the least to the most significant stage.
//!
//! ## Quick Start
//!
//! ```rust
//! use ripple_adder::{ripple_add, AdderError};
//! use ripple_adder::gates::invert;
//!
//! // operands and results are bit patterns written in decimal digits
//! assert_eq!(ripple_add(1010, 101, 0).unwrap(), 1111);
//! assert_eq!(ripple_add(1111, 1, 0).unwrap(), 10000);
//!
//! // out-of-range bits are errors, never sentinels
//! assert_eq!(invert(2), Err(AdderError::InvalidBit { value: 2 }));
//! ```
//!
//! ## Modules
//!
//! - [`bit`] — the `Bit` value and the error type
//! - [`gates`] — AND / OR / INVERT over raw integers
//! - [`adder`] — half and full adders
//! - [`digits`] — splitting, padding and reassembling digit patterns
//! - [`ripple`] — the four-stage chain, decimal and binary surfaces
//! - [`netlist`] — the same circuits as a parseable, hashable gate DAG
//! - [`verify`] — exhaustive and seeded equivalence checks

pub mod adder;
pub mod bit;
pub mod digits;
pub mod gates;
pub mod netlist;
pub mod ripple;
pub mod verify;

pub use adder::{full_adder, half_adder, AdderResult};
pub use bit::{AdderError, Bit};
pub use digits::{extract_bits, from_digits, pad_zeros, to_digits};
pub use netlist::{Circuit, CircuitHash};
pub use ripple::{ripple_add, ripple_add_binary, Encoding, RippleTrace};

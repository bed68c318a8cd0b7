//! Base types for sequence representation.
//!
//! Named reference sequences, the flattened coordinate space used to draw
//! positions from them, and the nucleotide helpers used to invent or
//! complement sequence.

mod nucleotide;
mod sequence;

pub use nucleotide::{Nucleotide, complement_ascii, reverse_complement};
pub use sequence::{AddressSpace, SequenceStore};

//! Simulation session and its configuration.
//!
//! Re-exports
//!
//! The most commonly used types are re-exported here so consumers can import
//! them from `vintsim_sim::simulation`.
//!
//! - `Events`: the session that generates integrations and episomes and
//!   writes them out.
//! - `EventsBuilder`: fluent builder for `Events` with argument checks.
//! - `ProbabilityConfig`: the nine parameters of the event model, with
//!   `validate` turning a loose key/value mapping into one.
//! - `parse_fasta` / `write_fasta`: reference I/O.

pub mod builder;
pub mod engine;
pub mod parameters;
pub mod sequence;

pub use builder::{DEFAULT_MIN_LEN, DEFAULT_SEED, EventsBuilder};
pub use engine::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_SEP, Events, GenerationOptions};
pub use parameters::{ProbabilityConfig, REQUIRED_KEYS, validate};
pub use sequence::{FASTA_LINE_WIDTH, fasta_exists, parse_fasta, write_fasta};

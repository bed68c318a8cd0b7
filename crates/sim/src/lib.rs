//! # Simulation Crate
//!
//! The `sim` crate provides the core logic for simulating viral integration
//! benchmarks. Given a host and a virus reference it places virus-derived
//! fragments into the host (integrations) or leaves them free-floating
//! (episomes), and records the ground truth of every event.
//!
//! It includes modules for sequence storage, the probability configuration,
//! placement sampling, the compound event model and output writing.
//!
//! ```no_run
//! use vintsim_sim::prelude::*;
//!
//! let probs = ProbabilityConfig::default().to_map();
//! let mut events = Events::builder("host.fa", "virus.fa").seed(1).build()?;
//! events.add_integrations(&probs, 10)?;
//! events.add_episomes(&probs, 2)?;
//! events.save_fasta("sim.fa")?;
//! events.save_integrations_info("sim.int.tsv")?;
//! events.save_episomes_info("sim.epi.tsv")?;
//! # Ok::<(), vintsim_sim::errors::EventsError>(())
//! ```

pub mod base;
pub mod errors;
pub mod events;
pub mod prelude;
pub mod simulation;
pub mod storage;

pub use errors::{EventsError, Result};
pub use simulation::{Events, EventsBuilder};

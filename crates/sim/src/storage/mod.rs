//! Event storage and output.
//!
//! Generated events live in write-once [`EventStore`]s owned by the session.
//! The [`export`] functions turn them into the simulated genome FASTA and the
//! two ground-truth tables; they only read the stores.

pub mod export;
mod store;

pub use export::{
    AssembledHost, AssembledRecord, EPISOME_COLUMNS, INTEGRATION_COLUMNS, assemble_host,
    save_episomes_info, save_fasta, save_integrations_info,
};
pub use store::EventStore;

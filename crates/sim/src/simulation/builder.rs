//! Builder pattern for creating sessions.
//!
//! Argument checks happen in [`EventsBuilder::build`] before either reference
//! is read, so a bad seed or length never costs a FASTA parse.

use crate::errors::{ConfigurationError, ContractViolation, Result};
use crate::simulation::{Events, parse_fasta};
use std::path::PathBuf;

/// Seed used when none is given.
pub const DEFAULT_SEED: i64 = 12345;
/// Minimum fragment length used when none is given.
pub const DEFAULT_MIN_LEN: i64 = 20;

/// Builder for constructing [`Events`] sessions with a fluent API.
///
/// # Examples
///
/// ```no_run
/// use vintsim_sim::simulation::EventsBuilder;
///
/// let events = EventsBuilder::new("host.fa", "virus.fa")
///     .seed(42)
///     .min_len(50)
///     .max_len(500)
///     .build()
///     .unwrap();
/// assert_eq!(events.seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct EventsBuilder {
    host: PathBuf,
    virus: PathBuf,
    seed: Option<i64>,
    min_len: Option<i64>,
    max_len: Option<i64>,
}

impl EventsBuilder {
    /// Create a builder for the given host and virus FASTA files.
    pub fn new(host: impl Into<PathBuf>, virus: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            virus: virus.into(),
            seed: Some(DEFAULT_SEED),
            min_len: Some(DEFAULT_MIN_LEN),
            max_len: None,
        }
    }

    /// Set the seed. Must be present and non-negative.
    pub fn seed(mut self, seed: impl Into<Option<i64>>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set the minimum length of partial fragments. Must be present and
    /// positive.
    pub fn min_len(mut self, min_len: impl Into<Option<i64>>) -> Self {
        self.min_len = min_len.into();
        self
    }

    /// Set the maximum length of partial fragments (default: the virus
    /// length).
    pub fn max_len(mut self, max_len: impl Into<Option<i64>>) -> Self {
        self.max_len = max_len.into();
        self
    }

    /// Check the arguments, load both references and seed the session.
    pub fn build(self) -> Result<Events> {
        let seed = match self.seed {
            None => return Err(ContractViolation::MissingSeed.into()),
            Some(seed) if seed < 0 => return Err(ContractViolation::NegativeSeed(seed).into()),
            Some(seed) => seed,
        };
        let min_len = match self.min_len {
            None => return Err(ContractViolation::MissingMinLength.into()),
            Some(len) if len <= 0 => {
                return Err(ContractViolation::NonPositiveMinLength(len).into());
            }
            Some(len) => len,
        };
        if let Some(max_len) = self.max_len {
            if max_len < min_len {
                return Err(ConfigurationError::LengthBounds { min_len, max_len }.into());
            }
        }

        let host = parse_fasta(&self.host)?;
        let virus = parse_fasta(&self.virus)?;
        log::info!(
            "Loaded host {} ({} records, {} bp) and virus {} ({} records, {} bp)",
            self.host.display(),
            host.len(),
            host.total_length(),
            self.virus.display(),
            virus.len(),
            virus.total_length()
        );

        Ok(Events::from_parts(
            host,
            virus,
            seed as u64,
            min_len as usize,
            self.max_len.map(|len| len as usize),
        ))
    }
}

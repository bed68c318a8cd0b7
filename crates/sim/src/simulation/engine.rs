//! Event generation session.
//!
//! An [`Events`] session owns the host and virus references, a seeded random
//! stream and one write-once store per event kind. Each kind is generated by
//! a single call; output is written from the stores afterwards.

use crate::base::SequenceStore;
use crate::errors::{ContractViolation, EventKind, Result};
use crate::events::{self, EpisomeEvent, IntegrationEvent, MutationModel, PlacementSampler};
use crate::simulation::{EventsBuilder, ProbabilityConfig, fasta_exists, validate};
use crate::storage::{self, EventStore};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::HashMap;
use std::path::Path;

/// Consecutive rejected candidates tolerated before giving up.
pub const DEFAULT_MAX_ATTEMPTS: i64 = 50;
/// Default minimum distance between integration footprints.
pub const DEFAULT_MIN_SEP: i64 = 1;

/// Sampling limits for a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Consecutive rejections allowed per event (must be positive)
    pub max_attempts: i64,
    /// Minimum distance between integration footprints (must be positive)
    pub min_sep: i64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_sep: DEFAULT_MIN_SEP,
        }
    }
}

impl GenerationOptions {
    fn checked(&self) -> std::result::Result<(usize, usize), ContractViolation> {
        if self.max_attempts <= 0 {
            return Err(ContractViolation::NonPositiveAttempts(self.max_attempts));
        }
        if self.min_sep <= 0 {
            return Err(ContractViolation::NonPositiveSeparation(self.min_sep));
        }
        Ok((self.max_attempts as usize, self.min_sep as usize))
    }
}

fn checked_count(n: i64) -> std::result::Result<usize, ContractViolation> {
    usize::try_from(n).map_err(|_| ContractViolation::NegativeCount(n))
}

/// A simulation session.
#[derive(Debug)]
pub struct Events {
    host: SequenceStore,
    virus: SequenceStore,
    seed: u64,
    min_len: usize,
    max_len: Option<usize>,
    /// Random number generator (Xoshiro256++), seeded once
    rng: Xoshiro256PlusPlus,
    integrations: EventStore<IntegrationEvent>,
    episomes: EventStore<EpisomeEvent>,
}

impl Events {
    /// Open a session with the default seed and fragment lengths.
    pub fn new(host: impl AsRef<Path>, virus: impl AsRef<Path>) -> Result<Self> {
        EventsBuilder::new(host.as_ref(), virus.as_ref()).build()
    }

    pub fn builder(host: impl AsRef<Path>, virus: impl AsRef<Path>) -> EventsBuilder {
        EventsBuilder::new(host.as_ref(), virus.as_ref())
    }

    /// Assemble a session from already validated parts.
    pub fn from_parts(
        host: SequenceStore,
        virus: SequenceStore,
        seed: u64,
        min_len: usize,
        max_len: Option<usize>,
    ) -> Self {
        Self {
            host,
            virus,
            seed,
            min_len,
            max_len,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            integrations: EventStore::new(),
            episomes: EventStore::new(),
        }
    }

    pub fn host(&self) -> &SequenceStore {
        &self.host
    }

    pub fn virus(&self) -> &SequenceStore {
        &self.virus
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Integrations generated so far; empty before `add_integrations`.
    pub fn integrations(&self) -> &[IntegrationEvent] {
        self.integrations.events()
    }

    /// Episomes generated so far; empty before `add_episomes`.
    pub fn episomes(&self) -> &[EpisomeEvent] {
        self.episomes.events()
    }

    /// Check that `probs` has every required key.
    pub fn check_probs(&self, probs: &HashMap<String, f64>) -> Result<ProbabilityConfig> {
        validate(probs)
    }

    /// Check that junctions drawn from `probs` fit the session's minimum
    /// fragment length.
    pub fn check_junction_length(&self, probs: &ProbabilityConfig) -> Result<()> {
        events::check_junction_length(probs, self.min_len)
    }

    /// True if `path` is a readable FASTA file with at least one record.
    pub fn check_fasta_exists(path: impl AsRef<Path>) -> bool {
        fasta_exists(path)
    }

    /// Generate `n` integrations with the default sampling limits.
    pub fn add_integrations(&mut self, probs: &HashMap<String, f64>, n: i64) -> Result<()> {
        self.add_integrations_with(probs, n, GenerationOptions::default())
    }

    /// Generate `n` integrations.
    ///
    /// Fails without storing anything if fewer than `n` non-conflicting
    /// placements could be found. Integrations can be generated once per
    /// session.
    pub fn add_integrations_with(
        &mut self,
        probs: &HashMap<String, f64>,
        n: i64,
        options: GenerationOptions,
    ) -> Result<()> {
        let n = checked_count(n)?;
        let (max_attempts, min_sep) = options.checked()?;
        self.integrations.ensure_empty(EventKind::Integrations)?;

        let config = validate(probs)?;
        self.check_junction_length(&config)?;

        let model = MutationModel::new(&self.virus, &config, self.min_len, self.max_len)?;
        let host = &self.host;
        let mut sampler = PlacementSampler::for_host(host, min_sep);
        let mut integrations =
            sampler.sample(n, max_attempts, &mut self.rng, |window, rng| {
                let event = model.materialize_integration(0, window, host, rng);
                let footprint = event.footprint();
                (event, footprint)
            })?;
        for (id, event) in integrations.iter_mut().enumerate() {
            event.id = id;
        }

        log::info!(
            "Generated {} integrations (min_sep {min_sep}, max_attempts {max_attempts})",
            integrations.len()
        );
        self.integrations
            .populate(integrations, EventKind::Integrations)
    }

    /// Generate `n` episomes with the default attempt limit.
    pub fn add_episomes(&mut self, probs: &HashMap<String, f64>, n: i64) -> Result<()> {
        self.add_episomes_with(probs, n, DEFAULT_MAX_ATTEMPTS)
    }

    /// Generate `n` episomes. Episomes can be generated once per session.
    pub fn add_episomes_with(
        &mut self,
        probs: &HashMap<String, f64>,
        n: i64,
        max_attempts: i64,
    ) -> Result<()> {
        let n = checked_count(n)?;
        if max_attempts <= 0 {
            return Err(ContractViolation::NonPositiveAttempts(max_attempts).into());
        }
        self.episomes.ensure_empty(EventKind::Episomes)?;

        let config = validate(probs)?;
        self.check_junction_length(&config)?;

        let model = MutationModel::new(&self.virus, &config, self.min_len, self.max_len)?;
        let mut sampler = PlacementSampler::for_virus(&self.virus);
        let mut episomes =
            sampler.sample(n, max_attempts as usize, &mut self.rng, |anchor, rng| {
                (model.materialize_episome(0, anchor, rng), anchor.point())
            })?;
        for (id, episome) in episomes.iter_mut().enumerate() {
            episome.id = id;
        }

        log::info!(
            "Generated {} episomes ({} circular)",
            episomes.len(),
            episomes.iter().filter(|e| e.circular).count()
        );
        self.episomes.populate(episomes, EventKind::Episomes)
    }

    /// Write the mutated host and all episomes as FASTA.
    pub fn save_fasta(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        storage::save_fasta(
            path,
            &self.host,
            &self.virus,
            self.integrations(),
            self.episomes(),
        )?;
        log::info!("Wrote simulated genome to {}", path.display());
        Ok(())
    }

    /// Write one row per integration.
    pub fn save_integrations_info(&self, path: impl AsRef<Path>) -> Result<()> {
        storage::save_integrations_info(path, &self.host, &self.virus, self.integrations())
    }

    /// Write one row per episome.
    pub fn save_episomes_info(&self, path: impl AsRef<Path>) -> Result<()> {
        storage::save_episomes_info(path, self.episomes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConfigurationError, EventsError};

    fn session(host_len: usize, seed: u64) -> Events {
        let host = SequenceStore::from_records([("chr1", "A".repeat(host_len))]).unwrap();
        let virus = SequenceStore::from_records([("virus", "T".repeat(100))]).unwrap();
        Events::from_parts(host, virus, seed, 20, None)
    }

    fn probs() -> HashMap<String, f64> {
        ProbabilityConfig::default().to_map()
    }

    #[test]
    fn test_contract_violations_leave_rng_untouched() {
        let mut events = session(1000, 1);
        let before = events.rng.clone();

        assert!(events.add_integrations(&probs(), -1).unwrap_err().is_contract_violation());
        let zero_attempts = GenerationOptions {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(events
            .add_integrations_with(&probs(), 1, zero_attempts)
            .unwrap_err()
            .is_contract_violation());
        let zero_sep = GenerationOptions {
            min_sep: 0,
            ..Default::default()
        };
        assert!(events
            .add_integrations_with(&probs(), 1, zero_sep)
            .unwrap_err()
            .is_contract_violation());
        assert!(events.add_episomes(&probs(), -3).unwrap_err().is_contract_violation());
        assert!(events
            .add_episomes_with(&probs(), 1, 0)
            .unwrap_err()
            .is_contract_violation());

        assert_eq!(events.rng, before);
        assert!(events.integrations().is_empty());
    }

    #[test]
    fn test_huge_count_is_capacity_error() {
        let mut events = session(1000, 6);
        let err = events.add_integrations(&probs(), i64::MAX).unwrap_err();
        assert!(matches!(err, EventsError::Capacity { .. }), "{err}");
        assert!(events.integrations().is_empty());
    }

    #[test]
    fn test_infeasible_junctions_leave_rng_untouched() {
        let host = SequenceStore::from_records([("chr1", "A".repeat(1000))]).unwrap();
        let virus = SequenceStore::from_records([("virus", "T".repeat(100))]).unwrap();
        let mut events = Events::from_parts(host, virus, 8, 2, None);
        let before = events.rng.clone();

        let mut bad = probs();
        bad.insert("lambda_junction".to_string(), 100.0);
        bad.insert("p_gap".to_string(), 0.5);
        bad.insert("p_overlap".to_string(), 0.5);

        for err in [
            events.add_integrations(&bad, 3).unwrap_err(),
            events.add_episomes(&bad, 3).unwrap_err(),
        ] {
            assert!(matches!(
                err,
                EventsError::Config(ConfigurationError::JunctionTooLong { .. })
            ));
        }

        assert_eq!(events.rng, before);
        assert!(events.integrations().is_empty());
        assert!(events.episomes().is_empty());
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut events = session(1000, 2);
        events.add_integrations(&probs(), 5).unwrap();
        let ids: Vec<usize> = events.integrations().iter().map(|e| e.id).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_capacity_error_allows_retry() {
        let mut events = session(100, 3);
        let options = GenerationOptions {
            max_attempts: 10,
            min_sep: 50,
        };
        let err = events
            .add_integrations_with(&probs(), 50, options)
            .unwrap_err();
        assert!(matches!(err, EventsError::Capacity { .. }));
        assert!(events.integrations().is_empty());

        events.add_integrations(&probs(), 2).unwrap();
        assert_eq!(events.integrations().len(), 2);
    }

    #[test]
    fn test_missing_key_leaves_session_usable() {
        let mut events = session(1000, 4);
        let mut incomplete = probs();
        incomplete.remove("p_gap");
        assert!(events
            .add_episomes(&incomplete, 2)
            .unwrap_err()
            .is_configuration_error());
        events.add_episomes(&probs(), 2).unwrap();
        assert_eq!(events.episomes().len(), 2);
    }

    #[test]
    fn test_check_probs() {
        let events = session(10, 5);
        assert_eq!(
            events.check_probs(&probs()).unwrap(),
            ProbabilityConfig::default()
        );
        assert!(events.check_probs(&HashMap::new()).is_err());
    }
}

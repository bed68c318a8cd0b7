//! Rejection sampling of event placements.
//!
//! Candidates are proposed uniformly over an [`AddressSpace`]. On the host,
//! each materialized candidate occupies a footprint which must keep a minimum
//! distance from every footprint accepted before it; a candidate that does
//! not is thrown away and a new one drawn. A run of `max_attempts` rejected
//! candidates in a row ends the whole call.

use crate::base::{AddressSpace, SequenceStore};
use crate::errors::{EventsError, Result};
use crate::events::records::Span;
use rand::Rng;

/// A proposed position: a record of the sampled store and an offset in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub record: usize,
    pub offset: usize,
}

impl Window {
    /// Zero-width footprint at the window's offset.
    pub fn point(&self) -> Span {
        Span::new(self.offset, self.offset)
    }
}

/// Draws non-conflicting windows from a sequence store.
#[derive(Debug, Clone)]
pub struct PlacementSampler {
    space: AddressSpace,
    /// Required distance between footprints on the same record; `None`
    /// disables conflict checks.
    min_separation: Option<usize>,
    accepted: Vec<(usize, Span)>,
}

impl PlacementSampler {
    /// Sampler over host coordinates with a minimum separation between
    /// accepted footprints.
    pub fn for_host(host: &SequenceStore, min_separation: usize) -> Self {
        Self {
            space: AddressSpace::new(host),
            min_separation: Some(min_separation),
            accepted: Vec::new(),
        }
    }

    /// Sampler over virus coordinates. Episomes do not live on the host, so
    /// nothing is ever rejected.
    pub fn for_virus(virus: &SequenceStore) -> Self {
        Self {
            space: AddressSpace::new(virus),
            min_separation: None,
            accepted: Vec::new(),
        }
    }

    /// Footprints accepted so far, with their record index.
    pub fn accepted(&self) -> &[(usize, Span)] {
        &self.accepted
    }

    /// Draw a candidate window, or `None` if the space is empty.
    pub fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Window> {
        self.space
            .draw(rng)
            .map(|(record, offset)| Window { record, offset })
    }

    /// True if `span` on `record` comes closer than the minimum separation to
    /// an accepted footprint.
    pub fn conflicts(&self, record: usize, span: Span) -> bool {
        let Some(sep) = self.min_separation else {
            return false;
        };
        self.accepted.iter().any(|&(other_record, other)| {
            other_record == record
                && span.start < other.end + sep
                && other.start < span.end + sep
        })
    }

    /// Accept `span` on `record` if it does not conflict.
    pub fn try_accept(&mut self, record: usize, span: Span) -> bool {
        if self.conflicts(record, span) {
            return false;
        }
        self.accepted.push((record, span));
        true
    }

    /// Place `n` items.
    ///
    /// For every proposed window `materialize` builds a candidate and reports
    /// its footprint on the window's record. Candidates whose footprint
    /// conflicts are discarded. If `max_attempts` candidates in a row are
    /// discarded, the call fails with [`EventsError::Capacity`] and nothing
    /// is returned.
    pub fn sample<T, R, F>(
        &mut self,
        n: usize,
        max_attempts: usize,
        rng: &mut R,
        mut materialize: F,
    ) -> Result<Vec<T>>
    where
        R: Rng + ?Sized,
        F: FnMut(Window, &mut R) -> (T, Span),
    {
        // `n` is caller-controlled and may be far beyond what fits.
        let mut placed = Vec::with_capacity(n.min(self.space.total()));

        while placed.len() < n {
            let mut accepted = None;
            for attempt in 1..=max_attempts {
                let Some(window) = self.propose(rng) else {
                    break;
                };
                let (item, footprint) = materialize(window, rng);
                if self.try_accept(window.record, footprint) {
                    accepted = Some(item);
                    break;
                }
                log::debug!(
                    "rejected candidate {} at record {} span {} (attempt {attempt}/{max_attempts})",
                    placed.len(),
                    window.record,
                    footprint
                );
            }

            match accepted {
                Some(item) => placed.push(item),
                None => {
                    return Err(EventsError::Capacity {
                        requested: n,
                        placed: placed.len(),
                        max_attempts,
                    });
                }
            }
        }

        Ok(placed)
    }

    /// Place `n` bare insertion points on the host.
    pub fn sample_integration_windows<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Vec<Window>> {
        self.sample(n, max_attempts, rng, |window, _| (window, window.point()))
    }

    /// Draw `n` anchors on the virus sequences.
    pub fn sample_episome_windows<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Vec<Window>> {
        self.sample(n, max_attempts, rng, |window, _| (window, window.point()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn host(len: usize) -> SequenceStore {
        SequenceStore::from_records([("chr1", "A".repeat(len))]).unwrap()
    }

    #[test]
    fn test_windows_are_separated() {
        let host = host(1000);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut sampler = PlacementSampler::for_host(&host, 25);
        let windows = sampler.sample_integration_windows(10, 200, &mut rng).unwrap();

        assert_eq!(windows.len(), 10);
        for (i, a) in windows.iter().enumerate() {
            for b in &windows[i + 1..] {
                assert!(a.offset.abs_diff(b.offset) >= 25);
            }
        }
    }

    #[test]
    fn test_capacity_exhausted() {
        let host = host(10);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut sampler = PlacementSampler::for_host(&host, 1);
        let err = sampler
            .sample_integration_windows(11, 50, &mut rng)
            .unwrap_err();
        match err {
            EventsError::Capacity {
                requested, placed, ..
            } => {
                assert_eq!(requested, 11);
                assert!(placed <= 10);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_huge_request_is_capacity_error() {
        let host = host(200);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mut sampler = PlacementSampler::for_host(&host, 1);
        let err = sampler
            .sample_integration_windows(1 << 40, 50, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            EventsError::Capacity { requested, placed, .. } if requested == 1 << 40 && placed <= 200
        ));
    }

    #[test]
    fn test_empty_space_fails_unless_nothing_requested() {
        let empty = SequenceStore::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut sampler = PlacementSampler::for_host(&empty, 1);
        assert!(sampler.sample_integration_windows(0, 5, &mut rng).unwrap().is_empty());
        assert!(sampler.sample_integration_windows(1, 5, &mut rng).is_err());
    }

    #[test]
    fn test_conflicts_respect_records_and_extent() {
        let host = SequenceStore::from_records([("a", "AAAA"), ("b", "CCCC")]).unwrap();
        let mut sampler = PlacementSampler::for_host(&host, 2);
        assert!(sampler.try_accept(0, Span::new(10, 15)));
        // Same place on another record is fine.
        assert!(!sampler.conflicts(1, Span::new(10, 15)));
        assert!(sampler.conflicts(0, Span::new(16, 16)));
        assert!(!sampler.conflicts(0, Span::new(17, 17)));
        assert!(sampler.conflicts(0, Span::new(8, 9)));
        assert!(!sampler.conflicts(0, Span::new(7, 8)));
    }

    #[test]
    fn test_virus_sampler_never_rejects() {
        let virus = SequenceStore::from_records([("v", "ACGT")]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        let mut sampler = PlacementSampler::for_virus(&virus);
        let windows = sampler.sample_episome_windows(100, 1, &mut rng).unwrap();
        assert_eq!(windows.len(), 100);
        assert!(windows.iter().all(|w| w.record == 0 && w.offset < 4));
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let host = host(500);
        let run = || {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(77);
            PlacementSampler::for_host(&host, 5)
                .sample_integration_windows(20, 100, &mut rng)
                .unwrap()
        };
        assert_eq!(run(), run());
    }
}

use std::collections::HashMap;

use rand::Rng;

use crate::errors::SequenceError;

/// Ordered, immutable collection of named reference sequences.
///
/// Records keep the order in which they were read so that output files list
/// them in input order. Sequences may use any alphabet of ASCII symbols, so
/// every position is exactly one byte and lengths, offsets and slices all
/// agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceStore {
    records: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SequenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(name, sequence)` pairs.
    ///
    /// Fails on a repeated name or on a sequence with a non-ASCII character.
    pub fn from_records<I, N, S>(records: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for (name, seq) in records {
            let name = name.into();
            if store.index.contains_key(&name) {
                return Err(SequenceError::DuplicateName(name));
            }
            let seq = seq.into();
            if let Some(position) = seq.bytes().position(|b| !b.is_ascii()) {
                return Err(SequenceError::NonAscii { name, position });
            }
            store.index.insert(name.clone(), store.records.len());
            store.records.push((name, seq));
        }
        Ok(store)
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record lengths.
    pub fn total_length(&self) -> usize {
        self.records.iter().map(|(_, seq)| seq.len()).sum()
    }

    /// Look up a sequence by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.records[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Name of the record at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    #[inline]
    pub fn name(&self, idx: usize) -> &str {
        &self.records[idx].0
    }

    /// Sequence of the record at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    #[inline]
    pub fn sequence(&self, idx: usize) -> &str {
        &self.records[idx].1
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(name, sequence)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records
            .iter()
            .map(|(name, seq)| (name.as_str(), seq.as_str()))
    }
}

/// A flattened coordinate space over the non-empty records of a store.
///
/// Drawing uniformly from the space picks a record with probability
/// proportional to its length, then a uniform offset inside it.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    /// `(record index, cumulative end)` for every non-empty record.
    bounds: Vec<(usize, usize)>,
}

impl AddressSpace {
    pub fn new(store: &SequenceStore) -> Self {
        let mut total = 0;
        let bounds = store
            .records
            .iter()
            .enumerate()
            .filter(|(_, (_, seq))| !seq.is_empty())
            .map(|(i, (_, seq))| {
                total += seq.len();
                (i, total)
            })
            .collect();
        Self { bounds }
    }

    /// Total number of addressable positions.
    #[inline]
    pub fn total(&self) -> usize {
        self.bounds.last().map_or(0, |&(_, end)| end)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Map a global position onto `(record index, local offset)`.
    pub fn locate(&self, global: usize) -> Option<(usize, usize)> {
        if global >= self.total() {
            return None;
        }
        let slot = self.bounds.partition_point(|&(_, end)| end <= global);
        let (record, end) = self.bounds[slot];
        let start = if slot == 0 { 0 } else { self.bounds[slot - 1].1 };
        debug_assert!(global < end);
        Some((record, global - start))
    }

    /// Draw a uniformly distributed position. Consumes exactly one value from
    /// `rng` unless the space is empty, in which case nothing is drawn.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.locate(rng.random_range(0..total))
    }
}

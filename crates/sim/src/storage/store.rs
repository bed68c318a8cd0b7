use crate::errors::{EventKind, EventsError, Result};

/// Write-once container for generated events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventStore<T> {
    /// Nothing generated yet.
    #[default]
    Empty,
    /// Events from the single successful generation call.
    Populated(Vec<T>),
}

impl<T> EventStore<T> {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Fails with [`EventsError::DuplicateGeneration`] if already populated.
    pub fn ensure_empty(&self, kind: EventKind) -> Result<()> {
        match self {
            Self::Empty => Ok(()),
            Self::Populated(_) => Err(EventsError::DuplicateGeneration(kind)),
        }
    }

    /// Store `events`. The store is left untouched on error.
    pub fn populate(&mut self, events: Vec<T>, kind: EventKind) -> Result<()> {
        self.ensure_empty(kind)?;
        *self = Self::Populated(events);
        Ok(())
    }

    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }

    /// Stored events; empty before generation.
    pub fn events(&self) -> &[T] {
        match self {
            Self::Empty => &[],
            Self::Populated(events) => events,
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_once() {
        let mut store: EventStore<u32> = EventStore::new();
        assert!(!store.is_populated());
        assert!(store.events().is_empty());

        store.populate(vec![1, 2, 3], EventKind::Integrations).unwrap();
        assert!(store.is_populated());
        assert_eq!(store.len(), 3);

        let err = store.populate(vec![4], EventKind::Integrations).unwrap_err();
        assert!(matches!(
            err,
            EventsError::DuplicateGeneration(EventKind::Integrations)
        ));
        assert_eq!(store.events(), &[1, 2, 3]);
    }

    #[test]
    fn test_zero_events_still_populates() {
        let mut store: EventStore<u32> = EventStore::new();
        store.populate(Vec::new(), EventKind::Episomes).unwrap();
        assert!(store.is_populated());
        assert!(store.is_empty());
        assert!(store.ensure_empty(EventKind::Episomes).is_err());
    }
}

//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use vintsim_sim::prelude::*;
//!
//! let probs = ProbabilityConfig::default();
//! assert!(probs.check_ranges().is_ok());
//! ```

pub use crate::base::SequenceStore;
pub use crate::errors::{self, ConfigurationError, ContractViolation, EventsError};
pub use crate::events::{EpisomeEvent, IntegrationEvent, Junction, Orientation, Span};
pub use crate::simulation::{Events, EventsBuilder, GenerationOptions, ProbabilityConfig};

//! Event generation.
//!
//! Events are produced by a placement sampler, which picks where an event
//! goes, and a mutation model, which decides what it looks like. The result
//! of both is a plain record (see [`records`]); sequences are only assembled
//! from records when output is written.
//!
//! Re-exports
//!
//! - `PlacementSampler`: rejection sampler enforcing the minimum separation.
//! - `MutationModel`: the compound event model driven by a
//!   [`ProbabilityConfig`](crate::simulation::ProbabilityConfig).
//! - `check_junction_length`: the feasibility pre-check run before sampling.

pub mod feasibility;
pub mod mutation;
pub mod placement;
pub mod records;

pub use feasibility::{check_junction_length, expected_junction_bases};
pub use mutation::MutationModel;
pub use placement::{PlacementSampler, Window};
pub use records::{
    EpisomeEvent, IntegrationEvent, Junction, Orientation, Piece, Span, ViralFragment,
};

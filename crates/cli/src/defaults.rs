//! Shared default values for the command line.
//! These values are used by clap and by the `params` template writer.

use vintsim_sim::simulation::ProbabilityConfig;

pub const SEED: i64 = 12345;
pub const MIN_LEN: i64 = 20;

pub const INT_NUM: i64 = 5;
pub const EPI_NUM: i64 = 0;

// Sampling limits
pub const MIN_SEP: i64 = 1;
pub const MAX_ATTEMPTS: i64 = 50;

// Event model
pub const P_WHOLE: f64 = 0.5;
pub const P_REARRANGE: f64 = 0.1;
pub const P_DELETE: f64 = 0.1;
pub const LAMBDA_SPLIT: f64 = 2.0;
pub const P_OVERLAP: f64 = 0.1;
pub const P_GAP: f64 = 0.1;
pub const LAMBDA_JUNCTION: f64 = 2.0;
pub const P_HOST_DEL: f64 = 0.1;
pub const LAMBDA_HOST_DEL: f64 = 5.0;

pub const PARAMS_FILE: &str = "params.json";

/// The event model parameters above as a configuration.
pub fn probability_config() -> ProbabilityConfig {
    ProbabilityConfig {
        p_whole: P_WHOLE,
        p_rearrange: P_REARRANGE,
        p_delete: P_DELETE,
        lambda_split: LAMBDA_SPLIT,
        p_overlap: P_OVERLAP,
        p_gap: P_GAP,
        lambda_junction: LAMBDA_JUNCTION,
        p_host_del: P_HOST_DEL,
        lambda_host_del: LAMBDA_HOST_DEL,
    }
}

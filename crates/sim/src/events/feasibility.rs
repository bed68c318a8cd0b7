//! Pre-flight check of the junction model against the fragment length floor.

use crate::errors::{ConfigurationError, Result};
use crate::simulation::ProbabilityConfig;

/// Expected number of bases taken up by the junctions on both flanks of an
/// integration.
///
/// A junction is non-clean with probability `p_gap + p_overlap`, and its
/// length then has mean `lambda_junction`.
pub fn expected_junction_bases(probs: &ProbabilityConfig) -> f64 {
    2.0 * (probs.p_gap + probs.p_overlap) * probs.lambda_junction
}

/// Reject configurations whose junctions would not fit into a fragment of
/// the minimum length.
///
/// Runs the range checks first, so a configuration that passes is safe to
/// hand to the mutation model.
pub fn check_junction_length(probs: &ProbabilityConfig, min_len: usize) -> Result<()> {
    probs.check_ranges()?;

    if probs.p_gap + probs.p_overlap == 0.0 {
        return Ok(());
    }

    let expected = expected_junction_bases(probs);
    if expected >= min_len as f64 {
        return Err(ConfigurationError::JunctionTooLong { expected, min_len }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EventsError;

    #[test]
    fn test_default_config_is_feasible() {
        assert!(check_junction_length(&ProbabilityConfig::default(), 20).is_ok());
        assert!(check_junction_length(&ProbabilityConfig::default(), 1).is_ok());
    }

    #[test]
    fn test_long_junctions_rejected() {
        let probs = ProbabilityConfig {
            lambda_junction: 100.0,
            p_gap: 0.5,
            p_overlap: 0.5,
            ..Default::default()
        };
        let err = check_junction_length(&probs, 2).unwrap_err();
        assert!(matches!(
            err,
            EventsError::Config(ConfigurationError::JunctionTooLong { min_len: 2, .. })
        ));
    }

    #[test]
    fn test_clean_junctions_always_fit() {
        let probs = ProbabilityConfig {
            lambda_junction: 1000.0,
            p_gap: 0.0,
            p_overlap: 0.0,
            ..Default::default()
        };
        assert!(check_junction_length(&probs, 1).is_ok());
    }

    #[test]
    fn test_boundary_is_rejected() {
        // 2 * 0.5 * 10 == 10
        let probs = ProbabilityConfig {
            lambda_junction: 10.0,
            p_gap: 0.25,
            p_overlap: 0.25,
            ..Default::default()
        };
        assert!(check_junction_length(&probs, 10).is_err());
        assert!(check_junction_length(&probs, 11).is_ok());
    }

    #[test]
    fn test_ranges_checked_first() {
        let probs = ProbabilityConfig {
            p_delete: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            check_junction_length(&probs, 100),
            Err(EventsError::Config(
                ConfigurationError::ProbabilityOutOfRange { .. }
            ))
        ));
    }
}

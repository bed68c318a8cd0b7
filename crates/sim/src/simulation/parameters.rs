//! Probability configuration for event generation.
//!
//! Every generation call is driven by the same nine parameters. They are
//! usually supplied as a loose key/value mapping (a JSON file or command line
//! flags) and turned into a [`ProbabilityConfig`] by [`validate`], which
//! insists on all nine keys being present. Numeric ranges are checked
//! separately by [`ProbabilityConfig::check_ranges`], right before the values
//! are used.

use crate::errors::{ConfigurationError, EventsError, Result};
use rand_distr::Poisson;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Keys a probability mapping must contain.
pub const REQUIRED_KEYS: [&str; 9] = [
    "p_whole",
    "p_rearrange",
    "p_delete",
    "lambda_split",
    "p_overlap",
    "p_gap",
    "lambda_junction",
    "p_host_del",
    "lambda_host_del",
];

/// Largest accepted value for any `lambda_*` rate.
pub const MAX_RATE: f64 = Poisson::<f64>::MAX_LAMBDA;

/// Parameters of the compound event model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityConfig {
    /// Probability of inserting a whole virus rather than a fragment
    pub p_whole: f64,
    /// Probability that the inserted material is rearranged
    pub p_rearrange: f64,
    /// Probability of an internal deletion in the inserted material
    pub p_delete: f64,
    /// Mean number of breakpoints for rearrangements
    pub lambda_split: f64,
    /// Probability of a junction having micro-homology (overlap)
    pub p_overlap: f64,
    /// Probability of a junction having random filler (gap)
    pub p_gap: f64,
    /// Mean length of gaps and overlaps
    pub lambda_junction: f64,
    /// Probability of host bases being deleted at the integration site
    pub p_host_del: f64,
    /// Mean number of deleted host bases
    pub lambda_host_del: f64,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            p_whole: 0.5,
            p_rearrange: 0.1,
            p_delete: 0.1,
            lambda_split: 2.0,
            p_overlap: 0.1,
            p_gap: 0.1,
            lambda_junction: 2.0,
            p_host_del: 0.1,
            lambda_host_del: 5.0,
        }
    }
}

/// Build a [`ProbabilityConfig`] from a key/value mapping.
///
/// Fails if any of the [`REQUIRED_KEYS`] is absent; the error lists all of
/// them. Additional keys are ignored.
pub fn validate(probs: &HashMap<String, f64>) -> Result<ProbabilityConfig> {
    let missing: Vec<&'static str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !probs.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ConfigurationError::MissingKeys(missing).into());
    }

    let get = |key: &str| probs[key];
    Ok(ProbabilityConfig {
        p_whole: get("p_whole"),
        p_rearrange: get("p_rearrange"),
        p_delete: get("p_delete"),
        lambda_split: get("lambda_split"),
        p_overlap: get("p_overlap"),
        p_gap: get("p_gap"),
        lambda_junction: get("lambda_junction"),
        p_host_del: get("p_host_del"),
        lambda_host_del: get("lambda_host_del"),
    })
}

impl ProbabilityConfig {
    /// Parse a JSON object of the nine parameters.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let map: HashMap<String, f64> = serde_json::from_str(input)
            .map_err(|e| EventsError::from(ConfigurationError::Malformed(e.to_string())))?;
        validate(&map)
    }

    /// Read a JSON parameter file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EventsError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// The parameters as a key/value mapping, keyed by [`REQUIRED_KEYS`].
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("p_whole", self.p_whole),
            ("p_rearrange", self.p_rearrange),
            ("p_delete", self.p_delete),
            ("lambda_split", self.lambda_split),
            ("p_overlap", self.p_overlap),
            ("p_gap", self.p_gap),
            ("lambda_junction", self.lambda_junction),
            ("p_host_del", self.p_host_del),
            ("lambda_host_del", self.lambda_host_del),
        ]
    }

    /// Check that probabilities lie in [0, 1], rates are positive and within
    /// the range a Poisson distribution accepts, and that gap and overlap
    /// together cannot exceed certainty.
    pub fn check_ranges(&self) -> std::result::Result<(), ConfigurationError> {
        for (key, value) in self.entries() {
            if key.starts_with("lambda_") {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigurationError::InvalidRate { key, value });
                }
                if value > MAX_RATE {
                    return Err(ConfigurationError::RateTooLarge {
                        key,
                        value,
                        max: MAX_RATE,
                    });
                }
            } else if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::ProbabilityOutOfRange { key, value });
            }
        }

        let junction = self.p_gap + self.p_overlap;
        if junction > 1.0 {
            return Err(ConfigurationError::JunctionProbabilitySum(junction));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, f64> {
        ProbabilityConfig::default().to_map()
    }

    #[test]
    fn test_validate_full_map() {
        let config = validate(&full_map()).unwrap();
        assert_eq!(config, ProbabilityConfig::default());
    }

    #[test]
    fn test_validate_ignores_extra_keys() {
        let mut map = full_map();
        map.insert("p_circular".to_string(), 0.3);
        assert!(validate(&map).is_ok());
    }

    #[test]
    fn test_validate_missing_key() {
        let mut map = HashMap::new();
        map.insert("p_whole".to_string(), 0.5);
        let err = validate(&map).unwrap_err();
        match err {
            EventsError::Config(ConfigurationError::MissingKeys(keys)) => {
                assert_eq!(keys.len(), 8);
                assert!(!keys.contains(&"p_whole"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_each_key_required() {
        for key in REQUIRED_KEYS {
            let mut map = full_map();
            map.remove(key);
            assert!(validate(&map).unwrap_err().is_configuration_error());
        }
    }

    #[test]
    fn test_check_ranges() {
        assert!(ProbabilityConfig::default().check_ranges().is_ok());

        let config = ProbabilityConfig {
            p_whole: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.check_ranges(),
            Err(ConfigurationError::ProbabilityOutOfRange { key: "p_whole", .. })
        ));

        let config = ProbabilityConfig {
            lambda_split: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.check_ranges(),
            Err(ConfigurationError::InvalidRate { key: "lambda_split", .. })
        ));

        // Checked even though junctions are never drawn without p_gap/p_overlap.
        let config = ProbabilityConfig {
            lambda_junction: 1e20,
            p_gap: 0.0,
            p_overlap: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.check_ranges(),
            Err(ConfigurationError::RateTooLarge { key: "lambda_junction", .. })
        ));

        let config = ProbabilityConfig {
            lambda_host_del: MAX_RATE,
            ..Default::default()
        };
        assert!(config.check_ranges().is_ok());

        let config = ProbabilityConfig {
            lambda_junction: f64::NAN,
            ..Default::default()
        };
        assert!(config.check_ranges().is_err());

        let config = ProbabilityConfig {
            p_gap: 0.7,
            p_overlap: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.check_ranges(),
            Err(ConfigurationError::JunctionProbabilitySum(_))
        ));
    }

    #[test]
    fn test_from_json_str() {
        let json = serde_json::to_string(&ProbabilityConfig::default()).unwrap();
        let config = ProbabilityConfig::from_json_str(&json).unwrap();
        assert_eq!(config, ProbabilityConfig::default());

        let err = ProbabilityConfig::from_json_str(r#"{"p_whole": 0.5}"#).unwrap_err();
        assert!(err.is_configuration_error());

        let err = ProbabilityConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(
            err,
            EventsError::Config(ConfigurationError::Malformed(_))
        ));
    }
}

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The two kinds of event a session can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Integrations,
    Episomes,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integrations => write!(f, "integrations"),
            Self::Episomes => write!(f, "episomes"),
        }
    }
}

/// Malformed caller input.
///
/// These are programmer errors: they are reported before any randomness is
/// consumed or any session state is touched, and are never worth retrying
/// with the same arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("seed is required")]
    MissingSeed,
    #[error("seed must be a non-negative integer, got {0}")]
    NegativeSeed(i64),
    #[error("minimum fragment length is required")]
    MissingMinLength,
    #[error("minimum fragment length must be a positive integer, got {0}")]
    NonPositiveMinLength(i64),
    #[error("number of events must be non-negative, got {0}")]
    NegativeCount(i64),
    #[error("max_attempts must be positive, got {0}")]
    NonPositiveAttempts(i64),
    #[error("min_sep must be positive, got {0}")]
    NonPositiveSeparation(i64),
}

/// Data-dependent problems with a configuration.
///
/// The session stays usable after one of these; the caller can fix the
/// configuration and try again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("probability configuration is missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
    #[error("{key} must be between 0.0 and 1.0, got {value}")]
    ProbabilityOutOfRange { key: &'static str, value: f64 },
    #[error("{key} must be a positive, finite rate, got {value}")]
    InvalidRate { key: &'static str, value: f64 },
    #[error("{key} must not exceed {max:e}, got {value:e}")]
    RateTooLarge {
        key: &'static str,
        value: f64,
        max: f64,
    },
    #[error("p_gap + p_overlap must not exceed 1.0, got {0}")]
    JunctionProbabilitySum(f64),
    #[error(
        "junctions are expected to consume {expected:.2} bases, which does not fit in the \
         minimum fragment length of {min_len}; lower lambda_junction, p_gap or p_overlap"
    )]
    JunctionTooLong { expected: f64, min_len: usize },
    #[error("maximum fragment length ({max_len}) is smaller than the minimum ({min_len})")]
    LengthBounds { min_len: i64, max_len: i64 },
    #[error("invalid parameter file: {0}")]
    Malformed(String),
    #[error("{0} reference contains no sequence")]
    EmptyReference(&'static str),
}

/// Problems with the contents of a reference sequence store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("record '{0}' appears more than once")]
    DuplicateName(String),
    #[error("record '{name}' has a non-ASCII character at position {position}")]
    NonAscii { name: String, position: usize },
}

/// Error type for every fallible operation of a session.
#[derive(Debug, Error)]
pub enum EventsError {
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigurationError),

    #[error(
        "could only place {placed} of {requested} events after {max_attempts} consecutive \
         attempts; try fewer events or a smaller minimum separation"
    )]
    Capacity {
        requested: usize,
        placed: usize,
        max_attempts: usize,
    },

    #[error("{0} have already been generated for this session")]
    DuplicateGeneration(EventKind),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("FASTA parse error: {0}")]
    Parse(String),
}

impl EventsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for precondition failures.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }

    /// True for recoverable configuration problems.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// True if the input file could not be found or read.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EventsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_display() {
        let err = ConfigurationError::MissingKeys(vec!["p_gap", "p_overlap"]);
        assert_eq!(
            err.to_string(),
            "probability configuration is missing keys: p_gap, p_overlap"
        );
    }

    #[test]
    fn test_error_classification() {
        let contract: EventsError = ContractViolation::NegativeCount(-1).into();
        assert!(contract.is_contract_violation());
        assert!(!contract.is_configuration_error());

        let config: EventsError = ConfigurationError::JunctionProbabilitySum(1.5).into();
        assert!(config.is_configuration_error());

        let io = EventsError::io(
            "missing.fa",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(io.is_not_found());
        assert!(!io.is_configuration_error());
    }

    #[test]
    fn test_rate_too_large_display() {
        let err = ConfigurationError::RateTooLarge {
            key: "lambda_junction",
            value: 1e20,
            max: 1.844e19,
        };
        assert_eq!(
            err.to_string(),
            "lambda_junction must not exceed 1.844e19, got 1e20"
        );
    }

    #[test]
    fn test_duplicate_display() {
        let err = EventsError::DuplicateGeneration(EventKind::Episomes);
        assert_eq!(
            err.to_string(),
            "episomes have already been generated for this session"
        );
    }
}

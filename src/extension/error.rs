//! Gateway errors and the capabilities they name.

use std::fmt;

use thiserror::Error;

/// Capabilities the community tier lacks or only partly provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    MultiThreadedConstructionHeuristic,
    MultiThreadedLocalSearch,
    PartitionedSearch,
    NearbySelection,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MultiThreadedConstructionHeuristic => "Multi-threaded construction heuristic",
            Self::MultiThreadedLocalSearch => "Multi-threaded local search",
            Self::PartitionedSearch => "Partitioned search",
            Self::NearbySelection => "Nearby selection",
        };
        f.write_str(name)
    }
}

/// The solver extension service could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to resolve a solver extension service: {reason}")]
pub struct ResolutionError {
    reason: String,
}

impl ResolutionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors raised while obtaining a capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    /// No service could be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The running edition has no implementation of the capability.
    ///
    /// Not retriable: the configuration must stop asking for it.
    #[error("{capability} is not implemented in {edition}")]
    CapabilityUnavailable {
        /// The capability that was requested.
        capability: Capability,
        /// Edition that lacks it.
        edition: &'static str,
    },

    /// Building the capability failed for another reason.
    #[error("failed to build capability: {0}")]
    Construction(String),
}

//! Solver configuration consumed by the extension gateway.
//!
//! These are read-only views over the solver's configuration. The
//! community tier accepts all of them but only consults the parts it needs
//! to build plain single-threaded equivalents (log indentation, random seed,
//! environment mode). Advanced tiers read the rest.

mod error;
mod phase;
mod policy;
mod selector;

pub use error::ConfigError;
pub use phase::PartitionedSearchPhaseConfig;
pub use policy::{EnvironmentMode, HeuristicConfigPolicy, MoveThreadCount, DEFAULT_RANDOM_SEED};
pub use selector::{
    DestinationSelectorConfig, EntitySelectorConfig, NearbySelectionConfig,
    NearbySelectionDistributionType, SelectionCacheType, SelectionOrder, SubListSelectorConfig,
    ValueSelectorConfig,
};

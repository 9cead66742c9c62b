//! Configuration errors.

use thiserror::Error;

/// Errors raised while parsing or validating solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A move thread count was neither `NONE`, `AUTO` nor a positive integer.
    #[error("invalid move thread count {0:?}: expected NONE, AUTO or a positive integer")]
    InvalidMoveThreadCount(String),

    /// A resolved move thread count of zero was supplied.
    #[error("move thread count must be at least 1")]
    ZeroMoveThreadCount,

    /// A sub-list selector has `minimum_sub_list_size > maximum_sub_list_size`.
    #[error("minimum sub-list size {minimum} exceeds maximum sub-list size {maximum}")]
    SubListBounds {
        /// Configured minimum.
        minimum: usize,
        /// Configured maximum.
        maximum: usize,
    },
}

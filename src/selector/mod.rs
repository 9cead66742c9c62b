//! Selectors that feed move generation.
//!
//! Selectors enumerate the parts of a solution a move may touch: entities,
//! values for an entity's variable, sub-lists of a list variable, and
//! destinations in a list variable. Nearby selection wraps these to bias
//! selection by distance; the community tier leaves them untouched.

mod standard;
mod types;

pub use standard::{
    ElementDestinationSelector, FromEntityValueSelector, FromSolutionEntitySelector,
    RandomSubListSelector,
};
pub use types::{
    DestinationSelector, ElementPosition, EntityDescriptor, EntitySelector, SubList,
    SubListSelector, ValueSelector,
};

//! Construction heuristic deciders.
//!
//! A construction heuristic builds an initial solution one entity at a
//! time: the [`EntityPlacer`] offers the candidate placements for the next
//! entity and the [`ConstructionHeuristicForager`] picks one.

mod decider;
mod forager;

pub use decider::{
    ConstructionHeuristicDecider, ConstructionOutcome, DefaultConstructionHeuristicDecider,
    EntityPlacer,
};
pub use forager::{
    ConstructionHeuristicForager, ConstructionHeuristicPickEarlyType,
    DefaultConstructionHeuristicForager,
};

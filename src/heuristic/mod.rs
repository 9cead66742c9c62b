//! Building blocks shared by construction heuristics and local search.
//!
//! Costs are minimized throughout: a lower cost is a better solution.

mod scope;
mod termination;
mod types;

pub use scope::PhaseScope;
pub use termination::{
    BestCostTermination, ChildPhaseTermination, OrTermination, PhaseTermination,
    PhaseTerminationFactory, SolverTermination, StepCountTermination, TimeSpentTermination,
    UnimprovedStepCountTermination,
};
pub use types::{CandidateMove, Solution};

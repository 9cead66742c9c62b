//! Core trait for local search move generation.

use rand::RngCore;

use crate::heuristic::{CandidateMove, PhaseScope};

/// Generates the moves a local search step chooses from.
///
/// The neighborhood need not be exhaustive; a representative sample
/// (e.g., random subset) is acceptable. Implementations must draw all
/// randomness from `rng` so that a seeded run is reproducible.
pub trait MoveRepository<S>: Send {
    /// Called once before the first step of a phase.
    fn phase_started(&mut self, _scope: &PhaseScope) {}

    /// Generates candidate moves from the current solution.
    fn moves(&mut self, solution: &S, rng: &mut dyn RngCore) -> Vec<CandidateMove<S>>;
}

//! Construction heuristic deciders.

use rand::RngCore;

use super::forager::ConstructionHeuristicForager;
use crate::heuristic::{CandidateMove, PhaseScope, PhaseTermination, Solution};

/// Offers the candidate placements for one entity at a time.
pub trait EntityPlacer<S>: Send {
    /// Returns the placements for the next uninitialized entity, or `None`
    /// once every entity is placed.
    fn next_placement(&mut self, solution: &S, rng: &mut dyn RngCore)
        -> Option<Vec<CandidateMove<S>>>;
}

/// Result of a construction heuristic phase.
#[derive(Debug, Clone)]
pub struct ConstructionOutcome<S: Clone> {
    /// The constructed solution.
    pub solution: S,
    /// Its cost.
    pub cost: f64,
    /// Number of entities placed.
    pub steps: usize,
    /// Key of the placement picked at each step, in order.
    pub step_keys: Vec<String>,
}

/// Picks the placement for each construction step.
pub trait ConstructionHeuristicDecider<S: Solution>: Send {
    /// Termination checked before every step.
    fn termination(&self) -> &dyn PhaseTermination;

    /// Number of threads evaluating placements.
    fn move_thread_count(&self) -> usize;

    /// Picks one of the offered placements, or `None` if none was offered.
    fn decide_next_step(
        &mut self,
        scope: &PhaseScope,
        placement: Vec<CandidateMove<S>>,
    ) -> Option<CandidateMove<S>>;

    /// Places entities until the placer is exhausted or the termination fires.
    ///
    /// An entity with no placements ends the phase early.
    fn construct(
        &mut self,
        initial: S,
        initial_cost: f64,
        phase_index: usize,
        placer: &mut dyn EntityPlacer<S>,
        rng: &mut dyn RngCore,
    ) -> ConstructionOutcome<S> {
        let mut scope = PhaseScope::new(phase_index, initial_cost);
        let mut solution = initial;
        let mut step_keys = Vec::new();

        while !self.termination().is_phase_terminated(&scope) {
            let Some(placement) = placer.next_placement(&solution, rng) else {
                break;
            };
            let Some(step) = self.decide_next_step(&scope, placement) else {
                break;
            };
            scope.step_ended(step.cost);
            step_keys.push(step.key);
            solution = step.solution;
        }

        ConstructionOutcome {
            solution,
            cost: scope.last_step_cost,
            steps: scope.step_index,
            step_keys,
        }
    }
}

/// Single-threaded construction heuristic decider.
pub struct DefaultConstructionHeuristicDecider<S> {
    log_indentation: String,
    termination: Box<dyn PhaseTermination>,
    forager: Box<dyn ConstructionHeuristicForager<S>>,
}

impl<S: Solution> DefaultConstructionHeuristicDecider<S> {
    pub fn new(
        log_indentation: impl Into<String>,
        termination: Box<dyn PhaseTermination>,
        forager: Box<dyn ConstructionHeuristicForager<S>>,
    ) -> Self {
        Self {
            log_indentation: log_indentation.into(),
            termination,
            forager,
        }
    }
}

impl<S: Solution> ConstructionHeuristicDecider<S> for DefaultConstructionHeuristicDecider<S> {
    fn termination(&self) -> &dyn PhaseTermination {
        self.termination.as_ref()
    }

    fn move_thread_count(&self) -> usize {
        1
    }

    fn decide_next_step(
        &mut self,
        scope: &PhaseScope,
        placement: Vec<CandidateMove<S>>,
    ) -> Option<CandidateMove<S>> {
        self.forager.step_started(scope);
        for candidate in placement {
            self.forager.add_move(candidate);
            if self.forager.is_quit_early() {
                break;
            }
        }
        let picked = self.forager.pick_move()?;
        log::trace!(
            "{}    CH step ({}), picked move ({}) with cost ({}).",
            self.log_indentation,
            scope.step_index,
            picked.key,
            picked.cost
        );
        Some(picked)
    }
}

//! Phase and solver terminations.

use std::sync::Arc;
use std::time::Duration;

use super::scope::PhaseScope;
use crate::config::HeuristicConfigPolicy;

/// Decides when a phase stops taking steps.
pub trait PhaseTermination: Send + Sync {
    /// Returns `true` once the phase must stop.
    fn is_phase_terminated(&self, scope: &PhaseScope) -> bool;
}

/// Decides when the whole solve stops.
///
/// Shared between phases, so implementations are behind an [`Arc`].
pub trait SolverTermination: Send + Sync {
    /// Returns `true` once the solver must stop given the best cost so far.
    fn is_solver_terminated(&self, best_cost: f64) -> bool;
}

/// Builds a phase-level termination from the solver policy and the solver termination.
pub type PhaseTerminationFactory =
    dyn Fn(&HeuristicConfigPolicy, Arc<dyn SolverTermination>) -> Box<dyn PhaseTermination> + Send + Sync;

/// Stops after a fixed number of steps.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    pub step_count_limit: usize,
}

impl StepCountTermination {
    pub fn new(step_count_limit: usize) -> Self {
        Self { step_count_limit }
    }
}

impl PhaseTermination for StepCountTermination {
    fn is_phase_terminated(&self, scope: &PhaseScope) -> bool {
        scope.step_index >= self.step_count_limit
    }
}

/// Stops after a number of steps without improving the best cost.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedStepCountTermination {
    pub unimproved_step_count_limit: usize,
}

impl UnimprovedStepCountTermination {
    pub fn new(unimproved_step_count_limit: usize) -> Self {
        Self {
            unimproved_step_count_limit,
        }
    }
}

impl PhaseTermination for UnimprovedStepCountTermination {
    fn is_phase_terminated(&self, scope: &PhaseScope) -> bool {
        scope.unimproved_step_count() >= self.unimproved_step_count_limit
    }
}

/// Stops once the phase has run for a wall-clock duration.
#[derive(Debug, Clone, Copy)]
pub struct TimeSpentTermination {
    pub limit: Duration,
}

impl TimeSpentTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }
}

impl PhaseTermination for TimeSpentTermination {
    fn is_phase_terminated(&self, scope: &PhaseScope) -> bool {
        scope.elapsed() >= self.limit
    }
}

/// Stops the solver once the best cost reaches a target.
#[derive(Debug, Clone, Copy)]
pub struct BestCostTermination {
    pub best_cost_limit: f64,
}

impl BestCostTermination {
    pub fn new(best_cost_limit: f64) -> Self {
        Self { best_cost_limit }
    }
}

impl SolverTermination for BestCostTermination {
    fn is_solver_terminated(&self, best_cost: f64) -> bool {
        best_cost <= self.best_cost_limit
    }
}

/// Phase view over a solver termination.
#[derive(Clone)]
pub struct ChildPhaseTermination {
    solver_termination: Arc<dyn SolverTermination>,
}

impl ChildPhaseTermination {
    pub fn new(solver_termination: Arc<dyn SolverTermination>) -> Self {
        Self { solver_termination }
    }
}

impl PhaseTermination for ChildPhaseTermination {
    fn is_phase_terminated(&self, scope: &PhaseScope) -> bool {
        self.solver_termination.is_solver_terminated(scope.best_cost)
    }
}

/// Stops as soon as any child termination does.
#[derive(Default)]
pub struct OrTermination {
    terminations: Vec<Box<dyn PhaseTermination>>,
}

impl OrTermination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, termination: impl PhaseTermination + 'static) -> Self {
        self.terminations.push(Box::new(termination));
        self
    }
}

impl PhaseTermination for OrTermination {
    fn is_phase_terminated(&self, scope: &PhaseScope) -> bool {
        self.terminations
            .iter()
            .any(|termination| termination.is_phase_terminated(scope))
    }
}

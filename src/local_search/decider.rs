//! Local search deciders.

use rand::RngCore;

use super::acceptor::Acceptor;
use super::forager::LocalSearchForager;
use super::types::MoveRepository;
use crate::config::EnvironmentMode;
use crate::heuristic::{CandidateMove, PhaseScope, PhaseTermination, Solution};

/// Result of a local search phase.
#[derive(Debug, Clone)]
pub struct LocalSearchOutcome<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Total steps executed.
    pub steps: usize,
    /// Key of the move picked at each step, in order.
    pub step_keys: Vec<String>,
    /// Best cost after each step.
    pub cost_history: Vec<f64>,
}

/// Picks the move to apply at each local search step.
///
/// Tiers differ in how candidate moves are evaluated (on the solver thread
/// or on move threads) but not in which move is picked: for the same
/// components and seed, every implementation takes the same steps.
pub trait LocalSearchDecider<S: Solution>: Send {
    /// Termination checked before every step.
    fn termination(&self) -> &dyn PhaseTermination;

    /// Number of threads evaluating moves.
    fn move_thread_count(&self) -> usize;

    /// Called once before the first step of a phase.
    fn phase_started(&mut self, scope: &PhaseScope);

    /// Picks the next step's move, or `None` if no move was accepted.
    fn decide_next_step(
        &mut self,
        current: &S,
        scope: &PhaseScope,
        rng: &mut dyn RngCore,
    ) -> Option<CandidateMove<S>>;

    /// Runs a whole phase from `initial` until the termination fires or no
    /// move is accepted.
    fn solve(
        &mut self,
        initial: S,
        initial_cost: f64,
        phase_index: usize,
        rng: &mut dyn RngCore,
    ) -> LocalSearchOutcome<S> {
        let mut scope = PhaseScope::new(phase_index, initial_cost);
        self.phase_started(&scope);

        let mut current = initial;
        let mut best = current.clone();
        let mut step_keys = Vec::new();
        let mut cost_history = Vec::new();

        while !self.termination().is_phase_terminated(&scope) {
            let Some(step) = self.decide_next_step(&current, &scope, rng) else {
                break;
            };
            let improved = scope.step_ended(step.cost);
            step_keys.push(step.key);
            current = step.solution;
            if improved {
                best = current.clone();
            }
            cost_history.push(scope.best_cost);
        }

        LocalSearchOutcome {
            best,
            best_cost: scope.best_cost,
            steps: scope.step_index,
            step_keys,
            cost_history,
        }
    }
}

/// Single-threaded local search decider.
pub struct DefaultLocalSearchDecider<S> {
    log_indentation: String,
    termination: Box<dyn PhaseTermination>,
    move_repository: Box<dyn MoveRepository<S>>,
    acceptor: Box<dyn Acceptor<S>>,
    forager: Box<dyn LocalSearchForager<S>>,
    environment_mode: EnvironmentMode,
}

impl<S: Solution> DefaultLocalSearchDecider<S> {
    pub fn new(
        log_indentation: impl Into<String>,
        termination: Box<dyn PhaseTermination>,
        move_repository: Box<dyn MoveRepository<S>>,
        acceptor: Box<dyn Acceptor<S>>,
        forager: Box<dyn LocalSearchForager<S>>,
    ) -> Self {
        Self {
            log_indentation: log_indentation.into(),
            termination,
            move_repository,
            acceptor,
            forager,
            environment_mode: EnvironmentMode::default(),
        }
    }

    /// Sets the environment mode. Asserted modes discard moves with a NaN cost.
    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }
}

impl<S: Solution> LocalSearchDecider<S> for DefaultLocalSearchDecider<S> {
    fn termination(&self) -> &dyn PhaseTermination {
        self.termination.as_ref()
    }

    fn move_thread_count(&self) -> usize {
        1
    }

    fn phase_started(&mut self, scope: &PhaseScope) {
        self.move_repository.phase_started(scope);
        self.acceptor.phase_started(scope);
    }

    fn decide_next_step(
        &mut self,
        current: &S,
        scope: &PhaseScope,
        rng: &mut dyn RngCore,
    ) -> Option<CandidateMove<S>> {
        self.forager.step_started(scope);
        let candidates = self.move_repository.moves(current, rng);
        let mut evaluated = 0usize;

        for candidate in candidates {
            evaluated += 1;
            if self.environment_mode.is_asserted() && candidate.cost.is_nan() {
                log::warn!(
                    "{}    Move ({}) has a NaN cost in environment mode ({:?}); discarding it.",
                    self.log_indentation,
                    candidate.key,
                    self.environment_mode
                );
                continue;
            }
            if self.acceptor.is_accepted(scope, &candidate, rng) {
                self.forager.add_move(candidate);
                if self.forager.is_quit_early() {
                    break;
                }
            }
        }

        let Some(picked) = self.forager.pick_move() else {
            log::trace!(
                "{}    LS step ({}), no move accepted out of ({}) evaluated.",
                self.log_indentation,
                scope.step_index,
                evaluated
            );
            return None;
        };
        self.acceptor.step_ended(scope, &picked);
        log::trace!(
            "{}    LS step ({}), picked move ({}) with cost ({}), evaluated ({}).",
            self.log_indentation,
            scope.step_index,
            picked.key,
            picked.cost,
            evaluated
        );
        Some(picked)
    }
}

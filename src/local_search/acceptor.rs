//! Move acceptance criteria.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Kirkpatrick, S., Gelatt, C. D. & Vecchi, M. P. (1983). "Optimization by
//!   Simulated Annealing", *Science* 220(4598), 671-680.

use std::collections::{HashSet, VecDeque};

use rand::{Rng, RngCore};

use crate::heuristic::{CandidateMove, PhaseScope};

/// Decides whether a candidate move may be picked in this step.
pub trait Acceptor<S>: Send {
    /// Called once before the first step of a phase.
    fn phase_started(&mut self, _scope: &PhaseScope) {}

    /// Returns `true` if the forager may consider `candidate`.
    fn is_accepted(
        &mut self,
        scope: &PhaseScope,
        candidate: &CandidateMove<S>,
        rng: &mut dyn RngCore,
    ) -> bool;

    /// Called with the move the forager picked.
    fn step_ended(&mut self, _scope: &PhaseScope, _picked: &CandidateMove<S>) {}
}

/// Accepts moves that do not worsen the last step's cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl<S> Acceptor<S> for HillClimbingAcceptor {
    fn is_accepted(
        &mut self,
        scope: &PhaseScope,
        candidate: &CandidateMove<S>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        candidate.cost <= scope.last_step_cost
    }
}

/// Rejects moves whose key was picked within the last `tenure` steps.
///
/// With aspiration enabled, a tabu move is still accepted when it would
/// produce a new best cost.
#[derive(Debug, Clone)]
pub struct TabuAcceptor {
    tenure: usize,
    aspiration: bool,
    // FIFO queue of move keys with a set for O(1) lookup
    tabu_queue: VecDeque<String>,
    tabu_set: HashSet<String>,
}

impl Default for TabuAcceptor {
    fn default() -> Self {
        Self::new(7)
    }
}

impl TabuAcceptor {
    /// Creates an acceptor with aspiration enabled.
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            aspiration: true,
            tabu_queue: VecDeque::new(),
            tabu_set: HashSet::new(),
        }
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn is_tabu(&self, key: &str) -> bool {
        self.tabu_set.contains(key)
    }
}

impl<S> Acceptor<S> for TabuAcceptor {
    fn phase_started(&mut self, _scope: &PhaseScope) {
        self.tabu_queue.clear();
        self.tabu_set.clear();
    }

    fn is_accepted(
        &mut self,
        scope: &PhaseScope,
        candidate: &CandidateMove<S>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        if !self.tabu_set.contains(&candidate.key) {
            return true;
        }
        self.aspiration && candidate.cost < scope.best_cost
    }

    fn step_ended(&mut self, _scope: &PhaseScope, picked: &CandidateMove<S>) {
        if self.tabu_set.insert(picked.key.clone()) {
            self.tabu_queue.push_back(picked.key.clone());
        }
        while self.tabu_queue.len() > self.tenure {
            if let Some(old_key) = self.tabu_queue.pop_front() {
                self.tabu_set.remove(&old_key);
            }
        }
    }
}

/// Metropolis acceptance with geometric cooling applied after each step.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    cooling_rate: f64,
    temperature: f64,
}

impl SimulatedAnnealingAcceptor {
    /// Creates an acceptor. `cooling_rate` is the per-step factor in (0, 1).
    pub fn new(starting_temperature: f64, cooling_rate: f64) -> Self {
        Self {
            starting_temperature,
            cooling_rate,
            temperature: starting_temperature,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl<S> Acceptor<S> for SimulatedAnnealingAcceptor {
    fn phase_started(&mut self, _scope: &PhaseScope) {
        self.temperature = self.starting_temperature;
    }

    fn is_accepted(
        &mut self,
        scope: &PhaseScope,
        candidate: &CandidateMove<S>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let delta = candidate.cost - scope.last_step_cost;
        if delta <= 0.0 {
            return true;
        }
        if self.temperature <= 0.0 {
            return false;
        }
        let probability = (-delta / self.temperature).exp();
        rng.random_range(0.0..1.0) < probability
    }

    fn step_ended(&mut self, _scope: &PhaseScope, _picked: &CandidateMove<S>) {
        self.temperature *= self.cooling_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate(key: &str, cost: f64) -> CandidateMove<()> {
        CandidateMove::new((), key, cost)
    }

    #[test]
    fn test_hill_climbing_rejects_worsening() {
        let mut acceptor = HillClimbingAcceptor;
        let scope = PhaseScope::new(0, 10.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(acceptor.is_accepted(&scope, &candidate("a", 9.0), &mut rng));
        assert!(acceptor.is_accepted(&scope, &candidate("b", 10.0), &mut rng));
        assert!(!acceptor.is_accepted(&scope, &candidate("c", 10.5), &mut rng));
        assert!(!acceptor.is_accepted(&scope, &candidate("nan", f64::NAN), &mut rng));
    }

    #[test]
    fn test_tabu_rejects_recent_keys() {
        let mut acceptor = TabuAcceptor::new(2).with_aspiration(false);
        let scope = PhaseScope::new(0, 10.0);
        let mut rng = StdRng::seed_from_u64(1);

        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("a", 9.0));
        assert!(!acceptor.is_accepted(&scope, &candidate("a", 1.0), &mut rng));
        assert!(acceptor.is_accepted(&scope, &candidate("b", 11.0), &mut rng));

        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("b", 9.0));
        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("c", 9.0));
        // "a" fell out of the tenure window
        assert!(!acceptor.is_tabu("a"));
        assert!(acceptor.is_tabu("b"));
        assert!(acceptor.is_tabu("c"));
    }

    #[test]
    fn test_tabu_aspiration_overrides_for_new_best() {
        let mut acceptor = TabuAcceptor::new(5);
        let scope = PhaseScope::new(0, 10.0);
        let mut rng = StdRng::seed_from_u64(1);
        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("a", 9.0));
        assert!(acceptor.is_accepted(&scope, &candidate("a", 5.0), &mut rng));
        assert!(!acceptor.is_accepted(&scope, &candidate("a", 10.0), &mut rng));
    }

    #[test]
    fn test_tabu_zero_tenure_never_tabu() {
        let mut acceptor = TabuAcceptor::new(0);
        let scope = PhaseScope::new(0, 10.0);
        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("a", 9.0));
        assert!(!acceptor.is_tabu("a"));
    }

    #[test]
    fn test_tabu_phase_started_clears() {
        let mut acceptor = TabuAcceptor::new(3);
        let scope = PhaseScope::new(0, 10.0);
        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("a", 9.0));
        Acceptor::<()>::phase_started(&mut acceptor, &scope);
        assert!(!acceptor.is_tabu("a"));
    }

    #[test]
    fn test_annealing_always_accepts_improvement() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(0.0, 0.5);
        let scope = PhaseScope::new(0, 10.0);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(acceptor.is_accepted(&scope, &candidate("a", 9.0), &mut rng));
        // Zero temperature rejects every worsening move
        assert!(!acceptor.is_accepted(&scope, &candidate("b", 10.1), &mut rng));
    }

    #[test]
    fn test_annealing_cools_and_resets() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(100.0, 0.5);
        let scope = PhaseScope::new(0, 10.0);
        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("a", 9.0));
        Acceptor::<()>::step_ended(&mut acceptor, &scope, &candidate("a", 9.0));
        assert!((acceptor.temperature() - 25.0).abs() < 1e-12);
        Acceptor::<()>::phase_started(&mut acceptor, &scope);
        assert!((acceptor.temperature() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_annealing_high_temperature_accepts_small_worsening() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1e9, 0.99);
        let scope = PhaseScope::new(0, 10.0);
        let mut rng = StdRng::seed_from_u64(5);
        let accepted = (0..100)
            .filter(|_| acceptor.is_accepted(&scope, &candidate("w", 10.001), &mut rng))
            .count();
        assert!(accepted > 95, "accepted only {accepted} of 100");
    }
}

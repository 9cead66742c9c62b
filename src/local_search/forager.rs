//! Local search foragers.

use crate::heuristic::{CandidateMove, PhaseScope};

/// When a forager may stop gathering and pick immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LocalSearchPickEarlyType {
    /// Always evaluate up to the accepted count limit.
    #[default]
    Never,
    /// Pick the first accepted move that beats the phase's best cost.
    FirstBestScoreImproving,
    /// Pick the first accepted move that beats the last step's cost.
    FirstLastStepScoreImproving,
}

/// Collects accepted moves during a step and picks the one to apply.
pub trait LocalSearchForager<S>: Send {
    /// Resets the forager for a new step.
    fn step_started(&mut self, scope: &PhaseScope);

    /// Offers an accepted move.
    fn add_move(&mut self, candidate: CandidateMove<S>);

    /// Returns `true` when no further moves need to be offered this step.
    fn is_quit_early(&self) -> bool;

    /// Takes the picked move, if any move was accepted.
    fn pick_move(&mut self) -> Option<CandidateMove<S>>;
}

/// Picks the lowest-cost accepted move, evaluating at most
/// `accepted_count_limit` accepted moves per step.
///
/// Ties keep the earliest move, so the pick is deterministic for a
/// deterministic move order.
#[derive(Debug, Clone)]
pub struct AcceptedCountForager<S> {
    accepted_count_limit: usize,
    pick_early: LocalSearchPickEarlyType,
    best_cost: f64,
    last_step_cost: f64,
    accepted_count: usize,
    picked_early: bool,
    winner: Option<CandidateMove<S>>,
}

impl<S> Default for AcceptedCountForager<S> {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl<S> AcceptedCountForager<S> {
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit,
            pick_early: LocalSearchPickEarlyType::Never,
            best_cost: f64::INFINITY,
            last_step_cost: f64::INFINITY,
            accepted_count: 0,
            picked_early: false,
            winner: None,
        }
    }

    pub fn with_pick_early(mut self, pick_early: LocalSearchPickEarlyType) -> Self {
        self.pick_early = pick_early;
        self
    }

    fn is_early_pick(&self, cost: f64) -> bool {
        match self.pick_early {
            LocalSearchPickEarlyType::Never => false,
            LocalSearchPickEarlyType::FirstBestScoreImproving => cost < self.best_cost,
            LocalSearchPickEarlyType::FirstLastStepScoreImproving => cost < self.last_step_cost,
        }
    }
}

impl<S: Send> LocalSearchForager<S> for AcceptedCountForager<S> {
    fn step_started(&mut self, scope: &PhaseScope) {
        self.best_cost = scope.best_cost;
        self.last_step_cost = scope.last_step_cost;
        self.accepted_count = 0;
        self.picked_early = false;
        self.winner = None;
    }

    fn add_move(&mut self, candidate: CandidateMove<S>) {
        self.accepted_count += 1;
        if self.is_early_pick(candidate.cost) {
            self.picked_early = true;
            self.winner = Some(candidate);
            return;
        }
        let replaces = match &self.winner {
            Some(current) => candidate.cost < current.cost,
            None => true,
        };
        if replaces {
            self.winner = Some(candidate);
        }
    }

    fn is_quit_early(&self) -> bool {
        self.picked_early || self.accepted_count >= self.accepted_count_limit
    }

    fn pick_move(&mut self) -> Option<CandidateMove<S>> {
        self.winner.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(key: &str, cost: f64) -> CandidateMove<()> {
        CandidateMove::new((), key, cost)
    }

    #[test]
    fn test_picks_lowest_cost_first_on_ties() {
        let mut forager = AcceptedCountForager::default();
        forager.step_started(&PhaseScope::new(0, 10.0));
        forager.add_move(candidate("a", 7.0));
        forager.add_move(candidate("b", 5.0));
        forager.add_move(candidate("c", 5.0));
        forager.add_move(candidate("d", 6.0));
        assert!(!forager.is_quit_early());
        assert_eq!(forager.pick_move().map(|m| m.key), Some("b".to_owned()));
        assert!(forager.pick_move().is_none());
    }

    #[test]
    fn test_accepted_count_limit_quits_early() {
        let mut forager = AcceptedCountForager::new(2);
        forager.step_started(&PhaseScope::new(0, 10.0));
        forager.add_move(candidate("a", 9.0));
        assert!(!forager.is_quit_early());
        forager.add_move(candidate("b", 8.0));
        assert!(forager.is_quit_early());
    }

    #[test]
    fn test_first_last_step_improving_picks_early() {
        let mut forager = AcceptedCountForager::default()
            .with_pick_early(LocalSearchPickEarlyType::FirstLastStepScoreImproving);
        let mut scope = PhaseScope::new(0, 10.0);
        scope.step_ended(12.0);
        forager.step_started(&scope);
        forager.add_move(candidate("worse", 13.0));
        assert!(!forager.is_quit_early());
        forager.add_move(candidate("better", 11.0));
        assert!(forager.is_quit_early());
        assert_eq!(forager.pick_move().map(|m| m.key), Some("better".to_owned()));
    }

    #[test]
    fn test_first_best_improving_requires_new_best() {
        let mut forager = AcceptedCountForager::default()
            .with_pick_early(LocalSearchPickEarlyType::FirstBestScoreImproving);
        let mut scope = PhaseScope::new(0, 10.0);
        scope.step_ended(12.0);
        forager.step_started(&scope);
        forager.add_move(candidate("a", 11.0));
        assert!(!forager.is_quit_early());
        forager.add_move(candidate("b", 9.0));
        assert!(forager.is_quit_early());
    }

    #[test]
    fn test_step_started_resets() {
        let mut forager = AcceptedCountForager::new(1);
        forager.step_started(&PhaseScope::new(0, 10.0));
        forager.add_move(candidate("a", 9.0));
        assert!(forager.is_quit_early());
        forager.step_started(&PhaseScope::new(0, 10.0));
        assert!(!forager.is_quit_early());
        assert!(forager.pick_move().is_none());
    }
}

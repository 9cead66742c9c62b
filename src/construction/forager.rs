//! Construction heuristic foragers.

use crate::heuristic::{CandidateMove, PhaseScope};

/// When a construction forager may stop evaluating placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ConstructionHeuristicPickEarlyType {
    /// Evaluate every placement and take the cheapest.
    #[default]
    Never,
    /// Take the first placement that does not raise the cost.
    FirstNonDeterioratingScore,
}

/// Picks one placement out of those offered for an entity.
pub trait ConstructionHeuristicForager<S>: Send {
    /// Resets the forager for a new step.
    fn step_started(&mut self, scope: &PhaseScope);

    /// Offers a placement.
    fn add_move(&mut self, candidate: CandidateMove<S>);

    /// Returns `true` when no further placements need to be offered.
    fn is_quit_early(&self) -> bool;

    /// Takes the picked placement, if any was offered.
    fn pick_move(&mut self) -> Option<CandidateMove<S>>;
}

/// Best-fit forager with optional early picking.
#[derive(Debug, Clone)]
pub struct DefaultConstructionHeuristicForager<S> {
    pick_early: ConstructionHeuristicPickEarlyType,
    last_step_cost: f64,
    picked_early: bool,
    winner: Option<CandidateMove<S>>,
}

impl<S> Default for DefaultConstructionHeuristicForager<S> {
    fn default() -> Self {
        Self::new(ConstructionHeuristicPickEarlyType::Never)
    }
}

impl<S> DefaultConstructionHeuristicForager<S> {
    pub fn new(pick_early: ConstructionHeuristicPickEarlyType) -> Self {
        Self {
            pick_early,
            last_step_cost: f64::INFINITY,
            picked_early: false,
            winner: None,
        }
    }
}

impl<S: Send> ConstructionHeuristicForager<S> for DefaultConstructionHeuristicForager<S> {
    fn step_started(&mut self, scope: &PhaseScope) {
        self.last_step_cost = scope.last_step_cost;
        self.picked_early = false;
        self.winner = None;
    }

    fn add_move(&mut self, candidate: CandidateMove<S>) {
        if self.pick_early == ConstructionHeuristicPickEarlyType::FirstNonDeterioratingScore
            && candidate.cost <= self.last_step_cost
        {
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
        self.picked_early
    }

    fn pick_move(&mut self) -> Option<CandidateMove<S>> {
        self.winner.take()
    }
}

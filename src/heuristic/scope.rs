use std::time::{Duration, Instant};

/// Progress of a single phase, updated after every step.
#[derive(Debug, Clone)]
pub struct PhaseScope {
    /// Position of the phase within the solver.
    pub phase_index: usize,
    /// Number of steps completed so far.
    pub step_index: usize,
    /// Cost of the solution after the last step.
    pub last_step_cost: f64,
    /// Lowest cost seen in this phase.
    pub best_cost: f64,
    /// Step at which `best_cost` was reached.
    pub best_step_index: usize,
    started_at: Instant,
}

impl PhaseScope {
    /// Starts a phase from a solution with the given cost.
    pub fn new(phase_index: usize, initial_cost: f64) -> Self {
        Self {
            phase_index,
            step_index: 0,
            last_step_cost: initial_cost,
            best_cost: initial_cost,
            best_step_index: 0,
            started_at: Instant::now(),
        }
    }

    /// Records a completed step. Returns whether it improved the best cost.
    pub fn step_ended(&mut self, cost: f64) -> bool {
        self.step_index += 1;
        self.last_step_cost = cost;
        if cost < self.best_cost {
            self.best_cost = cost;
            self.best_step_index = self.step_index;
            true
        } else {
            false
        }
    }

    /// Steps taken since the best cost last improved.
    pub fn unimproved_step_count(&self) -> usize {
        self.step_index - self.best_step_index
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ended_tracks_best() {
        let mut scope = PhaseScope::new(0, 10.0);
        assert!(scope.step_ended(8.0));
        assert!(!scope.step_ended(9.0));
        assert!(!scope.step_ended(8.0));
        assert_eq!(scope.step_index, 3);
        assert_eq!(scope.best_step_index, 1);
        assert_eq!(scope.unimproved_step_count(), 2);
        assert!((scope.best_cost - 8.0).abs() < 1e-12);
        assert!((scope.last_step_cost - 8.0).abs() < 1e-12);
    }
}

//! Solution marker and candidate moves.

/// A working solution the engine can hand between phases and threads.
///
/// Blanket-implemented for every `Clone + Send + 'static` type.
pub trait Solution: Clone + Send + 'static {}

impl<T: Clone + Send + 'static> Solution for T {}

/// A move that transforms the current solution into another one.
///
/// The `key` identifies the move for tabu tracking and step logging. Moves
/// with the same key are considered equivalent (e.g. "swap(3,7)" and
/// "swap(7,3)").
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMove<S> {
    /// The resulting solution after applying this move.
    pub solution: S,
    /// A key identifying this move.
    pub key: String,
    /// Cost of the resulting solution.
    pub cost: f64,
}

impl<S> CandidateMove<S> {
    pub fn new(solution: S, key: impl Into<String>, cost: f64) -> Self {
        Self {
            solution,
            key: key.into(),
            cost,
        }
    }
}

//! Partitioned search.
//!
//! A partitioned search phase splits the solution into parts, solves each
//! part on its own thread and merges the results. There is no community
//! implementation: requesting one through the gateway yields
//! [`ExtensionError::CapabilityUnavailable`].
//!
//! [`ExtensionError::CapabilityUnavailable`]: crate::extension::ExtensionError::CapabilityUnavailable

/// A phase that solves partitions of the working solution.
pub trait PartitionedSearchPhase<S>: Send {
    /// Position of the phase within the solver.
    fn phase_index(&self) -> usize;

    /// Solves every partition of `solution` and returns the merged result.
    fn solve(&mut self, solution: S) -> S;
}

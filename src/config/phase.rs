//! Phase configuration.

/// Partitioned search phase settings.
///
/// Accepted by the gateway so that an advanced tier can split the solution
/// into parts and solve them on separate threads. The community tier has no
/// partitioned search.
///
/// # Examples
///
/// ```
/// use u_metaheur_ext::config::PartitionedSearchPhaseConfig;
///
/// let config = PartitionedSearchPhaseConfig::default()
///     .with_solution_partitioner("by-region")
///     .with_runnable_part_thread_limit(2)
///     .with_phase("construction-heuristic")
///     .with_phase("local-search");
/// assert_eq!(config.phases.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionedSearchPhaseConfig {
    /// Name of the partitioner the host registers.
    pub solution_partitioner: Option<String>,
    /// Maximum number of parts solved concurrently. `None` means unlimited.
    pub runnable_part_thread_limit: Option<usize>,
    /// Names of the phases each part runs.
    pub phases: Vec<String>,
}

impl PartitionedSearchPhaseConfig {
    pub fn with_solution_partitioner(mut self, name: impl Into<String>) -> Self {
        self.solution_partitioner = Some(name.into());
        self
    }

    pub fn with_runnable_part_thread_limit(mut self, limit: usize) -> Self {
        self.runnable_part_thread_limit = Some(limit);
        self
    }

    pub fn with_phase(mut self, name: impl Into<String>) -> Self {
        self.phases.push(name.into());
        self
    }
}

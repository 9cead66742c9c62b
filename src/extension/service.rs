//! The capability contract and the resilient lookup built on it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::default::DefaultSolverExtensionService;
use super::error::{ExtensionError, ResolutionError};
use crate::config::{
    DestinationSelectorConfig, EntitySelectorConfig, EnvironmentMode, HeuristicConfigPolicy,
    NearbySelectionConfig, PartitionedSearchPhaseConfig, SelectionCacheType, SelectionOrder,
    SubListSelectorConfig, ValueSelectorConfig,
};
use crate::constraint::ConstraintProviderClass;
use crate::construction::{ConstructionHeuristicDecider, ConstructionHeuristicForager};
use crate::graph::TopologicalOrderGraph;
use crate::heuristic::{PhaseTermination, PhaseTerminationFactory, Solution, SolverTermination};
use crate::local_search::{Acceptor, LocalSearchDecider, LocalSearchForager, MoveRepository};
use crate::partitioned::PartitionedSearchPhase;
use crate::selector::{
    DestinationSelector, EntityDescriptor, EntitySelector, SubListSelector, ValueSelector,
};

/// Builds the optional capabilities of the solver.
///
/// Phase builders never ask whether an advanced tier is installed. They
/// call the same operation and receive either an accelerated implementation
/// or a behaviorally equivalent plain one. The only exception is
/// [`build_partitioned_search`], which has no plain equivalent and fails
/// with [`ExtensionError::CapabilityUnavailable`] when absent.
///
/// [`build_partitioned_search`]: SolverExtensionService::build_partitioned_search
pub trait SolverExtensionService<S: Solution>: Send + Sync {
    /// Builds a graph with `size` nodes and no edges.
    fn build_topology_graph(&self, size: usize) -> Box<dyn TopologicalOrderGraph>;

    /// Returns the constraint provider class to instantiate per solver thread.
    fn build_lambda_shared_constraint_provider(
        &self,
        original_constraint_provider: ConstraintProviderClass,
    ) -> ConstraintProviderClass;

    fn build_construction_heuristic(
        &self,
        termination: Box<dyn PhaseTermination>,
        forager: Box<dyn ConstructionHeuristicForager<S>>,
        config_policy: &HeuristicConfigPolicy,
    ) -> Box<dyn ConstructionHeuristicDecider<S>>;

    #[allow(clippy::too_many_arguments)]
    fn build_local_search(
        &self,
        move_thread_count: usize,
        termination: Box<dyn PhaseTermination>,
        move_repository: Box<dyn MoveRepository<S>>,
        acceptor: Box<dyn Acceptor<S>>,
        forager: Box<dyn LocalSearchForager<S>>,
        environment_mode: EnvironmentMode,
        config_policy: &HeuristicConfigPolicy,
    ) -> Box<dyn LocalSearchDecider<S>>;

    fn build_partitioned_search(
        &self,
        phase_index: usize,
        phase_config: &PartitionedSearchPhaseConfig,
        solver_config_policy: &HeuristicConfigPolicy,
        solver_termination: Arc<dyn SolverTermination>,
        phase_termination_factory: &PhaseTerminationFactory,
    ) -> Result<Box<dyn PartitionedSearchPhase<S>>, ExtensionError>;

    fn apply_nearby_entity_selection(
        &self,
        entity_selector_config: &EntitySelectorConfig,
        config_policy: &HeuristicConfigPolicy,
        nearby_selection_config: &NearbySelectionConfig,
        minimum_cache_type: SelectionCacheType,
        resolved_selection_order: SelectionOrder,
        entity_selector: Box<dyn EntitySelector<S>>,
    ) -> Box<dyn EntitySelector<S>>;

    fn apply_nearby_value_selection(
        &self,
        value_selector_config: &ValueSelectorConfig,
        config_policy: &HeuristicConfigPolicy,
        entity_descriptor: &EntityDescriptor,
        minimum_cache_type: SelectionCacheType,
        resolved_selection_order: SelectionOrder,
        value_selector: Box<dyn ValueSelector<S>>,
    ) -> Box<dyn ValueSelector<S>>;

    fn apply_nearby_sub_list_selection(
        &self,
        sub_list_selector_config: &SubListSelectorConfig,
        config_policy: &HeuristicConfigPolicy,
        minimum_cache_type: SelectionCacheType,
        resolved_selection_order: SelectionOrder,
        sub_list_selector: Box<dyn SubListSelector<S>>,
    ) -> Box<dyn SubListSelector<S>>;

    fn apply_nearby_destination_selection(
        &self,
        destination_selector_config: &DestinationSelectorConfig,
        config_policy: &HeuristicConfigPolicy,
        minimum_cache_type: SelectionCacheType,
        resolved_selection_order: SelectionOrder,
        destination_selector: Box<dyn DestinationSelector<S>>,
    ) -> Box<dyn DestinationSelector<S>>;
}

/// Discovers the service implementation for the running process.
pub trait ServiceResolver<S: Solution> {
    fn resolve(&self) -> Result<Box<dyn SolverExtensionService<S>>, ResolutionError>;
}

/// Resolves the community tier. Constructs a fresh service on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultServiceResolver;

impl<S: Solution> ServiceResolver<S> for DefaultServiceResolver {
    fn resolve(&self) -> Result<Box<dyn SolverExtensionService<S>>, ResolutionError> {
        Ok(Box::new(DefaultSolverExtensionService::new()))
    }
}

impl<S, F> ServiceResolver<S> for F
where
    S: Solution,
    F: Fn() -> Result<Box<dyn SolverExtensionService<S>>, ResolutionError>,
{
    fn resolve(&self) -> Result<Box<dyn SolverExtensionService<S>>, ResolutionError> {
        self()
    }
}

/// Resolves the solver extension service.
pub fn load<S: Solution>() -> Result<Box<dyn SolverExtensionService<S>>, ResolutionError> {
    DefaultServiceResolver.resolve()
}

/// Builds a capability, falling back to `default_value` on any failure.
///
/// See [`build_or_default_with`].
///
/// # Examples
///
/// ```
/// use u_metaheur_ext::extension::{build_or_default, SolverExtensionService};
/// use u_metaheur_ext::graph::{DefaultTopologicalOrderGraph, TopologicalOrderGraph};
///
/// let graph = build_or_default(
///     |service: &dyn SolverExtensionService<Vec<u32>>| Ok(service.build_topology_graph(8)),
///     || Box::new(DefaultTopologicalOrderGraph::new(8)) as Box<dyn TopologicalOrderGraph>,
/// );
/// assert_eq!(graph.node_count(), 8);
/// ```
pub fn build_or_default<S, T, B, D>(builder: B, default_value: D) -> T
where
    S: Solution,
    B: FnOnce(&dyn SolverExtensionService<S>) -> Result<T, ExtensionError>,
    D: FnOnce() -> T,
{
    build_or_default_with(&DefaultServiceResolver, builder, default_value)
}

/// Resolves a service through `resolver` and builds a capability with it.
///
/// If resolution fails, the builder returns an error, or either of them
/// panics, `default_value` is called once and its result returned. The
/// builder is not called when resolution fails. `default_value` is never
/// called when the builder succeeds.
pub fn build_or_default_with<S, T, R, B, D>(resolver: &R, builder: B, default_value: D) -> T
where
    S: Solution,
    R: ServiceResolver<S> + ?Sized,
    B: FnOnce(&dyn SolverExtensionService<S>) -> Result<T, ExtensionError>,
    D: FnOnce() -> T,
{
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| -> Result<T, ExtensionError> {
        let service = resolver.resolve()?;
        builder(service.as_ref())
    }));
    match attempt {
        Ok(Ok(value)) => value,
        Ok(Err(error)) => {
            log::debug!("Using the default capability: {error}.");
            default_value()
        }
        Err(_) => {
            log::debug!("Using the default capability: the extension service panicked.");
            default_value()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{Capability, COMMUNITY_NAME};
    use crate::graph::DefaultTopologicalOrderGraph;
    use crate::heuristic::{BestCostTermination, ChildPhaseTermination};
    use proptest::prelude::*;
    use rayon::prelude::*;
    use std::cell::Cell;

    type Tour = Vec<usize>;

    fn child_phase_termination(
        _: &HeuristicConfigPolicy,
        solver_termination: Arc<dyn SolverTermination>,
    ) -> Box<dyn PhaseTermination> {
        Box::new(ChildPhaseTermination::new(solver_termination))
    }

    fn failing_resolver() -> Result<Box<dyn SolverExtensionService<Tour>>, ResolutionError> {
        Err(ResolutionError::new("no provider on the path"))
    }

    fn panicking_resolver() -> Result<Box<dyn SolverExtensionService<Tour>>, ResolutionError> {
        panic!("misconfigured provider")
    }

    #[test]
    fn test_load_resolves_a_service() {
        let service = load::<Tour>().unwrap();
        assert_eq!(service.build_topology_graph(3).node_count(), 3);
    }

    #[test]
    fn test_success_skips_fallback() {
        let fallback_calls = Cell::new(0);
        let value = build_or_default(
            |service: &dyn SolverExtensionService<Tour>| {
                Ok(service.build_topology_graph(5).node_count())
            },
            || {
                fallback_calls.set(fallback_calls.get() + 1);
                0
            },
        );
        assert_eq!(value, 5);
        assert_eq!(fallback_calls.get(), 0);
    }

    #[test]
    fn test_builder_error_uses_fallback_once() {
        let fallback_calls = Cell::new(0);
        let value = build_or_default(
            |_: &dyn SolverExtensionService<Tour>| {
                Err(ExtensionError::Construction("broken".to_owned()))
            },
            || {
                fallback_calls.set(fallback_calls.get() + 1);
                7
            },
        );
        assert_eq!(value, 7);
        assert_eq!(fallback_calls.get(), 1);
    }

    #[test]
    fn test_unavailable_capability_uses_fallback() {
        let value = build_or_default(
            |service: &dyn SolverExtensionService<Tour>| {
                service
                    .build_partitioned_search(
                        0,
                        &PartitionedSearchPhaseConfig::default(),
                        &HeuristicConfigPolicy::default(),
                        Arc::new(BestCostTermination::new(0.0)),
                        &child_phase_termination,
                    )
                    .map(|phase| phase.phase_index())
            },
            || usize::MAX,
        );
        assert_eq!(value, usize::MAX);
    }

    #[test]
    fn test_builder_panic_uses_fallback() {
        let value: usize = build_or_default(
            |_: &dyn SolverExtensionService<Tour>| panic!("capability blew up"),
            || 11,
        );
        assert_eq!(value, 11);
    }

    #[test]
    fn test_resolution_failure_skips_builder() {
        let builder_calls = Cell::new(0);
        let fallback_calls = Cell::new(0);
        let value = build_or_default_with(
            &failing_resolver,
            |_: &dyn SolverExtensionService<Tour>| {
                builder_calls.set(builder_calls.get() + 1);
                Ok(1)
            },
            || {
                fallback_calls.set(fallback_calls.get() + 1);
                2
            },
        );
        assert_eq!(value, 2);
        assert_eq!(builder_calls.get(), 0);
        assert_eq!(fallback_calls.get(), 1);
    }

    #[test]
    fn test_resolution_panic_uses_fallback() {
        let value = build_or_default_with(
            &panicking_resolver,
            |service: &dyn SolverExtensionService<Tour>| Ok(service.build_topology_graph(1).node_count()),
            || 0,
        );
        assert_eq!(value, 0);
    }

    #[test]
    fn test_direct_call_propagates_unavailable() {
        let service = load::<Tour>().unwrap();
        let result = service.build_partitioned_search(
            2,
            &PartitionedSearchPhaseConfig::default(),
            &HeuristicConfigPolicy::default(),
            Arc::new(BestCostTermination::new(0.0)),
            &child_phase_termination,
        );
        assert!(matches!(
            result,
            Err(ExtensionError::CapabilityUnavailable {
                capability: Capability::PartitionedSearch,
                edition: COMMUNITY_NAME,
            })
        ));
    }

    #[test]
    fn test_concurrent_lookups_need_no_locking() {
        let sizes: Vec<usize> = (0..256usize)
            .into_par_iter()
            .map(|n| {
                build_or_default(
                    |service: &dyn SolverExtensionService<Tour>| {
                        Ok(service.build_topology_graph(n).node_count())
                    },
                    || usize::MAX,
                )
            })
            .collect();
        assert_eq!(sizes, (0..256).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_build_or_default_takes_exactly_one_path(
            builder_succeeds in any::<bool>(),
            builder_value in any::<u32>(),
            fallback_value in any::<u32>(),
        ) {
            let builder_calls = Cell::new(0);
            let fallback_calls = Cell::new(0);
            let value = build_or_default(
                |_: &dyn SolverExtensionService<Tour>| {
                    builder_calls.set(builder_calls.get() + 1);
                    if builder_succeeds {
                        Ok(builder_value)
                    } else {
                        Err(ExtensionError::Construction("nope".to_owned()))
                    }
                },
                || {
                    fallback_calls.set(fallback_calls.get() + 1);
                    fallback_value
                },
            );
            prop_assert_eq!(builder_calls.get(), 1);
            if builder_succeeds {
                prop_assert_eq!(value, builder_value);
                prop_assert_eq!(fallback_calls.get(), 0);
            } else {
                prop_assert_eq!(value, fallback_value);
                prop_assert_eq!(fallback_calls.get(), 1);
            }
        }
    }

    #[test]
    fn test_fallback_graph_matches_default() {
        let graph = build_or_default_with(
            &failing_resolver,
            |service: &dyn SolverExtensionService<Tour>| Ok(service.build_topology_graph(4)),
            || Box::new(DefaultTopologicalOrderGraph::new(4)) as Box<dyn TopologicalOrderGraph>,
        );
        assert_eq!(graph.node_count(), 4);
    }
}

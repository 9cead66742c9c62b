//! The community tier of the gateway.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::edition::COMMUNITY_NAME;
use super::error::{Capability, ExtensionError};
use super::service::SolverExtensionService;
use crate::config::{
    DestinationSelectorConfig, EntitySelectorConfig, EnvironmentMode, HeuristicConfigPolicy,
    NearbySelectionConfig, PartitionedSearchPhaseConfig, SelectionCacheType, SelectionOrder,
    SubListSelectorConfig, ValueSelectorConfig,
};
use crate::constraint::ConstraintProviderClass;
use crate::construction::{
    ConstructionHeuristicDecider, ConstructionHeuristicForager,
    DefaultConstructionHeuristicDecider,
};
use crate::graph::{DefaultTopologicalOrderGraph, TopologicalOrderGraph};
use crate::heuristic::{PhaseTermination, PhaseTerminationFactory, Solution, SolverTermination};
use crate::local_search::{
    Acceptor, DefaultLocalSearchDecider, LocalSearchDecider, LocalSearchForager, MoveRepository,
};
use crate::partitioned::PartitionedSearchPhase;
use crate::selector::{
    DestinationSelector, EntityDescriptor, EntitySelector, SubListSelector, ValueSelector,
};

/// Community tier of the gateway.
///
/// Every operation succeeds with a single-threaded, unaccelerated
/// implementation, except partitioned search, which is unavailable.
/// Holds no state, so any number of instances may be used concurrently.
pub struct DefaultSolverExtensionService<S> {
    _solution: PhantomData<fn() -> S>,
}

impl<S> DefaultSolverExtensionService<S> {
    pub fn new() -> Self {
        Self {
            _solution: PhantomData,
        }
    }
}

impl<S> Default for DefaultSolverExtensionService<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for DefaultSolverExtensionService<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for DefaultSolverExtensionService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultSolverExtensionService")
    }
}

fn log_nearby_selection_ignored() {
    log::debug!(
        "{} requested but using standard selection in {COMMUNITY_NAME}.",
        Capability::NearbySelection
    );
}

fn log_single_threaded(capability: Capability, move_thread_count: usize) {
    log::debug!(
        "{capability} with {move_thread_count} threads requested \
         but using single-threaded implementation in {COMMUNITY_NAME}."
    );
}

impl<S: Solution> SolverExtensionService<S> for DefaultSolverExtensionService<S> {
    fn build_topology_graph(&self, size: usize) -> Box<dyn TopologicalOrderGraph> {
        Box::new(DefaultTopologicalOrderGraph::new(size))
    }

    fn build_lambda_shared_constraint_provider(
        &self,
        original_constraint_provider: ConstraintProviderClass,
    ) -> ConstraintProviderClass {
        original_constraint_provider
    }

    fn build_construction_heuristic(
        &self,
        termination: Box<dyn PhaseTermination>,
        forager: Box<dyn ConstructionHeuristicForager<S>>,
        config_policy: &HeuristicConfigPolicy,
    ) -> Box<dyn ConstructionHeuristicDecider<S>> {
        if let Some(move_thread_count) = config_policy.move_thread_count().filter(|&n| n > 1) {
            log_single_threaded(Capability::MultiThreadedConstructionHeuristic, move_thread_count);
        }
        Box::new(DefaultConstructionHeuristicDecider::new(
            config_policy.log_indentation(),
            termination,
            forager,
        ))
    }

    fn build_local_search(
        &self,
        move_thread_count: usize,
        termination: Box<dyn PhaseTermination>,
        move_repository: Box<dyn MoveRepository<S>>,
        acceptor: Box<dyn Acceptor<S>>,
        forager: Box<dyn LocalSearchForager<S>>,
        environment_mode: EnvironmentMode,
        config_policy: &HeuristicConfigPolicy,
    ) -> Box<dyn LocalSearchDecider<S>> {
        if move_thread_count > 1 {
            log_single_threaded(Capability::MultiThreadedLocalSearch, move_thread_count);
        }
        Box::new(
            DefaultLocalSearchDecider::new(
                config_policy.log_indentation(),
                termination,
                move_repository,
                acceptor,
                forager,
            )
            .with_environment_mode(environment_mode),
        )
    }

    fn build_partitioned_search(
        &self,
        _phase_index: usize,
        _phase_config: &PartitionedSearchPhaseConfig,
        _solver_config_policy: &HeuristicConfigPolicy,
        _solver_termination: Arc<dyn SolverTermination>,
        _phase_termination_factory: &PhaseTerminationFactory,
    ) -> Result<Box<dyn PartitionedSearchPhase<S>>, ExtensionError> {
        Err(ExtensionError::CapabilityUnavailable {
            capability: Capability::PartitionedSearch,
            edition: COMMUNITY_NAME,
        })
    }

    fn apply_nearby_entity_selection(
        &self,
        _entity_selector_config: &EntitySelectorConfig,
        _config_policy: &HeuristicConfigPolicy,
        _nearby_selection_config: &NearbySelectionConfig,
        _minimum_cache_type: SelectionCacheType,
        _resolved_selection_order: SelectionOrder,
        entity_selector: Box<dyn EntitySelector<S>>,
    ) -> Box<dyn EntitySelector<S>> {
        log_nearby_selection_ignored();
        entity_selector
    }

    fn apply_nearby_value_selection(
        &self,
        _value_selector_config: &ValueSelectorConfig,
        _config_policy: &HeuristicConfigPolicy,
        _entity_descriptor: &EntityDescriptor,
        _minimum_cache_type: SelectionCacheType,
        _resolved_selection_order: SelectionOrder,
        value_selector: Box<dyn ValueSelector<S>>,
    ) -> Box<dyn ValueSelector<S>> {
        log_nearby_selection_ignored();
        value_selector
    }

    fn apply_nearby_sub_list_selection(
        &self,
        _sub_list_selector_config: &SubListSelectorConfig,
        _config_policy: &HeuristicConfigPolicy,
        _minimum_cache_type: SelectionCacheType,
        _resolved_selection_order: SelectionOrder,
        sub_list_selector: Box<dyn SubListSelector<S>>,
    ) -> Box<dyn SubListSelector<S>> {
        log_nearby_selection_ignored();
        sub_list_selector
    }

    fn apply_nearby_destination_selection(
        &self,
        _destination_selector_config: &DestinationSelectorConfig,
        _config_policy: &HeuristicConfigPolicy,
        _minimum_cache_type: SelectionCacheType,
        _resolved_selection_order: SelectionOrder,
        destination_selector: Box<dyn DestinationSelector<S>>,
    ) -> Box<dyn DestinationSelector<S>> {
        log_nearby_selection_ignored();
        destination_selector
    }
}

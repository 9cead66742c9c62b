//! Standard selectors, reading sizes from the solution through plain
//! function pointers.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::types::{
    DestinationSelector, ElementPosition, EntitySelector, SubList, SubListSelector, ValueSelector,
};
use crate::config::SelectionOrder;

/// Puts `items` into the requested order.
///
/// `Random` samples with replacement, `Shuffled` and `Probabilistic`
/// permute, everything else keeps the natural order.
fn arrange<T: Copy>(mut items: Vec<T>, order: SelectionOrder, rng: &mut dyn RngCore) -> Vec<T> {
    match order {
        SelectionOrder::Random if !items.is_empty() => (0..items.len())
            .map(|_| items[rng.random_range(0..items.len())])
            .collect(),
        SelectionOrder::Shuffled | SelectionOrder::Probabilistic => {
            items.shuffle(rng);
            items
        }
        _ => items,
    }
}

/// Selects every entity of the solution.
pub struct FromSolutionEntitySelector<S> {
    entity_count: fn(&S) -> usize,
    order: SelectionOrder,
}

impl<S> FromSolutionEntitySelector<S> {
    pub fn new(entity_count: fn(&S) -> usize) -> Self {
        Self {
            entity_count,
            order: SelectionOrder::Original,
        }
    }

    pub fn with_selection_order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }
}

impl<S> EntitySelector<S> for FromSolutionEntitySelector<S> {
    fn selection_order(&self) -> SelectionOrder {
        self.order
    }

    fn select(&self, solution: &S, rng: &mut dyn RngCore) -> Vec<usize> {
        arrange((0..(self.entity_count)(solution)).collect(), self.order, rng)
    }
}

/// Selects every value in an entity's value range.
pub struct FromEntityValueSelector<S> {
    value_count: fn(&S, usize) -> usize,
    order: SelectionOrder,
}

impl<S> FromEntityValueSelector<S> {
    pub fn new(value_count: fn(&S, usize) -> usize) -> Self {
        Self {
            value_count,
            order: SelectionOrder::Original,
        }
    }

    pub fn with_selection_order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }
}

impl<S> ValueSelector<S> for FromEntityValueSelector<S> {
    fn selection_order(&self) -> SelectionOrder {
        self.order
    }

    fn select(&self, solution: &S, entity: usize, rng: &mut dyn RngCore) -> Vec<usize> {
        arrange(
            (0..(self.value_count)(solution, entity)).collect(),
            self.order,
            rng,
        )
    }
}

/// Samples random sub-lists whose length lies within the configured bounds.
pub struct RandomSubListSelector<S> {
    entity_count: fn(&S) -> usize,
    list_size: fn(&S, usize) -> usize,
    minimum_sub_list_size: usize,
    maximum_sub_list_size: usize,
    sample_count: usize,
}

impl<S> RandomSubListSelector<S> {
    /// Creates a selector drawing `sample_count` sub-lists per selection.
    pub fn new(
        entity_count: fn(&S) -> usize,
        list_size: fn(&S, usize) -> usize,
        sample_count: usize,
    ) -> Self {
        Self {
            entity_count,
            list_size,
            minimum_sub_list_size: 1,
            maximum_sub_list_size: usize::MAX,
            sample_count,
        }
    }

    /// Sets the sub-list length bounds. A minimum of zero is raised to one.
    pub fn with_sub_list_size(mut self, minimum: usize, maximum: usize) -> Self {
        self.minimum_sub_list_size = minimum.max(1);
        self.maximum_sub_list_size = maximum;
        self
    }
}

impl<S> SubListSelector<S> for RandomSubListSelector<S> {
    fn selection_order(&self) -> SelectionOrder {
        SelectionOrder::Random
    }

    fn select(&self, solution: &S, rng: &mut dyn RngCore) -> Vec<SubList> {
        let eligible: Vec<(usize, usize)> = (0..(self.entity_count)(solution))
            .map(|entity| (entity, (self.list_size)(solution, entity)))
            .filter(|&(_, size)| size >= self.minimum_sub_list_size)
            .collect();
        if eligible.is_empty() || self.minimum_sub_list_size > self.maximum_sub_list_size {
            return Vec::new();
        }

        (0..self.sample_count)
            .map(|_| {
                let (entity, size) = eligible[rng.random_range(0..eligible.len())];
                let longest = size.min(self.maximum_sub_list_size);
                let length = rng.random_range(self.minimum_sub_list_size..=longest);
                let from_index = rng.random_range(0..=size - length);
                SubList {
                    entity,
                    from_index,
                    length,
                }
            })
            .collect()
    }
}

/// Selects every insertion position in every entity's list.
pub struct ElementDestinationSelector<S> {
    entity_count: fn(&S) -> usize,
    list_size: fn(&S, usize) -> usize,
    allows_unassigned: bool,
    order: SelectionOrder,
}

impl<S> ElementDestinationSelector<S> {
    pub fn new(entity_count: fn(&S) -> usize, list_size: fn(&S, usize) -> usize) -> Self {
        Self {
            entity_count,
            list_size,
            allows_unassigned: false,
            order: SelectionOrder::Original,
        }
    }

    /// Also offers leaving the element unassigned.
    pub fn with_unassigned(mut self, allows_unassigned: bool) -> Self {
        self.allows_unassigned = allows_unassigned;
        self
    }

    pub fn with_selection_order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }
}

impl<S> DestinationSelector<S> for ElementDestinationSelector<S> {
    fn selection_order(&self) -> SelectionOrder {
        self.order
    }

    fn select(&self, solution: &S, rng: &mut dyn RngCore) -> Vec<ElementPosition> {
        let mut positions: Vec<ElementPosition> = (0..(self.entity_count)(solution))
            .flat_map(|entity| {
                (0..=(self.list_size)(solution, entity))
                    .map(move |index| ElementPosition::Positioned { entity, index })
            })
            .collect();
        if self.allows_unassigned {
            positions.push(ElementPosition::Unassigned);
        }
        arrange(positions, self.order, rng)
    }
}

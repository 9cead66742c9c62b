//! Selector traits and the values they yield.

use rand::RngCore;

use crate::config::SelectionOrder;

/// A contiguous run of elements in one entity's list variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubList {
    pub entity: usize,
    pub from_index: usize,
    pub length: usize,
}

impl SubList {
    /// Index one past the last element.
    pub fn to_index(&self) -> usize {
        self.from_index + self.length
    }
}

/// Where an element of a list variable can be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementPosition {
    /// Insert before `index` in `entity`'s list (`index == len` appends).
    Positioned { entity: usize, index: usize },
    /// Leave the element unassigned.
    Unassigned,
}

/// Describes a planning entity class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub entity_name: String,
    pub genuine_variable_names: Vec<String>,
}

impl EntityDescriptor {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            genuine_variable_names: Vec::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.genuine_variable_names.push(name.into());
        self
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.genuine_variable_names.iter().any(|v| v == name)
    }
}

/// Selects entity indices.
pub trait EntitySelector<S>: Send + Sync {
    fn selection_order(&self) -> SelectionOrder;

    /// Entity indices in selection order.
    fn select(&self, solution: &S, rng: &mut dyn RngCore) -> Vec<usize>;
}

/// Selects value indices for one entity's variable.
pub trait ValueSelector<S>: Send + Sync {
    fn selection_order(&self) -> SelectionOrder;

    /// Value indices for `entity`, in selection order.
    fn select(&self, solution: &S, entity: usize, rng: &mut dyn RngCore) -> Vec<usize>;
}

/// Selects sub-lists of list variables.
pub trait SubListSelector<S>: Send + Sync {
    fn selection_order(&self) -> SelectionOrder;

    fn select(&self, solution: &S, rng: &mut dyn RngCore) -> Vec<SubList>;
}

/// Selects destinations in list variables.
pub trait DestinationSelector<S>: Send + Sync {
    fn selection_order(&self) -> SelectionOrder;

    fn select(&self, solution: &S, rng: &mut dyn RngCore) -> Vec<ElementPosition>;
}

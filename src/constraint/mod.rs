//! Constraint provider handles.
//!
//! The engine refers to the user's constraint provider by type rather than
//! by instance, so that each solver thread can build its own. A
//! [`ConstraintProviderClass`] is that type-level handle.

use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Defines the constraints a solution is scored against.
pub trait ConstraintProvider: Send + Sync + 'static {
    /// Names of the constraints this provider defines.
    fn constraint_names(&self) -> Vec<String>;
}

fn construct<T: ConstraintProvider + Default>() -> Box<dyn ConstraintProvider> {
    Box::new(T::default())
}

/// A copyable reference to a constraint provider type.
///
/// Two handles are equal exactly when they name the same type.
///
/// # Examples
///
/// ```
/// use u_metaheur_ext::constraint::{ConstraintProvider, ConstraintProviderClass};
///
/// #[derive(Default)]
/// struct Timetabling;
///
/// impl ConstraintProvider for Timetabling {
///     fn constraint_names(&self) -> Vec<String> {
///         vec!["room conflict".to_owned()]
///     }
/// }
///
/// let class = ConstraintProviderClass::of::<Timetabling>();
/// assert!(class.is::<Timetabling>());
/// assert_eq!(class.instantiate().constraint_names().len(), 1);
/// ```
#[derive(Clone, Copy)]
pub struct ConstraintProviderClass {
    type_id: TypeId,
    type_name: &'static str,
    constructor: fn() -> Box<dyn ConstraintProvider>,
}

impl ConstraintProviderClass {
    pub fn of<T: ConstraintProvider + Default>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
            constructor: construct::<T>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this handle names `T`.
    pub fn is<T: ConstraintProvider>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Builds a fresh provider instance.
    pub fn instantiate(&self) -> Box<dyn ConstraintProvider> {
        (self.constructor)()
    }
}

impl PartialEq for ConstraintProviderClass {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ConstraintProviderClass {}

impl Hash for ConstraintProviderClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ConstraintProviderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstraintProviderClass")
            .field(&self.type_name)
            .finish()
    }
}

//! Selector configuration.
//!
//! Only the shape matters to the gateway: an advanced tier reads these to
//! build locality-aware selectors, the community tier passes selectors
//! through untouched.

use super::error::ConfigError;

/// How long a selector may cache what it selects.
///
/// Ordered from shortest to longest lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SelectionCacheType {
    /// Recompute on every selection.
    #[default]
    JustInTime,
    /// Cache for one step.
    Step,
    /// Cache for one phase.
    Phase,
    /// Cache for the whole solve.
    Solver,
}

impl SelectionCacheType {
    /// Whether anything is cached at all.
    pub fn is_cached(self) -> bool {
        self != Self::JustInTime
    }

    /// Returns the longer-lived of the two cache types.
    pub fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }
}

/// Order in which a selector yields its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SelectionOrder {
    /// Use the order of the enclosing selector.
    #[default]
    Inherit,
    /// Natural order of the source collection.
    Original,
    /// Sorted by a sorter.
    Sorted,
    /// Random sampling with replacement.
    Random,
    /// Random permutation without replacement.
    Shuffled,
    /// Weighted random sampling.
    Probabilistic,
}

impl SelectionOrder {
    /// Resolves `Inherit` against the inherited order.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_metaheur_ext::config::SelectionOrder;
    ///
    /// assert_eq!(SelectionOrder::Inherit.resolve(SelectionOrder::Random), SelectionOrder::Random);
    /// assert_eq!(SelectionOrder::Original.resolve(SelectionOrder::Random), SelectionOrder::Original);
    /// ```
    pub fn resolve(self, inherited: Self) -> Self {
        match self {
            Self::Inherit => inherited,
            other => other,
        }
    }

    /// Whether selection involves the random generator.
    pub fn is_randomized(self) -> bool {
        matches!(self, Self::Random | Self::Shuffled | Self::Probabilistic)
    }
}

/// Probability distribution used to pick a nearby destination by distance rank.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum NearbySelectionDistributionType {
    /// Uniform over the nearest `size_maximum` items.
    BlockDistribution,
    /// Linearly decreasing with rank.
    #[default]
    LinearDistribution,
    /// Parabolically decreasing with rank.
    ParabolicDistribution,
    /// Beta distribution with the given shape parameters.
    BetaDistribution {
        /// Alpha shape parameter.
        alpha: f64,
        /// Beta shape parameter.
        beta: f64,
    },
}

/// Nearby selection settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbySelectionConfig {
    /// Id of the selector whose current item is the origin.
    pub origin_selector_id: Option<String>,
    /// Name of the distance meter the host registers.
    pub distance_meter: Option<String>,
    /// Rank distribution.
    pub distribution: NearbySelectionDistributionType,
    /// Only the nearest `n` candidates are considered.
    pub size_maximum: Option<usize>,
}

impl NearbySelectionConfig {
    pub fn with_origin_selector_id(mut self, id: impl Into<String>) -> Self {
        self.origin_selector_id = Some(id.into());
        self
    }

    pub fn with_distance_meter(mut self, name: impl Into<String>) -> Self {
        self.distance_meter = Some(name.into());
        self
    }

    pub fn with_distribution(mut self, distribution: NearbySelectionDistributionType) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_size_maximum(mut self, n: usize) -> Self {
        self.size_maximum = Some(n);
        self
    }
}

/// Entity selector settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySelectorConfig {
    pub id: Option<String>,
    pub entity_name: Option<String>,
    pub cache_type: Option<SelectionCacheType>,
    pub selection_order: Option<SelectionOrder>,
    pub nearby_selection: Option<NearbySelectionConfig>,
}

impl EntitySelectorConfig {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    pub fn with_selection_order(mut self, order: SelectionOrder) -> Self {
        self.selection_order = Some(order);
        self
    }

    pub fn with_nearby_selection(mut self, nearby: NearbySelectionConfig) -> Self {
        self.nearby_selection = Some(nearby);
        self
    }
}

/// Value selector settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueSelectorConfig {
    pub id: Option<String>,
    pub variable_name: Option<String>,
    pub cache_type: Option<SelectionCacheType>,
    pub selection_order: Option<SelectionOrder>,
    pub nearby_selection: Option<NearbySelectionConfig>,
}

impl ValueSelectorConfig {
    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = Some(name.into());
        self
    }

    pub fn with_nearby_selection(mut self, nearby: NearbySelectionConfig) -> Self {
        self.nearby_selection = Some(nearby);
        self
    }
}

/// Sub-list selector settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubListSelectorConfig {
    pub id: Option<String>,
    pub minimum_sub_list_size: usize,
    pub maximum_sub_list_size: usize,
    pub nearby_selection: Option<NearbySelectionConfig>,
}

impl Default for SubListSelectorConfig {
    fn default() -> Self {
        Self {
            id: None,
            minimum_sub_list_size: 1,
            maximum_sub_list_size: usize::MAX,
            nearby_selection: None,
        }
    }
}

impl SubListSelectorConfig {
    pub fn with_sub_list_size(mut self, minimum: usize, maximum: usize) -> Self {
        self.minimum_sub_list_size = minimum;
        self.maximum_sub_list_size = maximum;
        self
    }

    pub fn with_nearby_selection(mut self, nearby: NearbySelectionConfig) -> Self {
        self.nearby_selection = Some(nearby);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_sub_list_size > self.maximum_sub_list_size {
            return Err(ConfigError::SubListBounds {
                minimum: self.minimum_sub_list_size,
                maximum: self.maximum_sub_list_size,
            });
        }
        Ok(())
    }
}

/// Destination selector settings for list variables.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestinationSelectorConfig {
    pub id: Option<String>,
    pub entity_selector: Option<EntitySelectorConfig>,
    pub value_selector: Option<ValueSelectorConfig>,
    pub nearby_selection: Option<NearbySelectionConfig>,
}

impl DestinationSelectorConfig {
    pub fn with_nearby_selection(mut self, nearby: NearbySelectionConfig) -> Self {
        self.nearby_selection = Some(nearby);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_type_ordering() {
        assert!(SelectionCacheType::JustInTime < SelectionCacheType::Step);
        assert!(SelectionCacheType::Phase < SelectionCacheType::Solver);
        assert_eq!(
            SelectionCacheType::Step.max(SelectionCacheType::Phase),
            SelectionCacheType::Phase
        );
        assert!(!SelectionCacheType::JustInTime.is_cached());
        assert!(SelectionCacheType::Step.is_cached());
    }

    #[test]
    fn test_selection_order_resolve() {
        assert_eq!(
            SelectionOrder::Inherit.resolve(SelectionOrder::Shuffled),
            SelectionOrder::Shuffled
        );
        assert_eq!(
            SelectionOrder::Sorted.resolve(SelectionOrder::Random),
            SelectionOrder::Sorted
        );
        assert!(SelectionOrder::Random.is_randomized());
        assert!(!SelectionOrder::Original.is_randomized());
    }

    #[test]
    fn test_sub_list_bounds_validation() {
        assert!(SubListSelectorConfig::default().validate().is_ok());
        let config = SubListSelectorConfig::default().with_sub_list_size(5, 2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SubListBounds {
                minimum: 5,
                maximum: 2
            })
        );
    }

    #[test]
    fn test_nearby_builder() {
        let nearby = NearbySelectionConfig::default()
            .with_origin_selector_id("entity")
            .with_distance_meter("haversine")
            .with_distribution(NearbySelectionDistributionType::BlockDistribution)
            .with_size_maximum(20);
        assert_eq!(nearby.origin_selector_id.as_deref(), Some("entity"));
        assert_eq!(nearby.distance_meter.as_deref(), Some("haversine"));
        assert_eq!(nearby.size_maximum, Some(20));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_entity_selector_config_serde() {
        let config = EntitySelectorConfig::default()
            .with_id("e")
            .with_selection_order(SelectionOrder::Shuffled)
            .with_nearby_selection(NearbySelectionConfig::default().with_size_maximum(3));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("SHUFFLED"));
        let back: EntitySelectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

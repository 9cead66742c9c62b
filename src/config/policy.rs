//! Heuristic configuration policy and the environment settings it carries.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::error::ConfigError;

/// Seed used when reproducible solving is requested without an explicit seed.
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// How much self-checking the solver performs while it runs.
///
/// Modes are listed from most to least asserted. Every mode except
/// [`EnvironmentMode::NonReproducible`] guarantees that two runs with the
/// same seed take the same steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EnvironmentMode {
    /// Full assertions plus tracking of the variables that caused a corruption.
    TrackedFullAssert,
    /// Assert every move and step score from scratch.
    FullAssert,
    /// Full assertions that never change the solver's random sequence.
    NonIntrusiveFullAssert,
    /// Assert each step.
    StepAssert,
    /// Assert only at phase boundaries.
    #[default]
    PhaseAssert,
    /// Reproducible, no assertions.
    NoAssert,
    /// Neither asserted nor reproducible.
    NonReproducible,
}

impl EnvironmentMode {
    /// Whether any runtime assertion is active.
    pub fn is_asserted(self) -> bool {
        !matches!(self, Self::NoAssert | Self::NonReproducible)
    }

    /// Whether moves are asserted from scratch.
    pub fn is_fully_asserted(self) -> bool {
        matches!(
            self,
            Self::TrackedFullAssert | Self::FullAssert | Self::NonIntrusiveFullAssert
        )
    }

    /// Whether two runs with the same seed produce the same steps.
    pub fn is_reproducible(self) -> bool {
        self != Self::NonReproducible
    }
}

/// Requested number of move threads, before resolution against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveThreadCount {
    /// Single-threaded move evaluation.
    #[default]
    None,
    /// Derive a count from the available processors.
    Auto,
    /// An explicit count.
    Count(usize),
}

impl MoveThreadCount {
    /// Upper bound applied by [`MoveThreadCount::Auto`].
    pub const AUTO_MAXIMUM: usize = 4;

    /// Resolves the request to a concrete thread count.
    ///
    /// Returns `None` when move evaluation should stay on the solver thread.
    /// `Auto` leaves two processors free for the solver thread and the host,
    /// capped at [`MoveThreadCount::AUTO_MAXIMUM`].
    ///
    /// # Examples
    ///
    /// ```
    /// use u_metaheur_ext::config::MoveThreadCount;
    ///
    /// assert_eq!(MoveThreadCount::Auto.resolve(16), Some(4));
    /// assert_eq!(MoveThreadCount::Auto.resolve(2), None);
    /// assert_eq!(MoveThreadCount::Count(3).resolve(1), Some(3));
    /// ```
    pub fn resolve(self, available_processors: usize) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Auto if available_processors > 2 => {
                Some((available_processors - 2).min(Self::AUTO_MAXIMUM))
            }
            Self::Auto => None,
            Self::Count(n) => Some(n),
        }
    }
}

impl FromStr for MoveThreadCount {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("NONE") {
            return Ok(Self::None);
        }
        if trimmed.eq_ignore_ascii_case("AUTO") {
            return Ok(Self::Auto);
        }
        match trimmed.parse::<usize>() {
            Ok(0) => Err(ConfigError::ZeroMoveThreadCount),
            Ok(n) => Ok(Self::Count(n)),
            Err(_) => Err(ConfigError::InvalidMoveThreadCount(s.to_owned())),
        }
    }
}

impl fmt::Display for MoveThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NONE"),
            Self::Auto => f.write_str("AUTO"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Read-only view over the solver configuration handed to phase builders.
///
/// # Examples
///
/// ```
/// use u_metaheur_ext::config::{EnvironmentMode, HeuristicConfigPolicy};
///
/// let policy = HeuristicConfigPolicy::default()
///     .with_environment_mode(EnvironmentMode::NoAssert)
///     .with_move_thread_count(Some(4))
///     .with_random_seed(7);
/// assert_eq!(policy.move_thread_count(), Some(4));
/// assert_eq!(policy.random_seed(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeuristicConfigPolicy {
    environment_mode: EnvironmentMode,
    move_thread_count: Option<usize>,
    log_indentation: String,
    random_seed: Option<u64>,
}

impl HeuristicConfigPolicy {
    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the resolved move thread count (`None` for single-threaded).
    pub fn with_move_thread_count(mut self, count: Option<usize>) -> Self {
        self.move_thread_count = count;
        self
    }

    /// Sets the prefix used by step-level log lines.
    pub fn with_log_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.log_indentation = indentation.into();
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn move_thread_count(&self) -> Option<usize> {
        self.move_thread_count
    }

    pub fn log_indentation(&self) -> &str {
        &self.log_indentation
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    /// Derives the policy for a phase nested under this one.
    pub fn create_phase_config_policy(&self) -> Self {
        Self {
            log_indentation: format!("{}    ", self.log_indentation),
            ..self.clone()
        }
    }

    /// Creates the random generator the solver should use.
    ///
    /// Non-reproducible mode ignores the configured seed.
    pub fn create_rng(&self) -> StdRng {
        if !self.environment_mode.is_reproducible() {
            return StdRng::seed_from_u64(rand::random());
        }
        StdRng::seed_from_u64(self.random_seed.unwrap_or(DEFAULT_RANDOM_SEED))
    }

    /// Validates the policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_thread_count == Some(0) {
            return Err(ConfigError::ZeroMoveThreadCount);
        }
        Ok(())
    }
}

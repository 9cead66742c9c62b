//! Local search deciders and the components they are assembled from.
//!
//! A local search step asks the [`MoveRepository`] for candidate moves,
//! filters them through an [`Acceptor`], lets a [`LocalSearchForager`]
//! pick one, and applies it. The gateway builds the decider; the host
//! supplies the components.

mod acceptor;
mod decider;
mod forager;
mod types;

pub use acceptor::{Acceptor, HillClimbingAcceptor, SimulatedAnnealingAcceptor, TabuAcceptor};
pub use decider::{DefaultLocalSearchDecider, LocalSearchDecider, LocalSearchOutcome};
pub use forager::{AcceptedCountForager, LocalSearchForager, LocalSearchPickEarlyType};
pub use types::MoveRepository;

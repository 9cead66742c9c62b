//! Capability negotiation gateway for a metaheuristic planning engine.
//!
//! The engine builds its phases from components whose faster or more
//! capable variants belong to an optional advanced tier. This crate defines
//! the contract for obtaining those components and ships the community
//! tier, which satisfies it with single-threaded implementations:
//!
//! - **Extension**: The gateway itself. Resolves the service, identifies
//!   the edition, and builds capabilities with graceful fallback.
//! - **Graph**: Topological order graph with cycle detection, used to order
//!   shadow variable updates.
//! - **Construction**: Construction heuristic deciders and foragers.
//! - **Local Search**: Local search deciders with pluggable acceptors
//!   (hill climbing, tabu, simulated annealing) and foragers.
//! - **Selector**: Entity, value, sub-list and destination selectors, the
//!   inputs to nearby selection.
//! - **Config**: Heuristic config policy, environment modes and selector
//!   configuration.
//! - **Partitioned**: The partitioned search phase contract. No community
//!   implementation exists.
//!
//! # Architecture
//!
//! Every capability is requested the same way whether or not an advanced
//! tier is present. Phase builders never branch on the edition: they call
//! the gateway and receive a component that behaves identically, only
//! slower. The one exception is partitioned search, which reports
//! [`extension::ExtensionError::CapabilityUnavailable`].

pub mod config;
pub mod constraint;
pub mod construction;
pub mod extension;
pub mod graph;
pub mod heuristic;
pub mod local_search;
pub mod partitioned;
pub mod selector;

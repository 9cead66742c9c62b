//! Topological order graphs.
//!
//! Used by the engine to order declarative shadow variable updates. The
//! caller owns what the nodes and edges mean; the graph only maintains a
//! topological order over them and reports which nodes sit on a cycle.
//!
//! # References
//!
//! - Tarjan (1972), "Depth-First Search and Linear Graph Algorithms"

mod topology;

pub use topology::{DefaultTopologicalOrderGraph, GraphError, NodeTopologicalOrder, TopologicalOrderGraph};

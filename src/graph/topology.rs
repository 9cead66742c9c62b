use std::collections::BTreeMap;

use thiserror::Error;

/// Errors from [`TopologicalOrderGraph`] edge updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint is not a node of the graph.
    #[error("node {node} is out of bounds for a graph of {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending node.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// The edge to remove was never added.
    #[error("no edge from node {from} to node {to}")]
    MissingEdge {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
    },
}

/// A node's place in the committed topological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTopologicalOrder {
    /// Nodes with a lower order come first. Nodes on the same cycle share an order.
    pub order: usize,
    /// Whether the node lies on a cycle (including a self-loop).
    pub is_looped: bool,
}

/// A directed graph with a topological order recomputed on commit.
///
/// Edge insertions and removals are buffered; [`commit_changes`] makes the
/// order reflect them. Adding the same edge twice requires removing it twice.
///
/// [`commit_changes`]: TopologicalOrderGraph::commit_changes
pub trait TopologicalOrderGraph: Send {
    fn node_count(&self) -> usize;

    /// Number of distinct edges.
    fn edge_count(&self) -> usize;

    fn add_edge(&mut self, from: usize, to: usize) -> Result<(), GraphError>;

    fn remove_edge(&mut self, from: usize, to: usize) -> Result<(), GraphError>;

    /// Recomputes the topological order.
    fn commit_changes(&mut self);

    /// The node's order as of the last commit, or `None` if out of bounds.
    fn topological_order(&self, node: usize) -> Option<NodeTopologicalOrder>;
}

const UNVISITED: usize = usize::MAX;

/// Adjacency-map graph ordered by strongly connected components.
///
/// # Examples
///
/// ```
/// use u_metaheur_ext::graph::{DefaultTopologicalOrderGraph, TopologicalOrderGraph};
///
/// let mut graph = DefaultTopologicalOrderGraph::new(3);
/// graph.add_edge(2, 0).unwrap();
/// graph.commit_changes();
/// let before = graph.topological_order(2).unwrap().order;
/// let after = graph.topological_order(0).unwrap().order;
/// assert!(before < after);
/// ```
#[derive(Debug, Clone)]
pub struct DefaultTopologicalOrderGraph {
    // successor -> edge multiplicity, per node
    forward_edges: Vec<BTreeMap<usize, usize>>,
    orders: Vec<NodeTopologicalOrder>,
}

impl DefaultTopologicalOrderGraph {
    /// Creates a graph with `size` nodes and no edges.
    pub fn new(size: usize) -> Self {
        let mut graph = Self {
            forward_edges: vec![BTreeMap::new(); size],
            orders: Vec::with_capacity(size),
        };
        graph.commit_changes();
        graph
    }

    fn check_node(&self, node: usize) -> Result<(), GraphError> {
        if node < self.forward_edges.len() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfBounds {
                node,
                node_count: self.forward_edges.len(),
            })
        }
    }

    /// Tarjan's algorithm, iterative to stay safe on long chains.
    ///
    /// Components come out sinks first. Roots are visited from the highest
    /// index down so that an edgeless graph orders nodes by index.
    fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.forward_edges.len();
        let successors: Vec<Vec<usize>> = self
            .forward_edges
            .iter()
            .map(|edges| edges.keys().copied().collect())
            .collect();

        let mut index = vec![UNVISITED; n];
        let mut low_link = vec![0usize; n];
        let mut on_stack = vec![false; n];
        let mut stack = Vec::new();
        let mut components = Vec::new();
        let mut next_index = 0usize;
        // (node, position of the next successor to visit)
        let mut call_stack: Vec<(usize, usize)> = Vec::new();

        for root in (0..n).rev() {
            if index[root] != UNVISITED {
                continue;
            }
            index[root] = next_index;
            low_link[root] = next_index;
            next_index += 1;
            stack.push(root);
            on_stack[root] = true;
            call_stack.push((root, 0));

            while let Some(frame) = call_stack.last_mut() {
                let node = frame.0;
                if let Some(&successor) = successors[node].get(frame.1) {
                    frame.1 += 1;
                    if index[successor] == UNVISITED {
                        index[successor] = next_index;
                        low_link[successor] = next_index;
                        next_index += 1;
                        stack.push(successor);
                        on_stack[successor] = true;
                        call_stack.push((successor, 0));
                    } else if on_stack[successor] {
                        low_link[node] = low_link[node].min(index[successor]);
                    }
                    continue;
                }

                call_stack.pop();
                if let Some(&(parent, _)) = call_stack.last() {
                    low_link[parent] = low_link[parent].min(low_link[node]);
                }
                if low_link[node] == index[node] {
                    let mut component = Vec::new();
                    while let Some(member) = stack.pop() {
                        on_stack[member] = false;
                        component.push(member);
                        if member == node {
                            break;
                        }
                    }
                    components.push(component);
                }
            }
        }
        components
    }
}

impl TopologicalOrderGraph for DefaultTopologicalOrderGraph {
    fn node_count(&self) -> usize {
        self.forward_edges.len()
    }

    fn edge_count(&self) -> usize {
        self.forward_edges.iter().map(BTreeMap::len).sum()
    }

    fn add_edge(&mut self, from: usize, to: usize) -> Result<(), GraphError> {
        self.check_node(from)?;
        self.check_node(to)?;
        *self.forward_edges[from].entry(to).or_insert(0) += 1;
        Ok(())
    }

    fn remove_edge(&mut self, from: usize, to: usize) -> Result<(), GraphError> {
        self.check_node(from)?;
        self.check_node(to)?;
        let edges = &mut self.forward_edges[from];
        match edges.get_mut(&to) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                edges.remove(&to);
            }
            None => return Err(GraphError::MissingEdge { from, to }),
        }
        Ok(())
    }

    fn commit_changes(&mut self) {
        let components = self.strongly_connected_components();
        let component_count = components.len();
        let mut orders = vec![
            NodeTopologicalOrder {
                order: 0,
                is_looped: false,
            };
            self.forward_edges.len()
        ];
        for (position, component) in components.iter().enumerate() {
            let order = component_count - 1 - position;
            let is_cycle = component.len() > 1;
            for &node in component {
                orders[node] = NodeTopologicalOrder {
                    order,
                    is_looped: is_cycle || self.forward_edges[node].contains_key(&node),
                };
            }
        }
        self.orders = orders;
    }

    fn topological_order(&self, node: usize) -> Option<NodeTopologicalOrder> {
        self.orders.get(node).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn order(graph: &DefaultTopologicalOrderGraph, node: usize) -> usize {
        graph.topological_order(node).map(|o| o.order).unwrap_or(usize::MAX)
    }

    #[test]
    fn test_edgeless_graph_orders_by_index() {
        let graph = DefaultTopologicalOrderGraph::new(4);
        for node in 0..4 {
            let node_order = graph.topological_order(node).unwrap();
            assert_eq!(node_order.order, node);
            assert!(!node_order.is_looped);
        }
        assert!(graph.topological_order(4).is_none());
    }

    #[test]
    fn test_chain_respects_edges() {
        let mut graph = DefaultTopologicalOrderGraph::new(4);
        graph.add_edge(3, 2).unwrap();
        graph.add_edge(2, 1).unwrap();
        graph.add_edge(1, 0).unwrap();
        graph.commit_changes();
        assert!(order(&graph, 3) < order(&graph, 2));
        assert!(order(&graph, 2) < order(&graph, 1));
        assert!(order(&graph, 1) < order(&graph, 0));
    }

    #[test]
    fn test_changes_apply_only_on_commit() {
        let mut graph = DefaultTopologicalOrderGraph::new(2);
        graph.add_edge(1, 0).unwrap();
        assert!(order(&graph, 0) < order(&graph, 1));
        graph.commit_changes();
        assert!(order(&graph, 1) < order(&graph, 0));
    }

    #[test]
    fn test_cycle_is_looped_and_shares_order() {
        let mut graph = DefaultTopologicalOrderGraph::new(4);
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(2, 0).unwrap();
        graph.add_edge(2, 3).unwrap();
        graph.commit_changes();

        for node in 0..3 {
            assert!(graph.topological_order(node).unwrap().is_looped);
        }
        assert_eq!(order(&graph, 0), order(&graph, 1));
        assert_eq!(order(&graph, 1), order(&graph, 2));
        assert!(!graph.topological_order(3).unwrap().is_looped);
        assert!(order(&graph, 2) < order(&graph, 3));
    }

    #[test]
    fn test_self_loop_is_looped() {
        let mut graph = DefaultTopologicalOrderGraph::new(2);
        graph.add_edge(1, 1).unwrap();
        graph.commit_changes();
        assert!(graph.topological_order(1).unwrap().is_looped);
        assert!(!graph.topological_order(0).unwrap().is_looped);
    }

    #[test]
    fn test_edge_multiplicity() {
        let mut graph = DefaultTopologicalOrderGraph::new(2);
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(0, 1).unwrap();
        assert_eq!(graph.edge_count(), 1);
        graph.remove_edge(0, 1).unwrap();
        assert_eq!(graph.edge_count(), 1);
        graph.remove_edge(0, 1).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(
            graph.remove_edge(0, 1),
            Err(GraphError::MissingEdge { from: 0, to: 1 })
        );
    }

    #[test]
    fn test_out_of_bounds_edge() {
        let mut graph = DefaultTopologicalOrderGraph::new(2);
        assert_eq!(
            graph.add_edge(0, 2),
            Err(GraphError::NodeOutOfBounds {
                node: 2,
                node_count: 2
            })
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 100_000;
        let mut graph = DefaultTopologicalOrderGraph::new(n);
        for node in 0..n - 1 {
            graph.add_edge(node, node + 1).unwrap();
        }
        graph.commit_changes();
        assert_eq!(order(&graph, 0), 0);
        assert_eq!(order(&graph, n - 1), n - 1);
    }

    proptest! {
        #[test]
        fn prop_new_graph_has_size_nodes_and_no_edges(size in 0usize..500) {
            let graph = DefaultTopologicalOrderGraph::new(size);
            prop_assert_eq!(graph.node_count(), size);
            prop_assert_eq!(graph.edge_count(), 0);
        }

        #[test]
        fn prop_acyclic_edges_are_respected(
            edges in proptest::collection::vec((0usize..30, 0usize..30), 0..80)
        ) {
            // Orient every edge from the higher to the lower node: always acyclic
            let mut graph = DefaultTopologicalOrderGraph::new(30);
            for &(a, b) in &edges {
                if a != b {
                    graph.add_edge(a.max(b), a.min(b)).unwrap();
                }
            }
            graph.commit_changes();
            for &(a, b) in &edges {
                if a != b {
                    let from = graph.topological_order(a.max(b)).unwrap();
                    let to = graph.topological_order(a.min(b)).unwrap();
                    prop_assert!(from.order < to.order);
                    prop_assert!(!from.is_looped && !to.is_looped);
                }
            }
        }
    }
}

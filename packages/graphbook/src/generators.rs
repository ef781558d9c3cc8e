//! Small classroom graphs over the identifiers `1..=n`.

use crate::core::{EdgeAttrs, GraphMode};
use crate::model::GraphModel;

fn with_nodes(mode: GraphMode, n: usize) -> GraphModel<usize> {
    let mut graph = GraphModel::new(mode);
    graph.add_nodes_from(1..=n);
    graph
}

/// C_n: 1 - 2 - ... - n - 1. `n = 1` gives a single self-loop, `n = 2` one edge.
pub fn cycle_graph(n: usize) -> GraphModel<usize> {
    let mut graph = with_nodes(GraphMode::Undirected, n);
    for i in 1..=n {
        graph.insert_edge(i, i % n + 1, EdgeAttrs::new());
    }
    graph
}

/// P_n: 1 - 2 - ... - n.
pub fn path_graph(n: usize) -> GraphModel<usize> {
    let mut graph = with_nodes(GraphMode::Undirected, n);
    for i in 1..n {
        graph.insert_edge(i, i + 1, EdgeAttrs::new());
    }
    graph
}

/// K_n: every pair of distinct nodes joined.
pub fn complete_graph(n: usize) -> GraphModel<usize> {
    let mut graph = with_nodes(GraphMode::Undirected, n);
    for i in 1..=n {
        for j in (i + 1)..=n {
            graph.insert_edge(i, j, EdgeAttrs::new());
        }
    }
    graph
}

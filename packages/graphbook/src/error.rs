//! Error taxonomy shared by every graph operation.

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(String),
    #[error("edge ({from}, {to}) not found")]
    EdgeNotFound { from: String, to: String },
    /// Reported by bipartite validation; the caller decides whether it matters.
    #[error(
        "graph is not bipartite: {violations} violating edge(s), {unassigned} unassigned node(s)"
    )]
    InvalidBipartite { violations: usize, unassigned: usize },
}

impl GraphError {
    pub(crate) fn node_not_found<K: Debug>(key: &K) -> Self {
        GraphError::NodeNotFound(format!("{key:?}"))
    }

    pub(crate) fn edge_not_found<K: Debug>(from: &K, to: &K) -> Self {
        GraphError::EdgeNotFound {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound(_) | GraphError::EdgeNotFound { .. }
        )
    }
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_use_debug_keys() {
        assert_eq!(
            GraphError::node_not_found(&"A").to_string(),
            "node \"A\" not found"
        );
        assert_eq!(
            GraphError::edge_not_found(&1, &2).to_string(),
            "edge (1, 2) not found"
        );
    }

    #[test]
    fn not_found_grouping() {
        assert!(GraphError::node_not_found(&7).is_not_found());
        assert!(GraphError::edge_not_found(&7, &8).is_not_found());
        assert!(
            !GraphError::InvalidBipartite {
                violations: 1,
                unassigned: 0
            }
            .is_not_found()
        );
    }
}

//! Bipartite validation. The partition constraint is checked on demand, never
//! enforced by storage, so a violating graph can still be rendered.

use crate::core::Partition;
use crate::error::{GraphError, Result};
use crate::model::GraphModel;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::warn;

/// Outcome of checking a graph against the bipartite property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BipartiteReport<K> {
    /// Edges whose endpoints are not one in partition 0 and one in partition 1.
    pub violations: Vec<(K, K)>,
    /// Nodes without a partition tag, isolated ones included.
    pub unassigned: Vec<K>,
}

impl<K> BipartiteReport<K> {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        Err(GraphError::InvalidBipartite {
            violations: self.violations.len(),
            unassigned: self.unassigned.len(),
        })
    }
}

fn crosses(a: Option<Partition>, b: Option<Partition>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a != b)
}

impl<K> GraphModel<K>
where
    K: Debug + Clone + Eq + Hash,
{
    fn partition_or_unassigned(&self, id: &K) -> Option<Partition> {
        self.node_attrs(id).ok().and_then(|attrs| attrs.partition)
    }

    /// True iff every edge joins a partition-0 node with a partition-1 node.
    pub fn is_valid_bipartite(&self) -> bool {
        self.edges().all(|edge| {
            crosses(
                self.partition_or_unassigned(edge.from),
                self.partition_or_unassigned(edge.to),
            )
        })
    }

    pub fn bipartite_report(&self) -> BipartiteReport<K> {
        let violations: Vec<(K, K)> = self
            .edges()
            .filter(|edge| {
                !crosses(
                    self.partition_or_unassigned(edge.from),
                    self.partition_or_unassigned(edge.to),
                )
            })
            .map(|edge| edge.to_owned_pair())
            .collect();

        let unassigned: Vec<K> = self
            .nodes()
            .filter(|id| self.partition_or_unassigned(id).is_none())
            .cloned()
            .collect();

        if !violations.is_empty() {
            warn!(
                violations = violations.len(),
                unassigned = unassigned.len(),
                "graph violates the bipartite property"
            );
        }

        BipartiteReport {
            violations,
            unassigned,
        }
    }

    /// Nodes of partition 0 and partition 1, in insertion order.
    pub fn partition_sets(&self) -> (Vec<&K>, Vec<&K>) {
        let mut zero = Vec::new();
        let mut one = Vec::new();
        for id in self.nodes() {
            match self.partition_or_unassigned(id) {
                Some(Partition::Zero) => zero.push(id),
                Some(Partition::One) => one.push(id),
                None => {}
            }
        }
        (zero, one)
    }
}

//! AdjacencyMap: keyed adjacency storage. Out-neighbours carry the edge
//! attributes; directed graphs additionally keep a predecessor set per node.
//! Undirected edges are stored symmetrically, once under each endpoint.

use crate::core::{EdgeAttrs, NodeAttrs};
use crate::interner::NodeInterner;
use crate::traits::EdgeView;
use indexmap::{IndexMap, IndexSet};
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct AdjacencyMap<K>
where
    K: Eq + Hash + Clone,
{
    nodes: NodeInterner<K>,
    out_adj: IndexMap<K, IndexMap<K, EdgeAttrs>>,
    in_adj: IndexMap<K, IndexSet<K>>,
    directed: bool,
}

impl<K> AdjacencyMap<K>
where
    K: Debug + Eq + Hash + Clone,
{
    pub fn new(directed: bool) -> Self {
        Self {
            nodes: NodeInterner::new(),
            out_adj: IndexMap::new(),
            in_adj: IndexMap::new(),
            directed,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn nodes(&self) -> &NodeInterner<K> {
        &self.nodes
    }

    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    pub fn size(&self) -> usize {
        let slots: usize = self.out_adj.values().map(IndexMap::len).sum();
        if self.directed {
            slots
        } else {
            // every non-loop edge occupies two slots, a loop only one
            let loops = self
                .out_adj
                .iter()
                .filter(|(k, nbrs)| nbrs.contains_key(*k))
                .count();
            (slots + loops) / 2
        }
    }

    pub fn contains_node(&self, key: &K) -> bool {
        self.nodes.contains(key)
    }

    /// Returns true when the node is new.
    pub fn add_node(&mut self, key: K, attrs: NodeAttrs) -> bool {
        let inserted = self.nodes.intern(key.clone(), attrs);
        if inserted {
            self.out_adj.insert(key.clone(), IndexMap::new());
            if self.directed {
                self.in_adj.insert(key, IndexSet::new());
            }
        }
        inserted
    }

    /// Inserts or merges the edge. Both endpoints must already be present;
    /// returns `None` when one is missing, otherwise whether the edge is new.
    pub fn add_edge(&mut self, from: &K, to: &K, attrs: EdgeAttrs) -> Option<bool> {
        if !self.nodes.contains(from) || !self.nodes.contains(to) {
            return None;
        }

        let nbrs = self.out_adj.get_mut(from)?;
        let (stored, inserted) = match nbrs.get_mut(to) {
            Some(existing) => {
                existing.merge(attrs);
                (existing.clone(), false)
            }
            None => {
                nbrs.insert(to.clone(), attrs.clone());
                (attrs, true)
            }
        };

        if self.directed {
            self.in_adj.get_mut(to)?.insert(from.clone());
        } else if from != to {
            self.out_adj.get_mut(to)?.insert(from.clone(), stored);
        }
        Some(inserted)
    }

    pub fn remove_edge(&mut self, from: &K, to: &K) -> Option<EdgeAttrs> {
        let attrs = self.out_adj.get_mut(from)?.shift_remove(to)?;
        if self.directed {
            if let Some(preds) = self.in_adj.get_mut(to) {
                preds.shift_remove(from);
            }
        } else if from != to {
            if let Some(nbrs) = self.out_adj.get_mut(to) {
                nbrs.shift_remove(from);
            }
        }
        Some(attrs)
    }

    /// Removes the node together with every incident edge.
    pub fn remove_node(&mut self, key: &K) -> Option<NodeAttrs> {
        let attrs = self.nodes.remove(key)?;

        let succs = self.out_adj.shift_remove(key).unwrap_or_default();
        if self.directed {
            for succ in succs.keys() {
                if let Some(preds) = self.in_adj.get_mut(succ) {
                    preds.shift_remove(key);
                }
            }
            let preds = self.in_adj.shift_remove(key).unwrap_or_default();
            for pred in &preds {
                if let Some(nbrs) = self.out_adj.get_mut(pred) {
                    nbrs.shift_remove(key);
                }
            }
        } else {
            for nbr in succs.keys() {
                if let Some(nbrs) = self.out_adj.get_mut(nbr) {
                    nbrs.shift_remove(key);
                }
            }
        }
        Some(attrs)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.out_adj.clear();
        self.in_adj.clear();
    }

    pub fn edge(&self, from: &K, to: &K) -> Option<&EdgeAttrs> {
        self.out_adj.get(from)?.get(to)
    }

    pub fn successors(&self, key: &K) -> Option<Box<dyn Iterator<Item = &K> + '_>> {
        let nbrs = self.out_adj.get(key)?;
        Some(Box::new(nbrs.keys()))
    }

    pub fn predecessors(&self, key: &K) -> Option<Box<dyn Iterator<Item = &K> + '_>> {
        if !self.directed {
            return self.successors(key);
        }
        let preds = self.in_adj.get(key)?;
        Some(Box::new(preds.iter()))
    }

    /// Out-degree plus in-degree when directed; a loop counts twice when undirected.
    pub fn degree(&self, key: &K) -> Option<usize> {
        let out = self.out_adj.get(key)?;
        if self.directed {
            let preds = self.in_adj.get(key).map_or(0, IndexSet::len);
            Some(out.len() + preds)
        } else {
            let loops = usize::from(out.contains_key(key));
            Some(out.len() + loops)
        }
    }

    /// Every edge once, grouped by source node in insertion order. An
    /// undirected edge is reported under whichever endpoint was added first.
    pub fn edges(&self) -> Box<dyn Iterator<Item = EdgeView<'_, K>> + '_> {
        let directed = self.directed;
        Box::new(
            self.out_adj
                .iter()
                .enumerate()
                .flat_map(move |(index, (from, nbrs))| {
                    nbrs.iter()
                        .filter(move |(to, _)| {
                            directed
                                || self
                                    .out_adj
                                    .get_index_of(*to)
                                    .is_some_and(|to_index| to_index >= index)
                        })
                        .map(move |(to, attrs)| EdgeView { from, to, attrs })
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_nodes(directed: bool, keys: &[u32]) -> AdjacencyMap<u32> {
        let mut adj = AdjacencyMap::new(directed);
        for key in keys {
            adj.add_node(*key, NodeAttrs::new());
        }
        adj
    }

    #[test]
    fn undirected_edges_are_symmetric_and_counted_once() {
        let mut adj = with_nodes(false, &[1, 2, 3]);
        assert_eq!(adj.add_edge(&1, &2, EdgeAttrs::weighted(1.0)), Some(true));
        assert_eq!(adj.add_edge(&2, &1, EdgeAttrs::labeled("x")), Some(false));
        assert_eq!(adj.size(), 1);

        let forward = adj.edge(&1, &2).cloned();
        assert_eq!(forward, adj.edge(&2, &1).cloned());
        assert_eq!(forward, Some(EdgeAttrs::weighted(1.0).with_label("x")));
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let mut adj = with_nodes(false, &[1]);
        assert_eq!(adj.add_edge(&1, &9, EdgeAttrs::new()), None);
        assert_eq!(adj.size(), 0);
    }

    #[test]
    fn self_loop_counts() {
        let mut adj = with_nodes(false, &[1, 2]);
        adj.add_edge(&1, &1, EdgeAttrs::new());
        adj.add_edge(&1, &2, EdgeAttrs::new());
        assert_eq!(adj.size(), 2);
        assert_eq!(adj.degree(&1), Some(3));
        assert_eq!(adj.edges().count(), 2);
    }

    #[test]
    fn directed_removal_cleans_both_directions() {
        let mut adj = with_nodes(true, &[1, 2, 3]);
        adj.add_edge(&1, &2, EdgeAttrs::new());
        adj.add_edge(&3, &2, EdgeAttrs::new());
        adj.add_edge(&2, &1, EdgeAttrs::new());
        adj.add_edge(&2, &2, EdgeAttrs::new());

        assert_eq!(adj.degree(&2), Some(5));
        assert!(adj.remove_node(&2).is_some());
        assert_eq!(adj.size(), 0);
        assert_eq!(adj.successors(&1).map(Iterator::count), Some(0));
        assert_eq!(adj.predecessors(&1).map(Iterator::count), Some(0));
        assert!(adj.successors(&2).is_none());
    }

    #[test]
    fn undirected_edges_reported_from_first_inserted_endpoint() {
        let mut adj = with_nodes(false, &[1, 2, 3, 4]);
        adj.add_edge(&4, &1, EdgeAttrs::new());
        adj.add_edge(&2, &3, EdgeAttrs::new());
        let pairs: Vec<_> = adj.edges().map(|e| (*e.from, *e.to)).collect();
        assert_eq!(pairs, vec![(1, 4), (2, 3)]);
    }

    #[test]
    fn remove_edge_reports_missing() {
        let mut adj = with_nodes(true, &[1, 2]);
        adj.add_edge(&1, &2, EdgeAttrs::weighted(3.0));
        assert!(adj.remove_edge(&2, &1).is_none());
        assert_eq!(adj.remove_edge(&1, &2), Some(EdgeAttrs::weighted(3.0)));
        assert!(adj.predecessors(&2).is_some_and(|mut p| p.next().is_none()));
    }
}

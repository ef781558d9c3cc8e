//! Layer helpers for the toy multilayer network. A layer is nothing more than
//! the label carried by an edge; all layers live in the same graph.

use crate::model::GraphModel;
use indexmap::{IndexMap, IndexSet};
use std::fmt::Debug;
use std::hash::Hash;

impl<K> GraphModel<K>
where
    K: Debug + Clone + Eq + Hash,
{
    /// Distinct edge labels in first-seen order.
    pub fn layers(&self) -> IndexSet<&str> {
        self.edges().filter_map(|edge| edge.label()).collect()
    }

    pub fn layer_counts(&self) -> IndexMap<&str, usize> {
        let mut counts = IndexMap::new();
        for label in self.edges().filter_map(|edge| edge.label()) {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Copy of one layer: same mode and configuration, only the edges carrying
    /// `label` and the endpoints they touch.
    pub fn layer_subgraph(&self, label: &str) -> GraphModel<K> {
        let mut layer = GraphModel::with_config(self.config());
        for edge in self.edges_by_label(label) {
            for endpoint in [edge.from, edge.to] {
                let attrs = self.node_attrs(endpoint).cloned().unwrap_or_default();
                layer.add_node(endpoint.clone(), attrs);
            }
            layer.insert_edge(edge.from.clone(), edge.to.clone(), edge.attrs.clone());
        }
        layer
    }
}

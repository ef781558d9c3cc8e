//! GraphModel: the in-memory graph the exercises build, mutate and query.
//! Wraps an [`AdjacencyMap`] and carries the mode and configuration chosen at
//! construction.

use crate::core::{EdgeAttrs, GraphConfig, GraphMode, NodeAttrs, Partition};
use crate::error::{GraphError, Result};
use crate::storage::AdjacencyMap;
use crate::traits::{EdgeView, GraphBase};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct GraphModel<K = String>
where
    K: Debug + Clone + Eq + Hash,
{
    config: GraphConfig,
    storage: AdjacencyMap<K>,
}

impl<K> GraphModel<K>
where
    K: Debug + Clone + Eq + Hash,
{
    pub fn new(mode: GraphMode) -> Self {
        Self::with_config(GraphConfig::new(mode))
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            storage: AdjacencyMap::new(config.mode.is_directed()),
        }
    }

    pub fn undirected() -> Self {
        Self::new(GraphMode::Undirected)
    }

    pub fn directed() -> Self {
        Self::new(GraphMode::Directed)
    }

    pub fn bipartite() -> Self {
        Self::new(GraphMode::Bipartite)
    }

    /// Builds a graph whose nodes are exactly the endpoints of `edges`.
    pub fn from_edges<UK, EI>(mode: GraphMode, edges: EI) -> Self
    where
        UK: Into<K>,
        EI: IntoIterator<Item = (UK, UK)>,
    {
        let mut graph = Self::new(mode);
        for (from, to) in edges {
            graph.insert_edge(from.into(), to.into(), EdgeAttrs::new());
        }
        graph
    }

    pub fn from_weighted_edges<UK, EI>(mode: GraphMode, edges: EI) -> Self
    where
        UK: Into<K>,
        EI: IntoIterator<Item = (UK, UK, f64)>,
    {
        let mut graph = Self::new(mode);
        for (from, to, weight) in edges {
            graph.insert_edge(from.into(), to.into(), EdgeAttrs::weighted(weight));
        }
        graph
    }

    pub fn from_labeled_edges<UK, L, EI>(mode: GraphMode, edges: EI) -> Self
    where
        UK: Into<K>,
        L: Into<String>,
        EI: IntoIterator<Item = (UK, UK, L)>,
    {
        let mut graph = Self::new(mode);
        for (from, to, label) in edges {
            graph.insert_edge(from.into(), to.into(), EdgeAttrs::labeled(label));
        }
        graph
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn mode(&self) -> GraphMode {
        self.config.mode
    }

    pub fn is_directed(&self) -> bool {
        self.config.mode.is_directed()
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.storage.order()
    }

    /// Number of edges; an undirected edge counts once.
    pub fn size(&self) -> usize {
        self.storage.size()
    }

    /// Inserts the node, or merges `attrs` into an existing one.
    pub fn add_node(&mut self, id: K, attrs: NodeAttrs) {
        if self.storage.contains_node(&id) {
            trace!(node = ?id, ?attrs, "merging node attributes");
        } else {
            debug!(node = ?id, "adding node");
        }
        self.storage.add_node(id, attrs);
    }

    pub fn add_node_in(&mut self, id: K, partition: Partition) {
        self.add_node(id, NodeAttrs::in_partition(partition));
    }

    pub fn add_nodes_from<UK, NI>(&mut self, ids: NI)
    where
        UK: Into<K>,
        NI: IntoIterator<Item = UK>,
    {
        for id in ids {
            self.add_node(id.into(), NodeAttrs::new());
        }
    }

    /// Inserts the edge, or merges `attrs` into an existing one. Unknown
    /// endpoints are created unless the graph was configured otherwise.
    pub fn add_edge(&mut self, from: K, to: K, attrs: EdgeAttrs) -> Result<()> {
        if !self.config.autocreate_nodes {
            for endpoint in [&from, &to] {
                if !self.storage.contains_node(endpoint) {
                    return Err(GraphError::node_not_found(endpoint));
                }
            }
        }
        self.insert_edge(from, to, attrs);
        Ok(())
    }

    pub fn add_weighted_edge(&mut self, from: K, to: K, weight: f64) -> Result<()> {
        self.add_edge(from, to, EdgeAttrs::weighted(weight))
    }

    pub fn add_labeled_edge(&mut self, from: K, to: K, label: impl Into<String>) -> Result<()> {
        self.add_edge(from, to, EdgeAttrs::labeled(label))
    }

    pub fn add_edges_from<UK, EI>(&mut self, edges: EI) -> Result<()>
    where
        UK: Into<K>,
        EI: IntoIterator<Item = (UK, UK)>,
    {
        for (from, to) in edges {
            self.add_edge(from.into(), to.into(), EdgeAttrs::new())?;
        }
        Ok(())
    }

    /// Unconditional insert: missing endpoints are always created.
    pub(crate) fn insert_edge(&mut self, from: K, to: K, attrs: EdgeAttrs) {
        if !self.storage.contains_node(&from) {
            self.add_node(from.clone(), NodeAttrs::new());
        }
        if !self.storage.contains_node(&to) {
            self.add_node(to.clone(), NodeAttrs::new());
        }
        match self.storage.add_edge(&from, &to, attrs) {
            Some(true) => debug!(from = ?from, to = ?to, "adding edge"),
            Some(false) => trace!(from = ?from, to = ?to, "merging edge attributes"),
            None => {}
        }
    }

    /// Removes the node and every incident edge.
    pub fn remove_node(&mut self, id: &K) -> Result<NodeAttrs> {
        let attrs = self
            .storage
            .remove_node(id)
            .ok_or_else(|| GraphError::node_not_found(id))?;
        debug!(node = ?id, "removed node");
        Ok(attrs)
    }

    pub fn remove_edge(&mut self, from: &K, to: &K) -> Result<EdgeAttrs> {
        let attrs = self
            .storage
            .remove_edge(from, to)
            .ok_or_else(|| GraphError::edge_not_found(from, to))?;
        debug!(from = ?from, to = ?to, "removed edge");
        Ok(attrs)
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }

    pub fn has_node(&self, id: &K) -> bool {
        self.storage.contains_node(id)
    }

    /// Orientation matters only for directed graphs.
    pub fn has_edge(&self, from: &K, to: &K) -> bool {
        self.storage.edge(from, to).is_some()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.storage.nodes().keys()
    }

    pub fn node_attrs(&self, id: &K) -> Result<&NodeAttrs> {
        self.storage
            .nodes()
            .get(id)
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_, K>> {
        self.storage.edges()
    }

    pub fn edge_attrs(&self, from: &K, to: &K) -> Result<&EdgeAttrs> {
        self.storage
            .edge(from, to)
            .ok_or_else(|| GraphError::edge_not_found(from, to))
    }

    /// Adjacent nodes; outgoing ones for directed graphs.
    pub fn neighbors(&self, id: &K) -> Result<Box<dyn Iterator<Item = &K> + '_>> {
        self.storage
            .successors(id)
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    /// Incoming neighbours for directed graphs, same as `neighbors` otherwise.
    pub fn predecessors(&self, id: &K) -> Result<Box<dyn Iterator<Item = &K> + '_>> {
        self.storage
            .predecessors(id)
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    pub fn degree(&self, id: &K) -> Result<usize> {
        self.storage
            .degree(id)
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    pub fn edges_by_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = EdgeView<'a, K>> {
        self.edges().filter(move |edge| edge.attrs.has_label(label))
    }

    /// `None` means the node was never assigned to a partition.
    pub fn partition_of(&self, id: &K) -> Result<Option<Partition>> {
        self.node_attrs(id).map(|attrs| attrs.partition)
    }
}

impl<K> GraphBase for GraphModel<K>
where
    K: Debug + Clone + Eq + Hash,
{
    type Key = K;

    fn mode(&self) -> GraphMode {
        self.config.mode
    }

    fn order(&self) -> usize {
        self.storage.order()
    }

    fn size(&self) -> usize {
        self.storage.size()
    }

    fn node_keys(&self) -> Box<dyn Iterator<Item = &Self::Key> + '_> {
        Box::new(self.storage.nodes().keys())
    }

    fn node_attrs(&self, key: &Self::Key) -> Option<&NodeAttrs> {
        self.storage.nodes().get(key)
    }

    fn edge_views(&self) -> Box<dyn Iterator<Item = EdgeView<'_, Self::Key>> + '_> {
        self.storage.edges()
    }
}

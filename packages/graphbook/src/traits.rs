//! Read-only graph view shared by the model and its renderers.

use crate::core::{EdgeAttrs, GraphMode, NodeAttrs};
use std::{fmt::Debug, hash::Hash};

/// One edge as reported by a graph: endpoints plus attributes.
/// For undirected graphs `from`/`to` carry no orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a, K> {
    pub from: &'a K,
    pub to: &'a K,
    pub attrs: &'a EdgeAttrs,
}

impl<'a, K> EdgeView<'a, K>
where
    K: Eq,
{
    pub fn weight(&self) -> Option<f64> {
        self.attrs.weight
    }

    pub fn label(&self) -> Option<&'a str> {
        self.attrs.label.as_deref()
    }

    /// Whether this edge joins `a` and `b`, in that order when `directed`.
    pub fn connects(&self, a: &K, b: &K, directed: bool) -> bool {
        (self.from == a && self.to == b) || (!directed && self.from == b && self.to == a)
    }
}

impl<K> EdgeView<'_, K>
where
    K: Clone,
{
    pub fn to_owned_pair(&self) -> (K, K) {
        (self.from.clone(), self.to.clone())
    }
}

/// Minimal read-only graph trait; enough structure for a renderer to lay out
/// and draw a graph.
pub trait GraphBase {
    type Key: Debug + Clone + Eq + Hash;

    fn mode(&self) -> GraphMode;

    fn is_directed(&self) -> bool {
        self.mode().is_directed()
    }

    fn order(&self) -> usize;
    fn size(&self) -> usize;

    fn node_keys(&self) -> Box<dyn Iterator<Item = &Self::Key> + '_>;
    fn node_attrs(&self, key: &Self::Key) -> Option<&NodeAttrs>;

    fn edge_views(&self) -> Box<dyn Iterator<Item = EdgeView<'_, Self::Key>> + '_>;
}

//! core small types

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Graph mode, fixed when the graph is created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
    #[default]
    Undirected,
    Directed,
    /// Undirected, with nodes expected to carry a partition tag.
    Bipartite,
}

impl GraphMode {
    pub fn is_directed(self) -> bool {
        matches!(self, GraphMode::Directed)
    }
}

impl Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphMode::Undirected => "undirected",
            GraphMode::Directed => "directed",
            GraphMode::Bipartite => "bipartite",
        };
        f.write_str(name)
    }
}

/// One of the two node groups of a bipartite graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Partition {
    Zero,
    One,
}

impl Partition {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Partition::Zero),
            1 => Some(Partition::One),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Partition::Zero => 0,
            Partition::One => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Partition::Zero => Partition::One,
            Partition::One => Partition::Zero,
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Node attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttrs {
    pub partition: Option<Partition>,
}

impl NodeAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_partition(partition: Partition) -> Self {
        Self {
            partition: Some(partition),
        }
    }

    /// Overwrite every attribute `other` sets; unset ones keep their value.
    pub fn merge(&mut self, other: NodeAttrs) {
        if other.partition.is_some() {
            self.partition = other.partition;
        }
    }
}

/// Edge attributes: optional weight and optional label (the "layer" tag).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttrs {
    pub weight: Option<f64>,
    pub label: Option<String>,
}

impl EdgeAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weighted(weight: f64) -> Self {
        Self {
            weight: Some(weight),
            label: None,
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            weight: None,
            label: Some(label.into()),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }

    /// Same rule as [`NodeAttrs::merge`].
    pub fn merge(&mut self, other: EdgeAttrs) {
        if other.weight.is_some() {
            self.weight = other.weight;
        }
        if other.label.is_some() {
            self.label = other.label;
        }
    }
}

/// Construction-time settings of a graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub mode: GraphMode,
    /// When false, `add_edge` refuses endpoints that were never added.
    pub autocreate_nodes: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            mode: GraphMode::Undirected,
            autocreate_nodes: true,
        }
    }
}

impl GraphConfig {
    pub fn new(mode: GraphMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn autocreate_nodes(mut self, autocreate: bool) -> Self {
        self.autocreate_nodes = autocreate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_merge_keeps_unset_fields() {
        let mut attrs = EdgeAttrs::weighted(2.0).with_label("Twitter");
        attrs.merge(EdgeAttrs::weighted(-1.5));
        assert_eq!(attrs.weight, Some(-1.5));
        assert_eq!(attrs.label.as_deref(), Some("Twitter"));

        attrs.merge(EdgeAttrs::labeled("LinkedIn"));
        assert_eq!(attrs.weight, Some(-1.5));
        assert!(attrs.has_label("LinkedIn"));
    }

    #[test]
    fn node_merge_overwrites_partition() {
        let mut attrs = NodeAttrs::in_partition(Partition::Zero);
        attrs.merge(NodeAttrs::new());
        assert_eq!(attrs.partition, Some(Partition::Zero));
        attrs.merge(NodeAttrs::in_partition(Partition::One));
        assert_eq!(attrs.partition, Some(Partition::One));
    }

    #[test]
    fn partition_indices() {
        assert_eq!(Partition::from_index(0), Some(Partition::Zero));
        assert_eq!(Partition::from_index(1), Some(Partition::One));
        assert_eq!(Partition::from_index(2), None);
        assert_eq!(Partition::Zero.other(), Partition::One);
        assert_eq!(Partition::One.to_string(), "1");
    }

    #[test]
    fn config_defaults_to_permissive_undirected() {
        let config = GraphConfig::default();
        assert_eq!(config.mode, GraphMode::Undirected);
        assert!(config.autocreate_nodes);

        let strict = GraphConfig::new(GraphMode::Directed).autocreate_nodes(false);
        assert!(strict.mode.is_directed());
        assert!(!strict.autocreate_nodes);
    }

    #[test]
    fn config_fills_missing_fields_from_default() {
        let config: GraphConfig = serde_json::from_str(r#"{ "mode": "bipartite" }"#).unwrap();
        assert_eq!(config.mode, GraphMode::Bipartite);
        assert!(config.autocreate_nodes);
    }
}

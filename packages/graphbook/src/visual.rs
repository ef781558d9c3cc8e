//! Rendering collaborator: a read-only snapshot of a graph, node layouts and a
//! TikZ renderer. Nothing in the model depends on this module.

use crate::core::{GraphMode, Partition};
use crate::latex::escape_latex;
use crate::traits::GraphBase;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, f64::consts::PI, fmt::Display};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnapshotNode {
    pub label: String,
    pub partition: Option<Partition>,
    pub position: Option<Position>,
}

/// `from`/`to` index into [`GraphSnapshot::nodes`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnapshotEdge {
    pub from: usize,
    pub to: usize,
    pub weight: Option<f64>,
    pub label: Option<String>,
}

/// Everything a renderer needs, detached from the graph it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub mode: GraphMode,
    pub directed: bool,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl GraphSnapshot {
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: GraphBase,
        G::Key: Display,
    {
        Self::with_position_hints(graph, std::iter::empty())
    }

    /// Like [`GraphSnapshot::from_graph`], with fixed positions for some nodes.
    /// Hints for unknown nodes are ignored.
    pub fn with_position_hints<G, I>(graph: &G, hints: I) -> Self
    where
        G: GraphBase,
        G::Key: Display,
        I: IntoIterator<Item = (G::Key, Position)>,
    {
        let hints: HashMap<G::Key, Position> = hints.into_iter().collect();

        let mut index: IndexMap<&G::Key, usize> = IndexMap::new();
        let mut nodes = Vec::with_capacity(graph.order());
        for key in graph.node_keys() {
            index.insert(key, nodes.len());
            nodes.push(SnapshotNode {
                label: key.to_string(),
                partition: graph.node_attrs(key).and_then(|attrs| attrs.partition),
                position: hints.get(key).copied(),
            });
        }

        let edges = graph
            .edge_views()
            .filter_map(|edge| {
                Some(SnapshotEdge {
                    from: *index.get(edge.from)?,
                    to: *index.get(edge.to)?,
                    weight: edge.weight(),
                    label: edge.label().map(str::to_owned),
                })
            })
            .collect();

        Self {
            mode: graph.mode(),
            directed: graph.is_directed(),
            nodes,
            edges,
        }
    }

    /// Distinct edge labels in first-seen order.
    pub fn layer_labels(&self) -> IndexSet<&str> {
        self.edges
            .iter()
            .filter_map(|edge| edge.label.as_deref())
            .collect()
    }
}

/// Node placement strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Circular,
    /// Force-directed, started from the circular placement.
    #[default]
    Spring,
    /// Partition 0 on the left, partition 1 on the right, unassigned nodes in
    /// a middle column.
    Bipartite,
}

impl Layout {
    pub fn for_mode(mode: GraphMode) -> Self {
        match mode {
            GraphMode::Bipartite => Layout::Bipartite,
            GraphMode::Undirected | GraphMode::Directed => Layout::Spring,
        }
    }

    /// Fills in every position the snapshot does not already carry.
    pub fn apply(self, snapshot: &mut GraphSnapshot) {
        let computed = match self {
            Layout::Circular => circular_positions(snapshot.nodes.len()),
            Layout::Spring => spring_positions(snapshot),
            Layout::Bipartite => bipartite_positions(snapshot),
        };
        for (node, position) in snapshot.nodes.iter_mut().zip(computed) {
            node.position.get_or_insert(position);
        }
    }
}

fn circular_positions(n: usize) -> Vec<Position> {
    let radius = (n as f64).sqrt() * 2.0;
    (0..n)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64) / (n as f64);
            Position::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Fruchterman-Reingold style simulation; hinted nodes stay pinned.
fn spring_positions(snapshot: &GraphSnapshot) -> Vec<Position> {
    let n = snapshot.nodes.len();
    let mut pos = circular_positions(n);
    if n == 0 {
        return pos;
    }
    for (p, node) in pos.iter_mut().zip(&snapshot.nodes) {
        if let Some(hint) = node.position {
            *p = hint;
        }
    }

    // treat everything as undirected attraction
    let mut adj: Vec<Vec<usize>> = vec![vec![]; n];
    for edge in &snapshot.edges {
        if edge.from != edge.to {
            adj[edge.from].push(edge.to);
            adj[edge.to].push(edge.from);
        }
    }

    let width = (n as f64).sqrt() * 5.0;
    let k_opt = (width * width / (n as f64)).sqrt();
    let iterations = 100;
    let mut temp = width / 10.0;

    for _ in 0..iterations {
        let mut disp = vec![Position::new(0.0, 0.0); n];

        for v in 0..n {
            for u in 0..n {
                if u != v {
                    let dx = pos[v].x - pos[u].x;
                    let dy = pos[v].y - pos[u].y;
                    let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                    let force = (k_opt * k_opt) / dist;
                    disp[v].x += (dx / dist) * force;
                    disp[v].y += (dy / dist) * force;
                }
            }
        }

        for v in 0..n {
            for &u in &adj[v] {
                let dx = pos[v].x - pos[u].x;
                let dy = pos[v].y - pos[u].y;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = (dist * dist) / k_opt;
                disp[v].x -= (dx / dist) * force;
                disp[v].y -= (dy / dist) * force;
            }
        }

        for v in 0..n {
            if snapshot.nodes[v].position.is_some() {
                continue;
            }
            let dx = disp[v].x;
            let dy = disp[v].y;
            let dist = (dx * dx + dy * dy).sqrt().max(0.01);
            let move_dist = dist.min(temp);
            pos[v].x += (dx / dist) * move_dist;
            pos[v].y += (dy / dist) * move_dist;
        }
        temp *= 0.95;
    }
    pos
}

fn bipartite_positions(snapshot: &GraphSnapshot) -> Vec<Position> {
    const COLUMN_GAP: f64 = 4.0;
    const ROW_GAP: f64 = 1.5;

    let column = |partition: Option<Partition>| match partition {
        Some(Partition::Zero) => 0.0,
        None => COLUMN_GAP / 2.0,
        Some(Partition::One) => COLUMN_GAP,
    };

    let mut counts: HashMap<Option<Partition>, usize> = HashMap::new();
    for node in &snapshot.nodes {
        *counts.entry(node.partition).or_insert(0) += 1;
    }

    // each column is centred vertically around y = 0
    let mut seen: HashMap<Option<Partition>, usize> = HashMap::new();
    snapshot
        .nodes
        .iter()
        .map(|node| {
            let total = counts.get(&node.partition).copied().unwrap_or(1);
            let row = seen.entry(node.partition).or_insert(0);
            let y = ((total as f64 - 1.0) / 2.0 - *row as f64) * ROW_GAP;
            *row += 1;
            Position::new(column(node.partition), y)
        })
        .collect()
}

/// Consumes a snapshot and produces a visual artifact.
pub trait Renderer {
    type Output;

    fn render(&self, snapshot: &GraphSnapshot) -> Self::Output;
}

/// Colours cycled through for distinct edge labels.
const LAYER_COLORS: [&str; 6] = ["blue", "red", "green!60!black", "orange", "violet", "teal"];

/// Emits a TikZ figure. Weights and labels become edge annotations; each
/// distinct label gets its own colour.
#[derive(Clone, Copy, Debug, Default)]
pub struct TikzRenderer {
    pub layout: Option<Layout>,
}

impl TikzRenderer {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout: Some(layout),
        }
    }
}

fn edge_annotation(edge: &SnapshotEdge) -> Option<String> {
    match (&edge.label, edge.weight) {
        (Some(label), Some(weight)) => Some(format!("{}: {}", escape_latex(label), weight)),
        (Some(label), None) => Some(escape_latex(label)),
        (None, Some(weight)) => Some(weight.to_string()),
        (None, None) => None,
    }
}

impl Renderer for TikzRenderer {
    type Output = String;

    fn render(&self, snapshot: &GraphSnapshot) -> String {
        let n = snapshot.nodes.len();
        if n == 0 {
            return "\\begin{figure}[htbp]\\begin{tikzpicture}\n% empty graph\n\\end{tikzpicture}\\end{figure}".to_string();
        }

        let mut placed = snapshot.clone();
        self.layout
            .unwrap_or_else(|| Layout::for_mode(snapshot.mode))
            .apply(&mut placed);

        let mut nodes_tex = String::new();
        for (i, node) in placed.nodes.iter().enumerate() {
            let pos = node.position.unwrap_or(Position::new(0.0, 0.0));
            let style = match node.partition {
                Some(Partition::Zero) => "main node, fill=blue!15",
                Some(Partition::One) => "main node, fill=red!15",
                None => "main node",
            };
            nodes_tex.push_str(&format!(
                "  \\node[{}] (n{}) at ({:.3},{:.3}) {{{}}};\n",
                style,
                i,
                pos.x,
                pos.y,
                escape_latex(&node.label)
            ));
        }

        let layer_colors: HashMap<&str, &str> = placed
            .layer_labels()
            .into_iter()
            .zip(LAYER_COLORS.iter().copied().cycle())
            .collect();

        let mut edges_tex = String::new();
        let arrow_style = if placed.directed { "->" } else { "-" };

        // a directed edge whose reverse also exists is bent so both stay visible
        let present: IndexSet<(usize, usize)> =
            placed.edges.iter().map(|e| (e.from, e.to)).collect();

        for edge in &placed.edges {
            let color = edge
                .label
                .as_deref()
                .and_then(|label| layer_colors.get(label).copied())
                .unwrap_or("black");
            let base_style = format!("draw={color}, line width=0.8pt");
            let annotation = edge_annotation(edge);

            if edge.from == edge.to {
                let w_lbl = annotation
                    .map(|l| format!("node[midway, above, font=\\tiny] {{{l}}}"))
                    .unwrap_or_default();
                edges_tex.push_str(&format!(
                    "  \\draw[{}, {}, looseness=10] (n{}) to[out=45, in=135] {} (n{});\n",
                    arrow_style, base_style, edge.from, w_lbl, edge.to
                ));
                continue;
            }

            let opposed = placed.directed && present.contains(&(edge.to, edge.from));
            let bend_str = if opposed { "bend left=15.0" } else { "bend left=0" };
            let w_lbl = annotation
                .map(|l| format!("node[midway, sloped, above, font=\\small] {{{l}}}"))
                .unwrap_or_default();

            edges_tex.push_str(&format!(
                "  \\draw[{}, {}, {}] (n{}) to {} (n{});\n",
                arrow_style, base_style, bend_str, edge.from, w_lbl, edge.to
            ));
        }

        format!(
            "\\begin{{figure}}[htbp]\\begin{{tikzpicture}}[>=latex, auto]\n\
             \\tikzstyle{{main node}}=[circle, draw, fill=white, font=\\sffamily\\bfseries, minimum size=20pt, inner sep=2pt]\n\
             % Nodes\n\
             {}\n\
             % Edges\n\
             {}\n\
             \\end{{tikzpicture}}\\end{{figure}}",
            nodes_tex, edges_tex
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GraphMode;
    use crate::model::GraphModel;

    fn directed_triangle() -> GraphModel<i32> {
        GraphModel::from_weighted_edges(
            GraphMode::Directed,
            [(1, 2, 3.5), (2, 3, 1.2), (3, 1, 4.8)],
        )
    }

    #[test]
    fn snapshot_indexes_edges_by_node_position() {
        let snapshot = GraphSnapshot::from_graph(&directed_triangle());
        assert!(snapshot.directed);
        let labels: Vec<&str> = snapshot.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
        assert_eq!(
            snapshot.edges[2],
            SnapshotEdge {
                from: 2,
                to: 0,
                weight: Some(4.8),
                label: None
            }
        );
    }

    #[test]
    fn hints_survive_layout() {
        let graph = directed_triangle();
        let mut snapshot =
            GraphSnapshot::with_position_hints(&graph, [(2, Position::new(9.0, -9.0))]);
        Layout::Spring.apply(&mut snapshot);

        assert_eq!(snapshot.nodes[1].position, Some(Position::new(9.0, -9.0)));
        assert!(snapshot.nodes.iter().all(|n| n.position.is_some()));
    }

    #[test]
    fn bipartite_layout_uses_columns() {
        let mut graph = GraphModel::<&str>::bipartite();
        graph.add_node_in("A", Partition::Zero);
        graph.add_node_in("B", Partition::Zero);
        graph.add_node_in("1", Partition::One);
        graph.add_nodes_from(["?"]);

        let mut snapshot = GraphSnapshot::from_graph(&graph);
        Layout::Bipartite.apply(&mut snapshot);
        let pos: Vec<Position> = snapshot.nodes.iter().filter_map(|n| n.position).collect();

        assert_eq!(pos[0], Position::new(0.0, 0.75));
        assert_eq!(pos[1], Position::new(0.0, -0.75));
        assert_eq!(pos[2], Position::new(4.0, 0.0));
        assert_eq!(pos[3], Position::new(2.0, 0.0));
    }

    #[test]
    fn tikz_marks_direction_and_weights() {
        let tex = TikzRenderer::new(Layout::Circular)
            .render(&GraphSnapshot::from_graph(&directed_triangle()));
        assert!(tex.contains("\\draw[->"));
        assert!(tex.contains("{3.5}"));
        assert_eq!(tex.matches("\\node[main node]").count(), 3);
    }

    #[test]
    fn tikz_colours_layers() {
        let graph = GraphModel::<i32>::from_labeled_edges(
            GraphMode::Undirected,
            [(1, 2, "Facebook"), (2, 3, "Twitter"), (4, 1, "Facebook")],
        );
        let tex = TikzRenderer::default().render(&GraphSnapshot::from_graph(&graph));
        assert_eq!(tex.matches("draw=blue").count(), 2);
        assert_eq!(tex.matches("draw=red").count(), 1);
        assert!(tex.contains("\\draw[-, "));
    }

    #[test]
    fn empty_graph_renders_placeholder() {
        let graph = GraphModel::<i32>::undirected();
        let tex = TikzRenderer::default().render(&GraphSnapshot::from_graph(&graph));
        assert!(tex.contains("% empty graph"));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = serde_json::to_value(GraphSnapshot::from_graph(&directed_triangle())).unwrap();
        assert_eq!(json["mode"], "directed");
        assert_eq!(json["edges"][0]["weight"], 3.5);
        assert_eq!(json["nodes"][0]["position"], serde_json::Value::Null);
    }
}

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use crate::{GraphModel, GraphSnapshot, Partition, Renderer, TikzRenderer};

pub trait LatexDisplay {
    fn to_latex(&self) -> String;
}

pub trait LatexVisualDisplay {
    fn to_latex_visual(&self) -> String;
}

pub(crate) fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '%' | '&' | '#' | '_' | '{' | '}' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Members are listed in graph order: nodes as inserted, edges as reported.
fn set_of(items: Vec<String>) -> String {
    format!("\\{{ {} \\}}", items.join(", "))
}

impl LatexDisplay for f64 {
    fn to_latex(&self) -> String {
        self.to_string()
    }
}

impl<K> LatexDisplay for GraphModel<K>
where
    K: Debug + Clone + Eq + Hash + Display,
{
    fn to_latex(&self) -> String {
        let key = |k: &K| escape_latex(&k.to_string());
        let pair = |a: &K, b: &K| {
            if self.is_directed() {
                format!("({}, {})", key(a), key(b))
            } else {
                format!("\\{{{}, {}\\}}", key(a), key(b))
            }
        };

        let mut lines = vec![format!(
            "G = (V, E) with |V| = {} and |E| = {}",
            self.order(),
            self.size()
        )];

        lines.push(format!("V = {}", set_of(self.nodes().map(key).collect())));

        let (zero, one) = self.partition_sets();
        if !zero.is_empty() || !one.is_empty() {
            for (partition, members) in [(Partition::Zero, zero), (Partition::One, one)] {
                lines.push(format!(
                    "V_{} = {}",
                    partition,
                    set_of(members.into_iter().map(key).collect())
                ));
            }
        }

        lines.push(format!(
            "E = {}",
            set_of(self.edges().map(|e| pair(e.from, e.to)).collect())
        ));

        let weights: Vec<String> = self
            .edges()
            .filter_map(|e| {
                e.weight()
                    .map(|w| format!("{} \\mapsto {}", pair(e.from, e.to), w.to_latex()))
            })
            .collect();
        if !weights.is_empty() {
            lines.push(format!("w = {}", set_of(weights)));
        }

        for layer in self.layers() {
            let members = self
                .edges_by_label(layer)
                .map(|e| pair(e.from, e.to))
                .collect();
            lines.push(format!(
                "E_{{{}}} = {}",
                escape_latex(layer),
                set_of(members)
            ));
        }

        lines.join("\n")
    }
}

impl<K> LatexVisualDisplay for GraphModel<K>
where
    K: Debug + Clone + Eq + Hash + Display,
{
    fn to_latex_visual(&self) -> String {
        TikzRenderer::default().render(&GraphSnapshot::from_graph(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphMode;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_latex("a_b & 50%"), "a\\_b \\& 50\\%");
    }

    #[test]
    fn escapes_backslash_caret_and_tilde_as_text() {
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
        assert_eq!(
            escape_latex("x^2~y"),
            "x\\textasciicircum{}2\\textasciitilde{}y"
        );
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
    }

    #[test]
    fn weights_keep_full_precision() {
        let graph = GraphModel::<i32>::from_weighted_edges(
            GraphMode::Directed,
            [(1, 2, 1.234), (2, 3, 0.001)],
        );
        let tex = graph.to_latex();
        assert!(tex.contains("(1, 2) \\mapsto 1.234"));
        assert!(tex.contains("(2, 3) \\mapsto 0.001"));
    }

    #[test]
    fn nodes_are_listed_in_insertion_order() {
        let graph = GraphModel::<i32>::from_edges(GraphMode::Undirected, [(2, 10), (10, 3)]);
        assert!(graph.to_latex().contains("V = \\{ 2, 10, 3 \\}"));
    }

    #[test]
    fn set_notation_for_cycle() {
        let graph =
            GraphModel::<i32>::from_edges(GraphMode::Undirected, [(1, 2), (2, 3), (3, 4), (4, 1)]);
        let tex = graph.to_latex();
        let lines: Vec<&str> = tex.lines().collect();
        assert_eq!(lines[0], "G = (V, E) with |V| = 4 and |E| = 4");
        assert_eq!(lines[1], "V = \\{ 1, 2, 3, 4 \\}");
        assert_eq!(
            lines[2],
            "E = \\{ \\{1, 2\\}, \\{1, 4\\}, \\{2, 3\\}, \\{3, 4\\} \\}"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn weights_and_partitions_are_listed() {
        let mut graph = GraphModel::<&str>::bipartite();
        graph.add_node_in("A", Partition::Zero);
        graph.add_node_in("1", Partition::One);
        graph.add_weighted_edge("A", "1", 0.5).unwrap();

        let tex = graph.to_latex();
        assert!(tex.contains("V_0 = \\{ A \\}"));
        assert!(tex.contains("V_1 = \\{ 1 \\}"));
        assert!(tex.contains("w = \\{ \\{A, 1\\} \\mapsto 0.5 \\}"));
    }

    #[test]
    fn layers_are_listed_per_label() {
        let graph = GraphModel::<i32>::from_labeled_edges(
            GraphMode::Directed,
            [(1, 2, "Facebook"), (4, 1, "Facebook")],
        );
        assert!(
            graph
                .to_latex()
                .contains("E_{Facebook} = \\{ (1, 2), (4, 1) \\}")
        );
    }

    #[test]
    fn visual_output_is_a_tikz_figure() {
        let graph = GraphModel::<i32>::from_edges(GraphMode::Undirected, [(1, 2)]);
        let tex = graph.to_latex_visual();
        assert!(tex.starts_with("\\begin{figure}"));
        assert!(tex.contains("(n0)"));
    }
}

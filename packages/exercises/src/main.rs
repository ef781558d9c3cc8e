use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use graphbook::{
    EdgeAttrs, GraphConfig, GraphMode, GraphModel, GraphSnapshot, LatexDisplay, Layout, Partition,
    Renderer, TikzRenderer,
};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "exercises",
    about = "Build, validate and render the introductory graph exercises"
)]
struct Cli {
    /// Which exercise to run.
    #[arg(value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Output produced for each graph.
    #[arg(long, value_enum, default_value_t = Format::Tikz)]
    format: Format,

    /// Node placement; defaults to a bipartite layout for bipartite graphs and
    /// a spring layout otherwise.
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Refuse edges whose endpoints were not added first.
    #[arg(long)]
    strict_nodes: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    Simple,
    Directed,
    Bipartite,
    Multilayer,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Tikz,
    Latex,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Circular,
    Spring,
    Bipartite,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Circular => Layout::Circular,
            LayoutArg::Spring => Layout::Spring,
            LayoutArg::Bipartite => Layout::Bipartite,
        }
    }
}

struct Harness {
    format: Format,
    layout: Option<Layout>,
    autocreate_nodes: bool,
}

impl Harness {
    fn graph<K>(&self, mode: GraphMode) -> GraphModel<K>
    where
        K: Debug + Clone + Eq + Hash,
    {
        GraphModel::with_config(GraphConfig::new(mode).autocreate_nodes(self.autocreate_nodes))
    }

    fn render<K>(&self, title: &str, graph: &GraphModel<K>) -> Result<()>
    where
        K: Debug + Clone + Eq + Hash + Display,
    {
        info!(
            title,
            mode = %graph.mode(),
            nodes = graph.order(),
            edges = graph.size(),
            "rendering graph"
        );
        let layout = self.layout.unwrap_or_else(|| Layout::for_mode(graph.mode()));
        let output = match self.format {
            Format::Tikz => TikzRenderer::new(layout).render(&GraphSnapshot::from_graph(graph)),
            Format::Latex => graph.to_latex(),
            Format::Json => {
                let mut snapshot = GraphSnapshot::from_graph(graph);
                layout.apply(&mut snapshot);
                serde_json::to_string_pretty(&snapshot)
                    .with_context(|| format!("serializing snapshot of {title}"))?
            }
        };
        println!("% {title}\n{output}\n");
        Ok(())
    }
}

fn simple_graph_example(harness: &Harness) -> Result<()> {
    let mut graph = harness.graph::<i32>(GraphMode::Undirected);
    graph.add_nodes_from([1, 2, 3, 4]);
    graph.add_edges_from([(1, 2), (2, 3), (3, 4), (4, 1)])?;

    let neighbors: Vec<String> = graph.neighbors(&1)?.map(ToString::to_string).collect();
    info!(neighbors = %neighbors.join(", "), "neighbours of node 1");

    harness.render("Simple graph (4-cycle)", &graph)
}

fn directed_weighted_example(harness: &Harness) -> Result<()> {
    let mut graph = harness.graph::<i32>(GraphMode::Directed);
    graph.add_nodes_from([1, 2, 3]);
    for (from, to, weight) in [(1, 2, 3.5), (2, 3, 1.2), (3, 1, 4.8)] {
        graph.add_weighted_edge(from, to, weight)?;
    }

    for edge in graph.edges() {
        info!(from = edge.from, to = edge.to, weight = ?edge.weight(), "arc");
    }

    harness.render("Directed weighted graph", &graph)
}

fn bipartite_example(harness: &Harness) -> Result<()> {
    let mut graph = harness.graph::<String>(GraphMode::Bipartite);
    for id in ["A", "B", "C"] {
        graph.add_node_in(id.to_string(), Partition::Zero);
    }
    for id in ["1", "2", "3", "4"] {
        graph.add_node_in(id.to_string(), Partition::One);
    }
    graph.add_edges_from([("A", "1"), ("A", "2"), ("B", "2"), ("C", "3"), ("C", "4")])?;

    let report = graph.bipartite_report();
    info!(valid = report.is_valid(), "bipartite check");
    harness.render("Bipartite graph", &graph)?;

    graph.add_edge("A".to_string(), "B".to_string(), EdgeAttrs::new())?;
    if let Err(err) = graph.bipartite_report().into_result() {
        warn!(%err, "rendering anyway");
    }
    harness.render("Bipartite graph with an (A, B) edge", &graph)
}

fn multilayer_example(harness: &Harness) -> Result<()> {
    let mut graph = harness.graph::<i32>(GraphMode::Undirected);
    graph.add_nodes_from([1, 2, 3, 4]);
    for (from, to, layer) in [
        (1, 2, "Facebook"),
        (2, 3, "Twitter"),
        (3, 4, "LinkedIn"),
        (4, 1, "Facebook"),
    ] {
        graph.add_labeled_edge(from, to, layer)?;
    }

    for (layer, count) in graph.layer_counts() {
        info!(layer, count, "layer");
    }
    let facebook: Vec<String> = graph
        .edges_by_label("Facebook")
        .map(|e| format!("({}, {})", e.from, e.to))
        .collect();
    info!(edges = %facebook.join(", "), "Facebook layer");

    harness.render("Multilayer network", &graph)?;
    harness.render("Facebook layer", &graph.layer_subgraph("Facebook"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let harness = Harness {
        format: cli.format,
        layout: cli.layout.map(Layout::from),
        autocreate_nodes: !cli.strict_nodes,
    };

    match cli.scenario {
        Scenario::Simple => simple_graph_example(&harness),
        Scenario::Directed => directed_weighted_example(&harness),
        Scenario::Bipartite => bipartite_example(&harness),
        Scenario::Multilayer => multilayer_example(&harness),
        Scenario::All => {
            simple_graph_example(&harness)?;
            directed_weighted_example(&harness)?;
            bipartite_example(&harness)?;
            multilayer_example(&harness)
        }
    }
}

pub mod adjacency_map;

pub use adjacency_map::AdjacencyMap;

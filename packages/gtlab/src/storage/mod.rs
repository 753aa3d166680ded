pub mod adjacency_list;
pub mod adjacency_matrix;
pub mod graph_definition;

pub use adjacency_list::AdjacencyList;
pub use adjacency_matrix::AdjacencyMatrix;
pub use graph_definition::{EdgeRecord, GraphDefinition};

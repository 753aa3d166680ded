use std::path::PathBuf;

/// Rejected graph mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("parallel edges are not allowed between nodes {from} and {to}")]
    ParallelEdge { from: usize, to: usize },
}

/// A malformed line in a graph or map file. Line numbers are 1-based.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: `{token}` is not an integer")]
    NotAnInteger { line: usize, token: String },
    #[error("line {line}: expected {expected}, found `{found}`")]
    Malformed {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("line {line}: row has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("input is empty")]
    Empty,
}

#[derive(thiserror::Error, Debug)]
pub enum LabError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("vertex {vertex} is outside 1..={order}")]
    InvalidVertex { vertex: i64, order: usize },
    #[error("cell ({row}, {col}) is outside the map")]
    InvalidCell { row: usize, col: usize },
    #[error("graph is not complete: no edge between {from} and {to}")]
    IncompleteGraph { from: usize, to: usize },
    #[error("graph has no vertices")]
    EmptyGraph,
    #[error("missing task parameter `{0}`")]
    MissingParam(&'static str),
    #[error("task `{0}` cannot run on this kind of input")]
    UnsupportedInput(&'static str),
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LabError>;

impl LabError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LabError::Io {
            path: path.into(),
            source,
        }
    }
}

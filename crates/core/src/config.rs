//! Run parameters for a comparison

/// Extension used when discovering contextual graphs
pub const DEFAULT_EXTENSION: &str = "json";

/// Node list file written by [`crate::output::FileSink`]
pub const DEFAULT_NODE_LIST: &str = "reduced_graph_nodes.txt";

/// Parameters of a single comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// Node around which corroboration is evaluated
    pub target: String,
    /// Extension of contextual graph files
    pub extension: String,
    /// Longest simple path (in nodes) enumerated while pruning; `None` is unbounded
    ///
    /// Pruning enumerates every simple path between the target and each
    /// uncorroborated neighbor, which explodes on dense graphs. Set a bound
    /// there; it can only make pruning less aggressive.
    pub max_path_nodes: Option<usize>,
}

impl ComparisonConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            extension: DEFAULT_EXTENSION.to_owned(),
            max_path_nodes: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_max_path_nodes(mut self, max_path_nodes: Option<usize>) -> Self {
        self.max_path_nodes = max_path_nodes;
        self
    }
}

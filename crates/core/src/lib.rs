//! Graph Superposer Core Library
//!
//! Compares an initial relation graph against a set of contextual graphs,
//! anchored on a target node: relations of the target that no contextual
//! graph corroborates are pruned, conserved paths are highlighted, and the
//! subgraph of nodes shared with the contexts is extracted.
//!
//! # Example
//!
//! ```
//! use superposer_core::{pipeline, ComparisonConfig, Graph};
//!
//! # fn main() -> Result<(), superposer_core::GraphError> {
//! let mut initial = Graph::new();
//! initial.add_edge("FAM111B", "TP53")?;
//! initial.add_edge("FAM111B", "ORPHAN")?;
//!
//! let mut context = Graph::new();
//! context.add_edge("FAM111B", "TP53")?;
//!
//! let result = pipeline::compare(&initial, &[context], &ComparisonConfig::new("FAM111B"));
//! assert!(!result.pruned.contains("ORPHAN"));
//! assert_eq!(result.conserved_edges.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod graph;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use config::ComparisonConfig;
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeKey, EdgeMark, Graph, Node};
pub use output::{ComparisonSink, FileSink};
pub use pipeline::Comparison;

//! Graph persistence in networkx node-link JSON
//!
//! The on-disk shape is the one produced by `networkx.node_link_data`:
//!
//! ```json
//! {
//!   "directed": false,
//!   "multigraph": false,
//!   "nodes": [{"id": "FAM111B"}, {"id": "TP53"}],
//!   "links": [{"source": "FAM111B", "target": "TP53"}]
//! }
//! ```
//!
//! Integer ids are accepted and stored as their decimal text, `edges` is
//! accepted in place of `links`, and unknown fields (graph attributes, node
//! attributes) are ignored. Links may carry a `"mark"` of `"conserved"` or
//! `"ordinary"`; it is written only for conserved edges.

use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::{EdgeMark, Graph};

/// A node identifier as it appears in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Text(String),
    Integer(i64),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Text(s) => f.write_str(s),
            NodeKey::Integer(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: NodeKey,
    pub target: NodeKey,
    #[serde(default, skip_serializing_if = "is_ordinary")]
    pub mark: EdgeMark,
}

fn is_ordinary(mark: &EdgeMark) -> bool {
    !mark.is_conserved()
}

/// Serialized form of a [`Graph`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default, alias = "edges")]
    pub links: Vec<LinkRecord>,
}

impl TryFrom<GraphDocument> for Graph {
    type Error = GraphError;

    /// Validate a document and build the graph it describes
    ///
    /// Rejects directed and multigraph documents, empty or duplicate node ids,
    /// links to undeclared nodes, duplicate links and self-loops.
    fn try_from(doc: GraphDocument) -> Result<Self> {
        if doc.directed {
            return Err(GraphError::input("directed graphs are not supported"));
        }
        if doc.multigraph {
            return Err(GraphError::input("multigraphs are not supported"));
        }

        let mut graph = Graph::new();
        for node in &doc.nodes {
            let id = node.id.to_string();
            if id.is_empty() {
                return Err(GraphError::input("empty node id"));
            }
            if graph.contains(&id) {
                return Err(GraphError::input(format!("duplicate node '{id}'")));
            }
            graph.add_node(id);
        }

        for link in &doc.links {
            let source = link.source.to_string();
            let target = link.target.to_string();
            for endpoint in [&source, &target] {
                if !graph.contains(endpoint) {
                    return Err(GraphError::input(format!(
                        "link {source} -- {target} references unknown node '{endpoint}'"
                    )));
                }
            }
            if graph.has_edge(&source, &target) {
                return Err(GraphError::input(format!(
                    "duplicate link {source} -- {target}"
                )));
            }
            graph.add_edge_with(&source, &target, link.mark)?;
        }

        Ok(graph)
    }
}

impl From<&Graph> for GraphDocument {
    fn from(graph: &Graph) -> Self {
        GraphDocument {
            directed: false,
            multigraph: false,
            nodes: graph
                .node_ids()
                .map(|id| NodeRecord {
                    id: NodeKey::Text(id.to_owned()),
                })
                .collect(),
            links: graph
                .edges()
                .map(|(a, b, mark)| LinkRecord {
                    source: NodeKey::Text(a.to_owned()),
                    target: NodeKey::Text(b.to_owned()),
                    mark,
                })
                .collect(),
        }
    }
}

/// Decode node-link JSON read from `origin`
fn decode_graph(bytes: &[u8], origin: &Path) -> Result<Graph> {
    let doc: GraphDocument =
        serde_json::from_slice(bytes).map_err(|source| GraphError::Deserialization {
            path: origin.to_path_buf(),
            source,
        })?;
    Graph::try_from(doc)
}

/// Load a persisted graph
///
/// # Errors
/// - [`GraphError::Io`] when the file cannot be read
/// - [`GraphError::Deserialization`] when it is not a node-link document
/// - [`GraphError::GraphInput`] when the document describes a malformed graph
pub fn load_graph(path: &Path) -> Result<Graph> {
    let bytes = fs::read(path).map_err(|e| GraphError::io(path, e))?;
    let graph = decode_graph(&bytes, path)?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Persist a graph as pretty-printed node-link JSON
pub fn save_graph(graph: &Graph, path: &Path) -> Result<()> {
    let file = fs::File::create(path).map_err(|e| GraphError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &GraphDocument::from(graph))
        .map_err(|e| GraphError::io(path, e.into()))?;
    writer.flush().map_err(|e| GraphError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    use crate::graph::EdgeKey;

    fn parse_graph(json: &str) -> Result<Graph> {
        decode_graph(json.as_bytes(), Path::new("inline.json"))
    }

    #[test]
    fn test_parse_networkx_node_link() {
        let json = r#"{
            "directed": false,
            "multigraph": false,
            "graph": {"name": "ppi"},
            "nodes": [{"id": "FAM111B", "score": 0.9}, {"id": "TP53"}, {"id": 7}],
            "links": [{"source": "FAM111B", "target": "TP53", "weight": 1.0},
                      {"source": "TP53", "target": 7}]
        }"#;
        let g = parse_graph(json).unwrap();

        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["FAM111B", "TP53", "7"]);
        assert!(g.has_edge("TP53", "7"));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_edges_alias() {
        let json = r#"{"nodes": [{"id": "A"}, {"id": "B"}], "edges": [{"source": "A", "target": "B"}]}"#;
        let g = parse_graph(json).unwrap();
        assert!(g.has_edge("A", "B"));
    }

    #[test]
    fn test_malformed_documents_rejected() {
        let cases = [
            r#"{"directed": true, "nodes": [], "links": []}"#,
            r#"{"multigraph": true, "nodes": [], "links": []}"#,
            r#"{"nodes": [{"id": "A"}, {"id": "A"}], "links": []}"#,
            r#"{"nodes": [{"id": ""}], "links": []}"#,
            r#"{"nodes": [{"id": "A"}], "links": [{"source": "A", "target": "B"}]}"#,
            r#"{"nodes": [{"id": "A"}], "links": [{"source": "A", "target": "A"}]}"#,
            r#"{"nodes": [{"id": "A"}, {"id": "B"}], "links": [{"source": "A", "target": "B"}, {"source": "B", "target": "A"}]}"#,
        ];
        for json in cases {
            let err = parse_graph(json).unwrap_err();
            assert!(
                matches!(err, GraphError::GraphInput { .. }),
                "expected GraphInput for {json}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_corrupt_json_is_deserialization_error() {
        let err = parse_graph("{ not json").unwrap_err();
        assert!(matches!(err, GraphError::Deserialization { .. }));
    }

    #[test]
    fn test_load_decodes_like_inline_parse() {
        let temp_dir = TempDir::new().unwrap();
        let corrupt = temp_dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        match load_graph(&corrupt).unwrap_err() {
            GraphError::Deserialization { path, .. } => assert_eq!(path, corrupt),
            other => panic!("unexpected error: {other}"),
        }

        let directed = temp_dir.path().join("directed.json");
        std::fs::write(&directed, r#"{"directed": true, "nodes": [], "links": []}"#).unwrap();
        assert!(matches!(
            load_graph(&directed).unwrap_err(),
            GraphError::GraphInput { .. }
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_graph(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }

    #[test]
    fn test_save_then_load_keeps_marks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("g.json");

        let mut g = Graph::new();
        g.add_edge("A", "B").unwrap();
        g.add_edge_with("B", "C", EdgeMark::Conserved).unwrap();
        g.add_node("lonely");
        save_graph(&g, &path).unwrap();

        let loaded = load_graph(&path).unwrap();
        assert_eq!(loaded.node_ids().collect::<Vec<_>>(), vec!["A", "B", "C", "lonely"]);
        assert_eq!(
            loaded.conserved_edge_keys(),
            BTreeSet::from([EdgeKey::new("B", "C")])
        );

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("\"mark\"").count(), 1);
    }
}

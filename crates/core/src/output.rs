//! Hand-off of comparison results to rendering and export
//!
//! The pipeline only talks to a [`ComparisonSink`]; [`FileSink`] is the
//! implementation used by the command line.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_NODE_LIST;
use crate::error::{GraphError, Result};
use crate::export;
use crate::graph::{EdgeKey, Graph};
use crate::render;

/// Consumer of the results of one comparison run
pub trait ComparisonSink {
    /// Full highlighted graph with the common nodes and conserved edges
    fn full_view(
        &mut self,
        highlighted: &Graph,
        common: &BTreeSet<String>,
        conserved: &BTreeSet<EdgeKey>,
    ) -> Result<()>;

    /// The reduced comparison graph
    fn reduced_view(&mut self, comparison: &Graph) -> Result<()>;

    /// Node ids of the comparison graph
    fn export_nodes(&mut self, comparison: &Graph) -> Result<()>;
}

/// Writes DOT files and the node list into a directory
///
/// Produces `highlighted.dot`, `conserved.dot` (only when some edge is
/// conserved), `comparison.dot` and the node list.
#[derive(Debug, Clone)]
pub struct FileSink {
    out_dir: PathBuf,
    node_list: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            node_list: PathBuf::from(DEFAULT_NODE_LIST),
            written: Vec::new(),
        }
    }

    /// Name of the node list file, relative to the output directory
    pub fn with_node_list(mut self, name: impl Into<PathBuf>) -> Self {
        self.node_list = name.into();
        self
    }

    /// Files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, name: impl AsRef<Path>, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.out_dir).map_err(|e| GraphError::io(&self.out_dir, e))?;
        let path = self.out_dir.join(name);
        fs::write(&path, contents).map_err(|e| GraphError::io(&path, e))?;
        tracing::info!(path = %path.display(), "wrote");
        self.written.push(path);
        Ok(())
    }
}

impl ComparisonSink for FileSink {
    fn full_view(
        &mut self,
        highlighted: &Graph,
        common: &BTreeSet<String>,
        conserved: &BTreeSet<EdgeKey>,
    ) -> Result<()> {
        self.write("highlighted.dot", &render::highlighted_dot(highlighted, common))?;
        if !conserved.is_empty() {
            self.write(
                "conserved.dot",
                &render::conserved_dot(highlighted, common, conserved),
            )?;
        }
        Ok(())
    }

    fn reduced_view(&mut self, comparison: &Graph) -> Result<()> {
        self.write("comparison.dot", &render::comparison_dot(comparison))
    }

    fn export_nodes(&mut self, comparison: &Graph) -> Result<()> {
        fs::create_dir_all(&self.out_dir).map_err(|e| GraphError::io(&self.out_dir, e))?;
        let path = self.out_dir.join(&self.node_list);
        export::write_node_list(comparison, &path)?;
        tracing::info!(path = %path.display(), nodes = comparison.node_count(), "wrote node list");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeMark;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_writes_everything() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let mut sink = FileSink::new(&out).with_node_list("nodes.txt");

        let mut g = Graph::new();
        g.add_edge_with("T", "N", EdgeMark::Conserved).unwrap();
        let common = BTreeSet::from(["T".to_owned(), "N".to_owned()]);
        let conserved = BTreeSet::from([EdgeKey::new("T", "N")]);

        sink.full_view(&g, &common, &conserved).unwrap();
        sink.reduced_view(&g).unwrap();
        sink.export_nodes(&g).unwrap();

        let names: Vec<_> = sink
            .written()
            .iter()
            .filter_map(|p| p.file_name())
            .filter_map(|n| n.to_str())
            .collect();
        assert_eq!(
            names,
            vec!["highlighted.dot", "conserved.dot", "comparison.dot", "nodes.txt"]
        );
        assert_eq!(
            export::read_node_list(&out.join("nodes.txt")).unwrap(),
            vec!["T", "N"]
        );
    }

    #[test]
    fn test_conserved_view_skipped_without_conserved_edges() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(temp_dir.path());

        let mut g = Graph::new();
        g.add_edge("T", "N").unwrap();
        sink.full_view(&g, &BTreeSet::new(), &BTreeSet::new()).unwrap();

        assert_eq!(sink.written().len(), 1);
        assert!(!temp_dir.path().join("conserved.dot").exists());
    }
}

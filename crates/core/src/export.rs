//! Flat node-list export, one identifier per line

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Write the node ids of `graph` to `path` in iteration order
pub fn write_node_list(graph: &Graph, path: &Path) -> Result<()> {
    let file = fs::File::create(path).map_err(|e| GraphError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for id in graph.node_ids() {
        writeln!(writer, "{id}").map_err(|e| GraphError::io(path, e))?;
    }
    writer.flush().map_err(|e| GraphError::io(path, e))
}

/// Read a node list written by [`write_node_list`]
///
/// Only line terminators (`\n`, `\r\n`) are stripped; ids keep any
/// surrounding whitespace. Empty lines are skipped since ids are never empty.
pub fn read_node_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;
    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

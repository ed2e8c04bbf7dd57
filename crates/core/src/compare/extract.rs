use std::collections::BTreeSet;

use crate::graph::{EdgeKey, EdgeMark, Graph};

/// Induced subgraph of `graph` on `common`, with every edge re-tagged
///
/// Nodes of `common` missing from `graph` are ignored. A retained edge is
/// `Conserved` when its key is in `conserved`, `Ordinary` otherwise. The
/// result is an independent copy.
pub fn extract_comparison(
    graph: &Graph,
    common: &BTreeSet<String>,
    conserved: &BTreeSet<EdgeKey>,
) -> Graph {
    let mut comparison = graph.induced_subgraph(|id| common.contains(id));
    comparison.retag_edges(|key| {
        if conserved.contains(key) {
            EdgeMark::Conserved
        } else {
            EdgeMark::Ordinary
        }
    });
    comparison
}

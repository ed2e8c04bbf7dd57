use std::collections::{BTreeSet, HashSet};

use crate::graph::Graph;

/// Every node id present in at least one contextual graph
pub fn context_universe(contexts: &[Graph]) -> HashSet<&str> {
    contexts.iter().flat_map(|g| g.node_ids()).collect()
}

/// Nodes of `graph` that also appear in at least one contextual graph
pub fn common_nodes(graph: &Graph, contexts: &[Graph]) -> BTreeSet<String> {
    contexts
        .iter()
        .flat_map(|context| graph.node_ids().filter(move |id| context.contains(id)))
        .map(str::to_owned)
        .collect()
}

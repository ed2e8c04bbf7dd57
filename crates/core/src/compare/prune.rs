use std::collections::BTreeSet;

use crate::compare::common::context_universe;
use crate::graph::Graph;
use crate::paths;

/// Remove the target's uncorroborated relations from a copy of `initial`
///
/// A neighbor of `target` is corroborated when it appears in at least one
/// contextual graph. For every uncorroborated neighbor, that neighbor and every
/// node on every simple path from `target` to it are removed, along with any
/// node that could only reach `target` through removed nodes. `target` itself
/// always stays. Nodes never connected to `target` are left alone.
///
/// When `target` is absent or all of its neighbors are corroborated the copy
/// is returned unchanged.
///
/// Path enumeration is exponential in graph density; see [`prune_bounded`].
pub fn prune(initial: &Graph, contexts: &[Graph], target: &str) -> Graph {
    prune_bounded(initial, contexts, target, None)
}

/// [`prune`] with simple paths limited to `max_path_nodes` nodes
pub fn prune_bounded(
    initial: &Graph,
    contexts: &[Graph],
    target: &str,
    max_path_nodes: Option<usize>,
) -> Graph {
    let mut pruned = initial.clone();
    if !initial.contains(target) {
        tracing::debug!(%target, "target absent from initial graph, nothing to prune");
        return pruned;
    }

    let universe = context_universe(contexts);
    let mut doomed: BTreeSet<String> = BTreeSet::new();
    for neighbor in initial.neighbors(target) {
        if universe.contains(neighbor) {
            continue;
        }
        tracing::debug!(%target, %neighbor, "neighbor not corroborated by any context");
        doomed.insert(neighbor.to_owned());
        doomed.extend(paths::nodes_on_simple_paths(
            initial,
            target,
            neighbor,
            max_path_nodes,
        ));
    }
    doomed.remove(target);
    if doomed.is_empty() {
        return pruned;
    }

    let connected_before = paths::reachable_from(initial, target);
    pruned.remove_nodes(&doomed);
    let connected_after = paths::reachable_from(&pruned, target);
    let stranded: Vec<&String> = connected_before
        .iter()
        .filter(|id| !connected_after.contains(*id) && !doomed.contains(*id))
        .collect();
    let removed = doomed.len() + pruned.remove_nodes(&stranded);

    tracing::debug!(
        %target,
        removed,
        remaining = pruned.node_count(),
        "pruned uncorroborated relations"
    );
    pruned
}

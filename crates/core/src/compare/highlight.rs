use std::collections::BTreeSet;

use crate::graph::{EdgeKey, EdgeMark, Graph};
use crate::paths;

/// Edges one contextual graph corroborates in `pruned`
///
/// For each neighbor of `target` in `pruned` that `context` also knows, a
/// fewest-hops path from `target` to that neighbor is taken inside `context`.
/// If the same node sequence is a simple path of `pruned` (nodes present,
/// distinct, consecutive nodes adjacent), its edges are corroborated.
///
/// Contributes nothing when `context` lacks `target`. A neighbor with no path
/// inside `context` is skipped.
pub fn conserved_contribution(pruned: &Graph, context: &Graph, target: &str) -> BTreeSet<EdgeKey> {
    if !context.contains(target) {
        return BTreeSet::new();
    }

    let mut conserved = BTreeSet::new();
    for neighbor in pruned.neighbors(target).filter(|n| context.contains(n)) {
        let Some(path) = paths::shortest_path(context, target, neighbor) else {
            tracing::debug!(%target, %neighbor, "no path inside contextual graph");
            continue;
        };
        if paths::is_simple_path(pruned, &path) {
            conserved.extend(paths::path_edges(&path));
        } else {
            tracing::debug!(%target, %neighbor, path = ?path, "contextual path not realised in pruned graph");
        }
    }
    conserved
}

/// Tag conserved edges on a copy of `pruned`
///
/// Every contextual graph is evaluated on its own and the contributions are
/// unioned, so the result does not depend on context order. Returns the
/// highlighted copy and the conserved-edge set; every key in the set is an
/// edge of `pruned`.
pub fn highlight(pruned: &Graph, contexts: &[Graph], target: &str) -> (Graph, BTreeSet<EdgeKey>) {
    let conserved: BTreeSet<EdgeKey> = contexts
        .iter()
        .map(|context| conserved_contribution(pruned, context, target))
        .fold(BTreeSet::new(), |mut acc, part| {
            acc.extend(part);
            acc
        });

    let mut highlighted = pruned.clone();
    for key in &conserved {
        let (a, b) = key.endpoints();
        highlighted.set_edge_mark(a, b, EdgeMark::Conserved);
    }

    tracing::debug!(%target, conserved = conserved.len(), "highlighted conserved edges");
    (highlighted, conserved)
}

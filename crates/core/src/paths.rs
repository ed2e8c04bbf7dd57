//! Path queries over [`Graph`]
//!
//! | Query | Algorithm |
//! |-------|-----------|
//! | All simple paths | Iterative DFS with an on-path set |
//! | Shortest path | A* with unit edge cost (breadth-first order) |
//! | Reachability | BFS |
//!
//! Simple-path enumeration is exponential in the worst case. Every entry
//! point takes an optional `max_nodes` bound (path length in nodes,
//! endpoints included); `None` enumerates everything.

use std::collections::{BTreeSet, HashSet};

use petgraph::algo::astar;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::Bfs;

use crate::graph::{EdgeKey, Graph};

/// Call `visit` once for every simple path from `from` to `to`
///
/// Paths are handed over as node index slices, `from` first. Nothing is
/// visited when either endpoint is missing or `from == to`.
fn visit_simple_paths(
    graph: &Graph,
    from: NodeIndex,
    to: NodeIndex,
    max_nodes: Option<usize>,
    mut visit: impl FnMut(&[NodeIndex]),
) {
    if from == to {
        return;
    }
    let inner = graph.inner();
    let fits = |len: usize| max_nodes.map_or(true, |max| len <= max);
    let children = |n: NodeIndex| inner.neighbors(n).collect::<Vec<_>>().into_iter();

    let mut path = vec![from];
    let mut on_path: HashSet<NodeIndex> = HashSet::from([from]);
    let mut stack = vec![children(from)];

    while let Some(frontier) = stack.last_mut() {
        match frontier.next() {
            Some(child) if on_path.contains(&child) => {}
            Some(child) if child == to => {
                if fits(path.len() + 1) {
                    path.push(child);
                    visit(&path);
                    path.pop();
                }
            }
            Some(child) => {
                // Room is needed for `child` and, later, for `to`
                if fits(path.len() + 2) {
                    path.push(child);
                    on_path.insert(child);
                    stack.push(children(child));
                }
            }
            None => {
                stack.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(&done);
                }
            }
        }
    }
}

/// Every simple path from `from` to `to`, as node id sequences
#[cfg(test)]
fn all_simple_paths<'g>(
    graph: &'g Graph,
    from: &str,
    to: &str,
    max_nodes: Option<usize>,
) -> Vec<Vec<&'g str>> {
    let (Some(start), Some(goal)) = (graph.node_index(from), graph.node_index(to)) else {
        return Vec::new();
    };
    let mut paths = Vec::new();
    visit_simple_paths(graph, start, goal, max_nodes, |path| {
        paths.extend(
            path.iter()
                .map(|&n| graph.node_id(n))
                .collect::<Option<Vec<_>>>(),
        );
    });
    paths
}

/// Union of the nodes lying on any simple path from `from` to `to`
///
/// Both endpoints are included whenever at least one path exists.
pub fn nodes_on_simple_paths(
    graph: &Graph,
    from: &str,
    to: &str,
    max_nodes: Option<usize>,
) -> BTreeSet<String> {
    let (Some(start), Some(goal)) = (graph.node_index(from), graph.node_index(to)) else {
        return BTreeSet::new();
    };
    let mut seen: HashSet<NodeIndex> = HashSet::new();
    visit_simple_paths(graph, start, goal, max_nodes, |path| {
        seen.extend(path.iter().copied());
    });
    seen.into_iter()
        .filter_map(|n| graph.node_id(n))
        .map(str::to_owned)
        .collect()
}

/// A fewest-hops path from `from` to `to`
///
/// Returns `None` when either node is missing or no path exists. When several
/// shortest paths exist, which one is returned depends on traversal order.
pub fn shortest_path<'g>(graph: &'g Graph, from: &str, to: &str) -> Option<Vec<&'g str>> {
    let start = graph.node_index(from)?;
    let goal = graph.node_index(to)?;
    let (_, path) = astar(graph.inner(), start, |n| n == goal, |_| 1usize, |_| 0usize)?;
    path.into_iter().map(|n| graph.node_id(n)).collect()
}

/// Whether `nodes` is a simple path of `graph`
///
/// True iff the sequence is non-empty, every node exists, no node repeats and
/// each consecutive pair is an edge of `graph`.
pub fn is_simple_path<S: AsRef<str>>(graph: &Graph, nodes: &[S]) -> bool {
    if nodes.is_empty() {
        return false;
    }
    if !nodes.iter().all(|n| graph.contains(n.as_ref())) {
        return false;
    }
    let distinct: HashSet<&str> = nodes.iter().map(AsRef::as_ref).collect();
    if distinct.len() != nodes.len() {
        return false;
    }
    nodes
        .windows(2)
        .all(|pair| graph.has_edge(pair[0].as_ref(), pair[1].as_ref()))
}

/// Consecutive node pairs of a path as edge keys
pub fn path_edges<S: AsRef<str>>(nodes: &[S]) -> Vec<EdgeKey> {
    nodes
        .windows(2)
        .map(|pair| EdgeKey::new(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}

/// Ids of every node reachable from `from`, `from` included
pub fn reachable_from(graph: &Graph, from: &str) -> HashSet<String> {
    let Some(start) = graph.node_index(from) else {
        return HashSet::new();
    };
    let inner = graph.inner();
    let mut bfs = Bfs::new(inner, start);
    let mut reached = HashSet::new();
    while let Some(n) = bfs.next(inner) {
        if let Some(id) = graph.node_id(n) {
            reached.insert(id.to_owned());
        }
    }
    reached
}

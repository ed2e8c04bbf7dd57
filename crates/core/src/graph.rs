//! Graph data structures for graph superposition
//!
//! Uses `petgraph::StableGraph` so node indices remain stable while pruning
//! removes nodes from a working copy. Node identifiers are unique strings and
//! are looked up through an id-to-index map instead of a linear scan. That map
//! is insertion-ordered and defines node iteration order, since petgraph reuses
//! vacant slots after a removal.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// A node of the graph, identified by a unique string (e.g. a gene symbol)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Tag carried by every edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMark {
    /// Relation with no corroborating path found
    #[default]
    Ordinary,
    /// Relation lying on a verified conservation path
    Conserved,
}

impl EdgeMark {
    pub fn is_conserved(self) -> bool {
        matches!(self, EdgeMark::Conserved)
    }
}

/// An undirected relation between two nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edge {
    pub mark: EdgeMark,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mark {
            EdgeMark::Ordinary => f.write_str("ordinary"),
            EdgeMark::Conserved => f.write_str("conserved"),
        }
    }
}

/// Unordered node pair with its endpoints stored in sorted order
///
/// `EdgeKey::new("B", "A") == EdgeKey::new("A", "B")`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(String, String);

impl EdgeKey {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }

    /// Both endpoints, smallest first
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.0, self.1)
    }
}

/// Undirected simple graph with tagged edges
///
/// Iteration over nodes follows insertion order, skipping removed nodes.
/// Cloning yields a fully independent copy.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// The underlying stable graph (private to keep `index` in sync)
    inner: StableUnGraph<Node, Edge>,
    /// Node id to index lookup, in insertion order
    index: IndexMap<String, NodeIndex>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the existing index if the id is already present
    pub fn add_node(&mut self, id: impl Into<String>) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.inner.add_node(Node { id: id.clone() });
        self.index.insert(id, idx);
        idx
    }

    /// Add an ordinary edge, creating missing endpoints
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<EdgeIndex> {
        self.add_edge_with(a, b, EdgeMark::Ordinary)
    }

    /// Add an edge with an explicit mark, creating missing endpoints
    ///
    /// An edge that already exists keeps its index and takes the new mark;
    /// multi-edges are never created. Self-loops are rejected.
    pub fn add_edge_with(&mut self, a: &str, b: &str, mark: EdgeMark) -> Result<EdgeIndex> {
        if a == b {
            return Err(GraphError::input(format!("self-loop on node '{a}'")));
        }
        let from = self.add_node(a);
        let to = self.add_node(b);
        Ok(self.inner.update_edge(from, to, Edge { mark }))
    }

    /// Whether a node with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Index of the node with this id
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Id of the node at this index
    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.inner.node_weight(idx).map(|n| n.id.as_str())
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Node ids in insertion order, skipping removed nodes
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// Node ids as a set
    pub fn node_set(&self) -> BTreeSet<&str> {
        self.node_ids().collect()
    }

    /// Direct neighbors of `id`; empty when the node is absent
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.node_index(id)
            .into_iter()
            .flat_map(move |idx| self.inner.neighbors(idx))
            .filter_map(move |n| self.node_id(n))
    }

    /// Whether `a` and `b` are adjacent
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Mark of the edge between `a` and `b`, if it exists
    pub fn edge_mark(&self, a: &str, b: &str) -> Option<EdgeMark> {
        self.find_edge(a, b)
            .and_then(|e| self.inner.edge_weight(e))
            .map(|w| w.mark)
    }

    /// Set the mark of an existing edge; returns false when there is no such edge
    pub fn set_edge_mark(&mut self, a: &str, b: &str, mark: EdgeMark) -> bool {
        match self.find_edge(a, b).and_then(|e| self.inner.edge_weight_mut(e)) {
            Some(weight) => {
                weight.mark = mark;
                true
            }
            None => false,
        }
    }

    /// Re-tag every edge with the mark chosen by `mark_for`
    pub fn retag_edges(&mut self, mut mark_for: impl FnMut(&EdgeKey) -> EdgeMark) {
        let indices: Vec<EdgeIndex> = self.inner.edge_indices().collect();
        for e in indices {
            let Some(key) = self.edge_key(e) else {
                continue;
            };
            let mark = mark_for(&key);
            if let Some(weight) = self.inner.edge_weight_mut(e) {
                weight.mark = mark;
            }
        }
    }

    /// Iterate over all edges as `(a, b, mark)`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, EdgeMark)> + '_ {
        self.inner.edge_references().filter_map(move |e| {
            let a = self.node_id(e.source())?;
            let b = self.node_id(e.target())?;
            Some((a, b, e.weight().mark))
        })
    }

    /// All edges as unordered keys
    pub fn edge_keys(&self) -> BTreeSet<EdgeKey> {
        self.edges().map(|(a, b, _)| EdgeKey::new(a, b)).collect()
    }

    /// Keys of the edges tagged `Conserved`
    pub fn conserved_edge_keys(&self) -> BTreeSet<EdgeKey> {
        self.edges()
            .filter(|(_, _, mark)| mark.is_conserved())
            .map(|(a, b, _)| EdgeKey::new(a, b))
            .collect()
    }

    /// Remove nodes (and their incident edges) by id; unknown ids are ignored
    ///
    /// Returns the number of nodes actually removed.
    pub fn remove_nodes<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for id in ids {
            if let Some(idx) = self.index.shift_remove(id.as_ref()) {
                if self.inner.remove_node(idx).is_some() {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Copy of the subgraph induced by the nodes `keep` accepts
    ///
    /// An edge is retained iff both of its endpoints are retained. Node
    /// iteration order and edge marks are preserved.
    pub fn induced_subgraph(&self, mut keep: impl FnMut(&str) -> bool) -> Graph {
        let dropped: Vec<String> = self
            .node_ids()
            .filter(|id| !keep(id))
            .map(str::to_owned)
            .collect();
        let mut sub = self.clone();
        sub.remove_nodes(dropped);
        sub
    }

    /// Copy of the subgraph made of the listed edges and their endpoints
    ///
    /// Keys that are not edges of this graph are ignored.
    pub fn edge_subgraph(&self, keys: &BTreeSet<EdgeKey>) -> Graph {
        let mut sub = Graph::new();
        for (a, b, mark) in self.edges() {
            if keys.contains(&EdgeKey::new(a, b)) {
                let from = sub.add_node(a);
                let to = sub.add_node(b);
                sub.inner.update_edge(from, to, Edge { mark });
            }
        }
        sub
    }

    /// The underlying petgraph structure, for algorithms
    pub(crate) fn inner(&self) -> &StableUnGraph<Node, Edge> {
        &self.inner
    }

    fn find_edge(&self, a: &str, b: &str) -> Option<EdgeIndex> {
        let from = self.node_index(a)?;
        let to = self.node_index(b)?;
        self.inner.find_edge(from, to)
    }

    fn edge_key(&self, e: EdgeIndex) -> Option<EdgeKey> {
        let (a, b) = self.inner.edge_endpoints(e)?;
        Some(EdgeKey::new(self.node_id(a)?, self.node_id(b)?))
    }
}

/// Build a graph from `(a, b)` pairs; convenient for fixtures
impl<'a, 'b> TryFrom<&'b [(&'a str, &'a str)]> for Graph {
    type Error = GraphError;

    fn try_from(pairs: &'b [(&'a str, &'a str)]) -> Result<Self> {
        let mut graph = Graph::new();
        for (a, b) in pairs {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.add_edge("A", "B").unwrap();
        g.add_edge("B", "C").unwrap();
        g.add_edge("A", "D").unwrap();
        g
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut g = Graph::new();
        let first = g.add_node("A");
        let second = g.add_node("A");
        assert_eq!(first, second);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_edges_are_undirected_and_simple() {
        let mut g = sample();
        g.add_edge("B", "A").unwrap();

        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge("A", "B"));
        assert!(g.has_edge("B", "A"));
        assert!(!g.has_edge("A", "C"));
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut g = Graph::new();
        let err = g.add_edge("A", "A").unwrap_err();
        assert!(matches!(err, GraphError::GraphInput { .. }));
        assert!(g.is_empty());
    }

    #[test]
    fn test_neighbors_of_missing_node_is_empty() {
        let g = sample();
        assert_eq!(g.neighbors("Z").count(), 0);

        let mut n: Vec<_> = g.neighbors("A").collect();
        n.sort();
        assert_eq!(n, vec!["B", "D"]);
    }

    #[test]
    fn test_iteration_order_survives_removal() {
        let mut g = sample();
        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);

        assert_eq!(g.remove_nodes(["B", "nope"]), 1);
        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["A", "C", "D"]);
        assert_eq!(g.edge_count(), 1);
        assert!(!g.contains("B"));
        assert!(g.node_index("B").is_none());
    }

    #[test]
    fn test_node_added_after_removal_goes_last() {
        let mut g = Graph::new();
        g.add_node("A");
        g.add_node("B");
        g.add_node("C");
        g.remove_nodes(["B"]);
        g.add_node("D");

        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["A", "C", "D"]);
        // Copies keep the same order
        let sub = g.induced_subgraph(|id| id != "A");
        assert_eq!(sub.node_ids().collect::<Vec<_>>(), vec!["C", "D"]);
    }

    #[test]
    fn test_edge_marks() {
        let mut g = sample();
        assert_eq!(g.edge_mark("A", "B"), Some(EdgeMark::Ordinary));
        assert!(g.set_edge_mark("B", "A", EdgeMark::Conserved));
        assert_eq!(g.edge_mark("A", "B"), Some(EdgeMark::Conserved));
        assert!(!g.set_edge_mark("A", "C", EdgeMark::Conserved));

        assert_eq!(
            g.conserved_edge_keys(),
            BTreeSet::from([EdgeKey::new("A", "B")])
        );
    }

    #[test]
    fn test_edge_key_is_unordered() {
        assert_eq!(EdgeKey::new("B", "A"), EdgeKey::new("A", "B"));
        assert_eq!(EdgeKey::new("B", "A").endpoints(), ("A", "B"));
    }

    #[test]
    fn test_induced_subgraph_does_not_alias() {
        let g = sample();
        let mut sub = g.induced_subgraph(|id| id != "D");

        assert_eq!(sub.node_set(), BTreeSet::from(["A", "B", "C"]));
        assert_eq!(sub.edge_count(), 2);

        sub.set_edge_mark("A", "B", EdgeMark::Conserved);
        sub.remove_nodes(["C"]);
        assert_eq!(g.edge_mark("A", "B"), Some(EdgeMark::Ordinary));
        assert!(g.contains("C"));
    }

    #[test]
    fn test_edge_subgraph() {
        let g = sample();
        let keys = BTreeSet::from([EdgeKey::new("C", "B"), EdgeKey::new("X", "Y")]);
        let sub = g.edge_subgraph(&keys);

        assert_eq!(sub.node_set(), BTreeSet::from(["B", "C"]));
        assert_eq!(sub.edge_count(), 1);
    }

    #[test]
    fn test_retag_edges() {
        let mut g = sample();
        g.retag_edges(|key| {
            if key.endpoints() == ("A", "D") {
                EdgeMark::Conserved
            } else {
                EdgeMark::Ordinary
            }
        });
        assert_eq!(g.edge_mark("D", "A"), Some(EdgeMark::Conserved));
        assert_eq!(g.edge_mark("B", "C"), Some(EdgeMark::Ordinary));
    }

    #[test]
    fn test_try_from_pairs() {
        let pairs: &[(&str, &str)] = &[("A", "B"), ("B", "C")];
        let g = Graph::try_from(pairs).unwrap();
        assert_eq!(g.node_count(), 3);

        let bad: &[(&str, &str)] = &[("A", "A")];
        assert!(Graph::try_from(bad).is_err());
    }
}

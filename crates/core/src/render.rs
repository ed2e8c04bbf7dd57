//! Graphviz DOT rendering of comparison results
//!
//! Common nodes are filled red and the rest skyblue; conserved edges are red
//! and ordinary edges black. Layout is left to Graphviz.

use std::collections::BTreeSet;

use petgraph::dot::{Config, Dot};

use crate::graph::{EdgeKey, EdgeMark, Graph};

const COMMON_FILL: &str = "red";
const OTHER_FILL: &str = "skyblue";

fn edge_color(mark: EdgeMark) -> &'static str {
    match mark {
        EdgeMark::Conserved => "red",
        EdgeMark::Ordinary => "black",
    }
}

fn to_dot(graph: &Graph, fill_for: impl Fn(&str) -> &'static str) -> String {
    // Render within the statement; the attribute closures are temporaries
    let rendered = Dot::with_attr_getters(
        graph.inner(),
        &[Config::EdgeNoLabel],
        &|_, edge| format!("color={}", edge_color(edge.weight().mark)),
        &|_, (_, node)| format!("style=filled fillcolor={}", fill_for(&node.id)),
    )
    .to_string();
    rendered
}

/// The full highlighted graph, common nodes filled red
pub fn highlighted_dot(highlighted: &Graph, common: &BTreeSet<String>) -> String {
    to_dot(highlighted, |id| {
        if common.contains(id) {
            COMMON_FILL
        } else {
            OTHER_FILL
        }
    })
}

/// Only the conserved edges of `highlighted` and their endpoints
pub fn conserved_dot(
    highlighted: &Graph,
    common: &BTreeSet<String>,
    conserved: &BTreeSet<EdgeKey>,
) -> String {
    highlighted_dot(&highlighted.edge_subgraph(conserved), common)
}

/// The comparison graph; every node in it is a common node
pub fn comparison_dot(comparison: &Graph) -> String {
    to_dot(comparison, |_| COMMON_FILL)
}

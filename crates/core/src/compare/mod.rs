//! Graph comparison against contextual graphs
//!
//! Four steps, each working on explicit copies so inputs are never mutated:
//!
//! 1. [`prune`] drops the target's uncorroborated neighbors and what hangs off them
//! 2. [`highlight`] finds conserved paths from the target and tags their edges
//! 3. [`common_nodes`] intersects the pruned graph with every contextual graph
//! 4. [`extract_comparison`] keeps the induced subgraph on the common nodes
//!
//! [`crate::pipeline`] runs them in that order.

mod common;
mod extract;
mod highlight;
mod prune;

pub use common::{common_nodes, context_universe};
pub use extract::extract_comparison;
pub use highlight::{conserved_contribution, highlight};
pub use prune::{prune, prune_bounded};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::graph::Graph;

    pub fn graph(pairs: &[(&str, &str)]) -> Graph {
        Graph::try_from(pairs).unwrap()
    }

    pub fn graph_with_nodes(pairs: &[(&str, &str)], nodes: &[&str]) -> Graph {
        let mut g = graph(pairs);
        for n in nodes {
            g.add_node(*n);
        }
        g
    }
}

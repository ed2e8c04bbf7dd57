//! Comparison pipeline: discovery, loading, comparison, hand-off
//!
//! # Stages
//!
//! 1. Load the initial graph (any failure aborts the run)
//! 2. Discover and load contextual graphs, skipping the initial file itself
//! 3. [`compare`]: prune → highlight → common nodes → comparison graph
//! 4. Hand the results to a [`ComparisonSink`]
//!
//! Every run is parameterised by its explicit inputs; nothing is kept between
//! runs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::compare;
use crate::config::ComparisonConfig;
use crate::discovery;
use crate::error::Result;
use crate::graph::{EdgeKey, Graph};
use crate::output::ComparisonSink;
use crate::store;

/// Everything one comparison produces
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Initial graph without the uncorroborated relations
    pub pruned: Graph,
    /// `pruned` with conserved edges tagged
    pub highlighted: Graph,
    /// Edges lying on a verified conservation path
    pub conserved_edges: BTreeSet<EdgeKey>,
    /// Nodes of `pruned` found in at least one contextual graph
    pub common_nodes: BTreeSet<String>,
    /// Induced subgraph of `highlighted` on `common_nodes`
    pub comparison: Graph,
}

/// Contextual graphs loaded from a directory
#[derive(Debug, Clone, Default)]
pub struct ContextSet {
    /// Loaded graphs, in discovery order
    pub graphs: Vec<Graph>,
    /// Source file of each entry of `graphs`
    pub sources: Vec<PathBuf>,
    /// Candidates skipped because they are the initial graph
    pub skipped: Vec<PathBuf>,
}

/// Run the four comparison steps over in-memory graphs
pub fn compare(initial: &Graph, contexts: &[Graph], config: &ComparisonConfig) -> Comparison {
    let target = config.target.as_str();

    let pruned = compare::prune_bounded(initial, contexts, target, config.max_path_nodes);
    let (highlighted, conserved_edges) = compare::highlight(&pruned, contexts, target);
    let common_nodes = compare::common_nodes(&pruned, contexts);
    let comparison = compare::extract_comparison(&highlighted, &common_nodes, &conserved_edges);

    tracing::info!(
        %target,
        contexts = contexts.len(),
        initial_nodes = initial.node_count(),
        pruned_nodes = pruned.node_count(),
        common = common_nodes.len(),
        conserved = conserved_edges.len(),
        comparison_nodes = comparison.node_count(),
        "comparison complete"
    );

    Comparison {
        pruned,
        highlighted,
        conserved_edges,
        common_nodes,
        comparison,
    }
}

/// Whether two paths name the same file
///
/// Paths are compared after canonicalisation when both resolve, literally
/// otherwise.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Discover and load the contextual graphs under `search_dir`
///
/// A candidate that is the initial graph file is skipped with a warning.
/// Any candidate that fails to load aborts with its error.
pub fn load_contexts(initial_path: &Path, search_dir: &Path, extension: &str) -> Result<ContextSet> {
    let mut set = ContextSet::default();

    for rel_path in discovery::discover_graph_files(search_dir, extension) {
        let path = search_dir.join(rel_path);
        if same_file(&path, initial_path) {
            tracing::warn!(
                path = %path.display(),
                "file is the initial graph and will not be used as a contextual graph"
            );
            set.skipped.push(path);
            continue;
        }
        set.graphs.push(store::load_graph(&path)?);
        set.sources.push(path);
    }

    if set.graphs.is_empty() {
        tracing::warn!(dir = %search_dir.display(), %extension, "no contextual graphs found");
    } else {
        tracing::info!(count = set.graphs.len(), dir = %search_dir.display(), "loaded contextual graphs");
    }
    Ok(set)
}

/// Load, compare and hand the results to `sink`
pub fn run<S: ComparisonSink + ?Sized>(
    initial_path: &Path,
    search_dir: &Path,
    config: &ComparisonConfig,
    sink: &mut S,
) -> Result<Comparison> {
    let initial = store::load_graph(initial_path)?;
    let contexts = load_contexts(initial_path, search_dir, &config.extension)?;

    let result = compare(&initial, &contexts.graphs, config);

    sink.full_view(&result.highlighted, &result.common_nodes, &result.conserved_edges)?;
    sink.reduced_view(&result.comparison)?;
    sink.export_nodes(&result.comparison)?;

    Ok(result)
}

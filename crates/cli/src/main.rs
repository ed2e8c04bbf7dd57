use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use superposer_core::config::{DEFAULT_EXTENSION, DEFAULT_NODE_LIST};
use superposer_core::{pipeline, store, ComparisonConfig, FileSink};

/// Superposer - Compare a relation graph against contextual graphs
#[derive(Parser, Debug)]
#[command(name = "superposer")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Keep the target's relations corroborated by contextual graphs", long_about = None)]
struct Cli {
    /// Initial graph (node-link JSON)
    #[arg(short, long)]
    initial: PathBuf,

    /// Directory searched recursively for contextual graphs
    #[arg(short, long)]
    contexts: PathBuf,

    /// Node around which corroboration is evaluated
    #[arg(short, long)]
    target: String,

    /// Extension of contextual graph files
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Directory receiving DOT renderings and the node list
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Name of the node list file inside the output directory
    #[arg(long, default_value = DEFAULT_NODE_LIST)]
    nodes_file: PathBuf,

    /// Longest simple path, in nodes, enumerated while pruning
    #[arg(long)]
    max_path_nodes: Option<usize>,

    /// Also save the comparison graph as node-link JSON
    #[arg(long)]
    save_comparison: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ComparisonConfig::new(&cli.target)
        .with_extension(&cli.extension)
        .with_max_path_nodes(cli.max_path_nodes);
    let mut sink = FileSink::new(&cli.out_dir).with_node_list(&cli.nodes_file);
    tracing::debug!(?config, out_dir = %cli.out_dir.display(), "starting comparison");

    let result = pipeline::run(&cli.initial, &cli.contexts, &config, &mut sink).with_context(|| {
        format!(
            "comparison of {} against {} failed",
            cli.initial.display(),
            cli.contexts.display()
        )
    })?;

    if let Some(path) = &cli.save_comparison {
        store::save_graph(&result.comparison, path)
            .with_context(|| format!("could not save comparison graph to {}", path.display()))?;
    }

    println!(
        "{}: {} common nodes, {} conserved edges, comparison graph has {} nodes",
        config.target,
        result.common_nodes.len(),
        result.conserved_edges.len(),
        result.comparison.node_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from([
            "superposer",
            "--initial",
            "g.json",
            "--contexts",
            "ctx",
            "--target",
            "FAM111B",
        ])
        .unwrap();

        assert_eq!(cli.extension, "json");
        assert_eq!(cli.nodes_file, PathBuf::from("reduced_graph_nodes.txt"));
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert!(cli.max_path_nodes.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_target_required() {
        let parsed = Cli::try_parse_from(["superposer", "-i", "g.json", "-c", "ctx"]);
        assert!(parsed.is_err());
    }
}

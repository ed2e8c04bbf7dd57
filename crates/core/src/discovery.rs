//! Discovery of candidate graph files
//!
//! Walks a directory tree and collects every file with a given extension.
//! Unlike source-tree discovery, graph collections are scanned in full:
//! ignore files and hidden entries are not special-cased.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discover graph files with `extension` below `root`
///
/// # Arguments
/// * `root` - Directory to search recursively
/// * `extension` - File extension, with or without the leading dot (`"json"`, `".json"`)
///
/// # Returns
/// Paths relative to `root`, sorted. Empty when nothing matches or `root`
/// cannot be read.
///
/// # Example
/// ```no_run
/// use superposer_core::discovery;
///
/// let files = discovery::discover_graph_files(std::path::Path::new("contexts"), "json");
/// println!("Found {} candidate graphs", files.len());
/// ```
pub fn discover_graph_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        return Vec::new();
    }

    let pattern = format!("**/*.{extension}");
    let glob_matcher = match build_glob_matcher(&[pattern.as_str()]) {
        Ok(matcher) => matcher,
        Err(err) => {
            tracing::warn!(%extension, error = %err, "invalid extension pattern");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for result in build_walker(root) {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                if let Ok(rel_path) = entry.path().strip_prefix(root) {
                    if glob_matcher.is_match(rel_path) {
                        files.push(rel_path.to_path_buf());
                    }
                }
            }
            Err(err) => {
                // Keep going; one unreadable entry should not hide the rest
                tracing::warn!(root = %root.display(), error = %err, "error walking directory");
            }
        }
    }

    files.sort();
    files
}

/// Build a glob matcher from the provided patterns
fn build_glob_matcher(patterns: &[&str]) -> Result<globset::GlobSet, globset::Error> {
    use globset::{GlobBuilder, GlobSetBuilder};

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // `*` stays within one path component; `**/` covers the depth
        builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
    }
    builder.build()
}

/// Build a walker that visits every entry below `root`
fn build_walker(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false);
    builder.build()
}

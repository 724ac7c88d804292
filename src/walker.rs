use std::path::{Path, PathBuf};

use anyhow::bail;
use log::{debug, info, warn};

use crate::config::ClassGraphConfig;

/// Source file extensions that class-graph discovers.
const SOURCE_EXTENSIONS: &[&str] = &["php"];

/// Walk a directory and collect PHP source files, sorted by path.
///
/// Respects `.gitignore` rules and applies any additional exclusions from `config.exclude`.
/// Only the top level is scanned unless `recursive` is true.
pub fn walk_project(
    root: &Path,
    config: &ClassGraphConfig,
    recursive: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut files = Vec::new();
    collect_files(root, config, recursive, &mut files);
    files.sort();

    info!(root:% = root.display(), files = files.len(), recursive; "discovered source files");
    Ok(files)
}

/// Collect source files from a directory tree using the `ignore` crate.
fn collect_files(root: &Path, config: &ClassGraphConfig, recursive: bool, out: &mut Vec<PathBuf>) {
    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(true)
        // Read .gitignore files even when the directory is not inside a git repository.
        .require_git(false)
        .max_depth(if recursive { None } else { Some(1) })
        .build();

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error:% = err; "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if is_excluded_by_config(relative, config) {
            debug!(path:% = path.display(); "excluded by config");
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }

        debug!(path:% = path.display(); "found source file");
        out.push(path.to_path_buf());
    }
}

/// Returns true if `path` matches any exclusion pattern from config.
fn is_excluded_by_config(path: &Path, config: &ClassGraphConfig) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in config.exclude_patterns() {
        let Ok(matcher) = glob::Pattern::new(pattern) else {
            warn!(pattern:% = pattern; "ignoring invalid exclude pattern");
            continue;
        };
        if matcher.matches(&path_str) {
            return true;
        }
        // Also check if any component matches the pattern directly.
        for component in path.components() {
            if let Some(s) = component.as_os_str().to_str()
                && matcher.matches(s)
            {
                return true;
            }
        }
    }

    false
}

//! Directory traversal with `test` directory pruning and suffix matching

use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

/// Directory name (compared case-insensitively) whose subtree is never visited.
pub const PRUNED_DIR_NAME: &str = "test";

/// Walks a directory tree and yields the files matching a set of name suffixes.
///
/// Every file is considered: hidden files and ignore files get no special
/// treatment. Symbolic links are never followed into directories.
#[derive(Debug, Clone)]
pub struct ScanWalker {
    extensions: Vec<String>,
}

impl ScanWalker {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions.to_vec(),
        }
    }

    /// Call `visit` with the path of every matching file under `root`.
    ///
    /// Unreadable directories are logged and skipped.
    pub fn for_each_match(&self, root: &Path, mut visit: impl FnMut(&Path)) {
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| !is_pruned_dir(entry))
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable path: {}", err);
                    continue;
                }
            };

            // Only entries below the root count; a file root yields nothing.
            if entry.depth() == 0 {
                if !entry.path().is_dir() {
                    tracing::warn!(path = %root.display(), "scan root is not a directory");
                }
                continue;
            }

            if !is_file_entry(&entry) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if matches_extension(&name, &self.extensions) {
                visit(entry.path());
            }
        }
    }

    /// Collect every matching file under `root`.
    pub fn matching_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        self.for_each_match(root, |path| files.push(path.to_path_buf()));
        files
    }
}

/// Whether `name` ends with any of `extensions`.
///
/// Plain suffix comparison: `.ts` matches `app.ts`, and `ts` alone would also
/// match `hints`.
pub fn matches_extension(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Whether a directory name marks a subtree to skip.
pub fn is_pruned_name(name: &str) -> bool {
    name.to_lowercase() == PRUNED_DIR_NAME
}

fn is_pruned_dir(entry: &DirEntry) -> bool {
    // The root is always walked, whatever its name.
    if entry.depth() == 0 {
        return false;
    }
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    if !is_dir {
        return false;
    }
    let pruned = is_pruned_name(&entry.file_name().to_string_lossy());
    if pruned {
        tracing::debug!(path = %entry.path().display(), "pruning test directory");
    }
    pruned
}

/// Anything that is not a directory counts as a file, including symlinks
/// whose target is missing.
fn is_file_entry(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => false,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Some(_) => true,
        None => false,
    }
}

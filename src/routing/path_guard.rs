//! Static file path guard
//!
//! Resolves a requested path against the web root and refuses anything
//! that canonicalizes outside of it. File existence is answered from a
//! snapshot taken once at startup, so files added later stay invisible.

use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::logger;

pub const INDEX_FILE: &str = "index.html";

/// Immutable set of regular files under the web root
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    root: PathBuf,
    files: HashSet<PathBuf>,
}

impl FileSnapshot {
    /// Walk `web_root` recursively (following symlinks) and record every regular file
    pub fn capture(web_root: &Path) -> io::Result<Self> {
        let root = web_root.canonicalize()?;
        let mut files = HashSet::new();

        for entry in WalkDir::new(&root).follow_links(true) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    files.insert(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => logger::log_warning(&format!("Skipping unreadable web root entry: {e}")),
            }
        }

        Ok(Self { root, files })
    }

    /// Build a snapshot from an already canonical root and file list
    #[cfg(test)]
    pub fn from_parts(root: PathBuf, files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            root,
            files: files.into_iter().collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Outcome of resolving a requested path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// `/` or `/index.html`: serve the root index file
    Root,
    Inside(PathBuf),
    NotFound,
    OutsideRoot,
}

/// Resolve `requested` (a normalized request path) against the snapshot's root
pub fn resolve(requested: &str, snapshot: &FileSnapshot) -> Verdict {
    if requested == "/" || requested == "/index.html" {
        return Verdict::Root;
    }

    // A leading slash must not make the path absolute
    let candidate = snapshot.root().join(requested.trim_start_matches('/'));
    let Some(canonical) = normalize_lexically(&candidate) else {
        return Verdict::OutsideRoot;
    };

    if !is_sub_path(&canonical, snapshot.root()) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {requested} -> {}",
            canonical.display()
        ));
        return Verdict::OutsideRoot;
    }

    if snapshot.contains(&canonical) {
        Verdict::Inside(canonical)
    } else {
        Verdict::NotFound
    }
}

/// Remove `.` and `..` components without touching the filesystem
///
/// Returns `None` when `..` climbs above the filesystem root.
fn normalize_lexically(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
        }
    }
    Some(out)
}

/// Every component of `base` is a prefix of `path`
fn is_sub_path(path: &Path, base: &Path) -> bool {
    let mut path_components = path.components();
    base.components()
        .all(|base_part| path_components.next() == Some(base_part))
}

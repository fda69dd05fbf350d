//! Tree walk and manifest generation.
//!
//! Drives a single pass over the documentation tree:
//!
//! ```text
//! root/                          # --root
//! ├── guides/                    # collection (top-level, must be included)
//! │   ├── EN-2.1/                # version directory
//! │   │   ├── setup.html   ┐
//! │   │   └── setup.pdf    ┘     # one entry: guides-en-2-1-setup
//! │   └── faq.html               # entry without a version
//! ├── manuals/
//! │   └── ...
//! └── .internal/                 # hidden, never indexed
//! ```
//!
//! ## Steps
//!
//! 1. Resolve the root to an absolute directory (error if missing).
//! 2. Determine the include set: explicit names, or every non-hidden
//!    top-level directory when [`IncludeDirs::Auto`].
//! 3. Walk the tree once in file-name order, classifying every regular file
//!    and folding qualifying ones into an [`EntryTable`]. Paths the walk
//!    cannot read are logged and skipped.
//! 4. Sort the entries (see [`crate::manifest::sort_entries`]).
//!
//! [`generate`] additionally resolves the output target and writes the
//! manifest atomically.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::classify::{Classification, classify, is_hidden};
use crate::config::{IncludeDirs, ManifestConfig};
use crate::entry::DocEntry;
use crate::manifest::{self, ManifestError};
use crate::merge::{EntryTable, build_url, file_mtime};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root path does not exist: {}", .0.display())]
    RootMissing(PathBuf),
    #[error("Root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Result of walking the tree.
#[derive(Debug)]
pub struct Scan {
    /// Absolute scan root.
    pub root: PathBuf,
    /// Top-level directories that were indexed, sorted.
    pub include: Vec<String>,
    /// Whether `include` was discovered rather than given.
    pub auto_discovered: bool,
    /// Entries in manifest order.
    pub entries: Vec<DocEntry>,
    /// Regular files that did not qualify, plus paths the walk could not read.
    pub skipped_files: usize,
}

/// Result of a full generate run.
#[derive(Debug)]
pub struct Generated {
    pub scan: Scan,
    /// Where the manifest was written.
    pub output_path: PathBuf,
}

/// Walk the tree described by `config` and collect sorted entries.
pub fn scan(config: &ManifestConfig) -> Result<Scan, ScanError> {
    let root = resolve_root(&config.root)?;

    let (include, auto_discovered) = match &config.include {
        IncludeDirs::Auto => (discover_include_dirs(&root)?, true),
        IncludeDirs::Only(dirs) => {
            let mut dirs = dirs.clone();
            dirs.sort();
            dirs.dedup();
            (dirs, false)
        }
    };
    tracing::debug!(root = %root.display(), ?include, auto_discovered, "scanning");

    let include_set: BTreeSet<String> = include.iter().cloned().collect();
    let (table, skipped_files) = collect_entries(&root, &config.base_url_prefix, &include_set);

    let mut entries = table.into_entries();
    manifest::sort_entries(&mut entries);

    Ok(Scan {
        root,
        include,
        auto_discovered,
        entries,
        skipped_files,
    })
}

/// Scan, then write the manifest to the resolved output target.
pub fn generate(config: &ManifestConfig) -> Result<Generated, ScanError> {
    let scan = scan(config)?;
    let output_path = manifest::resolve_output_path(&config.output);
    manifest::write_manifest(&output_path, &scan.entries)?;
    Ok(Generated { scan, output_path })
}

/// Make the root absolute and check that it is a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(fs::canonicalize(root)?)
}

/// Every non-hidden top-level directory under `root`, sorted by name.
pub fn discover_include_dirs(root: &Path) -> Result<Vec<String>, ScanError> {
    let mut dirs: Vec<String> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|name| !is_hidden(name))
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn collect_entries(
    root: &Path,
    base_url_prefix: &str,
    include: &BTreeSet<String>,
) -> (EntryTable, usize) {
    let mut table = EntryTable::new();
    let mut skipped = 0usize;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !prune(e, include));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
                tracing::warn!(%path, error = %err, "skipping unreadable path");
                skipped += 1;
                continue;
            }
        };
        if !is_regular_file(&entry) {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        match classify(relative, include) {
            Classification::Document { key, format } => {
                let url = build_url(base_url_prefix, relative);
                let modified = file_mtime(path);
                tracing::trace!(%key, ?format, %url, "indexed");
                table.record(key, format, url, modified);
            }
            Classification::Skip(reason) => {
                tracing::trace!(path = %relative.display(), ?reason, "skipped");
                skipped += 1;
            }
        }
    }

    (table, skipped)
}

/// Skip descending into hidden directories and excluded collections.
fn prune(entry: &DirEntry, include: &BTreeSet<String>) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    is_hidden(&name) || (entry.depth() == 1 && !include.contains(&*name))
}

fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

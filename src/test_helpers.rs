//! Shared test utilities for the docs-manifest test suite.
//!
//! Provides fixture builders for documentation trees and lookup helpers
//! that work with scan results (`Scan`, `DocEntry`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "guides/EN-2.1/setup.html");
//!
//! let scan = scan(&config).unwrap();
//! let entry = find_entry(&scan, "guides-en-2-1-setup");
//! assert_eq!(entry.title, "Setup");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::entry::DocEntry;
use crate::scan::Scan;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a file (and its parent directories) under `root`.
///
/// Content is irrelevant to the scanner; only the name and mtime matter.
pub fn write_file(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "fixture").unwrap();
    path
}

/// Set a file's modification time.
pub fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

// =========================================================================
// Scan lookups (panic with a clear message on a miss)
// =========================================================================

/// Find an entry by slug. Panics if not found.
pub fn find_entry<'a>(scan: &'a Scan, slug: &str) -> &'a DocEntry {
    scan.entries
        .iter()
        .find(|e| e.slug == slug)
        .unwrap_or_else(|| {
            let slugs = entry_slugs(scan);
            panic!("entry '{slug}' not found. Available: {slugs:?}")
        })
}

/// All entry slugs in manifest order.
pub fn entry_slugs(scan: &Scan) -> Vec<&str> {
    scan.entries.iter().map(|e| e.slug.as_str()).collect()
}

//! Entry table: folds physical files into logical documents.
//!
//! The table is keyed by [`SegmentKey`], not by slug, so two documents whose
//! paths differ but slugify identically (`a/b-c` vs `a-b/c`) stay separate.
//! For each qualifying file the table:
//!
//! 1. looks up or creates the entry for its key
//! 2. stores the file's public URL under the matching format
//! 3. folds the file's modification time into `updated`
//!
//! A file that cannot be stat'ed contributes no timestamp. The run continues.

use std::collections::HashMap;
use std::path::Path;
use std::time::SystemTime;

use crate::classify::{AssetFormat, SegmentKey};
use crate::entry::DocEntry;

/// Mapping from segment key to entry, built during a single tree walk.
#[derive(Debug, Default)]
pub struct EntryTable {
    entries: HashMap<SegmentKey, DocEntry>,
}

impl EntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &SegmentKey) -> Option<&DocEntry> {
        self.entries.get(key)
    }

    /// Fold one physical file into the table.
    ///
    /// `url` is the file's public URL and `modified` its modification time,
    /// if it could be read. A later file of the same format replaces the URL.
    pub fn record(
        &mut self,
        key: SegmentKey,
        format: AssetFormat,
        url: String,
        modified: Option<SystemTime>,
    ) -> &DocEntry {
        let entry = self
            .entries
            .entry(key)
            .or_insert_with_key(DocEntry::from_key);
        entry.set_url(format, url);
        entry.touch(modified);
        entry
    }

    /// Consume the table, yielding entries in no particular order.
    pub fn into_entries(self) -> Vec<DocEntry> {
        self.entries.into_values().collect()
    }
}

/// Build the public URL for a file path relative to the scan root.
///
/// The relative path is rendered with `/` separators and a single leading
/// slash, then appended to the prefix with its trailing slashes removed:
/// `("https://dl.svc.plus/docs/", "guides/setup.html")` →
/// `https://dl.svc.plus/docs/guides/setup.html`.
pub fn build_url(base_prefix: &str, relative: &Path) -> String {
    let rel: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .filter(|c| c != "/" && c != ".")
        .collect();
    let rel = format!("/{}", rel.join("/").trim_start_matches('/'));

    let prefix = base_prefix.trim_end_matches('/');
    format!("{prefix}{rel}")
}

/// Read a file's modification time, logging and swallowing failures.
pub fn file_mtime(path: &Path) -> Option<SystemTime> {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => Some(modified).filter(|t| *t > SystemTime::UNIX_EPOCH),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not stat file; no timestamp recorded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn key(parts: &[&str]) -> SegmentKey {
        SegmentKey::new(parts.iter().map(|s| s.to_string()).collect())
    }

    fn at(secs: u64) -> Option<SystemTime> {
        Some(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    #[test]
    fn html_and_pdf_merge_into_one_entry() {
        let mut table = EntryTable::new();
        let k = key(&["cat", "1.0", "guide"]);

        table.record(k.clone(), AssetFormat::Pdf, "/docs/cat/1.0/guide.pdf".into(), at(10));
        table.record(k.clone(), AssetFormat::Html, "/docs/cat/1.0/guide.html".into(), at(5));

        assert_eq!(table.len(), 1);
        let entry = table.get(&k).unwrap();
        assert_eq!(entry.pdf_url.as_deref(), Some("/docs/cat/1.0/guide.pdf"));
        assert_eq!(entry.html_url.as_deref(), Some("/docs/cat/1.0/guide.html"));
        assert_eq!(entry.updated, at(10));
    }

    #[test]
    fn max_fold_independent_of_order() {
        let k = key(&["cat", "doc"]);

        let mut forward = EntryTable::new();
        forward.record(k.clone(), AssetFormat::Pdf, "a".into(), at(1));
        forward.record(k.clone(), AssetFormat::Html, "b".into(), at(2));

        let mut backward = EntryTable::new();
        backward.record(k.clone(), AssetFormat::Html, "b".into(), at(2));
        backward.record(k.clone(), AssetFormat::Pdf, "a".into(), at(1));

        assert_eq!(forward.get(&k).unwrap().updated, at(2));
        assert_eq!(backward.get(&k).unwrap().updated, at(2));
    }

    #[test]
    fn stat_failure_keeps_previous_timestamp() {
        let mut table = EntryTable::new();
        let k = key(&["cat", "doc"]);
        table.record(k.clone(), AssetFormat::Pdf, "a".into(), at(7));
        table.record(k.clone(), AssetFormat::Html, "b".into(), None);
        assert_eq!(table.get(&k).unwrap().updated, at(7));
    }

    #[test]
    fn duplicate_format_last_wins() {
        let mut table = EntryTable::new();
        let k = key(&["cat", "doc"]);
        table.record(k.clone(), AssetFormat::Pdf, "first".into(), None);
        table.record(k.clone(), AssetFormat::Pdf, "second".into(), None);
        assert_eq!(table.get(&k).unwrap().pdf_url.as_deref(), Some("second"));
    }

    #[test]
    fn colliding_slugs_stay_separate() {
        let mut table = EntryTable::new();
        table.record(key(&["a", "b-c"]), AssetFormat::Pdf, "x".into(), None);
        table.record(key(&["a-b", "c"]), AssetFormat::Pdf, "y".into(), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn build_url_joins_prefix_and_path() {
        let rel = Path::new("guides/EN-2.1/setup.html");
        assert_eq!(
            build_url("https://dl.svc.plus/docs", rel),
            "https://dl.svc.plus/docs/guides/EN-2.1/setup.html"
        );
        assert_eq!(
            build_url("https://dl.svc.plus/docs///", rel),
            "https://dl.svc.plus/docs/guides/EN-2.1/setup.html"
        );
        assert_eq!(build_url("/docs", rel), "/docs/guides/EN-2.1/setup.html");
    }

    #[test]
    fn build_url_with_empty_prefix_is_rooted_path() {
        assert_eq!(build_url("", Path::new("a/b.pdf")), "/a/b.pdf");
        assert_eq!(build_url("/", Path::new("a/b.pdf")), "/a/b.pdf");
    }

    #[test]
    fn file_mtime_reads_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.pdf");
        std::fs::write(&path, "pdf").unwrap();
        assert!(file_mtime(&path).is_some());
    }

    #[test]
    fn file_mtime_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(file_mtime(&tmp.path().join("vanished.pdf")), None);
    }
}

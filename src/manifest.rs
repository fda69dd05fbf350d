//! Manifest serialization: ordering, payload shape, and the atomic write.
//!
//! ## Ordering
//!
//! Entries are sorted newest first (`updatedAt` descending), ties broken by
//! slug ascending. Entries without a timestamp sort last.
//!
//! ## Payload
//!
//! [`DocPayload`] always carries `slug`, `title` and `description`. Every
//! other field is omitted when absent or empty, so the output never contains
//! `null`, `""` or `[]`.
//!
//! ## Writing
//!
//! The JSON array is written to `<file>.tmp` next to the target and renamed
//! into place, so readers never observe a partially written manifest.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::describe::resolve_description;
use crate::entry::DocEntry;

/// File name used when the output target is a directory.
pub const MANIFEST_FILENAME: &str = "docs-manifest.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One manifest record as consumed by the docs portal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocPayload {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_slug: Option<String>,
    /// Raw version directory when it cannot be recovered from `version`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path_segments: Vec<String>,
}

impl DocPayload {
    /// Finalize an entry into its output record.
    pub fn from_entry(entry: &DocEntry) -> Self {
        let variant = entry.version_dir.as_ref().filter(|dir| {
            entry
                .version
                .as_ref()
                .is_none_or(|v| v.replace(' ', "-") != **dir)
        });

        Self {
            slug: entry.slug.clone(),
            title: entry.title.clone(),
            description: resolve_description(entry),
            category: non_empty(&entry.category),
            version: non_empty(&entry.version),
            version_dir: non_empty(&entry.version_dir),
            version_slug: non_empty(&entry.version_slug),
            variant: non_empty(&variant.cloned()),
            updated_at: entry.updated.and_then(format_timestamp),
            collection_dir: non_empty(&entry.collection_dir),
            collection_slug: non_empty(&entry.collection_slug),
            collection_label: non_empty(&entry.collection_label),
            pdf_url: non_empty(&entry.pdf_url),
            html_url: non_empty(&entry.html_url),
            language: non_empty(&entry.language),
            tags: entry
                .tags
                .iter()
                .filter(|t| !t.is_empty())
                .cloned()
                .collect(),
            path_segments: entry.path_segments.clone(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Render a modification time as `YYYY-MM-DDTHH:MM:SSZ` (UTC, whole seconds).
///
/// Returns `None` for times at or before the Unix epoch, which stand for
/// "unknown".
pub fn format_timestamp(time: SystemTime) -> Option<String> {
    if time <= SystemTime::UNIX_EPOCH {
        return None;
    }
    let utc: DateTime<Utc> = time.into();
    Some(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Sort entries newest first, then by slug.
pub fn sort_entries(entries: &mut [DocEntry]) {
    entries.sort_by(|a, b| b.updated.cmp(&a.updated).then_with(|| a.slug.cmp(&b.slug)));
}

/// Render the manifest document: pretty JSON with a trailing newline.
///
/// Non-ASCII characters are written as-is.
pub fn render_manifest(payloads: &[DocPayload]) -> Result<String, ManifestError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    payloads.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Decide where the manifest file goes.
///
/// An existing directory, or a path that does not exist yet and ends in a
/// separator, is treated as a directory and gets [`MANIFEST_FILENAME`] inside
/// it. Anything else is the literal output file.
pub fn resolve_output_path(output: &Path) -> PathBuf {
    let raw = output.as_os_str().to_string_lossy();
    let dir_like = raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR);
    if output.is_dir() || (!output.exists() && dir_like) {
        output.join(MANIFEST_FILENAME)
    } else {
        output.to_path_buf()
    }
}

/// Write the manifest atomically to `output_path`, creating parent
/// directories as needed.
pub fn write_manifest(output_path: &Path, entries: &[DocEntry]) -> Result<(), ManifestError> {
    let payloads: Vec<DocPayload> = entries.iter().map(DocPayload::from_entry).collect();
    let json = render_manifest(&payloads)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let tmp_path = tmp_path_for(output_path);
    if let Err(e) = write_synced(&tmp_path, json.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(&tmp_path, e));
    }

    if let Err(e) = fs::rename(&tmp_path, output_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(output_path, e));
    }

    tracing::debug!(path = %output_path.display(), entries = entries.len(), "manifest written");
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn io_error(path: &Path, source: std::io::Error) -> ManifestError {
    ManifestError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// `docs-manifest.json` → `docs-manifest.json.tmp`, in the same directory.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

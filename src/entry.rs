//! Document entries and their derivation from segment keys.
//!
//! One [`DocEntry`] exists per logical document. All descriptive fields come
//! from the [`SegmentKey`] alone:
//!
//! ```text
//! guides / EN-2.1 / quick_start
//!   │        │         └── title "Quick Start"
//!   │        └── version "EN 2.1", versionSlug "en-2-1", language "EN"
//!   └── category/collection "Guides", collectionSlug "guides"
//! slug: guides-en-2-1-quick-start
//! ```
//!
//! URLs and the modification time are filled in afterwards by
//! [`crate::merge`], one physical file at a time.

use std::collections::BTreeSet;
use std::time::SystemTime;

use crate::classify::{AssetFormat, SegmentKey};
use crate::naming::{
    build_version_slug, detect_language, format_version_label, humanize_segment, slugify,
};

/// Metadata for one logical document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocEntry {
    pub slug: String,
    pub title: String,
    pub category: Option<String>,
    /// Formatted edition label, e.g. "EN 2.1".
    pub version: Option<String>,
    /// Raw version directory name, e.g. "EN-2.1".
    pub version_dir: Option<String>,
    pub version_slug: Option<String>,
    pub collection_dir: Option<String>,
    pub collection_slug: Option<String>,
    pub collection_label: Option<String>,
    pub language: Option<String>,
    /// Author-supplied description. When `None`, one is synthesized at
    /// serialization time (see [`crate::describe`]).
    pub description: Option<String>,
    pub pdf_url: Option<String>,
    pub html_url: Option<String>,
    pub tags: BTreeSet<String>,
    /// Newest modification time across all files mapped to this entry.
    pub updated: Option<SystemTime>,
    pub path_segments: Vec<String>,
    /// Relative path without extension, e.g. `guides/EN-2.1/setup`.
    pub key: SegmentKey,
}

impl DocEntry {
    /// Derive a fresh entry from a segment key, with no URLs and no timestamp.
    pub fn from_key(key: &SegmentKey) -> Self {
        let segments = key.segments();
        let collection_dir = key.first().map(str::to_string);
        let category = key.first().map(humanize_segment).filter(|c| !c.is_empty());

        let version_dir = if segments.len() >= 3 {
            Some(segments[1].clone())
        } else {
            None
        };
        let version = format_version_label(version_dir.as_deref());
        let version_slug = build_version_slug(version_dir.as_deref(), version.as_deref());
        let language = detect_language(version_dir.as_deref());

        let raw_title = key.last().unwrap_or_default();
        let title = Some(humanize_segment(raw_title))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| raw_title.to_string());

        let tags = [&category, &language, &version]
            .into_iter()
            .flatten()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();

        Self {
            slug: slugify(segments),
            title,
            collection_slug: key.first().map(|c| slugify(&[c])),
            collection_label: category.clone(),
            category,
            version,
            version_dir,
            version_slug,
            collection_dir,
            language,
            description: None,
            pdf_url: None,
            html_url: None,
            tags,
            updated: None,
            path_segments: key.parents().to_vec(),
            key: key.clone(),
        }
    }

    /// Formats with a URL, in display order (PDF first).
    pub fn formats(&self) -> Vec<AssetFormat> {
        let mut formats = Vec::with_capacity(2);
        if self.pdf_url.is_some() {
            formats.push(AssetFormat::Pdf);
        }
        if self.html_url.is_some() {
            formats.push(AssetFormat::Html);
        }
        formats
    }

    /// Record the public URL of one rendering.
    pub fn set_url(&mut self, format: AssetFormat, url: String) {
        match format {
            AssetFormat::Pdf => self.pdf_url = Some(url),
            AssetFormat::Html => self.html_url = Some(url),
        }
    }

    /// Fold a file modification time into `updated`; never moves backwards.
    pub fn touch(&mut self, modified: Option<SystemTime>) {
        self.updated = self.updated.max(modified);
    }
}

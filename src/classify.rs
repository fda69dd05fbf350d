//! Path classification: which files become manifest entries, and under what key.
//!
//! A file qualifies when, relative to the scan root:
//! - no path component starts with `.`
//! - its extension is `.pdf` or `.html` (case-insensitive)
//! - its first component is in the include set
//!
//! Qualifying files are mapped to a [`SegmentKey`]: the directory components
//! followed by the file stem. `guides/1.0/setup.html` and
//! `guides/1.0/setup.pdf` share the key `["guides", "1.0", "setup"]`, which
//! is how the two renderings of one document meet in the entry table.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path};

/// Asset formats that appear in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    Pdf,
    Html,
}

impl AssetFormat {
    /// Match a file extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if ext.eq_ignore_ascii_case("html") {
            Some(Self::Html)
        } else {
            None
        }
    }

    /// Upper-case label used in descriptions ("PDF", "HTML").
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Html => "HTML",
        }
    }
}

/// Ordered path segments identifying one logical document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey(Vec<String>);

impl SegmentKey {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Top-level directory (collection) segment.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Document name segment (the file stem).
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Every segment except the document name.
    pub fn parents(&self) -> &[String] {
        match self.0.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Why a file was left out of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Some component starts with `.`.
    Hidden,
    /// Extension is not `.pdf` or `.html`.
    UnsupportedExtension,
    /// First component is not an included directory.
    NotIncluded,
    /// Path has no usable components (or is not valid UTF-8).
    Unnamed,
}

/// Outcome of classifying one relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Document { key: SegmentKey, format: AssetFormat },
    Skip(SkipReason),
}

/// Classify a path relative to the scan root against the include set.
///
/// Pure: looks only at the path string, never at the filesystem.
pub fn classify(relative: &Path, include: &BTreeSet<String>) -> Classification {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(os) => match os.to_str() {
                Some(s) => parts.push(s),
                None => return Classification::Skip(SkipReason::Unnamed),
            },
            Component::CurDir => {}
            _ => return Classification::Skip(SkipReason::Unnamed),
        }
    }

    if parts.iter().any(|p| is_hidden(p)) {
        return Classification::Skip(SkipReason::Hidden);
    }

    let Some(file_name) = parts.pop() else {
        return Classification::Skip(SkipReason::Unnamed);
    };
    let file_path = Path::new(file_name);

    let Some(format) = file_path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(AssetFormat::from_extension)
    else {
        return Classification::Skip(SkipReason::UnsupportedExtension);
    };

    let first = parts.first().copied().unwrap_or(file_name);
    if !include.contains(first) {
        return Classification::Skip(SkipReason::NotIncluded);
    }

    let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else {
        return Classification::Skip(SkipReason::Unnamed);
    };

    let mut segments: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
    segments.push(stem.to_string());

    Classification::Document {
        key: SegmentKey::new(segments),
        format,
    }
}

/// Hidden-file marker check for a single path component.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

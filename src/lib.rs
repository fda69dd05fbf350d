//! # docs-manifest
//!
//! Builds a JSON manifest of documentation assets from a directory tree.
//! The filesystem is the data source: top-level directories become
//! collections, the next level encodes an edition (optionally prefixed with a
//! language code), and every `.html`/`.pdf` pair sharing a name becomes one
//! document.
//!
//! # Architecture: Single-Pass Pipeline
//!
//! ```text
//! walk tree  →  classify path  →  merge into entry table  →  sort  →  write JSON
//!   (scan)       (classify)         (merge, entry)          (manifest)
//! ```
//!
//! Each step except the walk and the final write is a pure function of its
//! input, so the inference rules are unit tested without touching the
//! filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Orchestrates a run: root resolution, include discovery, tree walk, write |
//! | [`classify`] | Decides which files qualify and maps them to a [`classify::SegmentKey`] |
//! | [`entry`] | The [`entry::DocEntry`] record and its derivation from a segment key |
//! | [`naming`] | Humanized labels, slugs, version labels, language detection |
//! | [`merge`] | Entry table keyed by segment key; URL building; mtime max-fold |
//! | [`describe`] | Fallback descriptions from title, category, edition and formats |
//! | [`manifest`] | Ordering, omit-if-empty payloads, atomic JSON write |
//! | [`config`] | Layered settings (defaults → file → flags) and [`config::ManifestConfig`] |
//! | [`output`] | CLI progress and inventory formatting |
//! | [`logging`] | `tracing` subscriber for diagnostics on stderr |
//!
//! # Design Decisions
//!
//! ## Keyed by Path, Not Slug
//!
//! Slugs are lossy (`a/b-c` and `a-b/c` both become `a-b-c`), so the entry
//! table is keyed by the full segment tuple. Two documents never merge just
//! because their slugs collide.
//!
//! ## Stable Output
//!
//! Entries are ordered by modification time (newest first) and then by slug.
//! Given an unchanged tree, two runs write byte-identical manifests.
//!
//! ## Atomic Writes
//!
//! The manifest is written to a sibling `.tmp` file and renamed into place,
//! so a web server reading the manifest never sees a truncated file.

pub mod classify;
pub mod config;
pub mod describe;
pub mod entry;
pub mod logging;
pub mod manifest;
pub mod merge;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;

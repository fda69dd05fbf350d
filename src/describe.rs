//! Fallback descriptions for manifest entries.
//!
//! An entry's description is resolved in priority order, first non-empty wins:
//!
//! ```text
//! description: explicit (author-supplied) → synthesized
//! ```
//!
//! The synthesized form reads like:
//!
//! ```text
//! Setup — Guides (edition EN 2.1, release EN-2.1, available as PDF and HTML).
//! ```
//!
//! It is only built when no explicit value exists.

use crate::classify::AssetFormat;
use crate::entry::DocEntry;
use crate::naming::humanize_segment;

/// Lead noun when an entry has no title.
const FALLBACK_LEAD: &str = "Documentation";

/// Resolve the description for an entry, synthesizing one if needed.
pub fn resolve_description(entry: &DocEntry) -> String {
    match entry
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        Some(explicit) => explicit.to_string(),
        None => build_default_description(
            &entry.title,
            entry.category.as_deref(),
            entry.version.as_deref(),
            entry.version_dir.as_deref(),
            &entry.formats(),
        ),
    }
}

/// Build a human-readable description from the entry's derived fields.
pub fn build_default_description(
    title: &str,
    category: Option<&str>,
    version: Option<&str>,
    version_dir: Option<&str>,
    formats: &[AssetFormat],
) -> String {
    let mut lead = if title.is_empty() {
        FALLBACK_LEAD.to_string()
    } else {
        title.to_string()
    };
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        lead = format!("{lead} — {category}");
    }

    let version = version.filter(|v| !v.is_empty());
    let version_dir = version_dir.filter(|v| !v.is_empty());

    let mut clauses = Vec::new();
    if let Some(v) = version {
        clauses.push(format!("edition {v}"));
    } else if let Some(dir) = version_dir {
        clauses.push(format!("edition {}", humanize_segment(dir)));
    }
    if let Some(dir) = version_dir
        && dir != humanize_segment(dir)
    {
        clauses.push(format!("release {dir}"));
    }
    if !formats.is_empty() {
        let labels: Vec<&str> = formats.iter().map(|f| f.label()).collect();
        clauses.push(format!("available as {}", labels.join(" and ")));
    }

    if clauses.is_empty() {
        format!("{lead}.")
    } else {
        format!("{lead} ({}).", clauses.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SegmentKey;

    #[test]
    fn full_description() {
        let d = build_default_description(
            "Setup",
            Some("Guides"),
            Some("EN 2.1"),
            Some("EN-2.1"),
            &[AssetFormat::Pdf, AssetFormat::Html],
        );
        assert_eq!(
            d,
            "Setup — Guides (edition EN 2.1, release EN-2.1, available as PDF and HTML)."
        );
    }

    #[test]
    fn single_format_is_singular() {
        let d = build_default_description("Setup", None, None, None, &[AssetFormat::Html]);
        assert_eq!(d, "Setup (available as HTML).");
    }

    #[test]
    fn no_clauses_just_lead() {
        assert_eq!(build_default_description("Intro", None, None, None, &[]), "Intro.");
        assert_eq!(
            build_default_description("Intro", Some("Handbook"), None, None, &[]),
            "Intro — Handbook."
        );
    }

    #[test]
    fn empty_title_uses_fallback_lead() {
        assert_eq!(
            build_default_description("", None, None, None, &[AssetFormat::Pdf]),
            "Documentation (available as PDF)."
        );
    }

    #[test]
    fn release_clause_omitted_when_dir_is_already_a_label() {
        let d = build_default_description("Setup", None, Some("2024"), Some("2024"), &[]);
        assert_eq!(d, "Setup (edition 2024).");
    }

    #[test]
    fn edition_falls_back_to_humanized_dir() {
        let d = build_default_description("Setup", None, None, Some("next_gen"), &[]);
        assert_eq!(d, "Setup (edition Next Gen, release next_gen).");
    }

    #[test]
    fn explicit_description_wins() {
        let key = SegmentKey::new(vec!["guides".into(), "setup".into()]);
        let mut entry = DocEntry::from_key(&key);
        entry.description = Some("  Hand-written summary.  ".into());
        assert_eq!(resolve_description(&entry), "Hand-written summary.");
    }

    #[test]
    fn blank_explicit_description_is_synthesized() {
        let key = SegmentKey::new(vec!["guides".into(), "setup".into()]);
        let mut entry = DocEntry::from_key(&key);
        entry.description = Some("   ".into());
        entry.pdf_url = Some("/docs/guides/setup.pdf".into());
        assert_eq!(
            resolve_description(&entry),
            "Setup — Guides (available as PDF)."
        );
    }
}

//! Centralized label and slug derivation for path segments.
//!
//! Every descriptive field of a manifest entry is derived from a directory or
//! file name. This module holds the small pure functions that do it, so titles,
//! categories, version labels and slugs stay consistent with each other.
//!
//! ## Display labels
//!
//! [`humanize_segment`] turns a raw segment into a presentation label:
//! - `user_guide` → "User Guide"
//! - `gettingStarted` → "Getting Started"
//! - `EN-2.1` → "EN 2.1"
//!
//! ## Slugs
//!
//! [`slugify`] joins any number of segments into one lowercase,
//! hyphen-delimited identifier. Runs of anything that is not an ASCII letter
//! or digit collapse to a single hyphen:
//! - `["guides", "EN-2.1", "setup"]` → `guides-en-2-1-setup`
//! - `["___"]` → `doc`

/// Slug used when every segment slugifies to nothing.
pub const FALLBACK_SLUG: &str = "doc";

/// Convert a path fragment into a presentation friendly label.
///
/// Underscores and hyphens become spaces, a space is inserted where a
/// lowercase letter or digit is followed by an uppercase letter, whitespace
/// runs collapse to one space, and the first letter of each word is
/// capitalized. Returns an empty string for empty input.
pub fn humanize_segment(segment: &str) -> String {
    let mut spaced = String::with_capacity(segment.len() + 4);
    let mut prev: Option<char> = None;
    for c in segment.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build a slug from an ordered list of segments.
///
/// Each segment is reduced to lowercase ASCII alphanumerics separated by
/// single hyphens; empty results are dropped and the rest joined with `-`.
/// Returns [`FALLBACK_SLUG`] when nothing survives.
pub fn slugify<S: AsRef<str>>(parts: &[S]) -> String {
    let tokens: Vec<String> = parts
        .iter()
        .map(|p| slug_token(p.as_ref()))
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        tokens.join("-")
    }
}

fn slug_token(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut pending_dash = false;
    for c in part.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Format a version directory into a short edition label.
///
/// `EN-2.1` → "EN 2.1", `v3_beta_rc1` → "v3 beta". A directory that does not
/// split into at least two hyphen/underscore tokens falls back to its
/// humanized form.
pub fn format_version_label(version_dir: Option<&str>) -> Option<String> {
    let dir = version_dir.filter(|d| !d.is_empty())?;
    let tokens: Vec<&str> = dir
        .split(['-', '_'])
        .filter(|t| !t.is_empty())
        .collect();

    let label = if tokens.len() >= 2 {
        format!("{} {}", tokens[0], tokens[1])
    } else {
        humanize_segment(dir)
    };
    Some(label).filter(|l| !l.is_empty())
}

/// Stable slug for the version route segment.
///
/// Prefers the raw version directory, falling back to the formatted label.
pub fn build_version_slug(version_dir: Option<&str>, version_label: Option<&str>) -> Option<String> {
    let candidate = version_dir
        .filter(|d| !d.is_empty())
        .or(version_label.filter(|l| !l.is_empty()))?;
    Some(slugify(&[candidate]))
}

/// Detect a language code from a version directory prefix.
///
/// Matches two or three uppercase ASCII letters at the start of the
/// directory, followed by a `-` or the end of the string:
/// `EN-2.1` → `EN`, `ZHO-v1` → `ZHO`, `ZHO_v1` → none, `ENGL-1` → none,
/// `En-1` → none.
///
/// This is a shape heuristic only; the prefix is not checked against a list
/// of language codes, so `RC-2` also yields `RC`.
pub fn detect_language(version_dir: Option<&str>) -> Option<String> {
    let dir = version_dir?;
    let prefix_len = dir
        .char_indices()
        .find(|(_, c)| !c.is_ascii_uppercase())
        .map(|(i, _)| i)
        .unwrap_or(dir.len());

    if !(2..=3).contains(&prefix_len) {
        return None;
    }
    match dir[prefix_len..].chars().next() {
        None | Some('-') => Some(dir[..prefix_len].to_string()),
        Some(_) => None,
    }
}

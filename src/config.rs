//! Generator configuration.
//!
//! Settings are layered, each layer overriding the one before it:
//!
//! ```text
//! stock defaults  →  settings file (--config)  →  command-line flags
//! ```
//!
//! Layers are merged as TOML tables, then deserialized into [`Settings`] and
//! validated. The result, together with the scan root, becomes a
//! [`ManifestConfig`]: the single value the generator reads its options from.
//!
//! ## Settings file
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url_prefix = "/docs"   # Prepended to every asset URL
//! output = "dl-index/"        # Directory (trailing /) or file path
//! quiet = false               # Suppress progress output
//!
//! # Top-level directories to index. Omit to index every
//! # non-hidden top-level directory under the root.
//! # include = ["guides", "manuals"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classify::is_hidden;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// User-tunable settings. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// URL prefix prepended to each asset's relative path.
    pub base_url_prefix: String,
    /// Output directory (trailing separator) or manifest file path.
    pub output: String,
    /// Top-level directories to index; `None` means auto-discover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Suppress progress output.
    pub quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url_prefix: "/docs".to_string(),
            output: "dl-index/".to_string(),
            include: None,
            quiet: false,
        }
    }
}

impl Settings {
    /// Validate values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        if let Some(include) = &self.include {
            if include.is_empty() {
                return Err(ConfigError::Validation(
                    "include must list at least one directory (omit it to auto-discover)".into(),
                ));
            }
            for name in include {
                if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
                    return Err(ConfigError::Validation(format!(
                        "include entry {name:?} must be a single top-level directory name"
                    )));
                }
                if is_hidden(name) {
                    tracing::warn!(include = %name, "hidden directory is never indexed");
                }
            }
        }
        Ok(())
    }
}

/// Which top-level directories are scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeDirs {
    /// Every non-hidden top-level directory under the root.
    Auto,
    /// Exactly these directory names.
    Only(Vec<String>),
}

/// Everything the generator needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestConfig {
    pub root: PathBuf,
    pub base_url_prefix: String,
    pub output: PathBuf,
    pub include: IncludeDirs,
    pub quiet: bool,
}

impl ManifestConfig {
    pub fn new(root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            root: root.into(),
            base_url_prefix: settings.base_url_prefix,
            output: PathBuf::from(settings.output),
            include: match settings.include {
                Some(dirs) => IncludeDirs::Only(dirs),
                None => IncludeDirs::Auto,
            },
            quiet: settings.quiet,
        }
    }
}

/// Explicit values from the command line. `None` leaves lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
}

impl Overrides {
    /// Render as a sparse TOML table for merging.
    pub fn to_toml(&self) -> Result<toml::Value, ConfigError> {
        Ok(toml::Value::try_from(self)?)
    }
}

// =============================================================================
// Loading and merging
// =============================================================================

/// Stock defaults as a TOML table, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Settings::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a settings file as a raw TOML value.
///
/// A missing file is an error: the caller asked for it explicitly.
pub fn load_raw_settings(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Merge layers in order onto the stock defaults, deserialize and validate.
pub fn resolve_settings(
    layers: impl IntoIterator<Item = toml::Value>,
) -> Result<Settings, ConfigError> {
    let merged = layers
        .into_iter()
        .fold(stock_defaults_value()?, merge_toml);
    let settings: Settings = merged.try_into()?;
    settings.validate()?;
    Ok(settings)
}

/// Resolve settings from an optional settings file and command-line overrides.
pub fn load_settings(
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<Settings, ConfigError> {
    let mut layers = Vec::with_capacity(2);
    if let Some(path) = config_file {
        layers.push(load_raw_settings(path)?);
    }
    layers.push(overrides.to_toml()?);
    resolve_settings(layers)
}

/// A fully commented stock settings file. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# docs-manifest settings
# ======================
# All settings are optional. Values shown are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# URL prefix prepended to each asset path, e.g. "https://dl.svc.plus/docs".
base_url_prefix = "/docs"

# Where to write the manifest. A trailing "/" (or an existing directory)
# means "write docs-manifest.json inside this directory".
output = "dl-index/"

# Suppress progress output.
quiet = false

# Top-level directories to index. Leave unset to index every
# non-hidden top-level directory under the root.
# include = ["guides", "manuals"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.base_url_prefix, "/docs");
        assert_eq!(s.output, "dl-index/");
        assert_eq!(s.include, None);
        assert!(!s.quiet);
    }

    #[test]
    fn default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn stock_defaults_value_omits_include() {
        let v = stock_defaults_value().unwrap();
        let table = v.as_table().unwrap();
        assert!(table.contains_key("base_url_prefix"));
        assert!(table.contains_key("output"));
        assert!(!table.contains_key("include"));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let s: Settings = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(s, Settings::default());
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(parse("a = 1\nb = 2"), parse("b = 3"));
        assert_eq!(merged, parse("a = 1\nb = 3"));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let merged = merge_toml(parse("include = [\"a\", \"b\"]"), parse("include = [\"c\"]"));
        assert_eq!(merged, parse("include = [\"c\"]"));
    }

    #[test]
    fn layers_apply_in_order() {
        let file = parse("base_url_prefix = \"https://a.example/docs\"\nquiet = true");
        let cli = Overrides {
            base_url_prefix: Some("https://b.example/docs".into()),
            ..Default::default()
        };
        let s = resolve_settings([file, cli.to_toml().unwrap()]).unwrap();
        assert_eq!(s.base_url_prefix, "https://b.example/docs");
        assert!(s.quiet);
        assert_eq!(s.output, "dl-index/");
    }

    #[test]
    fn overrides_render_only_set_flags() {
        let cli = Overrides {
            include: Some(vec!["guides".into()]),
            quiet: Some(true),
            ..Default::default()
        };
        let v = cli.to_toml().unwrap();
        assert_eq!(v, parse("include = [\"guides\"]\nquiet = true"));
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let s = resolve_settings([Overrides::default().to_toml().unwrap()]).unwrap();
        assert_eq!(s, Settings::default());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result = resolve_settings([parse("base_url = \"/x\"")]);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn include_must_be_plain_names() {
        for bad in ["[\"a/b\"]", "[\"\"]", "[\"..\"]", "[]"] {
            let result = resolve_settings([parse(&format!("include = {bad}"))]);
            assert!(
                matches!(result, Err(ConfigError::Validation(_))),
                "include = {bad} should be rejected"
            );
        }
    }

    #[test]
    fn hidden_include_is_accepted() {
        let s = resolve_settings([parse("include = [\".internal\", \"guides\"]")]).unwrap();
        assert_eq!(
            s.include,
            Some(vec![".internal".to_string(), "guides".to_string()])
        );
    }

    #[test]
    fn empty_output_rejected() {
        let result = resolve_settings([parse("output = \"  \"")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // File loading
    // =========================================================================

    #[test]
    fn load_settings_from_file_and_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docs-manifest.toml");
        fs::write(&path, "include = [\"guides\"]\noutput = \"out/all.json\"\n").unwrap();

        let overrides = Overrides {
            quiet: Some(true),
            ..Default::default()
        };
        let s = load_settings(Some(&path), &overrides).unwrap();
        assert_eq!(s.include, Some(vec!["guides".to_string()]));
        assert_eq!(s.output, "out/all.json");
        assert!(s.quiet);
    }

    #[test]
    fn missing_settings_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_settings(Some(&tmp.path().join("nope.toml")), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "this is not toml [[[").unwrap();
        let result = load_settings(Some(&path), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // ManifestConfig
    // =========================================================================

    #[test]
    fn manifest_config_include_modes() {
        let auto = ManifestConfig::new("/srv/docs", Settings::default());
        assert_eq!(auto.include, IncludeDirs::Auto);
        assert_eq!(auto.output, PathBuf::from("dl-index/"));

        let only = ManifestConfig::new(
            "/srv/docs",
            Settings {
                include: Some(vec!["guides".into()]),
                ..Settings::default()
            },
        );
        assert_eq!(only.include, IncludeDirs::Only(vec!["guides".into()]));
    }
}

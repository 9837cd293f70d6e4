//! Site configuration loading for pagegen.
//!
//! Parses the site's `data.toml` into [`SiteData`]: flat string values,
//! arrays of string records for repeated template sections, and the
//! ordered list of layout-selection rules.
//!
//! The document is read through a [`FileStore`], never directly from
//! disk, so loading is unit-testable with an in-memory store.
//!
//! ## Document shape
//!
//! ```toml
//! title = "My site"            # top-level strings -> scalars
//!
//! [[layout]]                   # reserved rule array
//! path = "/blog"
//! filename = "blog.html"
//!
//! [[post]]                     # any other array of tables -> arrays
//! title = "First post"
//! href = "/blog/first.html"
//! ```
//!
//! After loading, `layouts` is sorted longest-prefix-first. The sort is
//! stable: rules with equal-length prefixes keep their declaration order,
//! which the resolver relies on for tie-breaking.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::Value;

use pagegen_storage::{FileStore, StoreError};

/// Reserved top-level key holding the layout-selection rules.
pub const RULES_KEY: &str = "layout";

/// A single layout-selection rule.
///
/// Pages whose normalized path starts with `path` use the layout template
/// named `filename`. Capitalized `Path`/`Filename` keys are accepted for
/// compatibility with existing site configs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutRule {
    /// Path prefix matched against `/`-prefixed page paths.
    #[serde(alias = "Path")]
    pub path: String,
    /// Layout filename under the layout directory.
    #[serde(alias = "Filename")]
    pub filename: String,
}

/// Parsed site configuration.
///
/// Constructed once per run and immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteData {
    /// Flat key-value pairs available to every template.
    pub scalars: BTreeMap<String, String>,
    /// Named arrays of string records, for repeated template sections.
    pub arrays: BTreeMap<String, Vec<BTreeMap<String, String>>>,
    /// Layout-selection rules, sorted longest-prefix-first.
    pub layouts: Vec<LayoutRule>,
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file is missing or unreadable.
    #[error("configuration file not found: {}: {source}", path.display())]
    NotFound {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },
    /// The configuration file exists but does not parse.
    #[error("invalid configuration in {}: {message}", path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// What was wrong, including the offending key where known.
        message: String,
    },
}

impl SiteData {
    /// Load site configuration from `path` through the given store.
    ///
    /// Top-level strings become scalars, arrays of string-valued tables
    /// become arrays, and the reserved [`RULES_KEY`] array becomes the
    /// layout rules. A document without a rule array still loads; only a
    /// read failure or a malformed document is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `path` is empty or the file
    /// cannot be read, [`ConfigError::Parse`] if the document is not
    /// valid TOML or a value has an unsupported shape.
    pub fn load(store: &dyn FileStore, path: &Path) -> Result<Self, ConfigError> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
                source: StoreError::not_found(path),
            });
        }

        let content = store.read(path).map_err(|source| ConfigError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let mut data = Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        // Stable sort: equal-length prefixes keep declaration order.
        data.layouts.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

        Ok(data)
    }

    /// Parse a TOML document into the three collections.
    fn parse(content: &str) -> Result<Self, String> {
        let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;

        let mut data = Self::default();

        for (key, value) in table {
            match value {
                Value::String(s) => {
                    data.scalars.insert(key, s);
                }
                Value::Array(entries) if key == RULES_KEY => {
                    for entry in entries {
                        let rule: LayoutRule = entry
                            .try_into()
                            .map_err(|e| format!("bad `{RULES_KEY}` entry: {e}"))?;
                        data.layouts.push(rule);
                    }
                }
                Value::Array(entries) => {
                    let mut records = Vec::with_capacity(entries.len());
                    for entry in entries {
                        let Value::Table(fields) = entry else {
                            return Err(format!("array `{key}` must contain tables"));
                        };
                        let mut record = BTreeMap::new();
                        for (field, value) in fields {
                            let Value::String(s) = value else {
                                return Err(format!(
                                    "array `{key}` field `{field}` must be a string"
                                ));
                            };
                            record.insert(field, s);
                        }
                        records.push(record);
                    }
                    data.arrays.insert(key, records);
                }
                other => {
                    let got = match other {
                        Value::Integer(_) => "an integer",
                        Value::Float(_) => "a float",
                        Value::Boolean(_) => "a boolean",
                        Value::Datetime(_) => "a datetime",
                        Value::Table(_) => "a table",
                        Value::String(_) | Value::Array(_) => unreachable!(),
                    };
                    return Err(format!(
                        "unsupported value for `{key}`: expected a string or an array \
                         of tables, got {got}"
                    ));
                }
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use pagegen_storage::MemoryStore;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load_str(content: &str) -> Result<SiteData, ConfigError> {
        let store = MemoryStore::new().with_file("data.toml", content);
        SiteData::load(&store, Path::new("data.toml"))
    }

    #[test]
    fn load_scalars() {
        let data = load_str(
            r#"
title = "My site"
author = "Jane"
"#,
        )
        .unwrap();

        assert_eq!(data.scalars.get("title"), Some(&"My site".to_owned()));
        assert_eq!(data.scalars.get("author"), Some(&"Jane".to_owned()));
        assert!(data.arrays.is_empty());
        assert!(data.layouts.is_empty());
    }

    #[test]
    fn load_arrays() {
        let data = load_str(
            r#"
[[post]]
title = "First"
href = "/blog/first.html"

[[post]]
title = "Second"
href = "/blog/second.html"
"#,
        )
        .unwrap();

        let posts = data.arrays.get("post").unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].get("title"), Some(&"First".to_owned()));
        assert_eq!(posts[1].get("href"), Some(&"/blog/second.html".to_owned()));
    }

    #[test]
    fn load_layout_rules() {
        let data = load_str(
            r#"
[[layout]]
path = "/blog"
filename = "blog.html"

[[layout]]
path = "/"
filename = "main.html"
"#,
        )
        .unwrap();

        assert_eq!(
            data.layouts,
            vec![
                LayoutRule {
                    path: "/blog".to_owned(),
                    filename: "blog.html".to_owned(),
                },
                LayoutRule {
                    path: "/".to_owned(),
                    filename: "main.html".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn layout_rules_accept_capitalized_keys() {
        let data = load_str(
            r#"
[[layout]]
Path = "/blog"
Filename = "blog.html"
"#,
        )
        .unwrap();

        assert_eq!(data.layouts[0].path, "/blog");
        assert_eq!(data.layouts[0].filename, "blog.html");
    }

    #[test]
    fn layout_rules_sorted_longest_prefix_first() {
        let data = load_str(
            r#"
[[layout]]
path = "/blog"
filename = "blog.html"

[[layout]]
path = "/blog/drafts"
filename = "draft.html"

[[layout]]
path = "/"
filename = "main.html"
"#,
        )
        .unwrap();

        let prefixes: Vec<&str> = data.layouts.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(prefixes, vec!["/blog/drafts", "/blog", "/"]);
    }

    #[test]
    fn equal_length_prefixes_keep_declaration_order() {
        let data = load_str(
            r#"
[[layout]]
path = "/aa"
filename = "first.html"

[[layout]]
path = "/bb"
filename = "second.html"

[[layout]]
path = "/cc"
filename = "third.html"
"#,
        )
        .unwrap();

        let filenames: Vec<&str> = data.layouts.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(filenames, vec!["first.html", "second.html", "third.html"]);
    }

    #[test]
    fn missing_rule_array_still_loads() {
        let data = load_str(r#"title = "No rules""#).unwrap();

        assert!(data.layouts.is_empty());
        assert_eq!(data.scalars.get("title"), Some(&"No rules".to_owned()));
    }

    #[test]
    fn empty_path_is_not_found() {
        let store = MemoryStore::new();
        let err = SiteData::load(&store, Path::new("")).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let store = MemoryStore::new();
        let err = SiteData::load(&store, Path::new("data.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("data.toml"));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = load_str("title = ").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn non_string_scalar_is_parse_error() {
        let err = load_str("port = 8080").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn non_string_record_field_is_parse_error() {
        let err = load_str(
            r#"
[[post]]
title = "First"
count = 3
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn rule_entry_missing_filename_is_parse_error() {
        let err = load_str(
            r#"
[[layout]]
path = "/blog"
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

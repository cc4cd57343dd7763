//! Localization tables and `$key$` placeholder resolution.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{DocError, Result};
use crate::resource::load_document;

/// Sentinel that wraps a localization key: `$greeting$`.
pub const MARKER: char = '$';

/// Returns the key inside a `$key$` marker, or `None` if `token` is not one.
pub fn marker_key(token: &str) -> Option<&str> {
    let key = token.strip_prefix(MARKER)?.strip_suffix(MARKER)?;
    if key.is_empty() { None } else { Some(key) }
}

// ── Localization ──────────────────────────────────────────────────────────

/// A flat key → string table for one language.
///
/// Immutable once loaded. An empty table is valid: it is what an
/// application gets when no language is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Localization {
    name:    Option<String>,
    entries: HashMap<String, String>,
}

impl Localization {
    /// The empty table (no language).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from in-memory pairs.
    pub fn from_pairs<I, K, V>(name: Option<&str>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name:    name.map(str::to_string),
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Build a table from a parsed document, which must be a flat map.
    ///
    /// Non-string scalars are stored in their textual form; `null` becomes
    /// the empty string. Nested maps and sequences are rejected.
    pub fn from_value(name: Option<&str>, doc: &Value) -> Result<Self> {
        let Value::Object(map) = doc else {
            return Err(DocError::invalid_field("localization", "expected a key/value map"));
        };
        let mut entries = HashMap::with_capacity(map.len());
        for (key, value) in map {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b)   => b.to_string(),
                Value::Null      => String::new(),
                _ => {
                    return Err(DocError::invalid_field(
                        "localization",
                        format!("value for `{key}` must be a string"),
                    ));
                }
            };
            entries.insert(key.clone(), text);
        }
        Ok(Self { name: name.map(str::to_string), entries })
    }

    /// Load a table from disk.
    ///
    /// `None` yields the empty table. A named file that does not exist is
    /// [`DocError::ResourceNotFound`]. The table is named after the file stem.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::empty());
        };
        let doc = load_document(path)?;
        let name = path.file_stem().and_then(|s| s.to_str());
        Self::from_value(name, &doc)
    }

    /// Language name this table was loaded as, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a token against the table.
    ///
    /// - not a `$key$` marker → returned unchanged
    /// - marker whose key is present → the mapped value
    /// - marker whose key is absent → `None` (not the original token)
    ///
    /// A mapped value that is itself a marker is followed, so a `Some`
    /// result never contains a resolvable marker and resolving it again
    /// returns it unchanged. Chains that loop or dead-end yield `None`.
    pub fn resolve<'a>(&'a self, token: &'a str) -> Option<&'a str> {
        let mut current = token;
        for _ in 0..=self.entries.len() {
            match marker_key(current) {
                None => return Some(current),
                Some(key) => current = self.entries.get(key)?.as_str(),
            }
        }
        None
    }

    /// [`resolve`](Self::resolve) lifted to any [`Value`]: strings are
    /// resolved, every other value passes through unchanged.
    pub fn resolve_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::String(s) => self.resolve(s).map(|v| Value::String(v.to_string())),
            other => Some(other.clone()),
        }
    }
}

/// Resolve `token` against an optional table; no table means identity.
pub fn resolve_with<'a>(table: Option<&'a Localization>, token: &'a str) -> Option<&'a str> {
    match table {
        Some(t) => t.resolve(token),
        None => Some(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Localization {
        Localization::from_pairs(
            Some("fr"),
            [("title", "Bonjour"), ("alias", "$title$"), ("loop_a", "$loop_b$"), ("loop_b", "$loop_a$")],
        )
    }

    // ── marker_key ────────────────────────────────────────────────────────

    #[test]
    fn marker_key_requires_both_sentinels() {
        assert_eq!(marker_key("$title$"), Some("title"));
        assert_eq!(marker_key("$title"), None);
        assert_eq!(marker_key("title$"), None);
        assert_eq!(marker_key("$$"), None);
        assert_eq!(marker_key("$"), None);
        assert_eq!(marker_key("plain"), None);
    }

    // ── resolve ───────────────────────────────────────────────────────────

    #[test]
    fn hit_returns_mapped_value() {
        assert_eq!(table().resolve("$title$"), Some("Bonjour"));
    }

    #[test]
    fn miss_on_marker_is_none_not_the_token() {
        assert_eq!(table().resolve("$nope$"), None);
    }

    #[test]
    fn non_marker_is_identity() {
        let t = table();
        for token in ["", "title", "a $title$ inside", "$", "$$", "100%"] {
            assert_eq!(t.resolve(token), Some(token));
        }
    }

    #[test]
    fn chained_markers_are_followed() {
        assert_eq!(table().resolve("$alias$"), Some("Bonjour"));
    }

    #[test]
    fn cyclic_chain_is_none() {
        assert_eq!(table().resolve("$loop_a$"), None);
    }

    #[test]
    fn resolve_is_idempotent() {
        let t = table();
        for token in ["$title$", "$alias$", "plain", "$nope$", "$loop_a$", ""] {
            let once = t.resolve(token);
            let twice = once.and_then(|v| t.resolve(v));
            assert_eq!(once, twice, "token {token:?}");
        }
    }

    #[test]
    fn empty_table_misses_every_marker() {
        let t = Localization::empty();
        assert_eq!(t.resolve("$title$"), None);
        assert_eq!(t.resolve("title"), Some("title"));
    }

    #[test]
    fn resolve_value_passes_non_strings_through() {
        let t = table();
        assert_eq!(t.resolve_value(&Value::from(3)), Some(Value::from(3)));
        assert_eq!(t.resolve_value(&Value::from("$title$")), Some(Value::from("Bonjour")));
        assert_eq!(t.resolve_value(&Value::from("$nope$")), None);
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn none_path_is_empty_table() {
        let t = Localization::load(None).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.name(), None);
    }

    #[test]
    fn missing_named_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Localization::load(Some(&dir.path().join("de.toml"))).unwrap_err();
        assert!(matches!(err, DocError::ResourceNotFound { .. }));
    }

    #[test]
    fn loads_flat_toml_and_names_after_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.toml");
        std::fs::write(&path, "title = \"Hello\"\ncount = 3\nflag = true\n").unwrap();
        let t = Localization::load(Some(&path)).unwrap();
        assert_eq!(t.name(), Some("en"));
        assert_eq!(t.get("title"), Some("Hello"));
        assert_eq!(t.get("count"), Some("3"));
        assert_eq!(t.get("flag"), Some("true"));
    }

    #[test]
    fn nested_values_are_rejected() {
        let doc: Value = serde_json::json!({ "menu": { "file": "File" } });
        let err = Localization::from_value(None, &doc).unwrap_err();
        assert!(matches!(err, DocError::InvalidField { field: "localization", .. }));
    }
}

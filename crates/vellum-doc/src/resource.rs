//! Reading documents from disk into the generic [`Value`] tree.
//!
//! Interface and localization documents are plain TOML or JSON files; the
//! format is picked from the file extension. Everything above this module
//! works on [`Value`] and never sees the concrete syntax.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{DocError, Result};

/// Extensions probed by [`locate`], in order of preference.
pub const EXTENSIONS: &[&str] = &["toml", "json"];

// ── Format ────────────────────────────────────────────────────────────────

/// Concrete syntax of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Guess the format from a path's extension. Unknown extensions are TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Parse document text into a [`Value`] tree.
///
/// The error is the parser's message; callers attach the path.
pub fn parse_str(text: &str, format: Format) -> std::result::Result<Value, String> {
    match format {
        Format::Toml => toml::from_str::<Value>(text).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
    }
}

/// Read and parse the document at `path`.
///
/// A missing file is [`DocError::ResourceNotFound`]; unreadable or
/// malformed content is [`DocError::Document`].
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(DocError::ResourceNotFound { path: path.to_path_buf() });
    }
    let text = fs::read_to_string(path).map_err(|e| DocError::Document {
        path:    path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_str(&text, Format::from_path(path)).map_err(|message| DocError::Document {
        path: path.to_path_buf(),
        message,
    })
}

/// Find `<dir>/<name>.<ext>` for the first extension in [`EXTENSIONS`] that
/// exists on disk.
///
/// When nothing matches, the error names the preferred (`.toml`) path.
pub fn locate(dir: &Path, name: &str) -> Result<PathBuf> {
    for ext in EXTENSIONS {
        let candidate = dir.join(format!("{name}.{ext}"));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(DocError::ResourceNotFound { path: dir.join(format!("{name}.{}", EXTENSIONS[0])) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("a/main.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a/main.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a/main.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("a/main")), Format::Toml);
    }

    #[test]
    fn toml_and_json_yield_the_same_tree() {
        let a = parse_str("title = \"Hi\"\nsize = \"10, 20\"", Format::Toml).unwrap();
        let b = parse_str(r#"{"title": "Hi", "size": "10, 20"}"#, Format::Json).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_text_reports_parser_message() {
        let err = parse_str("title = ", Format::Toml).unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, DocError::ResourceNotFound { .. }));
    }

    #[test]
    fn locate_prefers_toml_then_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.json"), "{}").unwrap();
        assert_eq!(locate(dir.path(), "main").unwrap(), dir.path().join("main.json"));

        fs::write(dir.path().join("main.toml"), "").unwrap();
        assert_eq!(locate(dir.path(), "main").unwrap(), dir.path().join("main.toml"));

        let err = locate(dir.path(), "other").unwrap_err();
        assert_eq!(err, DocError::ResourceNotFound { path: dir.path().join("other.toml") });
    }

    #[test]
    fn unreadable_document_is_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, DocError::Document { path: p, .. } if p == path));
    }
}

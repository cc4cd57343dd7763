//! Interface descriptors: a whole window's declaration in canonical form.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{DocError, Result};
use crate::localization::{Localization, resolve_with};
use crate::resource::load_document;
use crate::widget::{EventBinding, WidgetDescriptor, event_tokens};

pub const DEFAULT_TITLE: &str = "Untitled";

/// Pseudo-event listing the scripts to run once the window is built.
pub const LOAD_EVENT: &str = "load";

// ── Size ──────────────────────────────────────────────────────────────────

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width:  u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(200, 200)
    }
}

impl FromStr for Size {
    type Err = DocError;

    /// `"W, H"` or `"WxH"`, whitespace-tolerant.
    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once(',')
            .or_else(|| s.split_once(['x', 'X']))
            .ok_or_else(|| DocError::invalid_field("size", format!("expected \"W, H\", got {s:?}")))?;
        let dim = |t: &str| {
            t.trim()
                .parse::<u32>()
                .map_err(|_| DocError::invalid_field("size", format!("`{}` is not a pixel count", t.trim())))
        };
        Ok(Size::new(dim(w)?, dim(h)?))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ── Placement ─────────────────────────────────────────────────────────────

/// Where a window opens on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Left to the toolkit.
    #[default]
    Automatic,
    /// Centered on the primary display when the window opens.
    Centered,
    /// Fixed top-left corner.
    Explicit { x: i32, y: i32 },
}

impl FromStr for Placement {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("center") || t.eq_ignore_ascii_case("centered") {
            return Ok(Placement::Centered);
        }
        if t.is_empty() || t.eq_ignore_ascii_case("auto") {
            return Ok(Placement::Automatic);
        }
        let (x, y) = t
            .split_once(',')
            .ok_or_else(|| DocError::invalid_field("pos", format!("expected \"center\", \"auto\" or \"x, y\", got {s:?}")))?;
        let coord = |c: &str| {
            c.trim()
                .parse::<i32>()
                .map_err(|_| DocError::invalid_field("pos", format!("`{}` is not a coordinate", c.trim())))
        };
        Ok(Placement::Explicit { x: coord(x)?, y: coord(y)? })
    }
}

// ── InterfaceDescriptor ───────────────────────────────────────────────────

/// One window's parsed, localized, validated declaration.
///
/// Immutable once built. The source document is kept so the same
/// declaration can be re-derived against another localization table,
/// which is how language switching works.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDescriptor {
    pub title:        String,
    pub icon:         Option<PathBuf>,
    pub size:         Size,
    pub placement:    Placement,
    /// Scripts run in order right after the window is built.
    pub load_scripts: Vec<String>,
    /// Top-level `(event, script)` bindings.
    pub events:       Vec<EventBinding>,
    pub widgets:      Vec<WidgetDescriptor>,
    language:         Localization,
    source:           Arc<Value>,
}

impl InterfaceDescriptor {
    /// Parse a window document, resolving text through `table`.
    pub fn parse(source: impl Into<Arc<Value>>, table: Option<&Localization>) -> Result<Self> {
        let source = source.into();
        let Value::Object(doc) = source.as_ref() else {
            return Err(DocError::invalid_field("interface", "expected a map at the top level"));
        };

        let title = match doc.get("title") {
            None | Some(Value::Null) => DEFAULT_TITLE.to_string(),
            Some(Value::String(t)) => resolve_with(table, t).unwrap_or(DEFAULT_TITLE).to_string(),
            Some(_) => return Err(DocError::invalid_field("title", "must be a string")),
        };

        let icon = match doc.get("icon") {
            None | Some(Value::Null) => None,
            Some(Value::String(p)) => resolve_with(table, p).filter(|p| !p.is_empty()).map(PathBuf::from),
            Some(_) => return Err(DocError::invalid_field("icon", "must be a path")),
        };

        let size = match doc.get("size") {
            None | Some(Value::Null) => Size::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(Value::Array(pair)) => match pair.as_slice() {
                [w, h] => Size::new(pixels(w)?, pixels(h)?),
                _ => return Err(DocError::invalid_field("size", "expected two numbers")),
            },
            Some(other) => return Err(DocError::invalid_field("size", format!("unexpected value {other}"))),
        };

        let placement = match doc.get("pos") {
            None | Some(Value::Null) => Placement::Automatic,
            Some(Value::String(s)) => s.parse()?,
            Some(other) => return Err(DocError::invalid_field("pos", format!("unexpected value {other}"))),
        };

        let (load_scripts, events) = match doc.get("events") {
            None | Some(Value::Null) => (Vec::new(), Vec::new()),
            Some(v) => parse_top_level_events(v)?,
        };

        let widgets = match doc.get("widgets") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(index, raw)| WidgetDescriptor::parse(index, raw, table))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(DocError::invalid_field("widgets", "must be a sequence")),
        };

        Ok(Self {
            title,
            icon,
            size,
            placement,
            load_scripts,
            events,
            widgets,
            language: table.cloned().unwrap_or_default(),
            source,
        })
    }

    /// Load and parse a window document from disk.
    pub fn load(path: &Path, table: Option<&Localization>) -> Result<Self> {
        let doc = load_document(path)?;
        Self::parse(doc, table)
    }

    /// Re-derive this declaration from its source document with another
    /// table. The result is independent of `self`.
    pub fn reparse(&self, table: Option<&Localization>) -> Result<Self> {
        Self::parse(Arc::clone(&self.source), table)
    }

    /// The table this descriptor was resolved against (empty if none).
    pub fn language(&self) -> &Localization {
        &self.language
    }

    pub fn source(&self) -> &Value {
        &self.source
    }
}

fn pixels(v: &Value) -> Result<u32> {
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| DocError::invalid_field("size", format!("`{v}` is not a pixel count")))
}

/// Split top-level `events` into the `load` scripts and real bindings.
fn parse_top_level_events(value: &Value) -> Result<(Vec<String>, Vec<EventBinding>)> {
    let Value::Array(entries) = value else {
        return Err(DocError::invalid_event(value.to_string(), "`events` must be a sequence"));
    };
    let mut load = Vec::new();
    let mut bindings = Vec::new();
    for entry in entries {
        let tokens = event_tokens(entry)?;
        match tokens.split_first() {
            Some((event, scripts)) if event == LOAD_EVENT => load.extend(scripts.iter().cloned()),
            Some((event, [script])) => bindings.push(EventBinding::new(event, script)),
            _ => return Err(DocError::invalid_event(entry.to_string(), "expected `event script`")),
        }
    }
    Ok((load, bindings))
}

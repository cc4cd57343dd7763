//! Widget descriptors: one widget's declared attributes, normalized into a
//! toolkit-agnostic record.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{DocError, Result};
use crate::localization::{Localization, resolve_with};
use crate::position::Position;

/// Event a text-entry widget's `action` shorthand binds to.
pub const SUBMIT_EVENT: &str = "<Return>";

/// Keys consumed by the descriptor; everything else is toolkit passthrough.
const RESERVED: &[&str] = &["type", "pos", "disabled", "events", "action", "tag"];

// ── WidgetKind ────────────────────────────────────────────────────────────

/// Case-normalized widget type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Button,
    Entry,
    /// Multi-line text area (`text`, `textarea`).
    Text,
    Label,
    /// `checkbox`, `checkbutton`.
    Checkbox,
    /// `slider`, `scale`.
    Slider,
    /// Anything else, lowercased. Left for the toolkit to accept or reject.
    Other(String),
}

impl WidgetKind {
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "button"                  => WidgetKind::Button,
            "entry"                   => WidgetKind::Entry,
            "text" | "textarea"       => WidgetKind::Text,
            "label"                   => WidgetKind::Label,
            "checkbox" | "checkbutton" => WidgetKind::Checkbox,
            "slider" | "scale"        => WidgetKind::Slider,
            _                         => WidgetKind::Other(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            WidgetKind::Button   => "button",
            WidgetKind::Entry    => "entry",
            WidgetKind::Text     => "text",
            WidgetKind::Label    => "label",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Slider   => "slider",
            WidgetKind::Other(n) => n,
        }
    }

    /// The capability table: which value cell a type carries and how its
    /// `action` shorthand binds.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            WidgetKind::Button   => Capabilities::new(None, Some(ActionKind::Activate)),
            WidgetKind::Entry    => Capabilities::new(Some(CellKind::Text), Some(ActionKind::Submit)),
            WidgetKind::Text     => Capabilities::new(Some(CellKind::Text), Some(ActionKind::Submit)),
            WidgetKind::Label    => Capabilities::new(Some(CellKind::Text), None),
            WidgetKind::Checkbox => Capabilities::new(Some(CellKind::Bool), None),
            WidgetKind::Slider   => Capabilities::new(Some(CellKind::Number), Some(ActionKind::Activate)),
            WidgetKind::Other(_) => Capabilities::new(None, None),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Capabilities ──────────────────────────────────────────────────────────

/// Kind of observable value a widget exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Text,
    Bool,
    Number,
}

/// How the `action` shorthand binds for a widget type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Direct activation handler (button press, slider move).
    Activate,
    /// Implicit binding of [`SUBMIT_EVENT`].
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub cell:   Option<CellKind>,
    pub action: Option<ActionKind>,
}

impl Capabilities {
    const fn new(cell: Option<CellKind>, action: Option<ActionKind>) -> Self {
        Self { cell, action }
    }

    pub fn has_text_cell(&self) -> bool {
        self.cell == Some(CellKind::Text)
    }
}

// ── CellValue ─────────────────────────────────────────────────────────────

/// Contents of a widget's value cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Bool(bool),
    Number(f64),
}

impl CellValue {
    /// The empty value for a cell kind: `""`, `false` or `0`.
    pub fn empty(kind: CellKind) -> Self {
        match kind {
            CellKind::Text   => CellValue::Text(String::new()),
            CellKind::Bool   => CellValue::Bool(false),
            CellKind::Number => CellValue::Number(0.0),
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Text(_)   => CellKind::Text,
            CellValue::Bool(_)   => CellKind::Bool,
            CellValue::Number(_) => CellKind::Number,
        }
    }

    /// Convert to `kind`, if the value has a sensible reading as that kind.
    pub fn coerce(self, kind: CellKind) -> Option<Self> {
        match (self, kind) {
            (CellValue::Number(n), _) if !n.is_finite() => None,
            (v, k) if v.kind() == k => Some(v),
            (v, CellKind::Text) => Some(CellValue::Text(v.to_string())),
            (CellValue::Text(s), CellKind::Bool) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on"  => Some(CellValue::Bool(true)),
                "false" | "0" | "no" | "off" | "" => Some(CellValue::Bool(false)),
                _ => None,
            },
            (CellValue::Number(n), CellKind::Bool) => Some(CellValue::Bool(n != 0.0)),
            (CellValue::Text(s), CellKind::Number) => {
                s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).map(CellValue::Number)
            }
            (CellValue::Bool(b), CellKind::Number) => Some(CellValue::Number(if b { 1.0 } else { 0.0 })),
            _ => None,
        }
    }

    /// Read a document scalar as a cell value of `kind`.
    pub fn from_value(value: &Value, kind: CellKind) -> Option<Self> {
        let raw = match value {
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Bool(b)   => CellValue::Bool(*b),
            Value::Number(n) => CellValue::Number(n.as_f64()?),
            _ => return None,
        };
        raw.coerce(kind)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s)   => f.write_str(s),
            CellValue::Bool(b)   => write!(f, "{b}"),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self { CellValue::Text(s.to_string()) }
}
impl From<String> for CellValue {
    fn from(s: String) -> Self { CellValue::Text(s) }
}
impl From<bool> for CellValue {
    fn from(b: bool) -> Self { CellValue::Bool(b) }
}
impl From<f64> for CellValue {
    fn from(n: f64) -> Self { CellValue::Number(n) }
}

// ── EventBinding ──────────────────────────────────────────────────────────

/// A low-level `(event, handler)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    pub event:   String,
    pub handler: String,
}

impl EventBinding {
    pub fn new(event: impl Into<String>, handler: impl Into<String>) -> Self {
        Self { event: event.into(), handler: handler.into() }
    }
}

/// Split one `events` entry into its tokens.
///
/// Accepts `"event handler ..."`, `["event", "handler", ...]` and
/// `{ event = "...", handler = "..." }` (`command` and `script` are
/// accepted in place of `handler`).
pub(crate) fn event_tokens(entry: &Value) -> Result<Vec<String>> {
    match entry {
        Value::String(s) => Ok(s.split_whitespace().map(str::to_string).collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(DocError::invalid_event(entry.to_string(), format!("unexpected element {other}"))),
            })
            .collect(),
        Value::Object(map) => {
            let event = map.get("event").and_then(Value::as_str);
            let handler = ["handler", "command", "script"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str));
            match (event, handler) {
                (Some(e), Some(h)) => Ok(vec![e.to_string(), h.to_string()]),
                _ => Err(DocError::invalid_event(entry.to_string(), "expected `event` and `handler` keys")),
            }
        }
        other => Err(DocError::invalid_event(other.to_string(), "expected a string, sequence or map")),
    }
}

fn parse_events(value: &Value) -> Result<Vec<EventBinding>> {
    let Value::Array(entries) = value else {
        return Err(DocError::invalid_event(value.to_string(), "`events` must be a sequence"));
    };
    entries
        .iter()
        .map(|entry| match event_tokens(entry)?.as_slice() {
            [event, handler] => Ok(EventBinding::new(event, handler)),
            _ => Err(DocError::invalid_event(entry.to_string(), "expected `event handler`")),
        })
        .collect()
}

// ── WidgetDescriptor ──────────────────────────────────────────────────────

/// Canonical, validated description of one widget.
///
/// Malformed data fails at construction; a descriptor that exists is
/// always instantiable as far as the document layer can tell.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDescriptor {
    /// 0-based ordinal within the interface's widget list.
    pub index:      usize,
    pub kind:       WidgetKind,
    pub position:   Position,
    /// Localized `text`, if one was declared and resolved.
    pub content:    Option<String>,
    /// Seed for the widget's value cell, for types that carry one.
    pub cell:       Option<CellValue>,
    pub enabled:    bool,
    pub events:     Vec<EventBinding>,
    pub action:     Option<String>,
    pub tag:        Option<String>,
    /// Remaining attributes, handed to the toolkit verbatim.
    pub attributes: Map<String, Value>,
}

impl WidgetDescriptor {
    /// Build a descriptor from one entry of an interface's `widgets` list.
    pub fn parse(index: usize, raw: &Value, table: Option<&Localization>) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(DocError::invalid_widget(index, "widget entry must be a map"));
        };
        let kind = match map.get("type") {
            Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
            Some(_) => return Err(DocError::invalid_widget(index, "`type` must be a non-empty string")),
            None => return Err(DocError::invalid_widget(index, "missing `type`")),
        };
        let mut attributes = map.clone();
        attributes.remove("type");
        Self::from_attributes(index, &kind, attributes, table)
    }

    /// Build a descriptor from a type name and an attribute bag.
    ///
    /// This is the path used for widgets created at runtime.
    pub fn from_attributes(
        index: usize,
        kind: &str,
        mut attributes: Map<String, Value>,
        table: Option<&Localization>,
    ) -> Result<Self> {
        // 1. type
        let kind = WidgetKind::parse(kind);
        let caps = kind.capabilities();

        // 2. text → localized content; text-bearing types keep it in their cell only
        let content = match attributes.get("text") {
            None => None,
            Some(Value::String(s)) => resolve_with(table, s).map(str::to_string),
            Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(_) => return Err(DocError::invalid_widget(index, "`text` must be a string")),
        };
        if caps.has_text_cell() || content.is_none() {
            attributes.remove("text");
        } else if let Some(text) = &content {
            attributes.insert("text".to_string(), Value::String(text.clone()));
        }

        // 3. value cells
        let cell = match caps.cell {
            None => None,
            Some(kind @ CellKind::Text) => Some(content.clone().map(CellValue::Text).unwrap_or_else(|| CellValue::empty(kind))),
            Some(kind) => match attributes.remove("value") {
                None => Some(CellValue::empty(kind)),
                Some(v) => Some(CellValue::from_value(&v, kind).ok_or_else(|| {
                    DocError::invalid_widget(index, format!("`value` {v} does not fit a {kind:?} cell"))
                })?),
            },
        };

        // 4. disabled
        let enabled = match attributes.get("disabled") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => !b,
            Some(_) => return Err(DocError::invalid_widget(index, "`disabled` must be a boolean")),
        };

        // 5. position
        let position = match attributes.get("pos") {
            None => Position::default(),
            Some(v) => Position::from_value(v).map_err(|reason| DocError::invalid_widget(index, reason))?,
        };

        // 6. events
        let events = match attributes.get("events") {
            None | Some(Value::Null) => Vec::new(),
            Some(v) => parse_events(v)?,
        };

        // 7. action
        let action = match attributes.get("action") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => {
                if caps.action.is_none() {
                    return Err(DocError::invalid_widget(
                        index,
                        format!("`{kind}` widgets do not support `action`"),
                    ));
                }
                Some(name.clone())
            }
            Some(_) => return Err(DocError::invalid_widget(index, "`action` must be a handler name")),
        };

        // 8. tag
        let tag = match attributes.get("tag") {
            None | Some(Value::Null) => None,
            Some(Value::String(t)) if !t.is_empty() => Some(t.clone()),
            Some(_) => return Err(DocError::invalid_widget(index, "`tag` must be a non-empty string")),
        };

        for key in RESERVED {
            attributes.remove(*key);
        }

        Ok(Self { index, kind, position, content, cell, enabled, events, action, tag, attributes })
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    /// How the `action` shorthand binds, if one is declared.
    pub fn action_binding(&self) -> Option<(ActionKind, &str)> {
        let name = self.action.as_deref()?;
        self.capabilities().action.map(|kind| (kind, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Side;
    use serde_json::json;

    fn parse(raw: Value) -> Result<WidgetDescriptor> {
        WidgetDescriptor::parse(0, &raw, None)
    }

    fn fr() -> Localization {
        Localization::from_pairs(Some("fr"), [("ok", "Valider"), ("hint", "Tapez ici")])
    }

    // ── kinds ─────────────────────────────────────────────────────────────

    #[test]
    fn kind_is_case_folded_with_aliases() {
        assert_eq!(WidgetKind::parse("BUTTON"), WidgetKind::Button);
        assert_eq!(WidgetKind::parse(" Entry "), WidgetKind::Entry);
        assert_eq!(WidgetKind::parse("TextArea"), WidgetKind::Text);
        assert_eq!(WidgetKind::parse("CheckButton"), WidgetKind::Checkbox);
        assert_eq!(WidgetKind::parse("Scale"), WidgetKind::Slider);
        assert_eq!(WidgetKind::parse("Frame"), WidgetKind::Other("frame".into()));
    }

    #[test]
    fn capability_table() {
        use WidgetKind::*;
        assert_eq!(Button.capabilities().cell, None);
        assert_eq!(Button.capabilities().action, Some(ActionKind::Activate));
        assert_eq!(Entry.capabilities().cell, Some(CellKind::Text));
        assert_eq!(Entry.capabilities().action, Some(ActionKind::Submit));
        assert_eq!(Label.capabilities().action, None);
        assert_eq!(Checkbox.capabilities().cell, Some(CellKind::Bool));
        assert_eq!(Slider.capabilities().cell, Some(CellKind::Number));
        assert_eq!(Slider.capabilities().action, Some(ActionKind::Activate));
        assert_eq!(Other("frame".into()).capabilities(), Capabilities { cell: None, action: None });
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn missing_type_names_the_ordinal() {
        let err = WidgetDescriptor::parse(2, &json!({ "text": "x" }), None).unwrap_err();
        assert_eq!(err.widget_index(), Some(2));
        assert!(err.to_string().contains("missing `type`"));
    }

    #[test]
    fn non_map_entry_is_invalid() {
        let err = WidgetDescriptor::parse(1, &json!("button"), None).unwrap_err();
        assert_eq!(err.widget_index(), Some(1));
    }

    #[test]
    fn defaults() {
        let w = parse(json!({ "type": "button" })).unwrap();
        assert_eq!(w.position, Position::Sequential { side: Side::Top });
        assert!(w.enabled);
        assert!(w.events.is_empty());
        assert_eq!(w.action, None);
        assert_eq!(w.tag, None);
        assert_eq!(w.content, None);
        assert_eq!(w.cell, None);
        assert!(w.attributes.is_empty());
    }

    #[test]
    fn text_bearing_types_move_text_into_the_cell() {
        let raw = json!({ "type": "entry", "text": "$hint$", "width": 30 });
        let w = WidgetDescriptor::parse(0, &raw, Some(&fr())).unwrap();
        assert_eq!(w.content.as_deref(), Some("Tapez ici"));
        assert_eq!(w.cell, Some(CellValue::Text("Tapez ici".into())));
        assert!(!w.attributes.contains_key("text"));
        assert_eq!(w.attributes.get("width"), Some(&json!(30)));
    }

    #[test]
    fn other_types_keep_localized_text_as_attribute() {
        let raw = json!({ "type": "button", "text": "$ok$" });
        let w = WidgetDescriptor::parse(0, &raw, Some(&fr())).unwrap();
        assert_eq!(w.content.as_deref(), Some("Valider"));
        assert_eq!(w.attributes.get("text"), Some(&json!("Valider")));
    }

    #[test]
    fn missing_translation_leaves_empty_cell() {
        let raw = json!({ "type": "label", "text": "$absent$" });
        let w = WidgetDescriptor::parse(0, &raw, Some(&fr())).unwrap();
        assert_eq!(w.content, None);
        assert_eq!(w.cell, Some(CellValue::Text(String::new())));
    }

    #[test]
    fn boolean_and_numeric_cells() {
        let c = parse(json!({ "type": "checkbox" })).unwrap();
        assert_eq!(c.cell, Some(CellValue::Bool(false)));
        let c = parse(json!({ "type": "checkbox", "value": true })).unwrap();
        assert_eq!(c.cell, Some(CellValue::Bool(true)));
        assert!(!c.attributes.contains_key("value"));
        let s = parse(json!({ "type": "slider", "value": 4, "from": 0, "to": 10 })).unwrap();
        assert_eq!(s.cell, Some(CellValue::Number(4.0)));
        assert_eq!(s.attributes.len(), 2);
        parse(json!({ "type": "checkbox", "value": "maybe" })).unwrap_err();
    }

    #[test]
    fn disabled_flag() {
        assert!(!parse(json!({ "type": "button", "disabled": true })).unwrap().enabled);
        assert!(parse(json!({ "type": "button", "disabled": false })).unwrap().enabled);
        parse(json!({ "type": "button", "disabled": "yes" })).unwrap_err();
    }

    #[test]
    fn bad_position_is_invalid_widget() {
        let err = WidgetDescriptor::parse(3, &json!({ "type": "label", "pos": "sequential middle" }), None)
            .unwrap_err();
        assert_eq!(err.widget_index(), Some(3));
        let err = WidgetDescriptor::parse(4, &json!({ "type": "label", "pos": "orbit 1 2" }), None).unwrap_err();
        assert_eq!(err.widget_index(), Some(4));
    }

    #[test]
    fn position_forms() {
        let w = parse(json!({ "type": "label", "pos": "grid 1 2" })).unwrap();
        assert_eq!(w.position, Position::Grid { row: 1, column: 2 });
        let w = parse(json!({ "type": "label", "pos": ["absolute", 5, 6] })).unwrap();
        assert_eq!(w.position, Position::Absolute { x: 5.0, y: 6.0 });
    }

    #[test]
    fn events_are_copied_in_order() {
        let raw = json!({
            "type": "entry",
            "events": ["<FocusIn> focused", ["<Key>", "typed"], { "event": "<Escape>", "command": "cancel" }],
        });
        let w = parse(raw).unwrap();
        assert_eq!(
            w.events,
            vec![
                EventBinding::new("<FocusIn>", "focused"),
                EventBinding::new("<Key>", "typed"),
                EventBinding::new("<Escape>", "cancel"),
            ]
        );
    }

    #[test]
    fn malformed_event_entry() {
        let err = parse(json!({ "type": "entry", "events": ["<Return>"] })).unwrap_err();
        assert!(matches!(err, DocError::InvalidEvent { .. }));
        parse(json!({ "type": "entry", "events": "<Return> go" })).unwrap_err();
    }

    #[test]
    fn action_shorthand_per_type() {
        let b = parse(json!({ "type": "button", "action": "save" })).unwrap();
        assert_eq!(b.action_binding(), Some((ActionKind::Activate, "save")));
        let e = parse(json!({ "type": "entry", "action": "submit", "events": ["<Key> typed"] })).unwrap();
        assert_eq!(e.action_binding(), Some((ActionKind::Submit, "submit")));
        assert_eq!(e.events.len(), 1);
        let err = parse(json!({ "type": "label", "action": "nope" })).unwrap_err();
        assert_eq!(err.widget_index(), Some(0));
    }

    #[test]
    fn tag_and_passthrough() {
        let w = parse(json!({ "type": "label", "tag": "result", "bg": "red", "fg": "white" })).unwrap();
        assert_eq!(w.tag.as_deref(), Some("result"));
        assert_eq!(w.attributes.len(), 2);
        parse(json!({ "type": "label", "tag": 3 })).unwrap_err();
    }

    #[test]
    fn runtime_construction_uses_the_same_rules() {
        let mut attrs = Map::new();
        attrs.insert("text".into(), json!("hi"));
        attrs.insert("pos".into(), json!("grid 0 0"));
        let w = WidgetDescriptor::from_attributes(7, "Label", attrs, None).unwrap();
        assert_eq!(w.index, 7);
        assert_eq!(w.kind, WidgetKind::Label);
        assert_eq!(w.cell, Some(CellValue::Text("hi".into())));
    }

    // ── CellValue ─────────────────────────────────────────────────────────

    #[test]
    fn cell_value_coercion() {
        assert_eq!(CellValue::from("on").coerce(CellKind::Bool), Some(CellValue::Bool(true)));
        assert_eq!(CellValue::from("2.5").coerce(CellKind::Number), Some(CellValue::Number(2.5)));
        assert_eq!(CellValue::from(true).coerce(CellKind::Text), Some(CellValue::Text("true".into())));
        assert_eq!(CellValue::from("x").coerce(CellKind::Number), None);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert_eq!(CellValue::from("nan").coerce(CellKind::Number), None);
        assert_eq!(CellValue::from("-inf").coerce(CellKind::Number), None);
        assert_eq!(CellValue::Number(f64::NAN).coerce(CellKind::Number), None);
        assert_eq!(CellValue::Number(f64::INFINITY).coerce(CellKind::Text), None);
    }
}

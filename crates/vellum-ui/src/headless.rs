//! An in-memory [`Toolkit`].
//!
//! Keeps native windows and widgets in plain maps and turns scripted
//! [`Input`]s into [`NativeEvent`]s the way a real backend turns user
//! activity into events. Tests inspect its state directly; the console
//! runner feeds it lines from stdin.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use vellum_doc::{CellValue, Map, Position, Size, Value, WidgetKind};

use crate::toolkit::{
    BindingId, DialogAnswer, DialogKind, IconSource, NativeEvent, NativeHandle, Toolkit, ToolkitError,
    Trigger, WidgetRequest,
};

/// Binding key used for [`Trigger::Activate`].
pub const ACTIVATE: &str = "<Activate>";

/// Container widget types accepted without registration.
const BUILTIN_OTHER_KINDS: &[&str] = &["frame"];

const BUNDLED_ICON_SIZE: u32 = 16;

// ── scripted input ────────────────────────────────────────────────────────

/// Addresses a native window or widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Handle(NativeHandle),
    /// The most recently created live widget with this native name.
    Name(String),
}

impl From<NativeHandle> for Target {
    fn from(handle: NativeHandle) -> Self {
        Target::Handle(handle)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

/// One piece of simulated user activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Replace a widget's value as if the user had typed it.
    Type { target: Target, text: String },
    /// Raise a named event (`<Return>`, `<FocusIn>`, ...) on a widget or
    /// window.
    Fire { target: Target, event: String },
    /// Press a button or release a slider.
    Activate { target: Target },
    /// Ask to close a window; `None` means the root window.
    Close { window: Option<NativeHandle> },
    /// Log the current window and widget tree.
    Dump,
}

// ── native state ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstalledIcon {
    File { path: PathBuf, width: u32, height: u32 },
    Bundled { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NativeWindow {
    pub parent: Option<NativeHandle>,
    pub title:  String,
    pub size:   Size,
    pub origin: Option<(i32, i32)>,
    pub icon:   Option<InstalledIcon>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NativeWidget {
    pub window:     NativeHandle,
    pub kind:       WidgetKind,
    pub name:       Option<String>,
    pub attributes: Map<String, Value>,
    pub value:      Option<CellValue>,
    pub enabled:    bool,
    pub position:   Option<Position>,
}

/// A dialog the toolkit was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownDialog {
    pub kind:    DialogKind,
    pub title:   String,
    pub message: String,
}

// ── HeadlessToolkit ───────────────────────────────────────────────────────

pub struct HeadlessToolkit {
    next_handle:   u64,
    windows:       BTreeMap<NativeHandle, NativeWindow>,
    widgets:       BTreeMap<NativeHandle, NativeWidget>,
    bindings:      HashMap<(NativeHandle, String), BindingId>,
    pending:       VecDeque<NativeEvent>,
    inputs:        VecDeque<Input>,
    source:        Option<Box<dyn Iterator<Item = Input>>>,
    extra_kinds:   HashSet<String>,
    rejected:      HashSet<String>,
    answers:       VecDeque<DialogAnswer>,
    dialogs:       Vec<ShownDialog>,
    focused:       Option<NativeHandle>,
    screen:        Size,
    value_writes:  usize,
    echo:          bool,
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self {
            next_handle:  0,
            windows:      BTreeMap::new(),
            widgets:      BTreeMap::new(),
            bindings:     HashMap::new(),
            pending:      VecDeque::new(),
            inputs:       VecDeque::new(),
            source:       None,
            extra_kinds:  HashSet::new(),
            rejected:     HashSet::new(),
            answers:      VecDeque::new(),
            dialogs:      Vec::new(),
            focused:      None,
            screen:       Size::new(1920, 1080),
            value_writes: 0,
            echo:         false,
        }
    }

    // ── configuration ─────────────────────────────────────────────────────

    pub fn with_screen(mut self, screen: Size) -> Self {
        self.screen = screen;
        self
    }

    /// Log every value, attribute and title change at info level.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Accept an extra non-standard widget type.
    pub fn accept_kind(&mut self, name: &str) {
        self.extra_kinds.insert(name.to_lowercase());
    }

    /// Refuse an attribute key, as a toolkit that does not know it would.
    pub fn reject_attribute(&mut self, key: &str) {
        self.rejected.insert(key.to_string());
    }

    /// Queue one input; queued inputs are consumed before the feed.
    pub fn push(&mut self, input: Input) {
        self.inputs.push_back(input);
    }

    /// Read further inputs lazily from `source` once the queue is empty.
    pub fn feed(&mut self, source: impl Iterator<Item = Input> + 'static) {
        self.source = Some(Box::new(source));
    }

    /// Queue the answer for the next question dialog.
    pub fn answer(&mut self, answer: DialogAnswer) {
        self.answers.push_back(answer);
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn window(&self, handle: NativeHandle) -> Option<&NativeWindow> {
        self.windows.get(&handle)
    }

    pub fn widget(&self, handle: NativeHandle) -> Option<&NativeWidget> {
        self.widgets.get(&handle)
    }

    /// The most recently created live widget named `name`.
    pub fn find(&self, name: &str) -> Option<(NativeHandle, &NativeWidget)> {
        self.widgets
            .iter()
            .rev()
            .find(|(_, w)| w.name.as_deref() == Some(name))
            .map(|(h, w)| (*h, w))
    }

    /// Live widgets of `window`, in creation order.
    pub fn children(&self, window: NativeHandle) -> Vec<(NativeHandle, &NativeWidget)> {
        self.widgets.iter().filter(|(_, w)| w.window == window).map(|(h, w)| (*h, w)).collect()
    }

    /// Events bound on `handle`, sorted.
    pub fn bound_events(&self, handle: NativeHandle) -> Vec<&str> {
        let mut events: Vec<&str> = self
            .bindings
            .keys()
            .filter(|(h, _)| *h == handle)
            .map(|(_, e)| e.as_str())
            .collect();
        events.sort_unstable();
        events
    }

    pub fn focused(&self) -> Option<NativeHandle> {
        self.focused
    }

    pub fn dialogs(&self) -> &[ShownDialog] {
        &self.dialogs
    }

    /// Number of live native windows plus widgets.
    pub fn live_count(&self) -> usize {
        self.windows.len() + self.widgets.len()
    }

    /// How many times a widget value was actually changed by the runtime.
    pub fn value_writes(&self) -> usize {
        self.value_writes
    }

    /// Indented listing of every window and its widgets.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (handle, window) in &self.windows {
            let _ = writeln!(out, "{handle} window \"{}\" {}", window.title, window.size);
            for (child, widget) in self.children(*handle) {
                let _ = write!(out, "  {child} {}", widget.kind);
                if let Some(name) = &widget.name {
                    let _ = write!(out, " [{name}]");
                }
                if let Some(value) = &widget.value {
                    let _ = write!(out, " = {:?}", value.to_string());
                }
                for (key, value) in &widget.attributes {
                    let _ = write!(out, " {key}={value}");
                }
                if !widget.enabled {
                    out.push_str(" (disabled)");
                }
                out.push('\n');
            }
        }
        out
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn allocate(&mut self) -> NativeHandle {
        let handle = NativeHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn window_mut(&mut self, handle: NativeHandle) -> Result<&mut NativeWindow, ToolkitError> {
        self.windows.get_mut(&handle).ok_or(ToolkitError::UnknownHandle(handle))
    }

    fn widget_mut(&mut self, handle: NativeHandle) -> Result<&mut NativeWidget, ToolkitError> {
        self.widgets.get_mut(&handle).ok_or(ToolkitError::UnknownHandle(handle))
    }

    fn check_attribute(&self, key: &str, value: &Value) -> Result<(), ToolkitError> {
        let invalid = |reason: &str| ToolkitError::InvalidAttribute { key: key.to_string(), reason: reason.to_string() };
        if self.rejected.contains(key) {
            return Err(invalid("not supported by this toolkit"));
        }
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(()),
            _ => Err(invalid("expected a scalar")),
        }
    }

    fn accepts(&self, kind: &WidgetKind) -> bool {
        match kind {
            WidgetKind::Other(name) => BUILTIN_OTHER_KINDS.contains(&name.as_str()) || self.extra_kinds.contains(name),
            _ => true,
        }
    }

    fn resolve(&self, target: &Target) -> Option<NativeHandle> {
        match target {
            Target::Handle(h) if self.widgets.contains_key(h) || self.windows.contains_key(h) => Some(*h),
            Target::Handle(_) => None,
            Target::Name(name) => self.find(name).map(|(h, _)| h),
        }
    }

    fn root(&self) -> Option<NativeHandle> {
        self.windows.iter().find(|(_, w)| w.parent.is_none()).map(|(h, _)| *h)
    }

    fn fire(&mut self, handle: NativeHandle, event: &str) {
        match self.bindings.get(&(handle, event.to_string())) {
            Some(binding) => self.pending.push_back(NativeEvent::Fired { binding: *binding }),
            None => log::debug!("{handle}: nothing bound to {event}"),
        }
    }

    /// Translate one input into zero or more pending events.
    fn apply(&mut self, input: Input) {
        match input {
            Input::Type { target, text } => {
                let Some(handle) = self.resolve(&target) else {
                    log::warn!("type: no widget {target:?}");
                    return;
                };
                let Some(widget) = self.widgets.get_mut(&handle) else {
                    log::warn!("type: {handle} is not a widget");
                    return;
                };
                let Some(current) = &widget.value else {
                    log::warn!("type: {} widget {handle} holds no value", widget.kind);
                    return;
                };
                let Some(value) = CellValue::Text(text.clone()).coerce(current.kind()) else {
                    log::warn!("type: {text:?} does not fit {handle}");
                    return;
                };
                if widget.value.as_ref() != Some(&value) {
                    widget.value = Some(value.clone());
                    self.pending.push_back(NativeEvent::ValueChanged { widget: handle, value });
                }
            }
            Input::Fire { target, event } => match self.resolve(&target) {
                Some(handle) => self.fire(handle, &event),
                None => log::warn!("fire: no widget or window {target:?}"),
            },
            Input::Activate { target } => match self.resolve(&target) {
                Some(handle) => self.fire(handle, ACTIVATE),
                None => log::warn!("activate: no widget {target:?}"),
            },
            Input::Close { window } => match window.or_else(|| self.root()) {
                Some(window) if self.windows.contains_key(&window) => {
                    self.pending.push_back(NativeEvent::CloseRequested { window });
                }
                _ => log::warn!("close: no such window"),
            },
            Input::Dump => log::info!("\n{}", self.describe().trim_end()),
        }
    }

    fn bundled_icon() -> RgbaImage {
        RgbaImage::from_fn(BUNDLED_ICON_SIZE, BUNDLED_ICON_SIZE, |x, y| {
            if (x + y) % 2 == 0 { Rgba([0x3a, 0x5f, 0x8c, 0xff]) } else { Rgba([0xe8, 0xe4, 0xd8, 0xff]) }
        })
    }

    fn load_icon(path: &Path) -> Result<InstalledIcon, ToolkitError> {
        let image = image::open(path).map_err(|e| ToolkitError::Icon(format!("{}: {e}", path.display())))?;
        Ok(InstalledIcon::File { path: path.to_path_buf(), width: image.width(), height: image.height() })
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_window(&mut self, parent: Option<NativeHandle>) -> Result<NativeHandle, ToolkitError> {
        if let Some(parent) = parent {
            if !self.windows.contains_key(&parent) {
                return Err(ToolkitError::UnknownHandle(parent));
            }
        }
        let handle = self.allocate();
        self.windows.insert(
            handle,
            NativeWindow { parent, title: String::new(), size: Size::default(), origin: None, icon: None },
        );
        Ok(handle)
    }

    fn set_title(&mut self, window: NativeHandle, title: &str) -> Result<(), ToolkitError> {
        let echo = self.echo;
        self.window_mut(window)?.title = title.to_string();
        if echo {
            log::info!("{window} title = {title:?}");
        }
        Ok(())
    }

    fn set_geometry(
        &mut self,
        window: NativeHandle,
        size: Size,
        origin: Option<(i32, i32)>,
    ) -> Result<(), ToolkitError> {
        let native = self.window_mut(window)?;
        native.size = size;
        if origin.is_some() {
            native.origin = origin;
        }
        Ok(())
    }

    fn set_icon(&mut self, window: NativeHandle, icon: IconSource<'_>) -> Result<(), ToolkitError> {
        if !self.windows.contains_key(&window) {
            return Err(ToolkitError::UnknownHandle(window));
        }
        let installed = match icon {
            IconSource::File(path) => Self::load_icon(path)?,
            IconSource::Bundled => {
                let image = Self::bundled_icon();
                InstalledIcon::Bundled { width: image.width(), height: image.height() }
            }
        };
        self.window_mut(window)?.icon = Some(installed);
        Ok(())
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn create_widget(&mut self, request: WidgetRequest<'_>) -> Result<NativeHandle, ToolkitError> {
        if !self.windows.contains_key(&request.window) {
            return Err(ToolkitError::UnknownHandle(request.window));
        }
        if !self.accepts(request.kind) {
            return Err(ToolkitError::UnknownWidgetType(request.kind.to_string()));
        }
        for (key, value) in request.attributes {
            self.check_attribute(key, value)?;
        }
        let handle = self.allocate();
        self.widgets.insert(
            handle,
            NativeWidget {
                window:     request.window,
                kind:       request.kind.clone(),
                name:       request.name.map(str::to_string),
                attributes: request.attributes.clone(),
                value:      None,
                enabled:    true,
                position:   None,
            },
        );
        Ok(handle)
    }

    fn bind(&mut self, handle: NativeHandle, trigger: Trigger<'_>, binding: BindingId) -> Result<(), ToolkitError> {
        if !self.widgets.contains_key(&handle) && !self.windows.contains_key(&handle) {
            return Err(ToolkitError::UnknownHandle(handle));
        }
        let key = match trigger {
            Trigger::Activate => ACTIVATE,
            Trigger::Event(event) => {
                if event.is_empty() || event.chars().any(char::is_whitespace) {
                    return Err(ToolkitError::InvalidEvent(event.to_string()));
                }
                event
            }
        };
        self.bindings.insert((handle, key.to_string()), binding);
        Ok(())
    }

    fn set_attribute(&mut self, handle: NativeHandle, key: &str, value: &Value) -> Result<(), ToolkitError> {
        self.check_attribute(key, value)?;
        let echo = self.echo;
        let widget = self.widget_mut(handle)?;
        widget.attributes.insert(key.to_string(), value.clone());
        if echo {
            log::info!("{handle} {key} = {value}");
        }
        Ok(())
    }

    fn set_value(&mut self, handle: NativeHandle, value: &CellValue) -> Result<(), ToolkitError> {
        let echo = self.echo;
        let widget = self.widget_mut(handle)?;
        if widget.value.as_ref() == Some(value) {
            return Ok(());
        }
        widget.value = Some(value.clone());
        let name = widget.name.clone();
        self.value_writes += 1;
        if echo {
            log::info!("{handle} [{}] = {:?}", name.as_deref().unwrap_or("-"), value.to_string());
        }
        Ok(())
    }

    fn set_enabled(&mut self, handle: NativeHandle, enabled: bool) -> Result<(), ToolkitError> {
        self.widget_mut(handle)?.enabled = enabled;
        Ok(())
    }

    fn position(&mut self, handle: NativeHandle, position: &Position) -> Result<(), ToolkitError> {
        self.widget_mut(handle)?.position = Some(*position);
        Ok(())
    }

    fn focus(&mut self, handle: NativeHandle) -> Result<(), ToolkitError> {
        if !self.widgets.contains_key(&handle) {
            return Err(ToolkitError::UnknownHandle(handle));
        }
        self.focused = Some(handle);
        Ok(())
    }

    fn destroy(&mut self, handle: NativeHandle) {
        let mut gone = vec![handle];
        if self.windows.remove(&handle).is_some() {
            let orphans: Vec<NativeHandle> =
                self.widgets.iter().filter(|(_, w)| w.window == handle).map(|(h, _)| *h).collect();
            for orphan in &orphans {
                self.widgets.remove(orphan);
            }
            gone.extend(orphans);
        } else {
            self.widgets.remove(&handle);
        }
        self.bindings.retain(|(h, _), _| !gone.contains(h));
        if self.focused.is_some_and(|f| gone.contains(&f)) {
            self.focused = None;
        }
    }

    fn next_event(&mut self) -> Option<NativeEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let input = match self.inputs.pop_front() {
                Some(input) => input,
                None => self.source.as_mut()?.next()?,
            };
            self.apply(input);
        }
    }

    fn dialog(&mut self, kind: DialogKind, title: &str, message: &str) -> Option<DialogAnswer> {
        self.dialogs.push(ShownDialog { kind, title: title.to_string(), message: message.to_string() });
        let answer = self.answers.pop_front().unwrap_or(match kind {
            DialogKind::Error | DialogKind::Info | DialogKind::Warning | DialogKind::OkCancel => DialogAnswer::Ok,
            DialogKind::YesNo | DialogKind::YesNoCancel => DialogAnswer::Yes,
            DialogKind::RetryCancel => DialogAnswer::Retry,
        });
        Some(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => Map::new(),
        }
    }

    fn entry(tk: &mut HeadlessToolkit, window: NativeHandle, name: &str) -> NativeHandle {
        let empty = Map::new();
        let h = tk
            .create_widget(WidgetRequest { window, kind: &WidgetKind::Entry, name: Some(name), attributes: &empty })
            .unwrap();
        tk.set_value(h, &CellValue::from("")).unwrap();
        h
    }

    #[test]
    fn unknown_kinds_and_attributes_are_rejected() {
        let mut tk = HeadlessToolkit::new();
        let w = tk.create_window(None).unwrap();
        let empty = Map::new();
        let gizmo = WidgetKind::parse("gizmo");
        let err = tk
            .create_widget(WidgetRequest { window: w, kind: &gizmo, name: None, attributes: &empty })
            .unwrap_err();
        assert_eq!(err, ToolkitError::UnknownWidgetType("gizmo".into()));

        tk.accept_kind("gizmo");
        tk.create_widget(WidgetRequest { window: w, kind: &gizmo, name: None, attributes: &empty }).unwrap();

        let nested = attrs(json!({ "font": { "size": 3 } }));
        let err = tk
            .create_widget(WidgetRequest { window: w, kind: &WidgetKind::Label, name: None, attributes: &nested })
            .unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidAttribute { ref key, .. } if key == "font"));

        tk.reject_attribute("bg");
        let h = tk
            .create_widget(WidgetRequest { window: w, kind: &WidgetKind::Label, name: None, attributes: &empty })
            .unwrap();
        assert!(tk.set_attribute(h, "bg", &json!("red")).is_err());
        tk.set_attribute(h, "fg", &json!("white")).unwrap();
    }

    #[test]
    fn typing_changes_the_value_once() {
        let mut tk = HeadlessToolkit::new();
        let w = tk.create_window(None).unwrap();
        let h = entry(&mut tk, w, "command");
        tk.push(Input::Type { target: "command".into(), text: "hi".into() });
        tk.push(Input::Type { target: "command".into(), text: "hi".into() });
        assert_eq!(
            tk.next_event(),
            Some(NativeEvent::ValueChanged { widget: h, value: CellValue::from("hi") })
        );
        assert_eq!(tk.next_event(), None);
    }

    #[test]
    fn bound_events_fire_and_unbound_ones_do_not() {
        let mut tk = HeadlessToolkit::new();
        let w = tk.create_window(None).unwrap();
        let h = entry(&mut tk, w, "command");
        tk.bind(h, Trigger::Event("<Return>"), BindingId(7)).unwrap();
        assert!(tk.bind(h, Trigger::Event("<Key press>"), BindingId(8)).is_err());
        assert!(tk.bind(h, Trigger::Event(""), BindingId(9)).is_err());

        tk.push(Input::Fire { target: "command".into(), event: "<Escape>".into() });
        tk.push(Input::Fire { target: Target::Handle(h), event: "<Return>".into() });
        assert_eq!(tk.next_event(), Some(NativeEvent::Fired { binding: BindingId(7) }));
        assert_eq!(tk.bound_events(h), vec!["<Return>"]);
    }

    #[test]
    fn destroying_a_window_takes_its_widgets() {
        let mut tk = HeadlessToolkit::new();
        let w = tk.create_window(None).unwrap();
        let h = entry(&mut tk, w, "a");
        tk.focus(h).unwrap();
        assert_eq!(tk.live_count(), 2);
        tk.destroy(w);
        assert_eq!(tk.live_count(), 0);
        assert_eq!(tk.focused(), None);
        tk.destroy(w);
    }

    #[test]
    fn close_defaults_to_the_root_window() {
        let mut tk = HeadlessToolkit::new();
        let root = tk.create_window(None).unwrap();
        tk.create_window(Some(root)).unwrap();
        tk.push(Input::Close { window: None });
        assert_eq!(tk.next_event(), Some(NativeEvent::CloseRequested { window: root }));
    }

    #[test]
    fn feed_is_read_after_the_queue() {
        let mut tk = HeadlessToolkit::new();
        let root = tk.create_window(None).unwrap();
        tk.feed(vec![Input::Close { window: None }].into_iter());
        tk.push(Input::Dump);
        assert_eq!(tk.next_event(), Some(NativeEvent::CloseRequested { window: root }));
        assert_eq!(tk.next_event(), None);
    }

    #[test]
    fn icons() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("icon.png");
        RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255])).save(&good).unwrap();
        let bad = dir.path().join("broken.png");
        std::fs::write(&bad, b"not a png").unwrap();

        let mut tk = HeadlessToolkit::new();
        let w = tk.create_window(None).unwrap();
        tk.set_icon(w, IconSource::File(&good)).unwrap();
        assert_eq!(
            tk.window(w).unwrap().icon,
            Some(InstalledIcon::File { path: good.clone(), width: 4, height: 2 })
        );
        assert!(matches!(tk.set_icon(w, IconSource::File(&bad)), Err(ToolkitError::Icon(_))));
        assert!(tk.set_icon(w, IconSource::File(&dir.path().join("absent.png"))).is_err());
        tk.set_icon(w, IconSource::Bundled).unwrap();
        assert_eq!(tk.window(w).unwrap().icon, Some(InstalledIcon::Bundled { width: 16, height: 16 }));
    }

    #[test]
    fn dialogs_use_queued_answers_then_defaults() {
        let mut tk = HeadlessToolkit::new();
        tk.answer(DialogAnswer::Cancel);
        assert_eq!(tk.dialog(DialogKind::OkCancel, "t", "m"), Some(DialogAnswer::Cancel));
        assert_eq!(tk.dialog(DialogKind::RetryCancel, "t", "m"), Some(DialogAnswer::Retry));
        assert_eq!(tk.dialog(DialogKind::Error, "t", "m"), Some(DialogAnswer::Ok));
        assert_eq!(tk.dialogs().len(), 3);
    }
}

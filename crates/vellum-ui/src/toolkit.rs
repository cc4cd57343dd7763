//! The toolkit adapter: the native window and widget primitives the
//! window controller drives.
//!
//! The runtime never talks to a GUI library directly. A backend implements
//! [`Toolkit`] and is handed to the host once; every native call goes
//! through it. [`crate::headless::HeadlessToolkit`] is the in-memory
//! implementation used by tests and the console runner.
//!
//! # Event delivery
//!
//! Bindings do not carry closures across the adapter boundary. The runtime
//! registers a [`BindingId`] per `(widget, trigger)` and the backend reports
//! [`NativeEvent::Fired`] with that id when the trigger happens; the
//! runtime maps ids back to handler names.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;
use vellum_doc::{CellValue, Map, Position, Size, Value, WidgetKind};

/// The toolkit shared by the host and every window it creates.
pub type SharedToolkit = Rc<RefCell<dyn Toolkit>>;

// ── Handles ───────────────────────────────────────────────────────────────

/// Opaque reference to a native window or widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub u64);

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Identifies one event binding; reported back in [`NativeEvent::Fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u64);

// ── Requests ──────────────────────────────────────────────────────────────

/// Everything the backend needs to create one widget.
#[derive(Debug, Clone, Copy)]
pub struct WidgetRequest<'a> {
    pub window:     NativeHandle,
    pub kind:       &'a WidgetKind,
    /// Native widget name (the widget's tag, when it has one).
    pub name:       Option<&'a str>,
    pub attributes: &'a Map<String, Value>,
}

/// What fires a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger<'a> {
    /// A named low-level event such as `<Return>`.
    Event(&'a str),
    /// The widget's own activation (button press, slider release).
    Activate,
}

/// Icon to install on a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource<'a> {
    File(&'a Path),
    /// The icon shipped with the backend. Installing it must not fail.
    Bundled,
}

// ── Events ────────────────────────────────────────────────────────────────

/// Something the user did, as reported by the backend's event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    Fired { binding: BindingId },
    /// The user changed a widget's value; the runtime mirrors it into the
    /// widget's cell without writing it back.
    ValueChanged { widget: NativeHandle, value: CellValue },
    CloseRequested { window: NativeHandle },
}

// ── Dialogs ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Error,
    Info,
    Warning,
    YesNo,
    OkCancel,
    RetryCancel,
    YesNoCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogAnswer {
    Ok,
    Cancel,
    Yes,
    No,
    Retry,
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    #[error("unknown widget type `{0}`")]
    UnknownWidgetType(String),

    #[error("invalid attribute `{key}`: {reason}")]
    InvalidAttribute { key: String, reason: String },

    #[error("cannot bind event `{0}`")]
    InvalidEvent(String),

    #[error("cannot load icon: {0}")]
    Icon(String),

    #[error("unknown native handle {0}")]
    UnknownHandle(NativeHandle),
}

// ── Toolkit ───────────────────────────────────────────────────────────────

/// Native primitives consumed by the window controller.
///
/// All calls happen on the thread that runs the event loop. Implementations
/// must not call back into the runtime from inside a method; user activity
/// is only ever reported through [`Toolkit::next_event`].
pub trait Toolkit {
    /// Create a top-level window, owned by `parent` when given.
    fn create_window(&mut self, parent: Option<NativeHandle>) -> Result<NativeHandle, ToolkitError>;

    fn set_title(&mut self, window: NativeHandle, title: &str) -> Result<(), ToolkitError>;

    /// Resize the window and, when `origin` is given, move its top-left corner.
    fn set_geometry(
        &mut self,
        window: NativeHandle,
        size: Size,
        origin: Option<(i32, i32)>,
    ) -> Result<(), ToolkitError>;

    fn set_icon(&mut self, window: NativeHandle, icon: IconSource<'_>) -> Result<(), ToolkitError>;

    /// Size of the primary display, used to center windows.
    fn screen_size(&self) -> Size;

    /// Create a widget. Unsupported types must be reported as
    /// [`ToolkitError::UnknownWidgetType`] and rejected attributes as
    /// [`ToolkitError::InvalidAttribute`].
    fn create_widget(&mut self, request: WidgetRequest<'_>) -> Result<NativeHandle, ToolkitError>;

    /// Route `trigger` on `handle` to `binding`. Rebinding the same trigger
    /// replaces the previous binding; windows bind each trigger once and
    /// fan a binding out to all of its handlers.
    fn bind(&mut self, handle: NativeHandle, trigger: Trigger<'_>, binding: BindingId) -> Result<(), ToolkitError>;

    fn set_attribute(&mut self, handle: NativeHandle, key: &str, value: &Value) -> Result<(), ToolkitError>;

    /// Write the widget's native value slot. Writing the value the widget
    /// already shows must not produce a [`NativeEvent::ValueChanged`].
    fn set_value(&mut self, handle: NativeHandle, value: &CellValue) -> Result<(), ToolkitError>;

    fn set_enabled(&mut self, handle: NativeHandle, enabled: bool) -> Result<(), ToolkitError>;

    /// Apply a positioning directive to a freshly created widget.
    fn position(&mut self, handle: NativeHandle, position: &Position) -> Result<(), ToolkitError>;

    fn focus(&mut self, handle: NativeHandle) -> Result<(), ToolkitError>;

    /// Release a window or widget. Unknown handles are ignored.
    fn destroy(&mut self, handle: NativeHandle);

    /// Block until the next user event. `None` means the event source is
    /// exhausted and the loop should end.
    fn next_event(&mut self) -> Option<NativeEvent>;

    /// Show a modal dialog and block until it is dismissed.
    fn dialog(&mut self, kind: DialogKind, title: &str, message: &str) -> Option<DialogAnswer>;
}

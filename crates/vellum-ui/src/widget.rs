use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use vellum_doc::{CellKind, CellValue, Value, WidgetDescriptor, WidgetKind};

use crate::cell::{SubscriptionId, ValueCell};
use crate::error::{Error, Result};
use crate::toolkit::{NativeHandle, SharedToolkit};

// ── WidgetId ──────────────────────────────────────────────────────────────

/// Numeric widget identity, unique among live widgets of one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counter-based id allocator.
///
/// Ids are handed out in increasing order. Releasing the most recently
/// allocated id rewinds the counter so the next allocation reuses it;
/// releasing any other id leaves the counter alone and the id is never
/// reused.
#[derive(Debug, Default)]
pub struct WidgetIds {
    next: Cell<u64>,
}

impl WidgetIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self) -> WidgetId {
        let id = self.next.get();
        self.next.set(id + 1);
        WidgetId(id)
    }

    /// Returns `true` if the id will be handed out again.
    pub fn release(&self, id: WidgetId) -> bool {
        if id.0 + 1 == self.next.get() {
            self.next.set(id.0);
            true
        } else {
            false
        }
    }

    /// The id the next [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> WidgetId {
        WidgetId(self.next.get())
    }
}

// ── Widget ────────────────────────────────────────────────────────────────

/// A live widget: descriptor, native handle and value cell.
///
/// Cheap to clone; clones refer to the same widget. Once the widget is
/// deleted (or its window closed or rebuilt) every operation returns
/// [`Error::WidgetDestroyed`].
#[derive(Clone)]
pub struct Widget(Rc<WidgetInner>);

struct WidgetInner {
    id:         WidgetId,
    descriptor: WidgetDescriptor,
    native:     NativeHandle,
    cell:       Option<ValueCell<CellValue>>,
    /// Observer that pushes cell changes into the native widget.
    sync:       Option<SubscriptionId>,
    enabled:    Cell<bool>,
    alive:      Cell<bool>,
    toolkit:    SharedToolkit,
}

impl Widget {
    /// Wrap a freshly created native widget. The cell is seeded from the
    /// descriptor and kept in sync with the toolkit from here on.
    pub(crate) fn new(id: WidgetId, descriptor: WidgetDescriptor, native: NativeHandle, toolkit: SharedToolkit) -> Self {
        let cell = descriptor.cell.clone().map(ValueCell::new);
        let sync = cell.as_ref().map(|cell| {
            let toolkit = Rc::clone(&toolkit);
            cell.subscribe(move |value: &CellValue| {
                if let Err(e) = toolkit.borrow_mut().set_value(native, value) {
                    log::warn!("widget #{id}: toolkit rejected value {value:?}: {e}");
                }
            })
        });
        let enabled = Cell::new(descriptor.enabled);
        Self(Rc::new(WidgetInner {
            id,
            descriptor,
            native,
            cell,
            sync,
            enabled,
            alive: Cell::new(true),
            toolkit,
        }))
    }

    pub fn id(&self) -> WidgetId {
        self.0.id
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.0.descriptor.kind
    }

    pub fn tag(&self) -> Option<&str> {
        self.0.descriptor.tag.as_deref()
    }

    /// Ordinal within the owning window.
    pub fn index(&self) -> usize {
        self.0.descriptor.index
    }

    pub fn descriptor(&self) -> &WidgetDescriptor {
        &self.0.descriptor
    }

    pub fn native_handle(&self) -> NativeHandle {
        self.0.native
    }

    pub fn is_alive(&self) -> bool {
        self.0.alive.get()
    }

    /// True if both handles refer to the same widget.
    pub fn ptr_eq(&self, other: &Widget) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_alive() { Ok(()) } else { Err(Error::WidgetDestroyed(self.0.id)) }
    }

    fn value_cell(&self) -> Result<&ValueCell<CellValue>> {
        self.ensure_alive()?;
        self.0.cell.as_ref().ok_or(Error::NoValueCell(self.0.id))
    }

    // ── value cell ────────────────────────────────────────────────────────

    /// A handle to the widget's value cell, for observing changes.
    pub fn cell(&self) -> Result<ValueCell<CellValue>> {
        self.value_cell().cloned()
    }

    pub fn value(&self) -> Result<CellValue> {
        Ok(self.value_cell()?.get())
    }

    /// The cell's value as text.
    pub fn text(&self) -> Result<String> {
        Ok(self.value_cell()?.with(|v| v.to_string()))
    }

    /// Store a value in the cell, converting it to the cell's kind. The
    /// native widget follows.
    pub fn set_value(&self, value: impl Into<CellValue>) -> Result<()> {
        let cell = self.value_cell()?;
        let kind = cell.with(CellValue::kind);
        let value = value.into();
        let shown = value.to_string();
        let value = value
            .coerce(kind)
            .ok_or(Error::InvalidValue { widget: self.0.id, value: shown })?;
        cell.set(value);
        Ok(())
    }

    pub fn set_text(&self, text: &str) -> Result<()> {
        self.set_value(text)
    }

    /// Reset the cell to its kind's empty value.
    pub fn clear(&self) -> Result<()> {
        let cell = self.value_cell()?;
        cell.set(CellValue::empty(cell.with(CellValue::kind)));
        Ok(())
    }

    /// Observe cell changes, from either side.
    pub fn subscribe(&self, f: impl Fn(&CellValue) + 'static) -> Result<SubscriptionId> {
        Ok(self.value_cell()?.subscribe(f))
    }

    /// Mirror a value the user entered into the cell, without echoing it
    /// back to the toolkit.
    pub(crate) fn accept_native_value(&self, value: CellValue) -> Result<()> {
        let cell = self.value_cell()?;
        let kind = cell.with(CellValue::kind);
        let shown = value.to_string();
        let value = value
            .coerce(kind)
            .ok_or(Error::InvalidValue { widget: self.0.id, value: shown })?;
        match self.0.sync {
            Some(origin) => cell.set_from(value, origin),
            None => cell.set(value),
        };
        Ok(())
    }

    // ── native attributes ─────────────────────────────────────────────────

    /// Change one toolkit attribute (`bg`, `fg`, `width`, ...). On widgets
    /// whose text lives in a value cell, `text` writes the cell instead.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.ensure_alive()?;
        let value = value.into();
        if key == "text" && self.0.descriptor.capabilities().has_text_cell() {
            let text = CellValue::from_value(&value, CellKind::Text)
                .ok_or(Error::InvalidValue { widget: self.0.id, value: value.to_string() })?;
            return self.set_value(text);
        }
        self.0
            .toolkit
            .borrow_mut()
            .set_attribute(self.0.native, key, &value)
            .map_err(|e| Error::from_toolkit(self.index(), e))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.enabled.get()
    }

    pub fn enable(&self) -> Result<()> {
        self.set_enabled(true)
    }

    pub fn disable(&self) -> Result<()> {
        self.set_enabled(false)
    }

    fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.ensure_alive()?;
        self.0.toolkit.borrow_mut().set_enabled(self.0.native, enabled)?;
        self.0.enabled.set(enabled);
        Ok(())
    }

    pub fn focus(&self) -> Result<()> {
        self.ensure_alive()?;
        self.0.toolkit.borrow_mut().focus(self.0.native)?;
        Ok(())
    }

    /// Release the native widget. Idempotent.
    pub(crate) fn destroy(&self) {
        if !self.0.alive.replace(false) {
            return;
        }
        if let (Some(cell), Some(sync)) = (&self.0.cell, self.0.sync) {
            cell.unsubscribe(sync);
        }
        self.0.toolkit.borrow_mut().destroy(self.0.native);
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.0.id)
            .field("kind", &self.0.descriptor.kind)
            .field("tag", &self.0.descriptor.tag)
            .field("native", &self.0.native)
            .field("alive", &self.0.alive.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use vellum_doc::Map;

    use crate::headless::HeadlessToolkit;
    use crate::toolkit::{Toolkit, WidgetRequest};

    fn live(kind: &str, attrs: Map<String, Value>) -> (Widget, Rc<RefCell<HeadlessToolkit>>) {
        let tk = Rc::new(RefCell::new(HeadlessToolkit::new()));
        let descriptor = WidgetDescriptor::from_attributes(0, kind, attrs, None).unwrap();
        let native = {
            let mut t = tk.borrow_mut();
            let window = t.create_window(None).unwrap();
            let handle = t
                .create_widget(WidgetRequest {
                    window,
                    kind: &descriptor.kind,
                    name: descriptor.tag.as_deref(),
                    attributes: &descriptor.attributes,
                })
                .unwrap();
            if let Some(seed) = &descriptor.cell {
                t.set_value(handle, seed).unwrap();
            }
            handle
        };
        let shared: SharedToolkit = tk.clone();
        (Widget::new(WidgetId(0), descriptor, native, shared), tk)
    }

    fn attrs(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn allocator_reuses_only_the_latest_id() {
        let ids = WidgetIds::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert_eq!((a, b, c), (WidgetId(0), WidgetId(1), WidgetId(2)));

        assert!(ids.release(c));
        assert_eq!(ids.allocate(), c);

        assert!(!ids.release(b));
        assert_eq!(ids.allocate(), WidgetId(3));
        assert_eq!(ids.peek(), WidgetId(4));
    }

    #[test]
    fn set_text_reaches_the_toolkit() {
        let (w, tk) = live("entry", attrs(&[("text", Value::from("hi"))]));
        assert_eq!(w.text().unwrap(), "hi");
        w.set_text("bye").unwrap();
        assert_eq!(tk.borrow().widget(w.native_handle()).unwrap().value, Some(CellValue::from("bye")));
    }

    #[test]
    fn native_changes_are_not_written_back() {
        let (w, tk) = live("entry", attrs(&[]));
        let writes_before = tk.borrow().value_writes();
        w.accept_native_value(CellValue::from("typed")).unwrap();
        assert_eq!(w.text().unwrap(), "typed");
        assert_eq!(tk.borrow().value_writes(), writes_before);
    }

    #[test]
    fn values_are_coerced_to_the_cell_kind() {
        let (w, _tk) = live("checkbox", attrs(&[]));
        w.set_value("yes").unwrap();
        assert_eq!(w.value().unwrap(), CellValue::Bool(true));
        let err = w.set_value("perhaps").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
        w.clear().unwrap();
        assert_eq!(w.value().unwrap(), CellValue::Bool(false));
    }

    #[test]
    fn slider_cells_stay_finite() {
        let (w, _tk) = live("slider", attrs(&[]));
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        w.subscribe(move |_| counter.set(counter.get() + 1)).unwrap();

        assert!(matches!(w.set_value("nan"), Err(Error::InvalidValue { .. })));
        assert!(matches!(w.set_value(f64::NAN), Err(Error::InvalidValue { .. })));
        w.set_value(3.0).unwrap();
        w.set_value("3").unwrap();
        assert_eq!(w.value().unwrap(), CellValue::Number(3.0));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn widgets_without_a_cell() {
        let (w, _tk) = live("button", attrs(&[("text", Value::from("Go"))]));
        assert!(matches!(w.value(), Err(Error::NoValueCell(_))));
    }

    #[test]
    fn attributes_and_enabled_state() {
        let (w, tk) = live("label", attrs(&[]));
        w.set("bg", "red").unwrap();
        w.disable().unwrap();
        assert!(!w.is_enabled());
        let tk = tk.borrow();
        let native = tk.widget(w.native_handle()).unwrap();
        assert_eq!(native.attributes.get("bg"), Some(&Value::from("red")));
        assert!(!native.enabled);
    }

    #[test]
    fn text_attribute_goes_through_the_cell() {
        let (entry, tk) = live("entry", attrs(&[("text", Value::from("old"))]));
        entry.set("text", "new").unwrap();
        assert_eq!(entry.text().unwrap(), "new");
        {
            let tk = tk.borrow();
            let native = tk.widget(entry.native_handle()).unwrap();
            assert_eq!(native.value, Some(CellValue::from("new")));
            assert!(!native.attributes.contains_key("text"));
        }
        assert!(matches!(entry.set("text", Value::Null), Err(Error::InvalidValue { .. })));

        let (button, tk) = live("button", attrs(&[]));
        button.set("text", "Go").unwrap();
        let tk = tk.borrow();
        assert_eq!(tk.widget(button.native_handle()).unwrap().attributes.get("text"), Some(&Value::from("Go")));
    }

    #[test]
    fn destroyed_widget_rejects_operations() {
        let (w, tk) = live("entry", attrs(&[]));
        w.destroy();
        w.destroy();
        assert!(!w.is_alive());
        assert!(tk.borrow().widget(w.native_handle()).is_none());
        assert!(matches!(w.set_text("x"), Err(Error::WidgetDestroyed(WidgetId(0)))));
        assert!(matches!(w.focus(), Err(Error::WidgetDestroyed(_))));
    }
}

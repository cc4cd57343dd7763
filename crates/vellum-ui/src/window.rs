//! Window controller: turns an [`InterfaceDescriptor`] into a live native
//! window and keeps the two in step.
//!
//! # Lifecycle
//!
//! ```text
//! Building ──(widgets instantiated, load scripts run)──▶ Open ──close()──▶ Closed
//! ```
//!
//! A window is built by [`Host::create_window`]. Building creates the native
//! window, applies title, geometry and icon, instantiates every widget in
//! declaration order, registers the window with the host and finally runs
//! the default script followed by the interface's `load` scripts. Any
//! failure before registration destroys everything created so far.
//!
//! [`Window`] is a cheap handle; handlers receive `&Window` and may call any
//! operation on it, including ones that rebuild or close it. No internal
//! borrow is held while a handler or a toolkit call runs.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use vellum_doc::{
    ActionKind, DocError, InterfaceDescriptor, Localization, Map, Placement, Size, Value, WidgetDescriptor,
    widget::SUBMIT_EVENT,
};

use crate::error::{Error, Result};
use crate::host::{Host, HostShared};
use crate::toolkit::{BindingId, IconSource, NativeHandle, SharedToolkit, Trigger, ToolkitError, WidgetRequest};
use crate::widget::Widget;

/// Identifies a window within its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Building,
    Open,
    Closed,
}

/// Where a fired binding leads.
#[derive(Debug, Clone)]
pub(crate) enum Route {
    Command { name: String, widget: Widget },
    Script { name: String },
}

/// Collect handlers that share a trigger under one entry, keeping the
/// order in which triggers and handlers first appear.
fn group_by_trigger<'a>(pairs: impl IntoIterator<Item = (Trigger<'a>, Route)>) -> Vec<(Trigger<'a>, Vec<Route>)> {
    let mut grouped: Vec<(Trigger<'a>, Vec<Route>)> = Vec::new();
    for (trigger, route) in pairs {
        match grouped.iter_mut().find(|(t, _)| *t == trigger) {
            Some((_, routes)) => routes.push(route),
            None => grouped.push((trigger, vec![route])),
        }
    }
    grouped
}

/// Handle to a live (or closed) window.
#[derive(Clone)]
pub struct Window(Rc<RefCell<WindowState>>);

struct WindowState {
    id:         WindowId,
    phase:      Phase,
    root:       bool,
    native:     NativeHandle,
    descriptor: InterfaceDescriptor,
    widgets:    Vec<Widget>,
    tags:       HashMap<String, Widget>,
    /// Handlers per binding, in declaration order.
    routes:     HashMap<BindingId, Vec<Route>>,
    host:       Weak<HostShared>,
    toolkit:    SharedToolkit,
}

impl Window {
    // ── construction ──────────────────────────────────────────────────────

    /// Build a window from `descriptor`. Called by [`Host::create_window`].
    pub(crate) fn build(host: &Host, descriptor: InterfaceDescriptor) -> Result<Window> {
        let toolkit = host.toolkit();
        let parent = host.root_window().map(|w| w.native_handle());
        let native = toolkit.borrow_mut().create_window(parent)?;
        let id = host.next_window_id();
        log::debug!("building {id} ({native}) \"{}\"", descriptor.title);

        let window = Window(Rc::new(RefCell::new(WindowState {
            id,
            phase: Phase::Building,
            root: parent.is_none(),
            native,
            descriptor: descriptor.clone(),
            widgets: Vec::new(),
            tags: HashMap::new(),
            routes: HashMap::new(),
            host: host.downgrade(),
            toolkit,
        })));

        if let Err(e) = window.populate(&descriptor) {
            log::error!("{id}: build failed: {e}");
            window.discard();
            return Err(e);
        }

        window.0.borrow_mut().phase = Phase::Open;
        host.register_window(window.clone());

        if let Err(e) = window.run_startup_scripts(host, &descriptor.load_scripts) {
            log::error!("{id}: startup script failed: {e}");
            // The window is already registered; close it the normal way.
            if let Err(close) = window.close() {
                log::debug!("{id}: {close}");
            }
            return Err(e);
        }
        log::info!("{id} open: \"{}\" with {} widget(s)", descriptor.title, window.len());
        Ok(window)
    }

    fn run_startup_scripts(&self, host: &Host, load: &[String]) -> Result<()> {
        (host.resolve_script(None)?)(self)?;
        for name in load {
            log::debug!("{}: load script `{name}`", self.id());
            (host.resolve_script(Some(name))?)(self)?;
        }
        Ok(())
    }

    /// Apply window chrome, bind window events and instantiate every widget.
    fn populate(&self, descriptor: &InterfaceDescriptor) -> Result<()> {
        let (native, toolkit) = self.native_and_toolkit();
        toolkit.borrow_mut().set_title(native, &descriptor.title)?;
        self.apply_geometry(descriptor.size, descriptor.placement)?;
        self.apply_icon(descriptor.icon.as_deref());
        self.bind_window_events(descriptor)?;
        for widget in &descriptor.widgets {
            self.instantiate(widget.clone())?;
        }
        Ok(())
    }

    fn bind_window_events(&self, descriptor: &InterfaceDescriptor) -> Result<()> {
        let host = self.host()?;
        let (native, toolkit) = self.native_and_toolkit();
        let triggers = group_by_trigger(
            descriptor
                .events
                .iter()
                .map(|b| (Trigger::Event(&b.event), Route::Script { name: b.handler.clone() })),
        );
        for (trigger, routes) in triggers {
            let id = host.next_binding_id();
            toolkit.borrow_mut().bind(native, trigger, id).map_err(|e| match e {
                ToolkitError::InvalidEvent(event) => {
                    Error::Doc(DocError::invalid_event(event, "not bindable on a window"))
                }
                other => Error::Toolkit(other),
            })?;
            self.0.borrow_mut().routes.insert(id, routes);
        }
        Ok(())
    }

    /// Create one native widget and wire it up. On failure nothing of the
    /// widget is left behind.
    fn instantiate(&self, descriptor: WidgetDescriptor) -> Result<Widget> {
        let host = self.host()?;
        let (window, toolkit) = self.native_and_toolkit();
        let index = descriptor.index;

        let native = toolkit
            .borrow_mut()
            .create_widget(WidgetRequest {
                window,
                kind: &descriptor.kind,
                name: descriptor.tag.as_deref(),
                attributes: &descriptor.attributes,
            })
            .map_err(|e| Error::from_toolkit(index, e))?;

        let id = host.widget_ids().allocate();
        let widget = Widget::new(id, descriptor, native, toolkit);
        let routes = match self.wire(&host, &widget) {
            Ok(routes) => routes,
            Err(e) => {
                widget.destroy();
                host.widget_ids().release(id);
                return Err(e);
            }
        };

        let mut state = self.0.borrow_mut();
        if let Some(tag) = widget.tag() {
            if let Some(previous) = state.tags.insert(tag.to_string(), widget.clone()) {
                log::debug!("tag `{tag}` moved from widget #{} to #{}", previous.id(), widget.id());
            }
        }
        state.routes.extend(routes);
        state.widgets.push(widget.clone());
        log::trace!("widget #{id} ({}) at index {index}", widget.kind());
        Ok(widget)
    }

    /// Position, seed, enable state and bindings for a freshly created widget.
    fn wire(&self, host: &Host, widget: &Widget) -> Result<Vec<(BindingId, Vec<Route>)>> {
        let shared = self.native_and_toolkit().1;
        let mut toolkit = shared.borrow_mut();
        let d = widget.descriptor();
        let native = widget.native_handle();
        let at = |e: ToolkitError| Error::from_toolkit(d.index, e);

        toolkit.position(native, &d.position).map_err(at)?;
        if let Some(seed) = &d.cell {
            toolkit.set_value(native, seed).map_err(at)?;
        }
        if !d.enabled {
            toolkit.set_enabled(native, false).map_err(at)?;
        }

        // The action runs after any explicit handler on the same trigger.
        let command = |name: &str| Route::Command { name: name.to_string(), widget: widget.clone() };
        let action = d.action_binding().map(|(kind, name)| {
            let trigger = match kind {
                ActionKind::Activate => Trigger::Activate,
                ActionKind::Submit => Trigger::Event(SUBMIT_EVENT),
            };
            (trigger, command(name))
        });
        let declared = d.events.iter().map(|b| (Trigger::Event(&b.event), command(&b.handler)));

        let mut routes = Vec::new();
        for (trigger, handlers) in group_by_trigger(declared.chain(action)) {
            let id = host.next_binding_id();
            toolkit.bind(native, trigger, id).map_err(at)?;
            routes.push((id, handlers));
        }
        Ok(routes)
    }

    fn apply_geometry(&self, size: Size, placement: Placement) -> Result<()> {
        let (native, toolkit) = self.native_and_toolkit();
        let origin = match placement {
            Placement::Automatic => None,
            Placement::Explicit { x, y } => Some((x, y)),
            Placement::Centered => {
                let screen = toolkit.borrow().screen_size();
                let x = (i64::from(screen.width) - i64::from(size.width)) / 2;
                let y = (i64::from(screen.height) - i64::from(size.height)) / 2;
                Some((x.max(0) as i32, y.max(0) as i32))
            }
        };
        toolkit.borrow_mut().set_geometry(native, size, origin)?;
        Ok(())
    }

    /// Install the declared icon, else the host's default icon, else the
    /// toolkit's bundled one. Never fails.
    fn apply_icon(&self, declared: Option<&Path>) {
        let (native, toolkit) = self.native_and_toolkit();
        let host = self.host().ok();

        if let Some(path) = declared {
            let path = match &host {
                Some(h) => h.resolve_path(path),
                None => path.to_path_buf(),
            };
            match toolkit.borrow_mut().set_icon(native, IconSource::File(&path)) {
                Ok(()) => return,
                Err(e) => log::warn!("icon {}: {e}; using the default icon", path.display()),
            }
        }
        if let Some(default) = host.as_ref().map(|h| h.default_icon().to_path_buf()) {
            match toolkit.borrow_mut().set_icon(native, IconSource::File(&default)) {
                Ok(()) => return,
                Err(e) => log::debug!("default icon {}: {e}", default.display()),
            }
        }
        if let Err(e) = toolkit.borrow_mut().set_icon(native, IconSource::Bundled) {
            log::error!("bundled icon rejected: {e}");
        }
    }

    /// Destroy every widget in reverse creation order and forget all routes.
    fn clear_contents(&self) {
        let (widgets, host) = {
            let mut state = self.0.borrow_mut();
            state.tags.clear();
            state.routes.clear();
            (std::mem::take(&mut state.widgets), state.host.upgrade())
        };
        for widget in widgets.iter().rev() {
            widget.destroy();
            if let Some(host) = &host {
                host.ids.release(widget.id());
            }
        }
    }

    /// Tear down a window that never finished building.
    fn discard(&self) {
        self.clear_contents();
        let (native, toolkit) = self.native_and_toolkit();
        self.0.borrow_mut().phase = Phase::Closed;
        toolkit.borrow_mut().destroy(native);
    }

    // ── internal access ───────────────────────────────────────────────────

    fn native_and_toolkit(&self) -> (NativeHandle, SharedToolkit) {
        let state = self.0.borrow();
        (state.native, Rc::clone(&state.toolkit))
    }

    fn live(&self) -> Result<Ref<'_, WindowState>> {
        let state = self.0.borrow();
        if state.phase == Phase::Closed { Err(Error::WindowClosed) } else { Ok(state) }
    }

    fn ensure_open(&self) -> Result<()> {
        self.live().map(drop)
    }

    pub(crate) fn routes(&self, binding: BindingId) -> Option<Vec<Route>> {
        self.0.borrow().routes.get(&binding).cloned()
    }

    pub(crate) fn find_native_widget(&self, native: NativeHandle) -> Option<Widget> {
        self.0.borrow().widgets.iter().find(|w| w.native_handle() == native).cloned()
    }

    // ── identity ──────────────────────────────────────────────────────────

    pub fn id(&self) -> WindowId {
        self.0.borrow().id
    }

    pub fn phase(&self) -> Phase {
        self.0.borrow().phase
    }

    pub fn is_open(&self) -> bool {
        self.phase() != Phase::Closed
    }

    /// The first window of a host is its root; later ones are owned by it.
    pub fn is_root(&self) -> bool {
        self.0.borrow().root
    }

    pub fn native_handle(&self) -> NativeHandle {
        self.0.borrow().native
    }

    pub fn host(&self) -> Result<Host> {
        self.0.borrow().host.upgrade().map(Host::from_shared).ok_or(Error::HostGone)
    }

    /// True if both handles refer to the same window.
    pub fn ptr_eq(&self, other: &Window) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // ── attributes ────────────────────────────────────────────────────────

    /// The descriptor the window was last built from, with any title, size,
    /// placement or icon changes applied since.
    pub fn descriptor(&self) -> Result<InterfaceDescriptor> {
        Ok(self.live()?.descriptor.clone())
    }

    /// The localization table the window's content was resolved against.
    pub fn language(&self) -> Result<Localization> {
        Ok(self.live()?.descriptor.language().clone())
    }

    pub fn title(&self) -> Result<String> {
        Ok(self.live()?.descriptor.title.clone())
    }

    pub fn set_title(&self, title: &str) -> Result<()> {
        let (native, toolkit) = {
            let state = self.live()?;
            (state.native, Rc::clone(&state.toolkit))
        };
        toolkit.borrow_mut().set_title(native, title)?;
        self.0.borrow_mut().descriptor.title = title.to_string();
        Ok(())
    }

    pub fn size(&self) -> Result<Size> {
        Ok(self.live()?.descriptor.size)
    }

    pub fn set_size(&self, size: Size) -> Result<()> {
        let placement = self.live()?.descriptor.placement;
        self.apply_geometry(size, placement)?;
        self.0.borrow_mut().descriptor.size = size;
        Ok(())
    }

    pub fn placement(&self) -> Result<Placement> {
        Ok(self.live()?.descriptor.placement)
    }

    pub fn set_placement(&self, placement: Placement) -> Result<()> {
        let size = self.live()?.descriptor.size;
        self.apply_geometry(size, placement)?;
        self.0.borrow_mut().descriptor.placement = placement;
        Ok(())
    }

    pub fn icon(&self) -> Result<Option<PathBuf>> {
        Ok(self.live()?.descriptor.icon.clone())
    }

    /// Replace the icon. Unusable icons fall back like they do at build
    /// time; this only fails on a closed window.
    pub fn set_icon(&self, icon: Option<&Path>) -> Result<()> {
        self.ensure_open()?;
        self.apply_icon(icon);
        self.0.borrow_mut().descriptor.icon = icon.map(Path::to_path_buf);
        Ok(())
    }

    // ── widgets ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.0.borrow().widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live widgets in creation order.
    pub fn widgets(&self) -> Vec<Widget> {
        self.0.borrow().widgets.clone()
    }

    /// The widget at position `index` in creation order.
    pub fn widget(&self, index: usize) -> Result<Widget> {
        self.live()?.widgets.get(index).cloned().ok_or(Error::NoSuchWidget(index))
    }

    /// The widget most recently registered under `tag`.
    pub fn by_tag(&self, tag: &str) -> Result<Widget> {
        self.live()?.tags.get(tag).cloned().ok_or_else(|| Error::UnknownTag(tag.to_string()))
    }

    pub fn try_by_tag(&self, tag: &str) -> Option<Widget> {
        self.0.borrow().tags.get(tag).cloned()
    }

    /// Give keyboard focus to one of this window's widgets.
    pub fn focus(&self, widget: &Widget) -> Result<()> {
        if !self.live()?.widgets.iter().any(|w| w.ptr_eq(widget)) {
            return Err(Error::WidgetDestroyed(widget.id()));
        }
        widget.focus()
    }

    /// Create a widget at runtime from a type name and attribute bag. Text
    /// is localized with the window's current table.
    pub fn create_widget(&self, kind: &str, attributes: Map<String, Value>) -> Result<Widget> {
        let (index, table) = {
            let state = self.live()?;
            (state.widgets.len(), state.descriptor.language().clone())
        };
        let descriptor = WidgetDescriptor::from_attributes(index, kind, attributes, Some(&table))?;
        self.instantiate(descriptor)
    }

    /// Destroy `widget` and drop it from the window. Its tag is released
    /// only if it still points at this widget.
    pub fn delete_widget(&self, widget: &Widget) -> Result<()> {
        let host = {
            let mut state = self.0.borrow_mut();
            if state.phase == Phase::Closed {
                return Err(Error::WindowClosed);
            }
            let position = state
                .widgets
                .iter()
                .position(|w| w.ptr_eq(widget))
                .ok_or(Error::WidgetDestroyed(widget.id()))?;
            state.widgets.remove(position);
            if let Some(tag) = widget.tag() {
                if state.tags.get(tag).is_some_and(|w| w.ptr_eq(widget)) {
                    state.tags.remove(tag);
                }
            }
            state.routes.retain(|_, routes| {
                routes.retain(|route| !matches!(route, Route::Command { widget: w, .. } if w.ptr_eq(widget)));
                !routes.is_empty()
            });
            state.host.upgrade()
        };
        widget.destroy();
        if let Some(host) = host {
            host.ids.release(widget.id());
        }
        log::debug!("deleted widget #{}", widget.id());
        Ok(())
    }

    // ── language ──────────────────────────────────────────────────────────

    /// Rebuild the window's content against another localization table.
    pub fn set_language(&self, table: Localization) -> Result<()> {
        self.set_language_with(table, |_| Ok(()))
    }

    /// Like [`set_language`](Self::set_language), then run `on_done` on the
    /// rebuilt window.
    ///
    /// The new descriptor is derived before anything is torn down, so a
    /// document error leaves the window untouched. Widgets are destroyed in
    /// reverse creation order and rebuilt in declaration order; title and
    /// icon are re-resolved. `load` scripts do not run again, and widgets
    /// created at runtime are not recreated.
    pub fn set_language_with<F>(&self, table: Localization, on_done: F) -> Result<()>
    where
        F: FnOnce(&Window) -> Result<()>,
    {
        let descriptor = self.live()?.descriptor.reparse(Some(&table))?;
        log::info!(
            "{}: switching language to {}",
            self.id(),
            table.name().unwrap_or("<none>")
        );

        self.clear_contents();
        self.0.borrow_mut().descriptor = descriptor.clone();
        if let Err(e) = self.populate(&descriptor) {
            log::error!("{}: rebuild failed, window left empty: {e}", self.id());
            self.clear_contents();
            return Err(e);
        }
        on_done(self)
    }

    // ── handlers ──────────────────────────────────────────────────────────

    /// Run a registered script against this window; `None` runs the
    /// default script.
    pub fn run(&self, script: Option<&str>) -> Result<()> {
        self.ensure_open()?;
        let handler = self.host()?.resolve_script(script)?;
        log::debug!("{}: script `{}`", self.id(), script.unwrap_or("<default>"));
        handler(self)
    }

    /// Run a registered command with `widget` as the widget that fired it.
    pub fn dispatch(&self, command: &str, widget: &Widget) -> Result<()> {
        self.ensure_open()?;
        let handler = self.host()?.resolve_command(command)?;
        log::debug!("{}: command `{command}` from widget #{}", self.id(), widget.id());
        handler(self, widget)
    }

    // ── event loop ────────────────────────────────────────────────────────

    /// Run the event loop until this window closes or the toolkit runs out
    /// of events. Handler failures are logged and the loop continues.
    pub fn open(&self) -> Result<()> {
        let (size, placement, toolkit) = {
            let state = self.live()?;
            (state.descriptor.size, state.descriptor.placement, Rc::clone(&state.toolkit))
        };
        if placement == Placement::Centered {
            self.apply_geometry(size, placement)?;
        }
        let host = self.host()?;
        log::debug!("{}: entering event loop", self.id());

        while self.is_open() {
            let event = toolkit.borrow_mut().next_event();
            let Some(event) = event else {
                log::debug!("{}: event source exhausted", self.id());
                self.close()?;
                break;
            };
            if let Err(e) = host.handle_event(event) {
                log::error!("{}: handler failed: {e}", self.id());
            }
        }
        Ok(())
    }

    /// Close the window. Closing the root window closes every other window
    /// of the host first.
    pub fn close(&self) -> Result<()> {
        let (id, root) = {
            let state = self.live()?;
            (state.id, state.root)
        };
        let host = self.host().ok();
        if root {
            if let Some(host) = &host {
                for other in host.windows().into_iter().filter(|w| w.id() != id) {
                    if let Err(e) = other.close() {
                        log::debug!("{}: {e}", other.id());
                    }
                }
            }
        }
        self.discard();
        if let Some(host) = host {
            host.forget_window(id);
        }
        log::info!("{id} closed");
        Ok(())
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("Window")
            .field("id", &state.id)
            .field("phase", &state.phase)
            .field("root", &state.root)
            .field("title", &state.descriptor.title)
            .field("widgets", &state.widgets.len())
            .finish()
    }
}

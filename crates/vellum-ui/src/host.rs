//! The application host: one per application.
//!
//! Holds the application's identity, its resource directory, the handler
//! registry and the toolkit, and owns every open window. Configure it with a
//! [`HostBuilder`], then call [`Host::run_main`].
//!
//! ```rust,ignore
//! let host = HostBuilder::from_manifest("demos/console")?
//!     .command("valid", |window, entry| {
//!         window.by_tag("result")?.set_text(&entry.text()?)?;
//!         entry.clear()
//!     })
//!     .build();
//! host.run_main()?;
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use vellum_doc::{DocError, InterfaceDescriptor, Localization, Value, load_document, locate};

use crate::error::{Error, Result};
use crate::headless::HeadlessToolkit;
use crate::toolkit::{BindingId, DialogAnswer, DialogKind, NativeEvent, SharedToolkit, Toolkit};
use crate::widget::{Widget, WidgetIds};
use crate::window::{Route, Window, WindowId};

/// A script: runs against a window.
pub type ScriptFn = dyn Fn(&Window) -> Result<()>;

/// A command: runs against a window and the widget that fired it.
pub type CommandFn = dyn Fn(&Window, &Widget) -> Result<()>;

/// Manifest file at the root of an application directory.
pub const MANIFEST: &str = "app.toml";

/// Subdirectory holding window documents.
pub const INTERFACE_DIR: &str = "interface";

/// Subdirectory holding localization tables.
pub const LANG_DIR: &str = "lang";

const DEFAULT_MAIN: &str = "main";
const DEFAULT_ICON: &str = "icon.png";

#[derive(Default)]
struct Handlers {
    default_script: Option<Rc<ScriptFn>>,
    scripts:        HashMap<String, Rc<ScriptFn>>,
    commands:       HashMap<String, Rc<CommandFn>>,
}

pub(crate) struct HostShared {
    name:          String,
    root:          PathBuf,
    main:          String,
    language:      Option<String>,
    default_icon:  PathBuf,
    toolkit:       SharedToolkit,
    handlers:      Handlers,
    windows:       RefCell<Vec<Window>>,
    pub(crate) ids: WidgetIds,
    next_binding:  Cell<u64>,
    next_window:   Cell<u64>,
}

// ── HostBuilder ───────────────────────────────────────────────────────────

/// Configures a [`Host`].
///
/// Handlers are registered here and cannot change once the host is built.
pub struct HostBuilder {
    name:         Option<String>,
    root:         PathBuf,
    main:         String,
    language:     Option<String>,
    default_icon: Option<PathBuf>,
    toolkit:      Option<SharedToolkit>,
    handlers:     Handlers,
}

impl HostBuilder {
    /// A host rooted at `root` with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            name:         None,
            root:         root.into(),
            main:         DEFAULT_MAIN.to_string(),
            language:     None,
            default_icon: None,
            toolkit:      None,
            handlers:     Handlers::default(),
        }
    }

    /// A host configured from `<root>/app.toml`.
    ///
    /// Recognized keys: `name`, `main` (interface name), `lang` (default
    /// language) and `icon` (default window icon, relative to `root`).
    /// A missing manifest is [`DocError::ResourceNotFound`].
    pub fn from_manifest(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let doc = load_document(&root.join(MANIFEST))?;
        let Value::Object(manifest) = doc else {
            return Err(DocError::invalid_field("manifest", "expected a map").into());
        };
        let text = |key: &'static str| -> Result<Option<String>> {
            match manifest.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(DocError::invalid_field(key, "must be a string").into()),
            }
        };

        let mut builder = Self::new(root.clone());
        builder.name = text("name")?;
        if let Some(main) = text("main")? {
            builder.main = main;
        }
        builder.language = text("lang")?;
        builder.default_icon = text("icon")?.map(PathBuf::from);
        log::debug!("manifest {} loaded", root.join(MANIFEST).display());
        Ok(builder)
    }

    /// Application name, used as the default dialog title.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Interface opened by [`Host::run_main`]. Defaults to `main`.
    pub fn main_interface(mut self, name: impl Into<String>) -> Self {
        self.main = name.into();
        self
    }

    /// Language loaded by [`Host::run_main`]. Defaults to none.
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// Window icon used when an interface declares none, or an unusable one.
    pub fn default_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_icon = Some(path.into());
        self
    }

    pub fn toolkit(self, toolkit: impl Toolkit + 'static) -> Self {
        self.shared_toolkit(Rc::new(RefCell::new(toolkit)))
    }

    /// Use a toolkit the caller keeps a handle to.
    pub fn shared_toolkit(mut self, toolkit: SharedToolkit) -> Self {
        self.toolkit = Some(toolkit);
        self
    }

    /// Script run on every window right after it is built, before its
    /// `load` scripts.
    pub fn default_script(mut self, f: impl Fn(&Window) -> Result<()> + 'static) -> Self {
        self.handlers.default_script = Some(Rc::new(f));
        self
    }

    pub fn script(mut self, name: impl Into<String>, f: impl Fn(&Window) -> Result<()> + 'static) -> Self {
        self.handlers.scripts.insert(name.into(), Rc::new(f));
        self
    }

    pub fn command(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Window, &Widget) -> Result<()> + 'static,
    ) -> Self {
        self.handlers.commands.insert(name.into(), Rc::new(f));
        self
    }

    /// Finish configuration. Without an explicit toolkit the host runs on
    /// a [`HeadlessToolkit`].
    pub fn build(self) -> Host {
        let name = self.name.unwrap_or_else(|| {
            self.root
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|n| !n.is_empty())
                .unwrap_or("vellum")
                .to_string()
        });
        let default_icon = self.root.join(self.default_icon.unwrap_or_else(|| PathBuf::from(DEFAULT_ICON)));
        let toolkit: SharedToolkit = match self.toolkit {
            Some(toolkit) => toolkit,
            None => Rc::new(RefCell::new(HeadlessToolkit::new())),
        };
        log::debug!(
            "host `{name}`: {} script(s), {} command(s)",
            self.handlers.scripts.len(),
            self.handlers.commands.len()
        );
        Host(Rc::new(HostShared {
            name,
            root: self.root,
            main: self.main,
            language: self.language,
            default_icon,
            toolkit,
            handlers: self.handlers,
            windows: RefCell::new(Vec::new()),
            ids: WidgetIds::new(),
            next_binding: Cell::new(0),
            next_window: Cell::new(0),
        }))
    }
}

// ── Host ──────────────────────────────────────────────────────────────────

/// Handle to the application host. Clones refer to the same host.
#[derive(Clone)]
pub struct Host(Rc<HostShared>);

impl Host {
    pub fn builder(root: impl Into<PathBuf>) -> HostBuilder {
        HostBuilder::new(root)
    }

    pub(crate) fn from_shared(shared: Rc<HostShared>) -> Self {
        Self(shared)
    }

    pub(crate) fn downgrade(&self) -> Weak<HostShared> {
        Rc::downgrade(&self.0)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn root(&self) -> &Path {
        &self.0.root
    }

    pub fn main_interface(&self) -> &str {
        &self.0.main
    }

    pub fn default_language(&self) -> Option<&str> {
        self.0.language.as_deref()
    }

    pub fn default_icon(&self) -> &Path {
        &self.0.default_icon
    }

    pub fn toolkit(&self) -> SharedToolkit {
        Rc::clone(&self.0.toolkit)
    }

    pub(crate) fn widget_ids(&self) -> &WidgetIds {
        &self.0.ids
    }

    /// Resolve a document-relative path against the application root.
    pub(crate) fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.0.root.join(path) }
    }

    pub(crate) fn next_binding_id(&self) -> BindingId {
        let id = self.0.next_binding.get();
        self.0.next_binding.set(id + 1);
        BindingId(id)
    }

    pub(crate) fn next_window_id(&self) -> WindowId {
        let id = self.0.next_window.get();
        self.0.next_window.set(id + 1);
        WindowId(id)
    }

    // ── handlers ──────────────────────────────────────────────────────────

    pub fn has_script(&self, name: &str) -> bool {
        self.0.handlers.scripts.contains_key(name)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.0.handlers.commands.contains_key(name)
    }

    /// Look up a script. `None` is the default script, which is a no-op
    /// when none was registered.
    pub fn resolve_script(&self, name: Option<&str>) -> Result<Rc<ScriptFn>> {
        match name {
            None => match &self.0.handlers.default_script {
                Some(script) => Ok(Rc::clone(script)),
                None => {
                    let noop: Rc<ScriptFn> = Rc::new(|_: &Window| -> Result<()> { Ok(()) });
                    Ok(noop)
                }
            },
            Some(name) => self
                .0
                .handlers
                .scripts
                .get(name)
                .cloned()
                .ok_or_else(|| Error::ScriptNotFound(name.to_string())),
        }
    }

    pub fn resolve_command(&self, name: &str) -> Result<Rc<CommandFn>> {
        self.0
            .handlers
            .commands
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CommandNotFound(name.to_string()))
    }

    // ── resources ─────────────────────────────────────────────────────────

    /// Load `lang/<lang>.toml` (or `.json`). `None` is the empty table.
    pub fn load_localization(&self, lang: Option<&str>) -> Result<Localization> {
        let Some(lang) = lang else {
            return Ok(Localization::empty());
        };
        let path = locate(&self.0.root.join(LANG_DIR), lang)?;
        let table = Localization::load(Some(&path))?;
        log::debug!("language `{lang}`: {} entr(ies) from {}", table.len(), path.display());
        Ok(table)
    }

    /// Load and parse `interface/<name>.toml` (or `.json`).
    pub fn load_interface(&self, name: &str, table: Option<&Localization>) -> Result<InterfaceDescriptor> {
        let path = locate(&self.0.root.join(INTERFACE_DIR), name)?;
        log::debug!("interface `{name}` from {}", path.display());
        Ok(InterfaceDescriptor::load(&path, table)?)
    }

    // ── windows ───────────────────────────────────────────────────────────

    /// Build a window. The first window becomes the root; later windows
    /// are owned by it.
    pub fn create_window(&self, descriptor: InterfaceDescriptor) -> Result<Window> {
        Window::build(self, descriptor)
    }

    /// Load the main interface in the default language, build it and run
    /// its event loop.
    pub fn run_main(&self) -> Result<()> {
        let table = self.load_localization(self.default_language())?;
        let descriptor = self.load_interface(self.main_interface(), Some(&table))?;
        let window = self.create_window(descriptor)?;
        window.open()
    }

    /// Every window not yet closed, in creation order.
    pub fn windows(&self) -> Vec<Window> {
        self.0.windows.borrow().clone()
    }

    pub fn root_window(&self) -> Option<Window> {
        self.0.windows.borrow().iter().find(|w| w.is_root()).cloned()
    }

    pub fn window(&self, id: WindowId) -> Option<Window> {
        self.0.windows.borrow().iter().find(|w| w.id() == id).cloned()
    }

    pub(crate) fn register_window(&self, window: Window) {
        self.0.windows.borrow_mut().push(window);
    }

    pub(crate) fn forget_window(&self, id: WindowId) {
        self.0.windows.borrow_mut().retain(|w| w.id() != id);
    }

    // ── events ────────────────────────────────────────────────────────────

    /// Route one native event to its handler.
    ///
    /// Events for widgets or windows that no longer exist are dropped.
    pub fn handle_event(&self, event: NativeEvent) -> Result<()> {
        match event {
            NativeEvent::Fired { binding } => {
                let routed = self
                    .windows()
                    .into_iter()
                    .find_map(|w| w.routes(binding).map(|routes| (w, routes)));
                let Some((window, routes)) = routed else {
                    log::debug!("binding {binding:?} is no longer routed");
                    return Ok(());
                };
                // A handler may close the window or rebuild its widgets; the
                // handlers left behind are skipped.
                for route in routes {
                    if !window.is_open() {
                        break;
                    }
                    match route {
                        Route::Command { widget, .. } if !widget.is_alive() => continue,
                        Route::Command { name, widget } => window.dispatch(&name, &widget)?,
                        Route::Script { name } => window.run(Some(&name))?,
                    }
                }
                Ok(())
            }
            NativeEvent::ValueChanged { widget, value } => {
                match self.windows().iter().find_map(|w| w.find_native_widget(widget)) {
                    Some(target) => target.accept_native_value(value),
                    None => Ok(()),
                }
            }
            NativeEvent::CloseRequested { window } => {
                match self.windows().into_iter().find(|w| w.native_handle() == window) {
                    Some(target) => target.close(),
                    None => Ok(()),
                }
            }
        }
    }

    // ── dialogs ───────────────────────────────────────────────────────────

    fn dialog(&self, kind: DialogKind, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        let title = title.unwrap_or(&self.0.name);
        log::debug!("{kind:?} dialog \"{title}\": {message}");
        self.0.toolkit.borrow_mut().dialog(kind, title, message)
    }

    pub fn show_error(&self, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        self.dialog(DialogKind::Error, message, title)
    }

    pub fn show_info(&self, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        self.dialog(DialogKind::Info, message, title)
    }

    pub fn show_warning(&self, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        self.dialog(DialogKind::Warning, message, title)
    }

    pub fn ask_yes_no(&self, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        self.dialog(DialogKind::YesNo, message, title)
    }

    pub fn ask_ok_cancel(&self, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        self.dialog(DialogKind::OkCancel, message, title)
    }

    pub fn ask_retry_cancel(&self, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        self.dialog(DialogKind::RetryCancel, message, title)
    }

    pub fn ask_yes_no_cancel(&self, message: &str, title: Option<&str>) -> Option<DialogAnswer> {
        self.dialog(DialogKind::YesNoCancel, message, title)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("name", &self.0.name)
            .field("root", &self.0.root)
            .field("main", &self.0.main)
            .field("windows", &self.0.windows.borrow().len())
            .finish()
    }
}

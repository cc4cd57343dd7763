//! Vellum UI: declarative windows driven by interface documents.
//!
//! An application is a directory of documents (a manifest, window
//! interfaces and localization tables) plus a set of named handlers. The
//! [`Host`] loads the documents, builds [`Window`]s through a [`Toolkit`]
//! backend and routes user events to the handlers.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use vellum_ui::prelude::*;
//!
//! fn main() -> vellum_ui::Result<()> {
//!     let host = HostBuilder::from_manifest("demos/console")?
//!         .command("valid", |window, entry| {
//!             let text = entry.text()?;
//!             window.by_tag("result")?.set_text(&text)?;
//!             entry.clear()
//!         })
//!         .build();
//!     host.run_main()
//! }
//! ```
//!
//! # Handlers
//!
//! Scripts take the window; commands take the window and the widget that
//! fired them. Both return [`Result`]; a failing handler is logged by the
//! event loop and the loop carries on.
//!
//! # Backends
//!
//! Implement [`Toolkit`] to drive a native GUI library. [`HeadlessToolkit`]
//! keeps everything in memory and is the default.

pub mod cell;
pub mod error;
pub mod headless;
pub mod host;
pub mod logging;
pub mod toolkit;
pub mod widget;
pub mod window;

pub use cell::{SubscriptionId, ValueCell};
pub use error::{Error, Result};
pub use headless::{HeadlessToolkit, Input, Target};
pub use host::{CommandFn, Host, HostBuilder, ScriptFn};
pub use toolkit::{DialogAnswer, DialogKind, NativeEvent, NativeHandle, SharedToolkit, Toolkit, ToolkitError};
pub use widget::{Widget, WidgetId};
pub use window::{Phase, Window, WindowId};

/// Re-export of the document layer.
pub use vellum_doc as doc;

/// Everything an application needs to register handlers and run.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::headless::{HeadlessToolkit, Input, Target};
    pub use crate::host::{Host, HostBuilder};
    pub use crate::toolkit::{DialogAnswer, Toolkit};
    pub use crate::widget::Widget;
    pub use crate::window::Window;

    pub use vellum_doc::{CellValue, InterfaceDescriptor, Localization, Placement, Size};
}

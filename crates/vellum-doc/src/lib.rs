//! Interface and localization documents for **vellum**.
//!
//! Turns a window document (a generic tree of maps, sequences and scalars)
//! plus an optional localization table into validated, toolkit-agnostic
//! descriptors. Nothing here touches a GUI toolkit; the runtime in
//! `vellum-ui` consumes these descriptors.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`resource`] | `load_document`, `locate`, TOML/JSON [`Format`] |
//! | [`localization`] | [`Localization`] tables, `$key$` resolution |
//! | [`position`] | [`Position`] schemes and their parsing |
//! | [`widget`] | [`WidgetDescriptor`], [`WidgetKind`], the capability table |
//! | [`interface`] | [`InterfaceDescriptor`], [`Size`], [`Placement`] |
//! | [`error`] | [`DocError`] |
//!
//! # Quick start
//!
//! ```rust
//! use vellum_doc::{Format, InterfaceDescriptor, Localization, parse_str};
//!
//! let doc = parse_str(r#"
//!     title = "$title$"
//!     size  = "320, 90"
//!
//!     [[widgets]]
//!     type   = "entry"
//!     tag    = "command"
//!     action = "valid"
//! "#, Format::Toml).unwrap();
//!
//! let en = Localization::from_pairs(Some("en"), [("title", "Console")]);
//! let iface = InterfaceDescriptor::parse(doc, Some(&en)).unwrap();
//! assert_eq!(iface.title, "Console");
//! assert_eq!(iface.widgets[0].tag.as_deref(), Some("command"));
//! ```

pub mod error;
pub mod interface;
pub mod localization;
pub mod position;
pub mod resource;
pub mod widget;

pub use error::{DocError, Result};
pub use interface::{InterfaceDescriptor, Placement, Size};
pub use localization::Localization;
pub use position::{Position, Side};
pub use resource::{Format, load_document, locate, parse_str};
pub use widget::{ActionKind, Capabilities, CellKind, CellValue, EventBinding, WidgetDescriptor, WidgetKind};

/// The generic document tree.
pub use serde_json::{Map, Value};

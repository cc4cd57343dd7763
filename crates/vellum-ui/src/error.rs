use thiserror::Error;
use vellum_doc::DocError;

use crate::toolkit::ToolkitError;
use crate::widget::WidgetId;

/// Everything that can go wrong in the runtime layer.
///
/// Document-level failures (`ResourceNotFound`, `InvalidWidget`,
/// `InvalidEvent`, ...) arrive wrapped in [`Error::Doc`]; use the
/// `is_*` helpers to test for them without matching the nesting.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Doc(#[from] DocError),

    /// No script is registered under the name.
    #[error("script not found: `{0}`")]
    ScriptNotFound(String),

    /// No command is registered under the name. A specialization of
    /// [`Error::ScriptNotFound`]: [`Error::is_script_not_found`] is true
    /// for both.
    #[error("command not found: `{0}`")]
    CommandNotFound(String),

    #[error("no widget tagged `{0}`")]
    UnknownTag(String),

    #[error("no widget at index {0}")]
    NoSuchWidget(usize),

    #[error("widget #{0} has no value cell")]
    NoValueCell(WidgetId),

    #[error("widget #{widget} cannot hold {value:?}")]
    InvalidValue { widget: WidgetId, value: String },

    #[error("widget #{0} has been destroyed")]
    WidgetDestroyed(WidgetId),

    #[error("window already closed")]
    WindowClosed,

    #[error("application host has been dropped")]
    HostGone,

    /// A toolkit failure with no widget to attribute it to.
    #[error("toolkit: {0}")]
    Toolkit(#[from] ToolkitError),

    /// Failures raised by application handlers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True for unresolved scripts and unresolved commands.
    pub fn is_script_not_found(&self) -> bool {
        matches!(self, Error::ScriptNotFound(_) | Error::CommandNotFound(_))
    }

    pub fn is_command_not_found(&self) -> bool {
        matches!(self, Error::CommandNotFound(_))
    }

    pub fn is_resource_not_found(&self) -> bool {
        matches!(self, Error::Doc(DocError::ResourceNotFound { .. }))
    }

    /// The widget ordinal of an invalid-widget failure.
    pub fn invalid_widget_index(&self) -> Option<usize> {
        match self {
            Error::Doc(e) => e.widget_index(),
            _ => None,
        }
    }

    /// Attach a widget ordinal to a toolkit failure raised while creating or
    /// configuring that widget.
    pub(crate) fn from_toolkit(index: usize, err: ToolkitError) -> Self {
        match err {
            ToolkitError::UnknownWidgetType(_) | ToolkitError::InvalidAttribute { .. } => {
                Error::Doc(DocError::invalid_widget(index, err.to_string()))
            }
            ToolkitError::InvalidEvent(event) => {
                Error::Doc(DocError::invalid_event(event, format!("not bindable on widget {index}")))
            }
            other => Error::Toolkit(other),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

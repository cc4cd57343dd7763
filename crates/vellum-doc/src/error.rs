use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading documents or building descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    /// A required document, localization or icon file does not exist.
    #[error("resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    /// The file exists but could not be read or parsed.
    #[error("failed to load {}: {message}", path.display())]
    Document { path: PathBuf, message: String },

    /// A malformed widget declaration. `index` is the widget's 0-based
    /// ordinal within its interface's widget list.
    #[error("invalid widget at position {index}: {reason}")]
    InvalidWidget { index: usize, reason: String },

    /// A malformed top-level interface field (`size`, `pos`, ...).
    #[error("invalid `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// An event entry that cannot be bound.
    #[error("invalid event {entry:?}: {reason}")]
    InvalidEvent { entry: String, reason: String },
}

impl DocError {
    pub fn invalid_widget(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidWidget { index, reason: reason.into() }
    }

    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField { field, reason: reason.into() }
    }

    pub fn invalid_event(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEvent { entry: entry.into(), reason: reason.into() }
    }

    /// The widget ordinal carried by [`DocError::InvalidWidget`].
    pub fn widget_index(&self) -> Option<usize> {
        match self {
            Self::InvalidWidget { index, .. } => Some(*index),
            _ => None,
        }
    }
}

pub type Result<T, E = DocError> = std::result::Result<T, E>;

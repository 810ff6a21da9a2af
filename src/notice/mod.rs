//! Notice feature - modal, input-blocking notifications.
//!
//! A notice is the report channel for submission results and precondition
//! failures. While one is visible it captures all keyboard input; only the
//! dismiss keys do anything.

pub mod ui;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational (successful submission).
    Info,
    /// Error (missing file, failed submission).
    Error,
}

/// A modal notification.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Severity, controls the overlay styling.
    pub level: NoticeLevel,
    /// Message shown to the user.
    pub message: String,
}

impl Notice {
    /// Create an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Create an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

//! User-visible notifications.

/// Auto-dismiss delay for toasts, in milliseconds.
pub const TOAST_TIMEOUT_MS: u32 = 10_000;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Green.
    Success,
    /// Red.
    Error,
    /// Neutral.
    Info,
}

impl NoticeKind {
    /// CSS modifier.
    pub const fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "toast-success",
            NoticeKind::Error => "toast-error",
            NoticeKind::Info => "toast-info",
        }
    }
}

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Text.
    pub message: String,
}

impl Notice {
    /// Success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Neutral toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

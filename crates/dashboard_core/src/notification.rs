#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "alert-info",
            Severity::Success => "alert-success",
            Severity::Warning => "alert-warning",
            Severity::Danger => "alert-danger",
        }
    }
}

/// Floating status message shown to the user (status label, text, level).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub status: String,
    pub message: String,
    pub level: Severity,
}

impl Notification {
    pub fn new(status: impl Into<String>, message: impl Into<String>, level: Severity) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            level,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new("Warning!", message, Severity::Warning)
    }
}

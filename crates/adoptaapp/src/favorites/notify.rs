use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        f.write_str(label)
    }
}

/// User-facing notification sink (a toast, a status line, a log).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

impl<F> Notifier for F
where
    F: Fn(&str, NotificationKind) + Send + Sync,
{
    fn notify(&self, message: &str, kind: NotificationKind) {
        self(message, kind)
    }
}

//! User-facing notifications emitted by the session store.
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Fire-and-forget channel for toasts.
pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// Buffers notices until the host drains them into its toast stack.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Notice> {
        self.pending.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl NotificationSink for NoticeQueue {
    fn notify(&mut self, notice: Notice) {
        self.pending.push_back(notice);
    }
}

/// Sink that only forwards to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Error => log::error!("{}", notice.message),
            Severity::Warning => log::warn!("{}", notice.message),
            Severity::Success | Severity::Info => log::info!("{}", notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_order() {
        let mut queue = NoticeQueue::new();
        queue.notify(Notice::new(Severity::Info, "first"));
        queue.notify(Notice::new(Severity::Error, "second"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.last().map(|n| n.severity), Some(Severity::Error));
        let drained = queue.drain();
        assert_eq!(drained[0].message, "first");
        assert!(queue.is_empty());
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}

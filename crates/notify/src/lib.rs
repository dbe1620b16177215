// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Transient user-facing notifications.
//!
//! Store actions report outcomes to the person driving the console through
//! short-lived notices (the equivalent of toast messages). The embedding UI
//! drains the queue and renders each notice once. Every push is also written
//! to the log so headless runs keep a record.

use std::sync::{Arc, Mutex};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An operation completed successfully.
    Success,
    /// An operation failed; the message explains what went wrong.
    Error,
    /// Something degraded but the operation continued.
    Warning,
    /// Neutral information.
    Info,
}

impl NoticeLevel {
    /// Converts this level to its display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A single transient notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The severity of this notice.
    pub level: NoticeLevel,
    /// The message shown to the user.
    pub message: String,
}

impl Notice {
    /// Creates a new notice.
    ///
    /// # Arguments
    ///
    /// * `level` - The severity of this notice
    /// * `message` - The message shown to the user
    #[must_use]
    pub const fn new(level: NoticeLevel, message: String) -> Self {
        Self { level, message }
    }
}

/// A cloneable handle to a queue of pending notices.
///
/// Handles share one queue; any number of stores may hold a clone. The UI
/// drains pending notices with [`Notifier::drain`] after each action.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notice>>>,
}

impl Notifier {
    /// Creates a new notifier with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a success notice.
    pub fn success(&self, message: impl Into<String>) {
        let message: String = message.into();
        tracing::info!(notice = "success", "{message}");
        self.push(Notice::new(NoticeLevel::Success, message));
    }

    /// Pushes an error notice.
    pub fn error(&self, message: impl Into<String>) {
        let message: String = message.into();
        tracing::error!(notice = "error", "{message}");
        self.push(Notice::new(NoticeLevel::Error, message));
    }

    /// Pushes a warning notice.
    pub fn warning(&self, message: impl Into<String>) {
        let message: String = message.into();
        tracing::warn!(notice = "warning", "{message}");
        self.push(Notice::new(NoticeLevel::Warning, message));
    }

    /// Pushes an informational notice.
    pub fn info(&self, message: impl Into<String>) {
        let message: String = message.into();
        tracing::info!(notice = "info", "{message}");
        self.push(Notice::new(NoticeLevel::Info, message));
    }

    /// Removes and returns all pending notices in push order.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }

    /// Returns the number of pending notices.
    #[must_use]
    pub fn pending(&self) -> usize {
        match self.queue.lock() {
            Ok(queue) => queue.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn push(&self, notice: Notice) {
        match self.queue.lock() {
            Ok(mut queue) => queue.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_drain_in_push_order() {
        let notifier: Notifier = Notifier::new();
        notifier.success("saved");
        notifier.error("failed");
        notifier.warning("degraded");

        let notices: Vec<Notice> = notifier.drain();
        assert_eq!(notices.len(), 3);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[0].message, "saved");
        assert_eq!(notices[1].level, NoticeLevel::Error);
        assert_eq!(notices[2].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_drain_empties_the_queue() {
        let notifier: Notifier = Notifier::new();
        notifier.info("hello");

        assert_eq!(notifier.pending(), 1);
        let _ = notifier.drain();
        assert_eq!(notifier.pending(), 0);
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn test_clones_share_one_queue() {
        let notifier: Notifier = Notifier::new();
        let handle: Notifier = notifier.clone();
        handle.success("from the clone");

        let notices: Vec<Notice> = notifier.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "from the clone");
    }

    #[test]
    fn test_level_names() {
        assert_eq!(NoticeLevel::Success.as_str(), "success");
        assert_eq!(NoticeLevel::Error.as_str(), "error");
        assert_eq!(NoticeLevel::Warning.as_str(), "warning");
        assert_eq!(NoticeLevel::Info.as_str(), "info");
    }
}

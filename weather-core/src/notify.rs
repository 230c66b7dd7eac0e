//! Transient, non-blocking user notifications.
//!
//! The core never prints; it hands messages to a [`Notifier`] and the front
//! end decides how to show them.

use parking_lot::Mutex;
use std::fmt::Debug;

pub trait Notifier: Send + Sync + Debug {
    fn error(&self, message: &str);
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(%message, "notification");
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_kept_in_order() {
        let n = RecordingNotifier::new();
        assert!(n.messages().is_empty());

        n.error("one");
        n.error("two");

        assert_eq!(n.messages(), vec!["one".to_string(), "two".to_string()]);
    }
}

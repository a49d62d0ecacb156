//! User-facing error messages.

use std::sync::Mutex;

/// Surfaces a message to the user.
pub trait ErrorReporter: Send + Sync {
    fn show_error(&self, message: &str);
}

/// Prints to stderr and records the message in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn show_error(&self, message: &str) {
        tracing::error!("{}", message);
        eprintln!("{}", message);
    }
}

/// Keeps reported messages in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ErrorReporter for CollectingReporter {
    fn show_error(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}

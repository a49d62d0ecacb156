//! Target version tracking.
//!
//! The current version can change while the process runs (e.g. a console
//! selecting another release); readers take whatever value is current at the
//! moment they ask.

use tokio::sync::watch;

/// Version used when nothing else is configured.
pub const DEFAULT_TARGET_VERSION: &str = "2.4.0";

/// Synchronous access to the current target version.
pub trait VersionSource: Send + Sync {
    fn current(&self) -> String;
}

/// Holds the current target version and notifies subscribers on change.
#[derive(Debug)]
pub struct VersionTracker {
    tx: watch::Sender<String>,
}

impl VersionTracker {
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(initial.into());
        Self { tx }
    }

    /// Publishes a new current version.
    pub fn set(&self, version: impl Into<String>) {
        let version = version.into();
        tracing::debug!(version = %version, "target version changed");
        self.tx.send_replace(version);
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for VersionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_VERSION)
    }
}

impl VersionSource for VersionTracker {
    fn current(&self) -> String {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tracker_starts_at_default_version() {
        assert_eq!(VersionTracker::default().current(), DEFAULT_TARGET_VERSION);
    }

    #[test]
    fn set_replaces_current_without_subscribers() {
        let t = VersionTracker::new("2.5.0");
        t.set("2.7.0");
        assert_eq!(t.current(), "2.7.0");
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let t = VersionTracker::new("2.5.0");
        let mut rx = t.subscribe();
        t.set("2.6.0");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "2.6.0");
    }
}

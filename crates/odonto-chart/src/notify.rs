//! Outward notification channel for chart operations.
//!
//! Success and failure messages ("Tooth record removed", "Failed to clear
//! records") are reported through a [`Notifier`] so the UI layer can toast
//! them. Session correctness never depends on this channel.

use tracing::{error, info};

pub trait Notifier: Send + Sync {
  fn success(&self, message: &str);
  fn error(&self, message: &str);
}

/// Routes notifications into the tracing log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
  fn success(&self, message: &str) {
    info!("{message}");
  }

  fn error(&self, message: &str) {
    error!("{message}");
  }
}

/// Discards all notifications.
pub struct NullNotifier;

impl Notifier for NullNotifier {
  fn success(&self, _message: &str) {}

  fn error(&self, _message: &str) {}
}

//! Error types for `odonto-chart`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The caller attempted to annotate without an active surface selection.
  /// Raised before any network call.
  #[error("no tooth surface is selected")]
  NoSurfaceSelected,

  /// No patient chart is loaded into the session.
  #[error("no patient chart is loaded")]
  NoChart,

  #[error("a clear operation is already in flight")]
  ClearInFlight,

  /// Bulk clear finished with some deletes unconfirmed. The mirror retains
  /// exactly the listed records.
  #[error("failed to clear {} of the patient's records", failed.len())]
  ClearIncomplete { failed: Vec<Uuid> },

  #[error("core error: {0}")]
  Core(#[from] odonto_core::Error),

  #[error("backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn backend(
    e: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Backend(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

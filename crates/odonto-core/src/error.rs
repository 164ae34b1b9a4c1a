//! Error types for `odonto-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("tooth number {0} is outside the four FDI arches")]
  InvalidToothNumber(u8),

  #[error("unknown condition id: {0:?}")]
  UnknownCondition(String),

  #[error("unknown surface position: {0:?}")]
  UnknownPosition(String),

  #[error("unparsable tooth number: {0:?}")]
  UnparsableToothNumber(String),

  #[error("document {0} is missing required field {1:?}")]
  MissingField(Uuid, &'static str),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

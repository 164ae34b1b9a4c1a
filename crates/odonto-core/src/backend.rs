//! The `DocumentBackend` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `odonto-store-sqlite`).
//! Higher layers (`odonto-chart`, `odonto-cli`) depend on this abstraction,
//! not on any concrete backend. It mirrors the hosted document-database
//! surface the chart was designed against: flat documents with string fields,
//! equality filters, a result limit, and an optional ordering.

use std::{collections::BTreeMap, future::Future};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Documents ───────────────────────────────────────────────────────────────

/// The flat field map of a document. All values travel as strings; nested
/// structures are string-encoded by the wire adapter before they get here.
pub type Fields = BTreeMap<String, String>;

/// Server-assigned document metadata. Never part of an update payload —
/// callers send [`Fields`] only, so stale metadata cannot be written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
  pub id:         Uuid,
  pub collection: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A stored document: metadata plus its field map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub meta:   DocumentMeta,
  pub fields: Fields,
}

// ─── Query ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  Ascending,
  Descending,
}

/// Sort key for [`DocumentQuery`]. Comparison is numeric-aware: values that
/// parse as numbers compare numerically, everything else lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
  pub field:     String,
  pub direction: SortDirection,
}

/// Parameters for [`DocumentBackend::list_documents`].
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
  /// Equality filters; a document matches when every listed field equals the
  /// given value.
  pub equals: Vec<(String, String)>,
  pub order:  Option<OrderBy>,
  pub limit:  Option<usize>,
}

impl DocumentQuery {
  pub fn new() -> Self { Self::default() }

  pub fn equal(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
    self.equals.push((field.into(), value.into()));
    self
  }

  pub fn order_desc(mut self, field: impl Into<String>) -> Self {
    self.order = Some(OrderBy {
      field:     field.into(),
      direction: SortDirection::Descending,
    });
    self
  }

  pub fn order_asc(mut self, field: impl Into<String>) -> Self {
    self.order = Some(OrderBy {
      field:     field.into(),
      direction: SortDirection::Ascending,
    });
    self
  }

  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the external document store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait DocumentBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List documents in `collection` matching `query`, in query order.
  fn list_documents<'a>(
    &'a self,
    collection: &'a str,
    query: DocumentQuery,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;

  /// Create a document with a caller-supplied unique id.
  fn create_document<'a>(
    &'a self,
    collection: &'a str,
    id: Uuid,
    fields: Fields,
  ) -> impl Future<Output = Result<Document, Self::Error>> + Send + 'a;

  /// Replace the fields of an existing document; metadata timestamps are
  /// advanced by the backend. Fails if the document does not exist.
  fn update_document<'a>(
    &'a self,
    collection: &'a str,
    id: Uuid,
    fields: Fields,
  ) -> impl Future<Output = Result<Document, Self::Error>> + Send + 'a;

  /// Delete one document. Fails if the document does not exist.
  fn delete_document<'a>(
    &'a self,
    collection: &'a str,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

//! [`SqliteBackend`] — the SQLite implementation of
//! [`DocumentBackend`](odonto_core::backend::DocumentBackend).

use std::{cmp::Ordering, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use odonto_core::backend::{
  Document, DocumentBackend, DocumentMeta, DocumentQuery, Fields,
  SortDirection,
};

use crate::{
  Error, Result,
  encode::{RawDocument, decode_dt, encode_dt, encode_fields, encode_uuid},
  schema::SCHEMA,
};

// ─── Backend ─────────────────────────────────────────────────────────────────

/// An Odonto document store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteBackend {
  conn: tokio_rusqlite::Connection,
}

impl SqliteBackend {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Select and decode every document of one collection.
  async fn collection_documents(
    &self,
    collection: &str,
  ) -> Result<Vec<Document>> {
    let collection = collection.to_owned();
    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT document_id, collection_id, created_at, updated_at, fields
             FROM documents WHERE collection_id = ?1",
        )?;
        let rows = stmt.query_map(rusqlite::params![collection], |r| {
          Ok(RawDocument {
            document_id:   r.get(0)?,
            collection_id: r.get(1)?,
            created_at:    r.get(2)?,
            updated_at:    r.get(3)?,
            fields:        r.get(4)?,
          })
        })?;
        let mut out = Vec::new();
        for row in rows {
          out.push(row?);
        }
        Ok(out)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }
}

/// Numeric-aware field comparison: values that both parse as numbers compare
/// numerically (so a priority of "10" sorts above "2"), everything else
/// lexicographically.
fn field_cmp(a: &str, b: &str) -> Ordering {
  match (a.parse::<f64>(), b.parse::<f64>()) {
    (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    _ => a.cmp(b),
  }
}

// ─── DocumentBackend impl ────────────────────────────────────────────────────

impl DocumentBackend for SqliteBackend {
  type Error = Error;

  /// Equality filters, ordering and the limit are applied after
  /// materialising the collection's rows; collections here are clinic-sized.
  async fn list_documents(
    &self,
    collection: &str,
    query: DocumentQuery,
  ) -> Result<Vec<Document>> {
    let mut docs = self.collection_documents(collection).await?;

    docs.retain(|d| {
      query
        .equals
        .iter()
        .all(|(field, value)| d.fields.get(field) == Some(value))
    });

    if let Some(order) = &query.order {
      docs.sort_by(|a, b| {
        let av = a.fields.get(&order.field).map(String::as_str).unwrap_or("");
        let bv = b.fields.get(&order.field).map(String::as_str).unwrap_or("");
        let ord = field_cmp(av, bv);
        match order.direction {
          SortDirection::Ascending => ord,
          SortDirection::Descending => ord.reverse(),
        }
      });
    }

    if let Some(limit) = query.limit {
      docs.truncate(limit);
    }
    Ok(docs)
  }

  async fn create_document(
    &self,
    collection: &str,
    id: Uuid,
    fields: Fields,
  ) -> Result<Document> {
    let now = Utc::now();
    let id_str = encode_uuid(id);
    let collection_str = collection.to_owned();
    let now_str = encode_dt(now);
    let fields_str = encode_fields(&fields)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents
             (document_id, collection_id, created_at, updated_at, fields)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, collection_str, now_str, now_str, fields_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(Document {
      meta: DocumentMeta {
        id,
        collection: collection.to_owned(),
        created_at: now,
        updated_at: now,
      },
      fields,
    })
  }

  async fn update_document(
    &self,
    collection: &str,
    id: Uuid,
    fields: Fields,
  ) -> Result<Document> {
    let now = Utc::now();
    let id_str = encode_uuid(id);
    let collection_str = collection.to_owned();
    let now_str = encode_dt(now);
    let fields_str = encode_fields(&fields)?;

    let created_at_str: Option<String> = self
      .conn
      .call(move |conn| {
        let created: Option<String> = conn
          .query_row(
            "SELECT created_at FROM documents
              WHERE document_id = ?1 AND collection_id = ?2",
            rusqlite::params![id_str, collection_str],
            |r| r.get(0),
          )
          .optional()?;

        if created.is_some() {
          conn.execute(
            "UPDATE documents SET fields = ?1, updated_at = ?2
              WHERE document_id = ?3",
            rusqlite::params![fields_str, now_str, id_str],
          )?;
        }
        Ok(created)
      })
      .await?;

    let created_at_str = created_at_str.ok_or(Error::DocumentNotFound(id))?;

    Ok(Document {
      meta: DocumentMeta {
        id,
        collection: collection.to_owned(),
        created_at: decode_dt(&created_at_str)?,
        updated_at: now,
      },
      fields,
    })
  }

  async fn delete_document(&self, collection: &str, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let collection_str = collection.to_owned();

    let affected: usize = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "DELETE FROM documents
            WHERE document_id = ?1 AND collection_id = ?2",
          rusqlite::params![id_str, collection_str],
        )?;
        Ok(affected)
      })
      .await?;

    if affected == 0 {
      return Err(Error::DocumentNotFound(id));
    }
    Ok(())
  }
}

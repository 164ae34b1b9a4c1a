//! SQL schema for the Odonto SQLite document store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per document, mirroring the hosted document-database shape:
-- server-assigned metadata columns plus a flat JSON object of string fields.
CREATE TABLE IF NOT EXISTS documents (
    document_id   TEXT PRIMARY KEY,
    collection_id TEXT NOT NULL,
    created_at    TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at    TEXT NOT NULL,   -- ISO 8601 UTC; advanced on every update
    fields        TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS documents_collection_idx
    ON documents(collection_id);

PRAGMA user_version = 1;
";

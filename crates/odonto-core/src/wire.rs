//! The serialization adapter between domain types and document fields.
//!
//! The backend stores flat string fields; the per-tooth surface map travels
//! inside the `surfaces` field as a JSON string of the shape
//! `{ "<position>": { "id", "abbr", "note" } | null }`. Encoding and decoding
//! happen here and nowhere else — the encoded string never leaks into domain
//! logic.
//!
//! Decoding is deliberately lenient: a malformed payload yields an empty
//! surface map (logged, never surfaced), and an unknown position or condition
//! id skips that entry rather than failing the whole record. A chart must
//! render even when one stored blob has rotted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
  Error, Result,
  backend::{Document, Fields},
  chart::{PatientId, StoredRecord, SurfaceFinding, Surfaces, ToothRecord},
  condition::Condition,
  surface::SurfacePosition,
  tooth::ToothNumber,
};

// ─── Field names ─────────────────────────────────────────────────────────────

pub const FIELD_PATIENT_ID: &str = "patientId";
pub const FIELD_TOOTH_NUMBER: &str = "toothNumber";
pub const FIELD_SURFACES: &str = "surfaces";

// ─── Surfaces codec ──────────────────────────────────────────────────────────

/// One entry of the wire-format surface map. `abbr` is written for the
/// benefit of non-domain readers of the raw document; on read it is ignored
/// and re-derived from `id`.
#[derive(Debug, Serialize, Deserialize)]
struct WireFinding {
  id:   String,
  #[serde(default)]
  abbr: String,
  #[serde(default)]
  note: String,
}

/// Encode a surface map to its wire string.
pub fn encode_surfaces(surfaces: &Surfaces) -> Result<String> {
  let wire: BTreeMap<&'static str, WireFinding> = surfaces
    .iter()
    .map(|(position, finding)| {
      (position.as_str(), WireFinding {
        id:   finding.condition.id().to_owned(),
        abbr: finding.abbreviation().to_owned(),
        note: finding.note.clone(),
      })
    })
    .collect();
  Ok(serde_json::to_string(&wire)?)
}

/// Decode a wire string back to a surface map.
///
/// Never fails: malformed JSON yields the empty map, explicit `null` entries
/// mean "no finding", and unrecognised positions or condition ids are
/// skipped. All recoveries are logged at warn.
pub fn decode_surfaces(raw: &str) -> Surfaces {
  let parsed: BTreeMap<String, Option<WireFinding>> =
    match serde_json::from_str(raw) {
      Ok(map) => map,
      Err(error) => {
        warn!(%error, "malformed surfaces payload, substituting empty map");
        return Surfaces::default();
      }
    };

  let mut surfaces = Surfaces::default();
  for (key, entry) in parsed {
    let Some(wire) = entry else { continue };
    let position = match SurfacePosition::parse(&key) {
      Ok(p) => p,
      Err(error) => {
        warn!(%error, "skipping surface entry with unknown position");
        continue;
      }
    };
    let condition = match Condition::from_id(&wire.id) {
      Ok(c) => c,
      Err(error) => {
        warn!(%error, "skipping surface entry with unknown condition");
        continue;
      }
    };
    surfaces.apply(position, Some(SurfaceFinding::new(condition, &wire.note)));
  }
  surfaces
}

// ─── Record ↔ fields ─────────────────────────────────────────────────────────

/// Build the document field map for a tooth record. The tooth number is
/// string-typed on the wire.
pub fn record_to_fields(record: &ToothRecord) -> Result<Fields> {
  let mut fields = Fields::new();
  fields.insert(FIELD_PATIENT_ID.to_owned(), record.patient.to_string());
  fields.insert(FIELD_TOOTH_NUMBER.to_owned(), record.tooth.to_string());
  fields.insert(FIELD_SURFACES.to_owned(), encode_surfaces(&record.surfaces)?);
  Ok(fields)
}

/// Rebuild a stored record from a backend document.
///
/// The patient id and tooth number are required and must parse; a document
/// with neither is unrenderable and fails the load. The surfaces field is
/// optional and decoded leniently ([`decode_surfaces`]).
pub fn record_from_document(doc: &Document) -> Result<StoredRecord> {
  let patient = doc
    .fields
    .get(FIELD_PATIENT_ID)
    .ok_or(Error::MissingField(doc.meta.id, FIELD_PATIENT_ID))?;

  let tooth_raw = doc
    .fields
    .get(FIELD_TOOTH_NUMBER)
    .ok_or(Error::MissingField(doc.meta.id, FIELD_TOOTH_NUMBER))?;
  let tooth: ToothNumber = tooth_raw.parse()?;

  let surfaces = doc
    .fields
    .get(FIELD_SURFACES)
    .map(|raw| decode_surfaces(raw))
    .unwrap_or_default();

  Ok(StoredRecord {
    meta:   doc.meta.clone(),
    record: ToothRecord {
      patient: PatientId::new(patient.clone()),
      tooth,
      surfaces,
    },
  })
}

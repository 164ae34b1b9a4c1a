//! Chart types — per-surface findings, per-tooth records, and the per-patient
//! aggregate.
//!
//! Surfaces are sparse: an absent entry means no finding (healthy/unset).
//! Records are only ever updated by merging one surface's annotation at a
//! time; the whole chart can be cleared, but a record is never partially
//! deleted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  backend::DocumentMeta,
  condition::Condition,
  surface::SurfacePosition,
  tooth::ToothNumber,
};

// ─── PatientId ───────────────────────────────────────────────────────────────

/// Opaque identifier for a patient; the chart's owning key.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for PatientId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── SurfaceFinding ──────────────────────────────────────────────────────────

/// A single annotated surface: which condition, plus a free-text clinical
/// note. The display abbreviation is derived from the condition, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceFinding {
  pub condition: Condition,
  pub note:      String,
}

impl SurfaceFinding {
  /// Build a finding; the note is trimmed on the way in.
  pub fn new(condition: Condition, note: &str) -> Self {
    Self {
      condition,
      note: note.trim().to_owned(),
    }
  }

  pub fn abbreviation(&self) -> &'static str { self.condition.abbreviation() }
}

// ─── Surfaces ────────────────────────────────────────────────────────────────

/// A partial update: for each listed position, a new finding or an explicit
/// clear. Unlisted positions are untouched.
pub type SurfaceDelta = BTreeMap<SurfacePosition, Option<SurfaceFinding>>;

/// The sparse surface map of one tooth. Absent positions carry no finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Surfaces(BTreeMap<SurfacePosition, SurfaceFinding>);

impl Surfaces {
  pub fn get(&self, position: SurfacePosition) -> Option<&SurfaceFinding> {
    self.0.get(&position)
  }

  /// Set or clear one position, leaving every other position untouched.
  pub fn apply(
    &mut self,
    position: SurfacePosition,
    finding: Option<SurfaceFinding>,
  ) {
    match finding {
      Some(f) => {
        self.0.insert(position, f);
      }
      None => {
        self.0.remove(&position);
      }
    }
  }

  /// Apply a whole delta, one position at a time.
  pub fn merge(&mut self, delta: SurfaceDelta) {
    for (position, finding) in delta {
      self.apply(position, finding);
    }
  }

  pub fn iter(
    &self,
  ) -> impl Iterator<Item = (SurfacePosition, &SurfaceFinding)> {
    self.0.iter().map(|(p, f)| (*p, f))
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }
}

impl FromIterator<(SurfacePosition, SurfaceFinding)> for Surfaces {
  fn from_iter<I: IntoIterator<Item = (SurfacePosition, SurfaceFinding)>>(
    iter: I,
  ) -> Self {
    Self(iter.into_iter().collect())
  }
}

// ─── ToothRecord ─────────────────────────────────────────────────────────────

/// The domain payload of one chart document: one tooth of one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothRecord {
  pub patient:  PatientId,
  pub tooth:    ToothNumber,
  pub surfaces: Surfaces,
}

/// A tooth record together with its server-assigned document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
  pub meta:   DocumentMeta,
  pub record: ToothRecord,
}

// ─── Chart ───────────────────────────────────────────────────────────────────

/// One line of the printable findings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
  pub tooth:    ToothNumber,
  /// e.g. `"CENTER: C, TOP: Am"`.
  pub findings: String,
}

/// All stored tooth records for one patient, keyed by tooth.
#[derive(Debug, Clone, Default)]
pub struct Chart {
  records: BTreeMap<ToothNumber, StoredRecord>,
}

impl Chart {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, tooth: ToothNumber) -> Option<&StoredRecord> {
    self.records.get(&tooth)
  }

  /// Splice a canonical record returned by the backend into the chart:
  /// replaces any existing record for the same tooth, inserts otherwise.
  pub fn upsert(&mut self, stored: StoredRecord) {
    self.records.insert(stored.record.tooth, stored);
  }

  /// Drop the record with the given document id, if present.
  pub fn remove_document(&mut self, id: Uuid) -> Option<StoredRecord> {
    let tooth = self
      .records
      .values()
      .find(|r| r.meta.id == id)
      .map(|r| r.record.tooth)?;
    self.records.remove(&tooth)
  }

  /// Document ids of every record, in tooth order.
  pub fn document_ids(&self) -> Vec<Uuid> {
    self.records.values().map(|r| r.meta.id).collect()
  }

  pub fn records(&self) -> impl Iterator<Item = &StoredRecord> {
    self.records.values()
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Findings table rows for the printable report: one row per annotated
  /// tooth, positions uppercased, abbreviations from the vocabulary.
  pub fn summary_rows(&self) -> Vec<SummaryRow> {
    self
      .records
      .values()
      .map(|stored| {
        let findings = stored
          .record
          .surfaces
          .iter()
          .map(|(position, finding)| {
            format!(
              "{}: {}",
              position.as_str().to_uppercase(),
              finding.abbreviation()
            )
          })
          .collect::<Vec<_>>()
          .join(", ");
        SummaryRow {
          tooth: stored.record.tooth,
          findings,
        }
      })
      .collect()
  }
}

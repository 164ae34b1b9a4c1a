//! [`ChartSession`] — per-patient chart state orchestration.
//!
//! The session moves through an explicit phase machine:
//! `Idle → Loading → Ready` on init, `Ready → Saving → Ready` on upsert and
//! remove, `Ready → Clearing → Idle` (or back to `Ready` on partial failure)
//! on clear. Phases are advisory for callers that want to disable controls;
//! the hard guarantees are on the mirror, which only ever reflects writes the
//! backend has confirmed.

use std::sync::Arc;

use futures::future;
use tracing::{debug, warn};
use uuid::Uuid;

use odonto_core::{
  backend::{DocumentBackend, DocumentQuery},
  chart::{Chart, PatientId, StoredRecord, SurfaceDelta, SurfaceFinding, Surfaces, ToothRecord},
  condition::Condition,
  surface::SurfacePosition,
  tooth::ToothNumber,
  wire,
};

use crate::{Error, Result, notify::Notifier};

/// The backend collection that holds chart documents.
pub const CHART_COLLECTION: &str = "dentalchart";

/// Page cap on the initial fetch. A chart has at most 52 teeth, well under
/// the cap, so no further pagination is done.
const FETCH_LIMIT: usize = 100;

// ─── Phase & selection ───────────────────────────────────────────────────────

/// Where the session is in its lifecycle. Advisory: callers use it to grey
/// out controls while an operation is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Loading,
  Ready,
  Saving,
  Clearing,
}

/// The surface the user currently has selected on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
  pub tooth:   ToothNumber,
  pub surface: SurfacePosition,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// One patient's chart, mirrored from the backend.
///
/// Constructed per application session and passed to consumers; there is no
/// ambient global store. Call [`init`](Self::init) to load a patient and
/// [`dispose`](Self::dispose) when done.
pub struct ChartSession<B> {
  backend:  B,
  notifier: Arc<dyn Notifier>,
  patient:  Option<PatientId>,
  chart:    Chart,
  phase:    Phase,
}

impl<B: DocumentBackend> ChartSession<B> {
  pub fn new(backend: B, notifier: Arc<dyn Notifier>) -> Self {
    Self {
      backend,
      notifier,
      patient: None,
      chart: Chart::new(),
      phase: Phase::Idle,
    }
  }

  pub fn phase(&self) -> Phase { self.phase }

  pub fn is_busy(&self) -> bool {
    matches!(self.phase, Phase::Loading | Phase::Saving | Phase::Clearing)
  }

  pub fn patient(&self) -> Option<&PatientId> { self.patient.as_ref() }

  /// The in-memory mirror. Empty while no patient is loaded.
  pub fn chart(&self) -> &Chart { &self.chart }

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  /// Load `patient`'s chart, replacing the mirror wholesale with the
  /// backend's current record set.
  ///
  /// Documents that cannot be read at all (missing patient or tooth fields)
  /// are skipped with a warning rather than blocking the rest of the chart.
  pub async fn init(&mut self, patient: PatientId) -> Result<()> {
    self.phase = Phase::Loading;
    self.patient = None;
    self.chart = Chart::new();

    let query = DocumentQuery::new()
      .equal(wire::FIELD_PATIENT_ID, patient.as_str())
      .limit(FETCH_LIMIT);

    let docs = match self.backend.list_documents(CHART_COLLECTION, query).await
    {
      Ok(docs) => docs,
      Err(e) => {
        self.phase = Phase::Idle;
        self.notifier.error("Failed to load dental chart");
        return Err(Error::backend(e));
      }
    };

    let mut chart = Chart::new();
    for doc in &docs {
      match wire::record_from_document(doc) {
        Ok(stored) => chart.upsert(stored),
        Err(error) => {
          warn!(document = %doc.meta.id, %error, "skipping unreadable chart document");
        }
      }
    }

    debug!(%patient, records = chart.len(), "chart loaded");
    self.chart = chart;
    self.patient = Some(patient);
    self.phase = Phase::Ready;
    Ok(())
  }

  /// Drop the mirror and return to `Idle`.
  pub fn dispose(&mut self) {
    self.patient = None;
    self.chart = Chart::new();
    self.phase = Phase::Idle;
  }

  // ── Annotation ────────────────────────────────────────────────────────────

  /// Apply one condition (or a clear, when `condition` is `None`) to the
  /// selected surface, persisting the merged record.
  ///
  /// Fails before any network call when no surface is selected.
  pub async fn apply_annotation(
    &mut self,
    selection: Option<Selection>,
    condition: Option<Condition>,
    note: &str,
  ) -> Result<StoredRecord> {
    let Some(selection) = selection else {
      self.notifier.error("Please select a tooth surface first");
      return Err(Error::NoSurfaceSelected);
    };

    let finding = condition.map(|c| SurfaceFinding::new(c, note));
    let delta: SurfaceDelta =
      [(selection.surface, finding)].into_iter().collect();
    self.upsert_tooth(selection.tooth, delta).await
  }

  /// Merge `delta` onto any existing surfaces for `tooth` and persist:
  /// an update when the tooth already has a document, a create otherwise.
  /// The canonical record returned by the backend is spliced into the
  /// mirror.
  pub async fn upsert_tooth(
    &mut self,
    tooth: ToothNumber,
    delta: SurfaceDelta,
  ) -> Result<StoredRecord> {
    let patient = self.patient.clone().ok_or(Error::NoChart)?;
    if self.phase == Phase::Clearing {
      return Err(Error::ClearInFlight);
    }

    let (existing_id, mut surfaces) = match self.chart.get(tooth) {
      Some(stored) => (Some(stored.meta.id), stored.record.surfaces.clone()),
      None => (None, Surfaces::default()),
    };
    surfaces.merge(delta);

    let record = ToothRecord {
      patient,
      tooth,
      surfaces,
    };
    let fields = wire::record_to_fields(&record)?;

    self.phase = Phase::Saving;
    let result = match existing_id {
      Some(id) => {
        self
          .backend
          .update_document(CHART_COLLECTION, id, fields)
          .await
      }
      None => {
        self
          .backend
          .create_document(CHART_COLLECTION, Uuid::new_v4(), fields)
          .await
      }
    };
    self.phase = Phase::Ready;

    let doc = match result {
      Ok(doc) => doc,
      Err(e) => {
        self.notifier.error("Failed to save tooth record");
        return Err(Error::backend(e));
      }
    };

    let stored = wire::record_from_document(&doc)?;
    self.chart.upsert(stored.clone());
    self.notifier.success("Tooth record saved");
    debug!(%tooth, surfaces = stored.record.surfaces.len(), "tooth record saved");
    Ok(stored)
  }

  // ── Removal ───────────────────────────────────────────────────────────────

  /// Delete one tooth record. The mirror drops it only after the backend
  /// confirms the delete.
  pub async fn remove(&mut self, id: Uuid) -> Result<()> {
    if self.patient.is_none() {
      return Err(Error::NoChart);
    }
    if self.phase == Phase::Clearing {
      return Err(Error::ClearInFlight);
    }

    self.phase = Phase::Saving;
    let result = self.backend.delete_document(CHART_COLLECTION, id).await;
    self.phase = Phase::Ready;

    match result {
      Ok(()) => {
        self.chart.remove_document(id);
        self.notifier.success("Tooth record removed");
        Ok(())
      }
      Err(e) => {
        self.notifier.error("Failed to delete record");
        Err(Error::backend(e))
      }
    }
  }

  /// Delete every record of the loaded chart. Deletes are issued in
  /// parallel and joined; the outcome of each is collected individually.
  ///
  /// On full success the session returns to `Idle`. On partial failure the
  /// mirror retains exactly the records whose deletes were not confirmed and
  /// the failed document ids are returned in
  /// [`Error::ClearIncomplete`]. Only one clear may be in flight.
  pub async fn clear_all(&mut self) -> Result<()> {
    if self.patient.is_none() {
      return Err(Error::NoChart);
    }
    if self.phase == Phase::Clearing {
      return Err(Error::ClearInFlight);
    }
    self.phase = Phase::Clearing;

    let ids = self.chart.document_ids();
    let deletes = ids
      .iter()
      .map(|&id| self.backend.delete_document(CHART_COLLECTION, id));
    let outcomes = future::join_all(deletes).await;

    let mut failed = Vec::new();
    for (id, outcome) in ids.into_iter().zip(outcomes) {
      match outcome {
        Ok(()) => {
          self.chart.remove_document(id);
        }
        Err(error) => {
          warn!(document = %id, %error, "delete failed during chart clear");
          failed.push(id);
        }
      }
    }

    if failed.is_empty() {
      self.patient = None;
      self.phase = Phase::Idle;
      self.notifier.success("All records cleared for this patient");
      Ok(())
    } else {
      self.phase = Phase::Ready;
      self.notifier.error("Failed to clear records");
      Err(Error::ClearIncomplete { failed })
    }
  }
}

//! Unit tests for the domain model and the wire adapter.

use chrono::Utc;
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::{
  Error,
  backend::{Document, DocumentMeta, Fields},
  chart::{Chart, PatientId, StoredRecord, SurfaceFinding, Surfaces, ToothRecord},
  condition::Condition,
  surface::{SurfaceLabel, SurfacePosition, resolve_label},
  tooth::{Arch, ToothNumber, arch_rows},
  wire,
};

fn tooth(n: u8) -> ToothNumber { ToothNumber::new(n).unwrap() }

// ─── Tooth numbering ─────────────────────────────────────────────────────────

#[test]
fn valid_tooth_numbers_classify_into_four_arches() {
  assert_eq!(tooth(11).arch(), Arch::MaxillaryPermanent);
  assert_eq!(tooth(48).arch(), Arch::MandibularPermanent);
  assert_eq!(tooth(55).arch(), Arch::MaxillaryDeciduous);
  assert_eq!(tooth(81).arch(), Arch::MandibularDeciduous);
}

#[test]
fn out_of_range_tooth_numbers_are_rejected() {
  for n in [0, 9, 10, 19, 29, 49, 56, 66, 86, 90, 255] {
    assert!(
      matches!(ToothNumber::new(n), Err(Error::InvalidToothNumber(m)) if m == n),
      "tooth {n} should be rejected"
    );
  }
}

#[test]
fn arch_rows_cover_every_valid_tooth_once() {
  let rows = arch_rows();
  let all: Vec<u8> = rows
    .iter()
    .flat_map(|row| row.teeth.iter().map(|t| t.get()))
    .collect();

  // 2 × 16 permanent + 2 × 10 deciduous.
  assert_eq!(all.len(), 52);

  let mut sorted = all.clone();
  sorted.sort_unstable();
  sorted.dedup();
  assert_eq!(sorted.len(), 52, "no tooth appears twice");

  for &n in &all {
    assert!(ToothNumber::new(n).is_ok());
  }
}

#[test]
fn deciduous_rows_are_flagged() {
  let rows = arch_rows();
  assert!(rows[0].arch.is_deciduous());
  assert!(!rows[1].arch.is_deciduous());
  assert!(!rows[2].arch.is_deciduous());
  assert!(rows[3].arch.is_deciduous());
}

#[test]
fn anterior_set_is_canine_to_canine() {
  let anterior = [
    11, 12, 13, 21, 22, 23, 31, 32, 33, 41, 42, 43, 51, 52, 53, 61, 62, 63,
    71, 72, 73, 81, 82, 83,
  ];
  for row in arch_rows() {
    for t in row.teeth {
      assert_eq!(
        t.is_anterior(),
        anterior.contains(&t.get()),
        "tooth {t}"
      );
    }
  }
}

// ─── Surface label resolver ──────────────────────────────────────────────────

#[test]
fn resolver_worked_examples() {
  assert_eq!(resolve_label(tooth(18), SurfacePosition::Top), SurfaceLabel::Buccal);
  assert_eq!(resolve_label(tooth(11), SurfacePosition::Top), SurfaceLabel::Labial);
  assert_eq!(resolve_label(tooth(31), SurfacePosition::Bottom), SurfaceLabel::Labial);
  assert_eq!(resolve_label(tooth(46), SurfacePosition::Left), SurfaceLabel::Distal);
}

#[test]
fn lower_top_is_always_lingual_and_upper_bottom_always_palatal() {
  for row in arch_rows() {
    for t in row.teeth {
      if t.is_upper() {
        assert_eq!(resolve_label(t, SurfacePosition::Bottom), SurfaceLabel::Palatal);
      } else {
        assert_eq!(resolve_label(t, SurfacePosition::Top), SurfaceLabel::Lingual);
      }
    }
  }
}

#[test]
fn resolver_is_total_and_pure_over_all_teeth() {
  for row in arch_rows() {
    for t in row.teeth {
      for position in SurfacePosition::iter() {
        let first = resolve_label(t, position);
        let second = resolve_label(t, position);
        assert_eq!(first, second);
      }
    }
  }
}

#[test]
fn left_right_swap_mesial_distal_across_the_midline() {
  // 46 is patient-right, 36 is its patient-left mirror.
  assert_eq!(resolve_label(tooth(46), SurfacePosition::Left), SurfaceLabel::Distal);
  assert_eq!(resolve_label(tooth(46), SurfacePosition::Right), SurfaceLabel::Mesial);
  assert_eq!(resolve_label(tooth(36), SurfacePosition::Left), SurfaceLabel::Mesial);
  assert_eq!(resolve_label(tooth(36), SurfacePosition::Right), SurfaceLabel::Distal);
}

// ─── Condition vocabulary ────────────────────────────────────────────────────

#[test]
fn condition_ids_round_trip() {
  for condition in Condition::iter() {
    assert_eq!(Condition::from_id(condition.id()).unwrap(), condition);
  }
}

#[test]
fn condition_ids_match_serde_tags() {
  for condition in Condition::iter() {
    let json = serde_json::to_string(&condition).unwrap();
    assert_eq!(json, format!("{:?}", condition.id()));
  }
}

#[test]
fn unknown_condition_id_is_rejected() {
  assert!(matches!(
    Condition::from_id("gold_tooth"),
    Err(Error::UnknownCondition(_))
  ));
}

#[test]
fn vocabulary_has_twenty_three_conditions() {
  assert_eq!(Condition::iter().count(), 23);
}

// ─── Surface map merge ───────────────────────────────────────────────────────

#[test]
fn applying_one_surface_leaves_the_others_untouched() {
  let mut surfaces = Surfaces::default();
  surfaces.apply(
    SurfacePosition::Top,
    Some(SurfaceFinding::new(Condition::Caries, "distal pit")),
  );
  surfaces.apply(
    SurfacePosition::Center,
    Some(SurfaceFinding::new(Condition::Amalgam, "")),
  );
  let before = surfaces.clone();

  surfaces.apply(
    SurfacePosition::Left,
    Some(SurfaceFinding::new(Condition::Composite, "")),
  );

  for position in [SurfacePosition::Top, SurfacePosition::Center] {
    assert_eq!(surfaces.get(position), before.get(position));
  }
  assert_eq!(surfaces.len(), 3);
}

#[test]
fn clearing_a_surface_makes_it_absent() {
  let mut surfaces = Surfaces::default();
  surfaces.apply(
    SurfacePosition::Top,
    Some(SurfaceFinding::new(Condition::Caries, "")),
  );
  surfaces.apply(SurfacePosition::Top, None);
  assert!(surfaces.get(SurfacePosition::Top).is_none());
  assert!(surfaces.is_empty());
}

#[test]
fn notes_are_trimmed() {
  let finding = SurfaceFinding::new(Condition::Caries, "  distal pit  ");
  assert_eq!(finding.note, "distal pit");
}

#[test]
fn merge_applies_sets_and_clears_together() {
  let mut surfaces: Surfaces = [
    (SurfacePosition::Top, SurfaceFinding::new(Condition::Caries, "")),
    (SurfacePosition::Left, SurfaceFinding::new(Condition::Amalgam, "")),
  ]
  .into_iter()
  .collect();

  surfaces.merge(
    [
      (SurfacePosition::Top, None),
      (
        SurfacePosition::Center,
        Some(SurfaceFinding::new(Condition::Inlay, "")),
      ),
    ]
    .into_iter()
    .collect(),
  );

  assert!(surfaces.get(SurfacePosition::Top).is_none());
  assert_eq!(
    surfaces.get(SurfacePosition::Left).unwrap().condition,
    Condition::Amalgam
  );
  assert_eq!(
    surfaces.get(SurfacePosition::Center).unwrap().condition,
    Condition::Inlay
  );
}

// ─── Wire codec ──────────────────────────────────────────────────────────────

#[test]
fn surfaces_round_trip_through_the_wire_format() {
  let surfaces: Surfaces = [
    (
      SurfacePosition::Top,
      SurfaceFinding::new(Condition::Caries, "distal pit"),
    ),
    (SurfacePosition::Center, SurfaceFinding::new(Condition::SsCrown, "")),
  ]
  .into_iter()
  .collect();

  let encoded = wire::encode_surfaces(&surfaces).unwrap();
  assert_eq!(wire::decode_surfaces(&encoded), surfaces);
}

#[test]
fn encoded_surfaces_carry_the_derived_abbreviation() {
  let surfaces: Surfaces =
    [(SurfacePosition::Top, SurfaceFinding::new(Condition::Caries, ""))]
      .into_iter()
      .collect();

  let encoded = wire::encode_surfaces(&surfaces).unwrap();
  let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
  assert_eq!(value["top"]["id"], "caries");
  assert_eq!(value["top"]["abbr"], "C");
}

#[test]
fn malformed_surfaces_payload_decodes_to_empty() {
  for raw in ["not json", "", "42", "[1,2,3]", "{\"top\": \"oops\"}"] {
    assert!(wire::decode_surfaces(raw).is_empty(), "payload {raw:?}");
  }
}

#[test]
fn null_surface_entries_mean_no_finding() {
  let decoded = wire::decode_surfaces(
    r#"{"top": null, "center": {"id": "caries", "abbr": "C", "note": ""}}"#,
  );
  assert!(decoded.get(SurfacePosition::Top).is_none());
  assert_eq!(
    decoded.get(SurfacePosition::Center).unwrap().condition,
    Condition::Caries
  );
}

#[test]
fn unknown_entries_are_skipped_not_fatal() {
  let decoded = wire::decode_surfaces(
    r#"{"side": {"id": "caries"}, "top": {"id": "gold_tooth"},
        "center": {"id": "amalgam", "note": "old"}}"#,
  );
  assert_eq!(decoded.len(), 1);
  assert_eq!(
    decoded.get(SurfacePosition::Center).unwrap().condition,
    Condition::Amalgam
  );
}

// ─── Record ↔ document ───────────────────────────────────────────────────────

fn document(fields: Fields) -> Document {
  let now = Utc::now();
  Document {
    meta: DocumentMeta {
      id: Uuid::new_v4(),
      collection: "dentalchart".into(),
      created_at: now,
      updated_at: now,
    },
    fields,
  }
}

#[test]
fn record_round_trips_through_fields() {
  let record = ToothRecord {
    patient:  PatientId::new("P1"),
    tooth:    tooth(18),
    surfaces: [(
      SurfacePosition::Top,
      SurfaceFinding::new(Condition::Caries, "distal pit"),
    )]
    .into_iter()
    .collect(),
  };

  let fields = wire::record_to_fields(&record).unwrap();
  assert_eq!(fields.get(wire::FIELD_TOOTH_NUMBER).unwrap(), "18");

  let stored = wire::record_from_document(&document(fields)).unwrap();
  assert_eq!(stored.record, record);
}

#[test]
fn document_without_patient_id_fails_the_load() {
  let mut fields = Fields::new();
  fields.insert(wire::FIELD_TOOTH_NUMBER.into(), "18".into());
  assert!(matches!(
    wire::record_from_document(&document(fields)),
    Err(Error::MissingField(_, wire::FIELD_PATIENT_ID))
  ));
}

#[test]
fn document_with_garbage_tooth_number_fails_the_load() {
  let mut fields = Fields::new();
  fields.insert(wire::FIELD_PATIENT_ID.into(), "P1".into());
  fields.insert(wire::FIELD_TOOTH_NUMBER.into(), "ninety".into());
  assert!(matches!(
    wire::record_from_document(&document(fields)),
    Err(Error::UnparsableToothNumber(_))
  ));
}

#[test]
fn document_without_surfaces_loads_with_an_empty_map() {
  let mut fields = Fields::new();
  fields.insert(wire::FIELD_PATIENT_ID.into(), "P1".into());
  fields.insert(wire::FIELD_TOOTH_NUMBER.into(), "18".into());
  let stored = wire::record_from_document(&document(fields)).unwrap();
  assert!(stored.record.surfaces.is_empty());
}

// ─── Chart aggregate ─────────────────────────────────────────────────────────

fn stored(patient: &str, n: u8, surfaces: Surfaces) -> StoredRecord {
  let now = Utc::now();
  StoredRecord {
    meta:   DocumentMeta {
      id: Uuid::new_v4(),
      collection: "dentalchart".into(),
      created_at: now,
      updated_at: now,
    },
    record: ToothRecord {
      patient: PatientId::new(patient),
      tooth: tooth(n),
      surfaces,
    },
  }
}

#[test]
fn chart_upsert_replaces_by_tooth() {
  let mut chart = Chart::new();
  let first = stored("P1", 18, Surfaces::default());
  let second = stored(
    "P1",
    18,
    [(SurfacePosition::Top, SurfaceFinding::new(Condition::Caries, ""))]
      .into_iter()
      .collect(),
  );

  chart.upsert(first);
  chart.upsert(second.clone());

  assert_eq!(chart.len(), 1);
  assert_eq!(chart.get(tooth(18)).unwrap(), &second);
}

#[test]
fn chart_remove_document_by_id() {
  let mut chart = Chart::new();
  let record = stored("P1", 18, Surfaces::default());
  let id = record.meta.id;
  chart.upsert(record);
  chart.upsert(stored("P1", 21, Surfaces::default()));

  assert!(chart.remove_document(id).is_some());
  assert_eq!(chart.len(), 1);
  assert!(chart.remove_document(id).is_none());
}

#[test]
fn summary_rows_use_uppercase_positions_and_abbreviations() {
  let mut chart = Chart::new();
  chart.upsert(stored(
    "P1",
    18,
    [
      (SurfacePosition::Top, SurfaceFinding::new(Condition::Caries, "")),
      (SurfacePosition::Center, SurfaceFinding::new(Condition::Amalgam, "")),
    ]
    .into_iter()
    .collect(),
  ));

  let rows = chart.summary_rows();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].tooth, tooth(18));
  assert_eq!(rows[0].findings, "TOP: C, CENTER: Am");
}

//! Tooth numbering — validated FDI two-digit identifiers and arch anatomy.
//!
//! A tooth number is a quadrant digit (1–8) followed by a position digit.
//! Quadrants 1–4 are permanent dentition (positions 1–8), quadrants 5–8 are
//! deciduous dentition (positions 1–5). Anything outside those ranges is
//! rejected at construction, so every [`ToothNumber`] maps to exactly one of
//! the four arches.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Arch ────────────────────────────────────────────────────────────────────

/// One of the four anatomical tooth groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
  MaxillaryDeciduous,
  MaxillaryPermanent,
  MandibularPermanent,
  MandibularDeciduous,
}

impl Arch {
  /// Maxillary (upper jaw) arches.
  pub fn is_upper(self) -> bool {
    matches!(self, Self::MaxillaryDeciduous | Self::MaxillaryPermanent)
  }

  pub fn is_deciduous(self) -> bool {
    matches!(self, Self::MaxillaryDeciduous | Self::MandibularDeciduous)
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::MaxillaryDeciduous => "Maxillary Deciduous",
      Self::MaxillaryPermanent => "Maxillary Permanent",
      Self::MandibularPermanent => "Mandibular Permanent",
      Self::MandibularDeciduous => "Mandibular Deciduous",
    }
  }
}

// ─── ToothNumber ─────────────────────────────────────────────────────────────

/// A validated FDI tooth number (11–18, 21–28, 31–38, 41–48, 51–55, 61–65,
/// 71–75, 81–85).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothNumber(u8);

impl ToothNumber {
  /// Validate and wrap a raw FDI number.
  ///
  /// Numbers outside the four arch ranges are rejected rather than passed
  /// through, so downstream anatomy classification is total.
  pub fn new(n: u8) -> Result<Self> {
    let quadrant = n / 10;
    let position = n % 10;
    let valid = match quadrant {
      1..=4 => (1..=8).contains(&position),
      5..=8 => (1..=5).contains(&position),
      _ => false,
    };
    if valid {
      Ok(Self(n))
    } else {
      Err(Error::InvalidToothNumber(n))
    }
  }

  pub fn get(self) -> u8 { self.0 }

  /// FDI quadrant digit, 1–8.
  pub fn quadrant(self) -> u8 { self.0 / 10 }

  /// Position within the quadrant, counted from the midline.
  fn position_in_quadrant(self) -> u8 { self.0 % 10 }

  pub fn arch(self) -> Arch {
    match self.quadrant() {
      1 | 2 => Arch::MaxillaryPermanent,
      3 | 4 => Arch::MandibularPermanent,
      5 | 6 => Arch::MaxillaryDeciduous,
      _ => Arch::MandibularDeciduous,
    }
  }

  /// Maxillary (upper jaw) teeth: 11–28 and 51–65.
  pub fn is_upper(self) -> bool { self.arch().is_upper() }

  /// Anterior teeth are canine-to-canine: positions 1–3 in every quadrant.
  pub fn is_anterior(self) -> bool { self.position_in_quadrant() <= 3 }

  /// Quadrants 1, 4, 5 and 8 sit on the patient's right side.
  pub fn is_patient_right(self) -> bool {
    matches!(self.quadrant(), 1 | 4 | 5 | 8)
  }
}

impl TryFrom<u8> for ToothNumber {
  type Error = Error;

  fn try_from(n: u8) -> Result<Self> { Self::new(n) }
}

impl From<ToothNumber> for u8 {
  fn from(t: ToothNumber) -> u8 { t.0 }
}

impl std::str::FromStr for ToothNumber {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let n: u8 = s
      .parse()
      .map_err(|_| Error::UnparsableToothNumber(s.to_owned()))?;
    Self::new(n)
  }
}

impl std::fmt::Display for ToothNumber {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Arch rows ───────────────────────────────────────────────────────────────

/// One chart row — an arch with its teeth in display order (patient's right
/// first, as the clinician faces the patient).
#[derive(Debug, Clone)]
pub struct ArchRow {
  pub arch:  Arch,
  pub teeth: Vec<ToothNumber>,
}

const MAXILLARY_DECIDUOUS_ROW: [u8; 10] =
  [55, 54, 53, 52, 51, 61, 62, 63, 64, 65];
const MAXILLARY_PERMANENT_ROW: [u8; 16] =
  [18, 17, 16, 15, 14, 13, 12, 11, 21, 22, 23, 24, 25, 26, 27, 28];
const MANDIBULAR_PERMANENT_ROW: [u8; 16] =
  [48, 47, 46, 45, 44, 43, 42, 41, 31, 32, 33, 34, 35, 36, 37, 38];
const MANDIBULAR_DECIDUOUS_ROW: [u8; 10] =
  [85, 84, 83, 82, 81, 71, 72, 73, 74, 75];

/// The four chart rows, top of the mouth first. Covers every valid
/// [`ToothNumber`] exactly once.
pub fn arch_rows() -> Vec<ArchRow> {
  fn row(arch: Arch, numbers: &[u8]) -> ArchRow {
    ArchRow {
      arch,
      teeth: numbers
        .iter()
        .filter_map(|&n| ToothNumber::new(n).ok())
        .collect(),
    }
  }

  vec![
    row(Arch::MaxillaryDeciduous, &MAXILLARY_DECIDUOUS_ROW),
    row(Arch::MaxillaryPermanent, &MAXILLARY_PERMANENT_ROW),
    row(Arch::MandibularPermanent, &MANDIBULAR_PERMANENT_ROW),
    row(Arch::MandibularDeciduous, &MANDIBULAR_DECIDUOUS_ROW),
  ]
}

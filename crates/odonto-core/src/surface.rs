//! Tooth surfaces — the five chart positions and their clinical labels.
//!
//! A tooth is drawn as five regions (top, bottom, left, right, center). The
//! clinical name of each region depends on the tooth's anatomy: which arch it
//! sits in, whether it is anterior, and which side of the patient it is on.
//! [`resolve_label`] derives the name; it is pure and total.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::{Error, Result, tooth::ToothNumber};

// ─── SurfacePosition ─────────────────────────────────────────────────────────

/// One of the five chart regions of a tooth. Every tooth has exactly these
/// five, annotated or not.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter,
  Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SurfacePosition {
  Top,
  Bottom,
  Left,
  Right,
  Center,
}

impl SurfacePosition {
  /// The wire-format key for this position.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Top => "top",
      Self::Bottom => "bottom",
      Self::Left => "left",
      Self::Right => "right",
      Self::Center => "center",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "top" => Ok(Self::Top),
      "bottom" => Ok(Self::Bottom),
      "left" => Ok(Self::Left),
      "right" => Ok(Self::Right),
      "center" => Ok(Self::Center),
      other => Err(Error::UnknownPosition(other.to_owned())),
    }
  }
}

impl std::str::FromStr for SurfacePosition {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

// ─── SurfaceLabel ────────────────────────────────────────────────────────────

/// The clinical name of a tooth surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SurfaceLabel {
  Labial,
  Buccal,
  Lingual,
  Palatal,
  Mesial,
  Distal,
  Incisal,
  Occlusal,
}

impl SurfaceLabel {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Labial => "LABIAL",
      Self::Buccal => "BUCCAL",
      Self::Lingual => "LINGUAL",
      Self::Palatal => "PALATAL",
      Self::Mesial => "MESIAL",
      Self::Distal => "DISTAL",
      Self::Incisal => "INCISAL",
      Self::Occlusal => "OCCLUSAL",
    }
  }
}

impl std::fmt::Display for SurfaceLabel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Derive the clinical label for a chart position on a given tooth.
///
/// Rules:
/// - `Top` is the outer face on upper teeth (labial on anteriors, buccal on
///   posteriors) and always lingual on lower teeth.
/// - `Bottom` is always palatal on upper teeth and the outer face on lower
///   teeth.
/// - `Left`/`Right` swap between mesial and distal depending on which side of
///   the patient the tooth is on.
/// - `Center` is the biting edge: incisal on anteriors, occlusal on
///   posteriors.
pub fn resolve_label(
  tooth: ToothNumber,
  position: SurfacePosition,
) -> SurfaceLabel {
  match position {
    SurfacePosition::Top => {
      if tooth.is_upper() {
        if tooth.is_anterior() {
          SurfaceLabel::Labial
        } else {
          SurfaceLabel::Buccal
        }
      } else {
        SurfaceLabel::Lingual
      }
    }
    SurfacePosition::Bottom => {
      if tooth.is_upper() {
        SurfaceLabel::Palatal
      } else if tooth.is_anterior() {
        SurfaceLabel::Labial
      } else {
        SurfaceLabel::Buccal
      }
    }
    SurfacePosition::Left => {
      if tooth.is_patient_right() {
        SurfaceLabel::Distal
      } else {
        SurfaceLabel::Mesial
      }
    }
    SurfacePosition::Right => {
      if tooth.is_patient_right() {
        SurfaceLabel::Mesial
      } else {
        SurfaceLabel::Distal
      }
    }
    SurfacePosition::Center => {
      if tooth.is_anterior() {
        SurfaceLabel::Incisal
      } else {
        SurfaceLabel::Occlusal
      }
    }
  }
}

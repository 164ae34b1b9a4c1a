//! The fixed clinical condition vocabulary.
//!
//! Static configuration, not user-editable data: 23 findings in three display
//! groups. The abbreviation, label, color token and category are all derived
//! from the condition — they are never stored independently, so a record can
//! never carry an abbreviation that disagrees with its condition id.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::{Error, Result};

// ─── Category ────────────────────────────────────────────────────────────────

/// The display group a condition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
  /// Caries and other defects; rendered in reds.
  ClinicalDefect,
  /// Fillings and sealants; rendered in blues.
  Restoration,
  /// Crowns, dentures and everything else.
  Prosthodontic,
}

impl ConditionCategory {
  pub fn label(self) -> &'static str {
    match self {
      Self::ClinicalDefect => "Clinical Status",
      Self::Restoration => "Restorations",
      Self::Prosthodontic => "Prosthodontics & Others",
    }
  }
}

// ─── Condition ───────────────────────────────────────────────────────────────

/// A clinical finding, restoration, or prosthetic. The serde tag doubles as
/// the wire-format id.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
  // ── Clinical defects ─────────────────────────────────────────────────────
  Caries,
  RecurrentCaries,
  Fractured,
  Impacted,
  Unerupted,
  Extraction,
  Missing,

  // ── Restorations ─────────────────────────────────────────────────────────
  Amalgam,
  Composite,
  Glassionomer,
  Sealant,
  Inlay,

  // ── Prosthodontics & others ──────────────────────────────────────────────
  Abutment,
  Apc,
  Pfc,
  Pfg,
  GoldCrown,
  MetalCrown,
  SsCrown,
  Pontic,
  Rpd,
  Cd,
  CariesFree,
}

impl Condition {
  /// The wire-format id. Must match the `rename_all = "snake_case"` serde
  /// tags above.
  pub fn id(self) -> &'static str {
    match self {
      Self::Caries => "caries",
      Self::RecurrentCaries => "recurrent_caries",
      Self::Fractured => "fractured",
      Self::Impacted => "impacted",
      Self::Unerupted => "unerupted",
      Self::Extraction => "extraction",
      Self::Missing => "missing",
      Self::Amalgam => "amalgam",
      Self::Composite => "composite",
      Self::Glassionomer => "glassionomer",
      Self::Sealant => "sealant",
      Self::Inlay => "inlay",
      Self::Abutment => "abutment",
      Self::Apc => "apc",
      Self::Pfc => "pfc",
      Self::Pfg => "pfg",
      Self::GoldCrown => "gold_crown",
      Self::MetalCrown => "metal_crown",
      Self::SsCrown => "ss_crown",
      Self::Pontic => "pontic",
      Self::Rpd => "rpd",
      Self::Cd => "cd",
      Self::CariesFree => "caries_free",
    }
  }

  pub fn from_id(s: &str) -> Result<Self> {
    match s {
      "caries" => Ok(Self::Caries),
      "recurrent_caries" => Ok(Self::RecurrentCaries),
      "fractured" => Ok(Self::Fractured),
      "impacted" => Ok(Self::Impacted),
      "unerupted" => Ok(Self::Unerupted),
      "extraction" => Ok(Self::Extraction),
      "missing" => Ok(Self::Missing),
      "amalgam" => Ok(Self::Amalgam),
      "composite" => Ok(Self::Composite),
      "glassionomer" => Ok(Self::Glassionomer),
      "sealant" => Ok(Self::Sealant),
      "inlay" => Ok(Self::Inlay),
      "abutment" => Ok(Self::Abutment),
      "apc" => Ok(Self::Apc),
      "pfc" => Ok(Self::Pfc),
      "pfg" => Ok(Self::Pfg),
      "gold_crown" => Ok(Self::GoldCrown),
      "metal_crown" => Ok(Self::MetalCrown),
      "ss_crown" => Ok(Self::SsCrown),
      "pontic" => Ok(Self::Pontic),
      "rpd" => Ok(Self::Rpd),
      "cd" => Ok(Self::Cd),
      "caries_free" => Ok(Self::CariesFree),
      other => Err(Error::UnknownCondition(other.to_owned())),
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Caries => "Caries",
      Self::RecurrentCaries => "Recurrent Caries",
      Self::Fractured => "Fractured",
      Self::Impacted => "Impacted",
      Self::Unerupted => "Unerupted",
      Self::Extraction => "Indicated for Extraction",
      Self::Missing => "Missing",
      Self::Amalgam => "Amalgam",
      Self::Composite => "Composite",
      Self::Glassionomer => "Glassionomer",
      Self::Sealant => "Pit and Fissure Sealant",
      Self::Inlay => "Inlay",
      Self::Abutment => "Abutment",
      Self::Apc => "All Porcelain Crown",
      Self::Pfc => "Porcelain Fused to Metal",
      Self::Pfg => "Porcelain Fused to Gold",
      Self::GoldCrown => "Gold Crown",
      Self::MetalCrown => "Metal Crown",
      Self::SsCrown => "Stainless Steel Crown",
      Self::Pontic => "Pontic",
      Self::Rpd => "Removable Partial Denture",
      Self::Cd => "Complete Denture",
      Self::CariesFree => "Caries Free",
    }
  }

  /// Short code drawn on the chart surface.
  pub fn abbreviation(self) -> &'static str {
    match self {
      Self::Caries => "C",
      Self::RecurrentCaries => "RC",
      Self::Fractured => "F",
      Self::Impacted => "Imp",
      Self::Unerupted => "Un",
      Self::Extraction => "X",
      Self::Missing => "M",
      Self::Amalgam => "Am",
      Self::Composite => "Co",
      Self::Glassionomer => "GI",
      Self::Sealant => "PFS",
      Self::Inlay => "In",
      Self::Abutment => "Ab",
      Self::Apc => "APC",
      Self::Pfc => "PFM",
      Self::Pfg => "PFG",
      Self::GoldCrown => "GC",
      Self::MetalCrown => "MC",
      Self::SsCrown => "SS",
      Self::Pontic => "P",
      Self::Rpd => "RPD",
      Self::Cd => "CD",
      Self::CariesFree => "\u{2713}",
    }
  }

  /// Display color token used by the rendering layer.
  pub fn color(self) -> &'static str {
    match self {
      Self::Caries => "red-500",
      Self::RecurrentCaries => "red-600",
      Self::Fractured => "red-700",
      Self::Impacted => "orange-500",
      Self::Unerupted => "orange-400",
      Self::Extraction => "zinc-900",
      Self::Missing => "zinc-400",
      Self::Amalgam => "blue-600",
      Self::Composite => "blue-500",
      Self::Glassionomer => "cyan-500",
      Self::Sealant => "sky-400",
      Self::Inlay => "indigo-500",
      Self::Abutment => "purple-600",
      Self::Apc => "purple-500",
      Self::Pfc => "fuchsia-600",
      Self::Pfg => "amber-600",
      Self::GoldCrown => "yellow-600",
      Self::MetalCrown => "slate-500",
      Self::SsCrown => "slate-400",
      Self::Pontic => "emerald-700",
      Self::Rpd => "pink-500",
      Self::Cd => "pink-600",
      Self::CariesFree => "emerald-500",
    }
  }

  pub fn category(self) -> ConditionCategory {
    match self {
      Self::Caries
      | Self::RecurrentCaries
      | Self::Fractured
      | Self::Impacted
      | Self::Unerupted
      | Self::Extraction
      | Self::Missing => ConditionCategory::ClinicalDefect,

      Self::Amalgam
      | Self::Composite
      | Self::Glassionomer
      | Self::Sealant
      | Self::Inlay => ConditionCategory::Restoration,

      Self::Abutment
      | Self::Apc
      | Self::Pfc
      | Self::Pfg
      | Self::GoldCrown
      | Self::MetalCrown
      | Self::SsCrown
      | Self::Pontic
      | Self::Rpd
      | Self::Cd
      | Self::CariesFree => ConditionCategory::Prosthodontic,
    }
  }
}

impl std::str::FromStr for Condition {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::from_id(s) }
}

//! `odonto` — command-line access to a patient's dental chart.
//!
//! Opens the SQLite document store at `--db` and runs one chart operation:
//!
//! ```text
//! odonto --db clinic.db show P1
//! odonto --db clinic.db apply P1 18 top caries --note "distal pit"
//! odonto --db clinic.db clear-surface P1 18 top
//! odonto --db clinic.db remove P1 18
//! odonto --db clinic.db clear P1
//! odonto conditions
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use strum::IntoEnumIterator as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use odonto_chart::{ChartSession, LogNotifier, Selection};
use odonto_core::{
  chart::PatientId,
  condition::{Condition, ConditionCategory},
  surface::{SurfacePosition, resolve_label},
  tooth::ToothNumber,
};
use odonto_store_sqlite::SqliteBackend;

#[derive(Parser)]
#[command(author, version, about = "Odonto dental chart CLI")]
struct Cli {
  /// Path to the SQLite document store.
  #[arg(short, long, default_value = "odonto.db")]
  db: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print a patient's chart with resolved surface labels.
  Show { patient: String },

  /// Annotate one surface of one tooth.
  Apply {
    patient:   String,
    tooth:     ToothNumber,
    position:  SurfacePosition,
    condition: Condition,
    /// Clinical note attached to this surface.
    #[arg(long, default_value = "")]
    note:      String,
  },

  /// Clear the annotation on one surface of one tooth.
  ClearSurface {
    patient:  String,
    tooth:    ToothNumber,
    position: SurfacePosition,
  },

  /// Delete a tooth's whole record.
  Remove { patient: String, tooth: ToothNumber },

  /// Delete every record of the patient's chart.
  Clear { patient: String },

  /// List the condition vocabulary.
  Conditions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if let Command::Conditions = cli.command {
    print_conditions();
    return Ok(());
  }

  let backend = SqliteBackend::open(&cli.db)
    .await
    .with_context(|| format!("opening store at {}", cli.db.display()))?;
  let mut session = ChartSession::new(backend, Arc::new(LogNotifier));

  match cli.command {
    Command::Show { patient } => {
      session.init(PatientId::new(patient)).await?;
      show_chart(&session);
    }

    Command::Apply {
      patient,
      tooth,
      position,
      condition,
      note,
    } => {
      session.init(PatientId::new(patient)).await?;
      let selection = Some(Selection {
        tooth,
        surface: position,
      });
      let stored = session
        .apply_annotation(selection, Some(condition), &note)
        .await?;
      println!(
        "tooth {} {} ({}) = {} [{}]",
        tooth,
        position.as_str(),
        resolve_label(tooth, position),
        condition.label(),
        condition.abbreviation(),
      );
      tracing::debug!(document = %stored.meta.id, "record written");
    }

    Command::ClearSurface {
      patient,
      tooth,
      position,
    } => {
      session.init(PatientId::new(patient)).await?;
      let selection = Some(Selection {
        tooth,
        surface: position,
      });
      session.apply_annotation(selection, None, "").await?;
      println!("tooth {} {} cleared", tooth, position.as_str());
    }

    Command::Remove { patient, tooth } => {
      session.init(PatientId::new(patient)).await?;
      let Some(stored) = session.chart().get(tooth) else {
        bail!("no record for tooth {tooth}");
      };
      let id = stored.meta.id;
      session.remove(id).await?;
      println!("tooth {tooth} record removed");
    }

    Command::Clear { patient } => {
      let patient = PatientId::new(patient);
      session.init(patient.clone()).await?;
      let count = session.chart().len();
      session.clear_all().await?;
      println!("cleared {count} record(s) for {patient}");
    }

    Command::Conditions => unreachable!("handled above"),
  }

  Ok(())
}

fn show_chart<B: odonto_core::backend::DocumentBackend>(
  session: &ChartSession<B>,
) {
  let chart = session.chart();
  if chart.is_empty() {
    println!("no findings recorded");
    return;
  }

  for stored in chart.records() {
    let tooth = stored.record.tooth;
    println!("tooth {tooth} ({})", tooth.arch().label());
    for (position, finding) in stored.record.surfaces.iter() {
      let note = if finding.note.is_empty() {
        String::new()
      } else {
        format!("  note: {}", finding.note)
      };
      println!(
        "  {:<6} {:<8} {} [{}]{}",
        position.as_str(),
        resolve_label(tooth, position),
        finding.condition.label(),
        finding.abbreviation(),
        note,
      );
    }
  }
}

fn print_conditions() {
  for category in [
    ConditionCategory::ClinicalDefect,
    ConditionCategory::Restoration,
    ConditionCategory::Prosthodontic,
  ] {
    println!("{}", category.label());
    for condition in Condition::iter().filter(|c| c.category() == category) {
      println!(
        "  {:<18} {:<26} {}",
        condition.id(),
        condition.label(),
        condition.abbreviation(),
      );
    }
  }
}

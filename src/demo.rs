//! Walk-through of the repository against a live database.
//!
//! Creates two sample summaries, lists the table, revises the first summary
//! and prints it back. Output goes to any writer so the report can be
//! captured; diagnostics from the repository itself go through `tracing`.

use std::io::Write;

use crate::db::SummaryRepository;
use crate::error::Result;
use crate::models::{MutationOutcome, NewSummary, ObjectType, SummaryUpdate};

pub fn sample_summaries() -> [NewSummary; 2] {
    [
        NewSummary {
            object_type: ObjectType::Publication,
            object_id: 20250101001,
            model: "GPT-4".to_string(),
            model_version: "1.0".to_string(),
            lang: "es".to_string(),
            summary_text: "Resumen conciso de la Publicación 001 del DOF del 1 de enero de 2025."
                .to_string(),
            confidence: 0.98,
            created_by: Some("IA_Generator_v1".to_string()),
        },
        NewSummary {
            object_type: ObjectType::Section,
            object_id: 20250101001003,
            model: "Claude-3".to_string(),
            model_version: "Sonnet".to_string(),
            lang: "en".to_string(),
            summary_text:
                "Simple summary of Section 3 of the publication, focused on fiscal changes."
                    .to_string(),
            confidence: 0.92,
            created_by: Some("IA_Generator_v2".to_string()),
        },
    ]
}

fn revision() -> SummaryUpdate {
    SummaryUpdate {
        summary_text: "Resumen *mejorado* y más sencillo de la Publicación 001 del DOF."
            .to_string(),
        confidence: 0.99,
        model_version: Some("1.1".to_string()),
    }
}

/// Runs the demonstration. Returns the id of the first sample if it was created.
///
/// A failed write is reported and the steps that depend on it are skipped;
/// only read failures and writer errors abort the run.
pub async fn run<W: Write>(repo: &SummaryRepository, out: &mut W) -> Result<Option<i64>> {
    writeln!(out, "--- 1. Creating summaries ---")?;
    let mut created = Vec::new();
    for sample in sample_summaries() {
        let object_id = sample.object_id;
        match repo.create(sample).await {
            Ok(id) => {
                writeln!(out, "Created summary {} for object_id {}", id, object_id)?;
                created.push(Some(id));
            }
            Err(e) => {
                writeln!(out, "Could not create summary for object_id {}: {}", object_id, e)?;
                created.push(None);
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "--- 2. Listing summaries ---")?;
    writeln!(out, "Summaries (id, type, object_id, model, lang, confidence):")?;
    for listing in repo.list().await? {
        writeln!(out, " - {}", listing)?;
    }

    let Some(first_id) = created.first().copied().flatten() else {
        writeln!(out)?;
        writeln!(out, "First summary was not created; skipping update and lookup.")?;
        return Ok(None);
    };

    writeln!(out)?;
    writeln!(out, "--- 3. Updating summary {} ---", first_id)?;
    match repo.update(first_id, revision()).await {
        Ok(MutationOutcome::Applied) => writeln!(out, "Summary {} updated.", first_id)?,
        Ok(MutationOutcome::NotFound) => {
            writeln!(out, "Summary {} not found; nothing updated.", first_id)?
        }
        Err(e) => writeln!(out, "Could not update summary {}: {}", first_id, e)?,
    }

    writeln!(out)?;
    writeln!(out, "--- 4. Reading summary {} ---", first_id)?;
    match repo.get(first_id).await? {
        Some(summary) => {
            writeln!(out, "id:            {}", summary.id)?;
            writeln!(out, "object:        {} {}", summary.object_type, summary.object_id)?;
            writeln!(out, "model:         {} {}", summary.model, summary.model_version)?;
            writeln!(out, "lang:          {}", summary.lang)?;
            writeln!(out, "confidence:    {:.2}", summary.confidence)?;
            writeln!(
                out,
                "created_by:    {}",
                summary.created_by.as_deref().unwrap_or("-")
            )?;
            writeln!(out, "created_at:    {}", summary.created_at.to_rfc3339())?;
            writeln!(out, "summary_text:  {}", summary.summary_text)?;
        }
        None => writeln!(out, "Summary {} not found.", first_id)?,
    }

    Ok(Some(first_id))
}

// Document Enricher
// Downloads each record's résumé and attaches its flattened text.
// Extraction failures stay with the record; a non-2xx download aborts the run.

pub mod extract;
pub mod source;

use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::models::record::{CandidateRecord, EnrichedRecord};
use crate::normalize::normalize_document_text;

pub use extract::{PdfTextExtractor, TextExtractor};
pub use source::{DocumentSource, HttpDocumentSource};

/// What happened to one record's document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    /// The record has no document URL; nothing was fetched.
    NoDocument,
    Extracted { text: String },
    Failed { reason: String },
}

impl DocumentOutcome {
    /// The value persisted as `cvtext`.
    pub fn into_text(self) -> Option<String> {
        match self {
            DocumentOutcome::Extracted { text } => Some(text),
            DocumentOutcome::NoDocument | DocumentOutcome::Failed { .. } => None,
        }
    }
}

/// Per-run tally of document outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentSummary {
    pub extracted: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl EnrichmentSummary {
    fn record(&mut self, outcome: &DocumentOutcome) {
        match outcome {
            DocumentOutcome::NoDocument => self.skipped += 1,
            DocumentOutcome::Extracted { .. } => self.extracted += 1,
            DocumentOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Fetches and extracts the document for a single record.
///
/// Returns `Err` only for failures that must abort the run; transport and
/// extraction errors come back as `DocumentOutcome::Failed`.
pub async fn enrich_record(
    record: &CandidateRecord,
    source: &dyn DocumentSource,
    extractor: &dyn TextExtractor,
) -> Result<DocumentOutcome, PipelineError> {
    let Some(url) = record.document_url() else {
        return Ok(DocumentOutcome::NoDocument);
    };

    let outcome = match source.fetch(url).await {
        Ok(document) => match extractor.extract(document).await {
            Ok(text) => DocumentOutcome::Extracted {
                text: normalize_document_text(&text),
            },
            Err(e) => recover(e)?,
        },
        Err(e) => recover(e)?,
    };

    if let DocumentOutcome::Failed { reason } = &outcome {
        warn!(person_id = %record.person_id, url, %reason, "Failed to extract document text");
    }
    Ok(outcome)
}

fn recover(err: PipelineError) -> Result<DocumentOutcome, PipelineError> {
    if err.is_recoverable() {
        Ok(DocumentOutcome::Failed {
            reason: err.to_string(),
        })
    } else {
        Err(err)
    }
}

/// Enriches every record in order, stopping at the first fatal error.
pub async fn enrich_records(
    records: Vec<CandidateRecord>,
    source: &dyn DocumentSource,
    extractor: &dyn TextExtractor,
) -> Result<(Vec<EnrichedRecord>, EnrichmentSummary), PipelineError> {
    let mut summary = EnrichmentSummary::default();
    let mut enriched = Vec::with_capacity(records.len());

    for record in records {
        let outcome = enrich_record(&record, source, extractor).await?;
        summary.record(&outcome);
        enriched.push(EnrichedRecord {
            record,
            cvtext: outcome.into_text(),
        });
    }

    info!(
        extracted = summary.extracted,
        failed = summary.failed,
        skipped = summary.skipped,
        "Document enrichment complete"
    );
    Ok((enriched, summary))
}

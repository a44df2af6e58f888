//! Stage runners: each reads its input from the previous stage's output file
//! and can be invoked on its own or chained by `run`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{Config, DatabaseConfig};
use crate::db;
use crate::enrichment::{
    self, DocumentSource, HttpDocumentSource, PdfTextExtractor, TextExtractor,
};
use crate::fetcher;
use crate::intermediate::{read_records, write_records};
use crate::matching::{self, HttpMatchService, MatchService, PerformanceLog};
use crate::models::record::{CandidateRecord, EnrichedRecord};
use crate::normalize::normalize_row;

/// Fetches, normalizes, and writes the intermediate file.
/// Returns the number of records written.
pub async fn fetch_stage(
    config: &Config,
    database: &DatabaseConfig,
    results: &Path,
) -> Result<usize> {
    let pool = db::connect(database).await?;
    let rows = fetcher::fetch_submissions(&pool, config.batch_limit).await?;
    pool.close().await;

    let records: Vec<CandidateRecord> = rows.iter().map(normalize_row).collect();
    write_records(results, &records)
        .with_context(|| format!("failed to write {}", results.display()))?;

    info!(count = records.len(), path = %results.display(), "Saved normalized records");
    Ok(records.len())
}

/// Attaches résumé text to every record and rewrites the intermediate file.
pub async fn enrich_stage(config: &Config, results: &Path) -> Result<usize> {
    let source = HttpDocumentSource::new(config.document_timeout)?;
    enrich_file(results, &source, &PdfTextExtractor).await
}

async fn enrich_file(
    results: &Path,
    source: &dyn DocumentSource,
    extractor: &dyn TextExtractor,
) -> Result<usize> {
    let records: Vec<CandidateRecord> = read_records(results)
        .with_context(|| format!("failed to read {}", results.display()))?;

    let (enriched, _summary) = enrichment::enrich_records(records, source, extractor).await?;

    write_records(results, &enriched)
        .with_context(|| format!("failed to write {}", results.display()))?;
    Ok(enriched.len())
}

/// Sends one match request per enriched record and appends the replies to
/// the performance log.
pub async fn request_stage(config: &Config, results: &Path, log_path: &Path) -> Result<()> {
    let service = HttpMatchService::new(config.match_endpoint.as_str());
    request_file(results, &service, &PerformanceLog::new(log_path)).await
}

async fn request_file(
    results: &Path,
    service: &dyn MatchService,
    log: &PerformanceLog,
) -> Result<()> {
    let entries: Vec<EnrichedRecord> = read_records(results)
        .with_context(|| format!("failed to read {}", results.display()))?;

    let summary = matching::request_matches(&entries, service, log).await?;

    info!(
        scored = summary.scored,
        unparsed = summary.unparsed,
        failed = summary.failed,
        log = %log.path().display(),
        "Match requests complete"
    );
    Ok(())
}

/// fetch → enrich → request, aborting on the first fatal error.
pub async fn run(
    config: &Config,
    database: &DatabaseConfig,
    results: &Path,
    log_path: &Path,
) -> Result<()> {
    let fetched = fetch_stage(config, database, results).await?;
    continue_after_fetch(config, fetched, results, log_path).await
}

async fn continue_after_fetch(
    config: &Config,
    fetched: usize,
    results: &Path,
    log_path: &Path,
) -> Result<()> {
    if fetched == 0 {
        info!("No candidate submissions matched; nothing to enrich or score");
        return Ok(());
    }
    enrich_stage(config, results).await?;
    request_stage(config, results, log_path).await
}

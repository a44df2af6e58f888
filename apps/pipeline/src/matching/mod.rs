// Match Requester
// Builds a null-free request per enriched record, submits it, and appends
// the scores (or the raw reply) to the performance log.

pub mod client;
pub mod payload;
pub mod report;

use tracing::{debug, error, info, warn};

use crate::errors::PipelineError;
use crate::models::matching::MatchResponse;
use crate::models::record::EnrichedRecord;

pub use client::{HttpMatchService, MatchReply, MatchService};
pub use report::PerformanceLog;

/// Per-run tally of scoring requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSummary {
    pub scored: usize,
    pub unparsed: usize,
    pub failed: usize,
}

/// Submits every record in order. A failed request is logged and the next
/// record is still sent; only a log-file write error stops the loop.
pub async fn request_matches(
    entries: &[EnrichedRecord],
    service: &dyn MatchService,
    log: &PerformanceLog,
) -> Result<RequestSummary, PipelineError> {
    let mut summary = RequestSummary::default();

    for entry in entries {
        let person_id = &entry.record.person_id;
        let body = payload::request_body(entry)?;
        debug!(%person_id, payload = %body, "Built match request");

        let reply = match service.submit(&body).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(%person_id, error = %e, "Match request failed");
                log.append_request_error(&e)?;
                summary.failed += 1;
                continue;
            }
        };

        println!("person_id={person_id}, status={}", reply.status);

        match serde_json::from_str::<MatchResponse>(&reply.body) {
            Ok(response) => {
                info!(
                    %person_id,
                    status = reply.status,
                    results = response.results.len(),
                    "Match response received"
                );
                log.append_results(&response.results)?;
                summary.scored += 1;
            }
            Err(e) => {
                warn!(%person_id, status = reply.status, error = %e, "Match response is not valid JSON; logging raw body");
                log.append_raw_response(&reply.body)?;
                summary.unparsed += 1;
            }
        }
    }

    Ok(summary)
}

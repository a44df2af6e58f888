use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::PipelineError;
use crate::models::matching::MatchResult;

/// Line written after every block.
pub const DELIMITER_WIDTH: usize = 40;

/// Append-only, human-readable log of scoring results.
#[derive(Debug, Clone)]
pub struct PerformanceLog {
    path: PathBuf,
}

impl PerformanceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One block per scored result.
    pub fn append_results(&self, results: &[MatchResult]) -> Result<(), PipelineError> {
        let text: String = results.iter().map(format_result_block).collect();
        self.append(&text)
    }

    /// Logged when the response body is not a JSON object.
    pub fn append_raw_response(&self, body: &str) -> Result<(), PipelineError> {
        self.append(&format!("Response text: {body}\n{}\n", delimiter()))
    }

    /// Logged when no response arrived at all.
    pub fn append_request_error(&self, error: &PipelineError) -> Result<(), PipelineError> {
        self.append(&format!("Request error: {error}\n{}\n", delimiter()))
    }

    fn append(&self, text: &str) -> Result<(), PipelineError> {
        if text.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}

fn delimiter() -> String {
    "-".repeat(DELIMITER_WIDTH)
}

pub fn format_result_block(result: &MatchResult) -> String {
    format!(
        "ID: {}\nScore: {}\nConfidence: {}\nConsistency: {}\nDetailed Scoring: {}\n{}\n",
        display_value(&result.id),
        display_value(&result.score),
        display_value(&result.confidence),
        display_value(&result.consistency),
        display_value(&result.detailed_scoring),
        delimiter()
    )
}

/// Strings are written bare; everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! The run's intermediate file: a JSON array of records, read and rewritten
//! wholesale between stages.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::PipelineError;

/// Reads every record from the intermediate file.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PipelineError> {
    let file = File::open(path)?;
    let records: Vec<T> = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), count = records.len(), "Read intermediate records");
    Ok(records)
}

/// Replaces the intermediate file with `records`.
/// Writes to a sibling temp file first so a failed write never leaves a
/// truncated array behind.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), PipelineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| PipelineError::Io(e.error))?;

    debug!(path = %path.display(), count = records.len(), "Wrote intermediate records");
    Ok(())
}

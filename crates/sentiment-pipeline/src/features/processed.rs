use std::path::Path;

use tracing::debug;

use crate::{
    error::{DataSourceError, PipelineError},
    ingestion::{CONTENT_COLUMN, DataSource, LABEL_COLUMN, read_csv},
};

/// A cleaned tweet with its binary label, as produced by the external cleaning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedRecord {
    pub content: String,
    pub sentiment: u8,
}

impl ProcessedRecord {
    pub fn new(content: impl Into<String>, sentiment: u8) -> Self {
        Self {
            content: content.into(),
            sentiment,
        }
    }
}

/// Read a processed CSV with `content` and `sentiment` columns.
///
/// Missing content is read as empty text. Every sentiment must be `0` or `1`.
/// A file with a header and no rows yields no records.
pub fn read_processed(path: &Path) -> Result<Vec<ProcessedRecord>, PipelineError> {
    let source = DataSource::Path(path.to_path_buf());
    let source_name = source.to_string();
    let table = read_csv(&source)?;
    let content_idx = table
        .require_column(CONTENT_COLUMN)
        .map_err(|err| PipelineError::schema(&source_name, err))?;
    let label_idx = table
        .require_column(LABEL_COLUMN)
        .map_err(|err| PipelineError::schema(&source_name, err))?;

    let records = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let raw_label = row[label_idx].trim();
            let sentiment = match raw_label {
                "0" => 0,
                "1" => 1,
                _ => {
                    return Err(DataSourceError::Malformed {
                        source_name: source_name.clone(),
                        reason: format!(
                            "row {row_idx}: sentiment must be 0 or 1, got {raw_label:?}"
                        ),
                    });
                }
            };
            Ok(ProcessedRecord::new(row[content_idx].clone(), sentiment))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(path = %path.display(), records = records.len(), "Read processed records");
    Ok(records)
}

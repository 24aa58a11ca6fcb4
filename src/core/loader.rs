use crate::domain::model::{CollegeRecord, LoadReport, RecordSet, SkippedRow};
use crate::domain::ports::Storage;
use crate::utils::error::{FinderError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;

const NAME_COLUMN: usize = 0;
const ACCEPTANCE_RATE_COLUMN: usize = 1;
const AVERAGE_SCORE_COLUMN: usize = 2;
const DOMAIN_COLUMN: usize = 3;

/// Reads college rows through a [`Storage`] backend.
pub struct RecordLoader<S: Storage> {
    storage: S,
}

impl<S: Storage> RecordLoader<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load(&self, path: &str) -> Result<LoadReport> {
        tracing::debug!("Reading college data from: {}", path);

        let bytes = self
            .storage
            .read_file(path)
            .await
            .map_err(|e| FinderError::SourceUnavailable {
                source_name: path.to_string(),
                reason: e.to_string(),
            })?;

        load_from_bytes(&bytes, path)
    }
}

pub fn load_from_reader<R: Read>(mut reader: R, source_name: &str) -> Result<LoadReport> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| FinderError::SourceUnavailable {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;
    load_from_bytes(&bytes, source_name)
}

/// Parses a header row followed by `name,acceptance_rate,average_score[,domain]` rows.
/// Bad rows are skipped; an empty result is an error.
pub fn load_from_bytes(bytes: &[u8], source_name: &str) -> Result<LoadReport> {
    let text = std::str::from_utf8(bytes).map_err(|e| FinderError::SourceUnavailable {
        source_name: source_name.to_string(),
        reason: format!("content is not valid UTF-8: {}", e),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for row in reader.records() {
        let parsed = row
            .map_err(|e| FinderError::MalformedRow {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })
            .and_then(|row| parse_row(&row));

        match parsed {
            Ok(record) => records.push(record),
            Err(FinderError::MalformedRow { line, reason }) => {
                tracing::warn!("⚠️ Skipping row {} in {}: {}", line, source_name, reason);
                skipped.push(SkippedRow { line, reason });
            }
            Err(other) => return Err(other),
        }
    }

    if records.is_empty() {
        return Err(FinderError::EmptyDataset {
            source_name: source_name.to_string(),
            skipped: skipped.len(),
        });
    }

    tracing::info!(
        "📥 Loaded {} colleges from {} ({} rows skipped)",
        records.len(),
        source_name,
        skipped.len()
    );

    Ok(LoadReport {
        records: RecordSet::from_records(records),
        skipped,
    })
}

fn parse_row(row: &StringRecord) -> Result<CollegeRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    let malformed = |reason: String| FinderError::MalformedRow { line, reason };

    let field = |index: usize, column: &'static str| {
        row.get(index)
            .map(str::trim)
            .ok_or_else(|| malformed(format!("missing {} column", column)))
    };

    let name = field(NAME_COLUMN, "name")?;
    if name.is_empty() {
        return Err(malformed("name is empty".to_string()));
    }

    let acceptance_rate_raw = field(ACCEPTANCE_RATE_COLUMN, "acceptance_rate")?;
    let acceptance_rate: i64 = acceptance_rate_raw.parse().map_err(|_| {
        malformed(format!("acceptance_rate '{}' is not an integer", acceptance_rate_raw))
    })?;

    let average_score_raw = field(AVERAGE_SCORE_COLUMN, "average_score")?;
    let average_score: i64 = average_score_raw.parse().map_err(|_| {
        malformed(format!("average_score '{}' is not an integer", average_score_raw))
    })?;

    let domain = row.get(DOMAIN_COLUMN).map(str::trim).unwrap_or_default();

    Ok(CollegeRecord::new(name, acceptance_rate, average_score).with_domain(domain))
}

use energy_domain::{domain::MeasurementRecord, queries::QueryError};
use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("source unreadable: {0}")]
    SourceUnreadable(String),
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error("missing column '{0}' in source header")]
    MissingColumn(String),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("invalid month: {0}")]
    InvalidMonth(String),
    #[error("sink error: {0}")]
    Sink(String),
}

impl From<QueryError> for ReportError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidMonth(_) => Self::InvalidMonth(e.to_string()),
        }
    }
}

/// What to do when a single line fails to parse. Applied to the whole load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Fail the load on the first malformed line.
    #[default]
    Abort,
    /// Log and drop malformed lines.
    Skip,
}

/// A finite, non-restartable sequence of parsed items read from a caller-supplied stream.
pub trait Source<T> {
    type Records: Iterator<Item = Result<T, ReportError>>;

    /// Reads any header and yields the records lazily in source order.
    fn records(self) -> Result<Self::Records, ReportError>;
}

/// Destination for finished report lines.
pub trait Sink {
    fn write(&mut self, lines: &[String]) -> Result<(), ReportError>;
}

/// Drain `source` into memory, applying `policy` to malformed lines.
///
/// Any other error aborts the load; no partial record set is returned.
pub fn load_records<S>(source: S, policy: MalformedPolicy) -> Result<Vec<MeasurementRecord>, ReportError>
where
    S: Source<MeasurementRecord>,
{
    let mut records = Vec::new();
    let mut skipped: u64 = 0;

    for item in source.records()? {
        match item {
            Ok(record) => records.push(record),
            Err(e @ ReportError::MalformedRecord { .. }) => {
                metrics::counter!("measurement_malformed_records_total").increment(1);
                if policy == MalformedPolicy::Abort {
                    tracing::error!(error = %e, "aborting load on malformed record");
                    return Err(e);
                }
                tracing::warn!(error = %e, "skipping malformed record");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    metrics::counter!("measurement_records_loaded_total").increment(records.len() as u64);
    tracing::info!(records = records.len(), skipped, "measurement records loaded");

    Ok(records)
}

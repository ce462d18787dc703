pub mod measurement_csv;
pub mod measurement_ndjson;
pub mod measurement_positional;

pub use measurement_csv::{ColumnNames, MeasurementCsvSource};
pub use measurement_ndjson::MeasurementNdjsonSource;
pub use measurement_positional::{EnergyUnit, MeasurementPositionalSource, PositionalLayout};

use std::io::Read;

use energy_domain::domain::MeasurementRecord;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime, PrimitiveDateTime};

use crate::{
    config::{SourceConfig, SourceFormat},
    pipeline::{load_records, ReportError},
};

/// Load every record from `reader` using the format described by `cfg`.
pub fn load_from_reader<R: Read>(cfg: &SourceConfig, reader: R) -> Result<Vec<MeasurementRecord>, ReportError> {
    let delimiter = cfg.delimiter.byte();
    tracing::debug!(format = ?cfg.format, delimiter = %cfg.delimiter, "loading measurement source");

    match cfg.format {
        SourceFormat::Csv => load_records(
            MeasurementCsvSource::new(reader, delimiter, cfg.columns.clone()),
            cfg.malformed,
        ),
        SourceFormat::Positional => load_records(
            MeasurementPositionalSource::new(reader, delimiter, cfg.positional.clone()),
            cfg.malformed,
        ),
        SourceFormat::Ndjson => load_records(MeasurementNdjsonSource::new(reader), cfg.malformed),
    }
}

/// Parse a number that may use a decimal comma (`"12,5"`) or point.
pub fn parse_decimal(raw: &str) -> Result<f64, String> {
    let normalized = raw.trim().replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|e| format!("invalid number '{raw}': {e}"))?;
    if !value.is_finite() {
        return Err(format!("non-finite number '{raw}'"));
    }
    Ok(value)
}

/// Parse an ISO-8601 timestamp into wall-clock time.
///
/// Accepts `T` or space between date and time, optional seconds and
/// fractions, RFC 3339 offsets (kept as local wall clock), and a bare date
/// meaning midnight.
pub fn parse_timestamp(raw: &str) -> Result<PrimitiveDateTime, String> {
    let s = raw.trim();

    if let Ok(odt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(PrimitiveDateTime::new(odt.date(), odt.time()));
    }

    PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .or_else(|_| PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]")))
        .or_else(|_| {
            PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"))
        })
        .or_else(|_| PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day] [hour]:[minute]:[second]")))
        .or_else(|_| PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day] [hour]:[minute]")))
        .or_else(|_| Date::parse(s, format_description!("[year]-[month]-[day]")).map(Date::midnight))
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}

/// Split csv failures into stream failures and per-line format failures.
pub(crate) fn from_csv_error(e: csv::Error) -> ReportError {
    if e.is_io_error() {
        return ReportError::SourceUnreadable(e.to_string());
    }
    let line = e.position().map_or(0, |p| p.line());
    ReportError::MalformedRecord {
        line,
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn decimal_comma_is_normalized() {
        assert_eq!(parse_decimal("12,5"), Ok(12.5));
        assert_eq!(parse_decimal(" 0,25 "), Ok(0.25));
        assert_eq!(parse_decimal("3.75"), Ok(3.75));
        assert_eq!(parse_decimal("-7,1"), Ok(-7.1));
    }

    #[test]
    fn decimal_rejects_garbage_and_non_finite() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("1,2,3").is_err());
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("NaN").is_err());
        assert!(parse_decimal("inf").is_err());
    }

    #[test]
    fn timestamp_variants() {
        assert_eq!(parse_timestamp("2025-10-01T05:30:00"), Ok(datetime!(2025-10-01 05:30)));
        assert_eq!(parse_timestamp("2025-10-01T05:30"), Ok(datetime!(2025-10-01 05:30)));
        assert_eq!(parse_timestamp("2025-10-01 05:30"), Ok(datetime!(2025-10-01 05:30)));
        assert_eq!(parse_timestamp("2025-10-01"), Ok(datetime!(2025-10-01 00:00)));
        assert_eq!(
            parse_timestamp("2025-10-01T23:00:00+03:00"),
            Ok(datetime!(2025-10-01 23:00))
        );
    }

    #[test]
    fn timestamp_rejects_non_iso() {
        assert!(parse_timestamp("1.10.2025 05:30").is_err());
        assert!(parse_timestamp("2025-13-01T00:00").is_err());
        assert!(parse_timestamp("").is_err());
    }
}

use std::io::Read;

use csv::StringRecord;
use energy_domain::domain::MeasurementRecord;
use serde::Deserialize;

use super::{from_csv_error, parse_decimal, parse_timestamp};
use crate::pipeline::{ReportError, Source};

/// Header labels of a self-describing measurement CSV.
///
/// Defaults match the yearly export: `Aika`, `Kulutus (netotettu) kWh`,
/// `Tuotanto (netotettu) kWh`, `Vuorokauden keskilämpötila`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub timestamp: String,
    pub consumption: String,
    pub production: String,
    /// `None` when the export carries no temperature column.
    pub temperature: Option<String>,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            timestamp: "Aika".to_string(),
            consumption: "Kulutus (netotettu) kWh".to_string(),
            production: "Tuotanto (netotettu) kWh".to_string(),
            temperature: Some("Vuorokauden keskilämpötila".to_string()),
        }
    }
}

/// Delimited source with a header row; columns are looked up by name once,
/// values use a decimal comma.
pub struct MeasurementCsvSource<R> {
    reader: R,
    delimiter: u8,
    columns: ColumnNames,
}

impl<R: Read> MeasurementCsvSource<R> {
    pub fn new(reader: R, delimiter: u8, columns: ColumnNames) -> Self {
        Self {
            reader,
            delimiter,
            columns,
        }
    }
}

struct ColumnIndex {
    ts: usize,
    consumption: usize,
    production: usize,
    temperature: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, names: &ColumnNames) -> Result<Self, ReportError> {
        let find = |name: &str| -> Result<usize, ReportError> {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            ts: find(names.timestamp.as_str())?,
            consumption: find(names.consumption.as_str())?,
            production: find(names.production.as_str())?,
            temperature: names.temperature.as_deref().map(find).transpose()?,
        })
    }

    fn parse(&self, row: &StringRecord) -> Result<MeasurementRecord, ReportError> {
        let line = row.position().map_or(0, |p| p.line());
        let malformed = |reason: String| ReportError::MalformedRecord { line, reason };
        let field = |idx: usize| row.get(idx).ok_or_else(|| malformed(format!("missing field {}", idx + 1)));

        let ts = parse_timestamp(field(self.ts)?).map_err(malformed)?;
        let consumption_kwh = parse_decimal(field(self.consumption)?).map_err(malformed)?;
        let production_kwh = parse_decimal(field(self.production)?).map_err(malformed)?;

        let temperature_c = match self.temperature {
            Some(idx) => Some(parse_decimal(field(idx)?).map_err(malformed)?),
            None => None,
        };

        Ok(MeasurementRecord {
            ts,
            consumption_kwh,
            production_kwh,
            temperature_c,
        })
    }
}

pub struct CsvMeasurements<R> {
    rows: csv::StringRecordsIntoIter<R>,
    columns: ColumnIndex,
}

impl<R: Read> Iterator for CsvMeasurements<R> {
    type Item = Result<MeasurementRecord, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.map_err(from_csv_error).and_then(|row| self.columns.parse(&row)))
    }
}

impl<R: Read> Source<MeasurementRecord> for MeasurementCsvSource<R> {
    type Records = CsvMeasurements<R>;

    fn records(self) -> Result<Self::Records, ReportError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(self.reader);
        let headers = rdr.headers().map_err(from_csv_error)?.clone();
        let columns = ColumnIndex::resolve(&headers, &self.columns)?;

        Ok(CsvMeasurements {
            rows: rdr.into_records(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{load_records, MalformedPolicy};
    use std::io;
    use time::macros::datetime;

    const HEADER: &str = "Aika;Kulutus (netotettu) kWh;Tuotanto (netotettu) kWh;Vuorokauden keskilämpötila\n";

    fn source(body: &str) -> MeasurementCsvSource<io::Cursor<String>> {
        MeasurementCsvSource::new(io::Cursor::new(format!("{HEADER}{body}")), b';', ColumnNames::default())
    }

    fn collect(body: &str) -> Vec<Result<MeasurementRecord, ReportError>> {
        source(body).records().expect("header resolves").collect()
    }

    #[test]
    fn parses_named_columns_with_decimal_comma() {
        let rows = collect("2025-10-01T00:00:00;5,25;1,5;-3,4\n2025-10-01T01:00:00;0,75;0;-3,6\n");
        assert_eq!(rows.len(), 2);

        let first = rows[0].as_ref().expect("first row parses");
        assert_eq!(first.ts, datetime!(2025-10-01 00:00));
        assert_eq!(first.consumption_kwh, 5.25);
        assert_eq!(first.production_kwh, 1.5);
        assert_eq!(first.temperature_c, Some(-3.4));
    }

    #[test]
    fn column_order_follows_header() {
        let input = "Vuorokauden keskilämpötila;Tuotanto (netotettu) kWh;Aika;Kulutus (netotettu) kWh\n\
                     2,0;0,5;2025-01-02T03:00:00;1,0\n";
        let src = MeasurementCsvSource::new(io::Cursor::new(input), b';', ColumnNames::default());
        let rows: Vec<_> = src.records().expect("header resolves").collect();
        let record = rows[0].as_ref().expect("row parses");
        assert_eq!(record.consumption_kwh, 1.0);
        assert_eq!(record.production_kwh, 0.5);
        assert_eq!(record.temperature_c, Some(2.0));
    }

    #[test]
    fn missing_header_column_is_reported() {
        let input = "Aika;Kulutus (netotettu) kWh\n2025-01-01T00:00:00;1,0\n";
        let src = MeasurementCsvSource::new(io::Cursor::new(input), b';', ColumnNames::default());
        match src.records() {
            Err(ReportError::MissingColumn(name)) => assert_eq!(name, "Tuotanto (netotettu) kWh"),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("expected a missing column error"),
        }
    }

    #[test]
    fn temperature_column_is_optional_when_not_configured() {
        let input = "Aika;Kulutus (netotettu) kWh;Tuotanto (netotettu) kWh\n2025-01-01T00:00:00;1,0;0,0\n";
        let columns = ColumnNames {
            temperature: None,
            ..ColumnNames::default()
        };
        let src = MeasurementCsvSource::new(io::Cursor::new(input), b';', columns);
        let rows: Vec<_> = src.records().expect("header resolves").collect();
        assert_eq!(rows[0].as_ref().expect("row parses").temperature_c, None);
    }

    #[test]
    fn bad_number_is_malformed_with_line() {
        let rows = collect("2025-10-01T00:00:00;1,0;0,0;1,0\n2025-10-01T01:00:00;x;0,0;1,0\n");
        assert!(rows[0].is_ok());
        assert!(matches!(rows[1], Err(ReportError::MalformedRecord { line: 3, .. })));
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let rows = collect("1.10.2025 00:00;1,0;0,0;1,0\n");
        assert!(matches!(rows[0], Err(ReportError::MalformedRecord { .. })));
    }

    #[test]
    fn field_count_mismatch_is_malformed() {
        let rows = collect("2025-10-01T00:00:00;1,0;0,0\n");
        assert!(matches!(rows[0], Err(ReportError::MalformedRecord { .. })));
    }

    #[test]
    fn empty_temperature_cell_is_malformed() {
        let body = "2025-10-01T00:00:00;1,0;0,0;4,0\n2025-10-01T01:00:00;2,0;0,0;\n2025-10-01T02:00:00;3,0;0,0;6,0\n";

        let res = load_records(source(body), MalformedPolicy::Abort);
        assert!(matches!(res, Err(ReportError::MalformedRecord { line: 3, .. })));

        let records = load_records(source(body), MalformedPolicy::Skip).expect("skip policy loads");
        let temps: Vec<Option<f64>> = records.iter().map(|r| r.temperature_c).collect();
        assert_eq!(temps, vec![Some(4.0), Some(6.0)]);
    }

    struct BrokenReader;

    impl io::Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn io_failure_is_source_unreadable() {
        let src = MeasurementCsvSource::new(BrokenReader, b';', ColumnNames::default());
        assert!(matches!(src.records(), Err(ReportError::SourceUnreadable(_))));
    }
}

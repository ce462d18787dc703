use std::io::{self, BufRead, BufReader, Lines, Read};

use energy_domain::domain::MeasurementRecord;

use super::parse_timestamp;
use crate::pipeline::{ReportError, Source};

/// Line-delimited JSON source.
///
/// Each non-empty line is an object with `ts` (ISO-8601), `consumption_kwh`,
/// `production_kwh` and an optional `temperature_c`.
pub struct MeasurementNdjsonSource<R> {
    reader: R,
}

#[derive(serde::Deserialize)]
struct NdjsonMeasurement {
    ts: String,
    consumption_kwh: f64,
    production_kwh: f64,
    #[serde(default)]
    temperature_c: Option<f64>,
}

impl NdjsonMeasurement {
    fn into_record(self) -> Result<MeasurementRecord, String> {
        Ok(MeasurementRecord {
            ts: parse_timestamp(&self.ts)?,
            consumption_kwh: self.consumption_kwh,
            production_kwh: self.production_kwh,
            temperature_c: self.temperature_c,
        })
    }
}

impl<R: Read> MeasurementNdjsonSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

pub struct NdjsonMeasurements<R> {
    lines: Lines<BufReader<R>>,
    line: u64,
}

impl<R: Read> Iterator for NdjsonMeasurements<R> {
    type Item = Result<MeasurementRecord, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                // `read_line` consumes the bad line before failing, so the next call moves on.
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    self.line += 1;
                    return Some(Err(ReportError::MalformedRecord {
                        line: self.line,
                        reason: format!("line is not valid UTF-8: {e}"),
                    }));
                }
                Err(e) => {
                    return Some(Err(ReportError::SourceUnreadable(format!(
                        "failed to read ndjson line: {e}"
                    ))))
                }
            };
            self.line += 1;

            if text.trim().is_empty() {
                continue;
            }

            let line = self.line;
            return Some(
                serde_json::from_str::<NdjsonMeasurement>(&text)
                    .map_err(|e| e.to_string())
                    .and_then(NdjsonMeasurement::into_record)
                    .map_err(|reason| ReportError::MalformedRecord { line, reason }),
            );
        }
    }
}

impl<R: Read> Source<MeasurementRecord> for MeasurementNdjsonSource<R> {
    type Records = NdjsonMeasurements<R>;

    fn records(self) -> Result<Self::Records, ReportError> {
        Ok(NdjsonMeasurements {
            lines: BufReader::new(self.reader).lines(),
            line: 0,
        })
    }
}

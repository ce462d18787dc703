use std::{io::Read, num::NonZeroUsize};

use csv::StringRecord;
use energy_domain::domain::MeasurementRecord;
use serde::Deserialize;

use super::{from_csv_error, parse_decimal, parse_timestamp};
use crate::pipeline::{ReportError, Source};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUnit {
    #[default]
    Kwh,
    Wh,
}

impl EnergyUnit {
    pub fn to_kwh(self, value: f64) -> f64 {
        match self {
            Self::Kwh => value,
            Self::Wh => value / 1000.0,
        }
    }
}

/// Field layout of a positional export:
/// `ts; consumption x phases; production x phases; [temperature]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PositionalLayout {
    pub has_header: bool,
    /// Per-phase columns are summed into one consumption and one production value.
    pub phases: NonZeroUsize,
    pub unit: EnergyUnit,
    pub temperature: bool,
}

impl Default for PositionalLayout {
    fn default() -> Self {
        Self {
            has_header: true,
            phases: NonZeroUsize::MIN,
            unit: EnergyUnit::Kwh,
            temperature: true,
        }
    }
}

impl PositionalLayout {
    pub fn field_count(&self) -> usize {
        1 + 2 * self.phases.get() + usize::from(self.temperature)
    }

    fn parse(&self, row: &StringRecord) -> Result<MeasurementRecord, ReportError> {
        let line = row.position().map_or(0, |p| p.line());
        let malformed = |reason: String| ReportError::MalformedRecord { line, reason };

        if row.len() != self.field_count() {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                self.field_count(),
                row.len()
            )));
        }

        let phases = self.phases.get();
        let phase_sum = |first: usize| -> Result<f64, ReportError> {
            (first..first + phases).try_fold(0.0, |acc, idx| {
                let value = parse_decimal(&row[idx]).map_err(malformed)?;
                Ok::<f64, ReportError>(acc + value)
            })
        };

        let ts = parse_timestamp(&row[0]).map_err(malformed)?;
        let consumption_kwh = self.unit.to_kwh(phase_sum(1)?);
        let production_kwh = self.unit.to_kwh(phase_sum(1 + phases)?);
        let temperature_c = if self.temperature {
            Some(parse_decimal(&row[1 + 2 * phases]).map_err(malformed)?)
        } else {
            None
        };

        Ok(MeasurementRecord {
            ts,
            consumption_kwh,
            production_kwh,
            temperature_c,
        })
    }
}

/// Delimited source addressed by field position; values may use a decimal
/// comma or point.
pub struct MeasurementPositionalSource<R> {
    reader: R,
    delimiter: u8,
    layout: PositionalLayout,
}

impl<R: Read> MeasurementPositionalSource<R> {
    pub fn new(reader: R, delimiter: u8, layout: PositionalLayout) -> Self {
        Self {
            reader,
            delimiter,
            layout,
        }
    }
}

pub struct PositionalMeasurements<R> {
    rows: csv::StringRecordsIntoIter<R>,
    layout: PositionalLayout,
}

impl<R: Read> Iterator for PositionalMeasurements<R> {
    type Item = Result<MeasurementRecord, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.map_err(from_csv_error).and_then(|row| self.layout.parse(&row)))
    }
}

impl<R: Read> Source<MeasurementRecord> for MeasurementPositionalSource<R> {
    type Records = PositionalMeasurements<R>;

    fn records(self) -> Result<Self::Records, ReportError> {
        // Field counts are checked per row so the error names the expected layout.
        let rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.layout.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(self.reader);

        Ok(PositionalMeasurements {
            rows: rdr.into_records(),
            layout: self.layout,
        })
    }
}

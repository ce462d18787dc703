use time::{Date, PrimitiveDateTime};

/// One timestamped reading of consumption, production and outdoor temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub ts: PrimitiveDateTime,
    pub consumption_kwh: f64,
    pub production_kwh: f64,
    pub temperature_c: Option<f64>,
}

impl MeasurementRecord {
    /// Calendar date the record belongs to when grouping by day.
    pub fn date(&self) -> Date {
        self.ts.date()
    }
}

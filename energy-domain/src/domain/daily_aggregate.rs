use time::Date;

use super::MeasurementRecord;

/// Per-day reduction of measurement records.
///
/// Only created from a first record, so `record_count` is never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAggregate {
    date: Date,
    consumption_sum: f64,
    production_sum: f64,
    temperature_sum: f64,
    temperature_samples: u32,
    record_count: u32,
}

impl DailyAggregate {
    pub(crate) fn first(record: &MeasurementRecord) -> Self {
        let mut day = Self {
            date: record.date(),
            consumption_sum: 0.0,
            production_sum: 0.0,
            temperature_sum: 0.0,
            temperature_samples: 0,
            record_count: 0,
        };
        day.absorb(record);
        day
    }

    pub(crate) fn absorb(&mut self, record: &MeasurementRecord) {
        debug_assert_eq!(record.date(), self.date);

        self.consumption_sum += record.consumption_kwh;
        self.production_sum += record.production_kwh;
        if let Some(t) = record.temperature_c {
            self.temperature_sum += t;
            self.temperature_samples += 1;
        }
        self.record_count += 1;
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn consumption_sum(&self) -> f64 {
        self.consumption_sum
    }

    pub fn production_sum(&self) -> f64 {
        self.production_sum
    }

    pub fn temperature_sum(&self) -> f64 {
        self.temperature_sum
    }

    pub fn record_count(&self) -> u32 {
        self.record_count
    }

    /// Mean of the day's temperature readings, `None` if the day had none.
    pub fn temperature_avg(&self) -> Option<f64> {
        (self.temperature_samples > 0).then(|| self.temperature_sum / f64::from(self.temperature_samples))
    }
}

use time::{Date, Month};

use super::QueryError;
use crate::domain::MeasurementRecord;

/// Inclusive calendar-date range. Bounds are stored in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Bounds may be given in either order.
    pub fn new(a: Date, b: Date) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// What a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Range(DateRange),
    /// Matches on the month alone; `year` is the deployment year shown in the report.
    Month { month: Month, year: i32 },
    Year(i32),
}

impl Period {
    pub fn range(a: Date, b: Date) -> Self {
        Self::Range(DateRange::new(a, b))
    }

    pub fn month_number(number: u8, year: i32) -> Result<Self, QueryError> {
        let month = Month::try_from(number).map_err(|_| QueryError::InvalidMonth(number))?;
        Ok(Self::Month { month, year })
    }

    pub fn includes(&self, record: &MeasurementRecord) -> bool {
        match self {
            Self::Range(range) => range.contains(record.date()),
            Self::Month { month, .. } => record.ts.month() == *month,
            Self::Year(year) => record.ts.year() == *year,
        }
    }
}

/// Records falling in `period`, in source order.
pub fn select<'a>(records: &'a [MeasurementRecord], period: &Period) -> Vec<&'a MeasurementRecord> {
    records.iter().filter(|r| period.includes(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn record(ts: time::PrimitiveDateTime, kwh: f64) -> MeasurementRecord {
        MeasurementRecord {
            ts,
            consumption_kwh: kwh,
            production_kwh: 0.0,
            temperature_c: None,
        }
    }

    fn sample() -> Vec<MeasurementRecord> {
        vec![
            record(datetime!(2025-09-30 23:00), 1.0),
            record(datetime!(2025-10-01 00:00), 2.0),
            record(datetime!(2025-10-01 23:59), 3.0),
            record(datetime!(2025-10-02 12:00), 4.0),
            record(datetime!(2025-10-03 00:00), 5.0),
            record(datetime!(2024-10-15 08:00), 6.0),
        ]
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let records = sample();
        let selected = select(&records, &Period::range(date!(2025 - 10 - 01), date!(2025 - 10 - 02)));
        let kwh: Vec<f64> = selected.iter().map(|r| r.consumption_kwh).collect();
        assert_eq!(kwh, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn range_filter_is_symmetric() {
        let records = sample();
        let forward = select(&records, &Period::range(date!(2025 - 09 - 30), date!(2025 - 10 - 02)));
        let backward = select(&records, &Period::range(date!(2025 - 10 - 02), date!(2025 - 09 - 30)));
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 4);
    }

    #[test]
    fn month_ignores_record_year() {
        let records = sample();
        let period = Period::month_number(10, 2025).expect("valid month");
        let kwh: Vec<f64> = select(&records, &period).iter().map(|r| r.consumption_kwh).collect();
        assert_eq!(kwh, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn year_filters_by_timestamp_year() {
        let records = sample();
        assert_eq!(select(&records, &Period::Year(2024)).len(), 1);
        assert_eq!(select(&records, &Period::Year(2025)).len(), 5);
    }

    #[test]
    fn month_number_rejects_out_of_range() {
        assert_eq!(Period::month_number(0, 2025), Err(QueryError::InvalidMonth(0)));
        assert_eq!(Period::month_number(13, 2025), Err(QueryError::InvalidMonth(13)));
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let records = sample();
        let period = Period::month_number(3, 2025).expect("valid month");
        assert!(select(&records, &period).is_empty());
    }
}

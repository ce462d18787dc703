use time::Date;

use crate::queries::Period;

/// A single day picked out of a summarized period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayExtreme {
    pub date: Date,
    pub consumption_kwh: f64,
    pub temperature_avg: Option<f64>,
}

/// Totals and extremes over the records selected for one period.
///
/// Totals and `average_temperature` are record-level reductions; the day
/// extremes come from the per-day aggregation of the same selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: Period,
    pub total_consumption: f64,
    pub total_production: f64,
    /// `total_consumption - total_production`, negative on a production surplus.
    pub net_load: f64,
    pub average_temperature: Option<f64>,
    pub best_day: DayExtreme,
    pub worst_day: DayExtreme,
    pub record_count: usize,
    pub day_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeriodOutcome {
    Summarized(PeriodSummary),
    /// The selection matched no records.
    NoData(Period),
}

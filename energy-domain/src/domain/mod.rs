pub mod daily_aggregate;
pub mod measurement;
pub mod period_summary;

pub use daily_aggregate::DailyAggregate;
pub use measurement::MeasurementRecord;
pub use period_summary::{DayExtreme, PeriodOutcome, PeriodSummary};

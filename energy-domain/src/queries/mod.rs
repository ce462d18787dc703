pub mod daily;
pub mod period;
pub mod summary;

pub use daily::aggregate_by_day;
pub use period::{select, DateRange, Period};
pub use summary::summarize;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u8),
}

pub mod config;
pub mod format;
pub mod observability;
pub mod pipeline;
pub mod report;
pub mod sinks;
pub mod sources;

pub use pipeline::{load_records, MalformedPolicy, ReportError, Sink, Source};

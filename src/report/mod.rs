//! Run summary: derived rates and latencies plus text/JSON rendering.
mod bytes;
mod json;
mod summary;
mod text;


pub use bytes::ByteSize;
pub use json::render_json;
pub use summary::{DerivedMetrics, LatencySummary, PercentileValue, REPORTED_PERCENTILES, RunReport};
pub use text::TextReport;

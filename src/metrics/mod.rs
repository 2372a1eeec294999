//! Per-session request statistics and latency histograms.
mod histogram;
mod outcome;
mod stats;


pub use histogram::{LatencyHistogram, SIGNIFICANT_FIGURES};
pub use outcome::{FailureCause, RequestOutcome, ResponseSample};
pub use stats::RequesterStats;

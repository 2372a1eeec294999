//! Core library for the `loadwrk` CLI.
//!
//! `loadwrk` drives a fixed number of concurrent sessions against one HTTP
//! endpoint for a fixed duration, then reports throughput, latency
//! percentiles, and a breakdown of failures. The modules here are the
//! building blocks of the binary; library APIs may evolve with the CLI.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod load;
mod logger;
pub mod metrics;
pub mod report;
pub mod shutdown;
mod shutdown_handlers;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;

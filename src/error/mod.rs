mod app;
mod config;
mod http;
mod load;
mod metrics;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::{HttpError, RedirectBlocked};
pub use load::LoadError;
pub use metrics::MetricsError;
pub use validation::ValidationError;

//! Configuration loading, CLI precedence, and run configuration.
mod apply;
mod loader;
mod run;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;
pub use run::{ClientPolicy, RequestSpec, RunConfig, TlsMaterial};

#[cfg(test)]
pub(crate) use loader::load_config_file;

use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{TesterArgs, parse_header, parsers::parse_duration_arg};
use crate::config::types::ConfigFile;
use crate::config::{RunConfig, apply_config};
use crate::error::{AppError, AppResult, ConfigError};
use crate::http::escape_url_query;

thread_local! {
    static BASE_MATCHES: ArgMatches = TesterArgs::command().get_matches_from(["loadwrk"]);
}

/// Parses a header string in `Key: Value` format.
///
/// # Errors
///
/// Returns an error when the header is malformed.
pub fn parse_header_input(input: &str) -> AppResult<(String, String)> {
    parse_header(input).map_err(AppError::from)
}

/// Parses a duration argument (e.g. `10s`, `500ms`, `250`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Re-escapes the query values of a raw URL.
#[must_use]
pub fn escape_url_query_input(input: &str) -> String {
    escape_url_query(input)
}

/// Applies a TOML config on top of default CLI args and builds the run
/// configuration.
///
/// # Errors
///
/// Returns an error when the config cannot be parsed or applied, or when the
/// resulting run configuration is invalid.
pub fn run_config_from_toml(input: &str) -> AppResult<RunConfig> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: "fuzz.toml".into(),
            source: err,
        })
    })?;
    BASE_MATCHES.with(|matches| {
        let mut args = TesterArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, &config)?;
        RunConfig::from_args(&args)
    })
}

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, TesterArgs, parse_header, parse_method};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// A config value only fills an option the user did not pass on the command
/// line.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    apply_target(args, matches, config);

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration
    {
        args.duration = ensure_positive_u64(duration, "duration")?;
    }

    if !is_cli(matches, "connections")
        && let Some(connections) = config.connections
    {
        args.connections = ensure_positive_usize(connections, "connections")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration()?;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.as_deref()
    {
        args.method = parse_method(method)
            .map_err(|err| AppError::config(ConfigError::InvalidMethod { source: err }))?;
    }

    if !is_cli(matches, "host_header")
        && let Some(host) = config.host.clone()
    {
        args.host_header = Some(host);
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body.clone()
    {
        args.body = Some(body);
    }

    apply_connection_policy(args, matches, config)?;

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    Ok(())
}

fn apply_target(args: &mut TesterArgs, matches: &ArgMatches, config: &ConfigFile) {
    let target_on_cli =
        is_cli(matches, "url") || is_cli(matches, "url_flag") || is_cli(matches, "url_file");
    if target_on_cli {
        return;
    }
    if let Some(url) = config.url.clone() {
        args.url = Some(url);
    } else if let Some(path) = config.url_file.clone() {
        args.url_file = Some(path);
    }
}

fn apply_connection_policy(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    apply_flag(matches, "allow_redirects", config.redirects, &mut args.allow_redirects);
    apply_flag(
        matches,
        "disable_compression",
        config.disable_compression,
        &mut args.disable_compression,
    );
    apply_flag(
        matches,
        "disable_keepalive",
        config.disable_keepalive,
        &mut args.disable_keepalive,
    );
    apply_flag(matches, "insecure", config.insecure, &mut args.insecure);

    if !is_cli(matches, "cert")
        && let Some(cert) = config.cert.clone()
    {
        args.cert = Some(cert);
    }
    if !is_cli(matches, "key")
        && let Some(key) = config.key.clone()
    {
        args.key = Some(key);
    }
    if !is_cli(matches, "cacert")
        && let Some(cacert) = config.cacert.clone()
    {
        args.cacert = Some(cacert);
    }

    if !is_cli(matches, "http_version")
        && let Some(version) = config.http_version
    {
        args.http_version = Some(version);
    }

    if !is_cli(matches, "cpus")
        && let Some(cpus) = config.cpus
    {
        args.cpus = Some(ensure_positive_usize(cpus, "cpus")?);
    }

    Ok(())
}

fn apply_flag(matches: &ArgMatches, name: &str, value: Option<bool>, target: &mut bool) {
    if !is_cli(matches, name)
        && let Some(value) = value
    {
        *target = value;
    }
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

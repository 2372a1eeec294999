use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpVersion, OutputFormat, parsers::parse_duration_arg};
use crate::error::AppResult;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub url_file: Option<String>,
    pub duration: Option<u64>,
    #[serde(alias = "concurrency", alias = "workers")]
    pub connections: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub method: Option<String>,
    pub host: Option<String>,
    pub headers: Option<Vec<String>>,
    pub body: Option<String>,
    pub redirects: Option<bool>,
    pub disable_compression: Option<bool>,
    pub disable_keepalive: Option<bool>,
    pub insecure: Option<bool>,
    pub cert: Option<String>,
    pub key: Option<String>,
    pub cacert: Option<String>,
    pub http_version: Option<HttpVersion>,
    pub cpus: Option<usize>,
    pub output_format: Option<OutputFormat>,
}

/// Bare numbers are milliseconds, matching `--timeout`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Millis(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Millis(millis) => parse_duration_arg(&millis.to_string()),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Method, Url};

use crate::args::{HttpVersion, TesterArgs};
use crate::error::{AppError, AppResult, HttpError, ValidationError};
use crate::http::escape_url_query;

/// Immutable description of one run, shared by every load session.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub duration: Duration,
    pub workers: usize,
    pub request: RequestSpec,
    pub client: ClientPolicy,
}

/// The single request shape issued repeatedly during a run.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
    pub host: Option<String>,
    pub headers: BTreeMap<String, String>,
}

/// Connection policy handed to the client factory.
#[derive(Debug, Clone)]
pub struct ClientPolicy {
    pub request_timeout: Duration,
    pub allow_redirects: bool,
    pub disable_compression: bool,
    pub disable_keepalive: bool,
    pub insecure: bool,
    pub tls: TlsMaterial,
    pub http_version: Option<HttpVersion>,
}

#[derive(Debug, Clone, Default)]
pub struct TlsMaterial {
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub cacert: Option<PathBuf>,
}

impl Default for ClientPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(1000),
            allow_redirects: false,
            disable_compression: false,
            disable_keepalive: false,
            insecure: false,
            tls: TlsMaterial::default(),
            http_version: None,
        }
    }
}

impl RequestSpec {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            host: None,
            headers: BTreeMap::new(),
        }
    }
}

impl RunConfig {
    /// Builds the run configuration from merged CLI/config arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid, or when the URL or
    /// body file cannot be read.
    pub fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let url = resolve_url(args)?;
        validate_url(&url)?;

        let mut request = RequestSpec::new(args.method.clone(), url);
        request.body = resolve_body(args.body.as_deref())?;
        request.host = args.host_header.clone();
        for (key, value) in &args.headers {
            request.headers.insert(key.clone(), value.clone());
        }

        let client = ClientPolicy {
            request_timeout: args.request_timeout,
            allow_redirects: args.allow_redirects,
            disable_compression: args.disable_compression,
            disable_keepalive: args.disable_keepalive,
            insecure: args.insecure,
            tls: TlsMaterial {
                cert: args.cert.as_ref().map(PathBuf::from),
                key: args.key.as_ref().map(PathBuf::from),
                cacert: args.cacert.as_ref().map(PathBuf::from),
            },
            http_version: args.http_version,
        };

        Ok(Self {
            duration: Duration::from_secs(args.duration.get()),
            workers: args.connections.get(),
            request,
            client,
        })
    }

    /// Run length in whole seconds; sizes the latency histograms.
    #[must_use]
    pub const fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }
}

fn resolve_url(args: &TesterArgs) -> AppResult<String> {
    if let Some(url) = args.target_url() {
        return Ok(url.trim().to_owned());
    }
    let path = args
        .url_file
        .as_ref()
        .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::http(HttpError::ReadUrlFile {
            path: PathBuf::from(path),
            source: err,
        })
    })?;
    let url = content.trim();
    if url.is_empty() {
        return Err(AppError::http(HttpError::UrlFileEmpty {
            path: PathBuf::from(path),
        }));
    }
    Ok(url.to_owned())
}

fn resolve_body(body: Option<&str>) -> AppResult<Option<String>> {
    let Some(body) = body else {
        return Ok(None);
    };
    if let Some(path) = body.strip_prefix('@') {
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::http(HttpError::ReadBodyFile {
                path: PathBuf::from(path),
                source: err,
            })
        })?;
        return Ok(Some(content));
    }
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(body.to_owned()))
}

fn validate_url(url: &str) -> AppResult<()> {
    let escaped = escape_url_query(url);
    let parsed = Url::parse(&escaped).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: url.to_owned(),
            source: err,
        })
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::validation(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            }));
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(())
}

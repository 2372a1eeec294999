use clap::Parser;
use reqwest::Method;
use std::time::Duration;

use super::parsers::{
    parse_duration_arg, parse_header, parse_method, parse_positive_u64, parse_positive_usize,
};
use super::types::{HttpVersion, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Drive an HTTP endpoint with concurrent workers for a fixed duration and report throughput and tail latency."
)]
pub struct TesterArgs {
    /// Target URL for the run
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Target URL (flag form of the positional argument)
    #[arg(long = "url", short = 'u', id = "url_flag", conflicts_with = "url")]
    pub url_flag: Option<String>,

    /// Read the target URL from a file
    #[arg(long = "url-file", short = 'f', conflicts_with_all = ["url", "url_flag"])]
    pub url_file: Option<String>,

    /// Duration of the run (seconds)
    #[arg(
        long = "duration",
        short = 'd',
        default_value = "10",
        value_parser = parse_positive_u64
    )]
    pub duration: PositiveU64,

    /// Number of concurrent workers
    #[arg(
        long = "connections",
        short = 'c',
        aliases = ["concurrency", "workers"],
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub connections: PositiveUsize,

    /// Per-request timeout (bare numbers are milliseconds; supports ms/s/m/h)
    #[arg(
        long = "timeout",
        short = 'T',
        default_value = "1000ms",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// HTTP method to use
    #[arg(long, short = 'X', short_alias = 'M', default_value = "GET", value_parser = parse_method)]
    pub method: Method,

    /// Override the Host header (the connection still goes to the URL's host)
    #[arg(long = "host")]
    pub host_header: Option<String>,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body, or @path to read it from a file
    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Follow redirects instead of counting them as failures
    #[arg(long = "redirects", alias = "redir")]
    pub allow_redirects: bool,

    /// Do not advertise or accept compressed responses
    #[arg(long = "no-compression", alias = "no-c")]
    pub disable_compression: bool,

    /// Open a new connection for every request
    #[arg(long = "no-keepalive", alias = "no-ka")]
    pub disable_keepalive: bool,

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', alias = "no-vr")]
    pub insecure: bool,

    /// Client certificate (PEM); requires --key
    #[arg(long)]
    pub cert: Option<String>,

    /// Client private key (PKCS#8 PEM); requires --cert
    #[arg(long)]
    pub key: Option<String>,

    /// Extra root CA certificate (PEM)
    #[arg(long, alias = "ca")]
    pub cacert: Option<String>,

    /// Force an HTTP version (1.1 or 2); negotiated via ALPN when omitted
    #[arg(long = "http-version")]
    pub http_version: Option<HttpVersion>,

    /// Cap the number of runtime worker threads
    #[arg(long, value_parser = parse_positive_usize)]
    pub cpus: Option<PositiveUsize>,

    /// Report format
    #[arg(long = "output-format", short = 'o', default_value = "text")]
    pub output_format: OutputFormat,

    /// Path to config file (TOML/JSON). Defaults to ./loadwrk.toml or ./loadwrk.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by LOADWRK_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl TesterArgs {
    /// Target URL from either the positional argument or `--url`.
    #[must_use]
    pub fn target_url(&self) -> Option<&str> {
        self.url.as_deref().or(self.url_flag.as_deref())
    }
}

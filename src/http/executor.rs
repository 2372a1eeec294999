use futures_util::StreamExt;
use reqwest::{
    Client, Method, Request, StatusCode, Url,
    header::{HOST, HeaderMap, HeaderName, HeaderValue, USER_AGENT},
};
use tokio::time::Instant;

use crate::args::DEFAULT_USER_AGENT;
use crate::config::RequestSpec;
use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::{FailureCause, ResponseSample};

use super::{estimate_header_size, escape_url_query};

/// Request parts resolved once per session and replayed on every iteration.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl PreparedRequest {
    /// Escapes the URL query, validates headers, and appends the
    /// `User-Agent`. A host override replaces any caller `Host` header.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL or a header cannot be represented.
    pub fn from_spec(spec: &RequestSpec) -> AppResult<Self> {
        let url = Url::parse(&escape_url_query(&spec.url)).map_err(|err| {
            AppError::validation(ValidationError::InvalidUrl {
                url: spec.url.clone(),
                source: err,
            })
        })?;

        let mut headers = HeaderMap::with_capacity(spec.headers.len().saturating_add(2));
        for (key, value) in &spec.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
                AppError::validation(ValidationError::InvalidHeaderName {
                    header: key.clone(),
                    source: err,
                })
            })?;
            let value = header_value(key, value)?;
            headers.append(name, value);
        }
        headers.append(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        if let Some(host) = spec.host.as_deref() {
            headers.insert(HOST, header_value("Host", host)?);
        }

        Ok(Self {
            method: spec.method.clone(),
            url,
            headers,
            body: spec.body.clone(),
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn build(&self, client: &Client) -> Result<Request, reqwest::Error> {
        let mut builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        if let Some(body) = self.body.as_ref() {
            builder = builder.body(body.clone());
        }
        builder.build()
    }
}

fn header_value(name: &str, value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|err| {
        AppError::validation(ValidationError::InvalidHeaderValue {
            header: name.to_owned(),
            source: err,
        })
    })
}

/// Issues one request, drains the response, and classifies the outcome.
///
/// Timing starts just before dispatch and stops once the body is fully read,
/// so the body always travels to completion before the next request.
///
/// # Errors
///
/// Returns the [`FailureCause`] for transport failures, body read failures,
/// and statuses that do not count as successes.
pub async fn execute_request(
    client: &Client,
    request: &PreparedRequest,
) -> Result<ResponseSample, FailureCause> {
    let request = request
        .build(client)
        .map_err(|err| FailureCause::from_request_error(&err))?;

    let start = Instant::now();
    let response = client
        .execute(request)
        .await
        .map_err(|err| FailureCause::from_request_error(&err))?;

    let status = response.status();
    let header_bytes = estimate_header_size(response.headers());
    let declared_length = response.content_length();
    let body_bytes = drain_response_body(response)
        .await
        .map_err(|err| FailureCause::from_body_error(&err))?;

    let bytes = classify_response(status, body_bytes, declared_length, header_bytes)?;
    Ok(ResponseSample {
        bytes,
        elapsed: start.elapsed(),
    })
}

/// Maps a received response to the byte count credited to it.
///
/// 2xx responses count the bytes actually read. 301 and 307 count the
/// declared `Content-Length` (zero when absent). Every other status fails.
///
/// # Errors
///
/// Returns [`FailureCause::Status`] for statuses that are not successes.
pub fn classify_response(
    status: StatusCode,
    body_bytes: u64,
    declared_length: Option<u64>,
    header_bytes: u64,
) -> Result<u64, FailureCause> {
    if status.is_success() {
        return Ok(body_bytes.saturating_add(header_bytes));
    }
    if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::TEMPORARY_REDIRECT {
        return Ok(declared_length.unwrap_or(0).saturating_add(header_bytes));
    }
    Err(FailureCause::Status(status.as_u16()))
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

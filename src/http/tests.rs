use super::test_support::{OK_RESPONSE_BYTES, ok_response, redirect_response, spawn_http_server};
use super::*;
use crate::config::{ClientPolicy, RequestSpec};
use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::FailureCause;
use reqwest::StatusCode;
use reqwest::header::{HOST, HeaderMap, HeaderValue, USER_AGENT};
use std::future::Future;
use std::path::PathBuf;

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

#[test]
fn escape_query_encodes_values() -> AppResult<()> {
    let escaped = escape_url_query("http://host/p?a=x y&b=1");
    if escaped != "http://host/p?a=x%20y&b=1" {
        return Err(AppError::validation(format!("Unexpected escape: {escaped}")));
    }
    Ok(())
}

#[test]
fn escape_query_leaves_keys_and_bare_pairs() -> AppResult<()> {
    let cases = [
        ("http://host/path", "http://host/path"),
        ("http://host/p?flag", "http://host/p?flag"),
        ("http://host/p?my key=a+b", "http://host/p?my key=a%2Bb"),
        ("http://host/p?a=1=2&&b=", "http://host/p?a=1=2&&b="),
        ("http://host/p?a=1=2&b=x y", "http://host/p?a=1=2&b=x%20y"),
        ("http://host/p?q=caf\u{e9}", "http://host/p?q=caf%C3%A9"),
    ];
    for (input, expected) in cases {
        let escaped = escape_url_query(input);
        if escaped != expected {
            return Err(AppError::validation(format!(
                "Escape of '{input}' gave '{escaped}', expected '{expected}'"
            )));
        }
    }
    Ok(())
}

#[test]
fn header_estimate_counts_names_once() -> AppResult<()> {
    let mut headers = HeaderMap::new();
    headers.append("content-type", HeaderValue::from_static("text/plain"));
    headers.append("set-cookie", HeaderValue::from_static("a=1"));
    headers.append("set-cookie", HeaderValue::from_static("b=2"));

    // (12 + 4 + 10) + (10 + 4 + 3 + 3) + 2
    let estimate = estimate_header_size(&headers);
    if estimate != 48 {
        return Err(AppError::validation(format!(
            "Unexpected header estimate: {estimate}"
        )));
    }
    if estimate_header_size(&HeaderMap::new()) != 2 {
        return Err(AppError::validation("Expected empty block to be 2 bytes"));
    }
    Ok(())
}

#[test]
fn classify_success_counts_body_and_headers() -> AppResult<()> {
    if classify_response(StatusCode::OK, 100, Some(100), 80) != Ok(180) {
        return Err(AppError::validation("Expected 200 to count 180 bytes"));
    }
    if classify_response(StatusCode::NO_CONTENT, 0, None, 40) != Ok(40) {
        return Err(AppError::validation("Expected 204 to count headers"));
    }
    Ok(())
}

#[test]
fn classify_moved_uses_declared_length() -> AppResult<()> {
    if classify_response(StatusCode::MOVED_PERMANENTLY, 12, Some(0), 50) != Ok(50) {
        return Err(AppError::validation("Expected 301 to count 50 bytes"));
    }
    if classify_response(StatusCode::TEMPORARY_REDIRECT, 0, None, 30) != Ok(30) {
        return Err(AppError::validation(
            "Expected 307 without length to count headers only",
        ));
    }
    Ok(())
}

#[test]
fn classify_other_statuses_fail() -> AppResult<()> {
    for status in [
        StatusCode::FOUND,
        StatusCode::SEE_OTHER,
        StatusCode::PERMANENT_REDIRECT,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        let outcome = classify_response(status, 10, Some(10), 10);
        if outcome != Err(FailureCause::Status(status.as_u16())) {
            return Err(AppError::validation(format!(
                "Expected {status} to fail, got {outcome:?}"
            )));
        }
    }
    Ok(())
}

#[test]
fn build_client_with_defaults() -> AppResult<()> {
    build_client(&ClientPolicy::default())?;
    Ok(())
}

#[test]
fn build_client_rejects_cert_without_key() -> AppResult<()> {
    let mut policy = ClientPolicy::default();
    policy.tls.cert = Some(PathBuf::from("client.pem"));

    match build_client(&policy) {
        Err(AppError::Validation(ValidationError::CertRequiresKey)) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {err}"))),
        Ok(_) => Err(AppError::validation("Expected cert without key to fail")),
    }
}

#[test]
fn build_client_rejects_key_without_cert() -> AppResult<()> {
    let mut policy = ClientPolicy::default();
    policy.tls.key = Some(PathBuf::from("client.key"));

    match build_client(&policy) {
        Err(AppError::Validation(ValidationError::KeyRequiresCert)) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {err}"))),
        Ok(_) => Err(AppError::validation("Expected key without cert to fail")),
    }
}

#[test]
fn build_client_reports_missing_cacert() -> AppResult<()> {
    let dir = tempfile::tempdir()?;
    let mut policy = ClientPolicy::default();
    policy.tls.cacert = Some(dir.path().join("missing-ca.pem"));

    match build_client(&policy) {
        Err(AppError::Http(crate::error::HttpError::ReadCacert { .. })) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {err}"))),
        Ok(_) => Err(AppError::validation("Expected missing cacert to fail")),
    }
}

#[test]
fn prepared_request_appends_user_agent_and_host() -> AppResult<()> {
    let mut spec = RequestSpec::new(reqwest::Method::GET, "http://localhost/p?q=a b");
    spec.headers
        .insert("User-Agent".to_owned(), "custom/1.0".to_owned());
    spec.headers
        .insert("Host".to_owned(), "ignored.example".to_owned());
    spec.host = Some("override.example".to_owned());

    let prepared = PreparedRequest::from_spec(&spec)?;

    let agents: Vec<&str> = prepared
        .headers()
        .get_all(USER_AGENT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    if agents.first() != Some(&"custom/1.0") || agents.len() != 2 {
        return Err(AppError::validation(format!(
            "Unexpected user agents: {agents:?}"
        )));
    }
    let hosts: Vec<_> = prepared.headers().get_all(HOST).iter().collect();
    if hosts.len() != 1
        || hosts.first().map(|value| value.as_bytes()) != Some(b"override.example".as_slice())
    {
        return Err(AppError::validation("Expected host override to win"));
    }
    if prepared.url().query() != Some("q=a%20b") {
        return Err(AppError::validation(format!(
            "Unexpected query: {:?}",
            prepared.url().query()
        )));
    }
    Ok(())
}

#[test]
fn prepared_request_rejects_invalid_header_name() -> AppResult<()> {
    let mut spec = RequestSpec::new(reqwest::Method::GET, "http://localhost/");
    spec.headers.insert("Bad Header".to_owned(), "x".to_owned());

    match PreparedRequest::from_spec(&spec) {
        Err(AppError::Validation(ValidationError::InvalidHeaderName { .. })) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {err}"))),
        Ok(_) => Err(AppError::validation("Expected invalid header name to fail")),
    }
}

#[test]
fn execute_request_counts_body_and_headers() -> AppResult<()> {
    run_async_test(async {
        let (base, server) = spawn_http_server(ok_response).await?;
        let client = build_client(&ClientPolicy::default())?;
        let request = PreparedRequest::from_spec(&RequestSpec::new(
            reqwest::Method::GET,
            format!("{base}/"),
        ))?;

        let outcome = execute_request(&client, &request).await;
        server.abort();

        match outcome {
            Ok(sample) if sample.bytes == OK_RESPONSE_BYTES => Ok(()),
            other => Err(AppError::validation(format!(
                "Unexpected outcome: {other:?}"
            ))),
        }
    })
}

#[test]
fn execute_request_reports_blocked_redirect() -> AppResult<()> {
    run_async_test(async {
        let (base, server) = spawn_http_server(redirect_response).await?;
        let client = build_client(&ClientPolicy::default())?;
        let request = PreparedRequest::from_spec(&RequestSpec::new(
            reqwest::Method::GET,
            format!("{base}/start"),
        ))?;

        let outcome = execute_request(&client, &request).await;
        server.abort();

        if outcome != Err(FailureCause::RedirectBlocked) {
            return Err(AppError::validation(format!(
                "Expected blocked redirect, got {outcome:?}"
            )));
        }
        Ok(())
    })
}

#[test]
fn execute_request_follows_redirect_when_allowed() -> AppResult<()> {
    run_async_test(async {
        let (base, server) = spawn_http_server(redirect_response).await?;
        let policy = ClientPolicy {
            allow_redirects: true,
            ..ClientPolicy::default()
        };
        let client = build_client(&policy)?;
        let request = PreparedRequest::from_spec(&RequestSpec::new(
            reqwest::Method::GET,
            format!("{base}/start"),
        ))?;

        let outcome = execute_request(&client, &request).await;
        server.abort();

        match outcome {
            Ok(sample) if sample.bytes == OK_RESPONSE_BYTES => Ok(()),
            other => Err(AppError::validation(format!(
                "Expected followed redirect, got {other:?}"
            ))),
        }
    })
}

#[test]
fn execute_request_reports_connect_failure() -> AppResult<()> {
    run_async_test(async {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let client = build_client(&ClientPolicy::default())?;
        let request = PreparedRequest::from_spec(&RequestSpec::new(
            reqwest::Method::GET,
            format!("http://{addr}/"),
        ))?;

        match execute_request(&client, &request).await {
            Err(FailureCause::Connect(root)) if !root.is_empty() => Ok(()),
            other => Err(AppError::validation(format!(
                "Expected connect failure, got {other:?}"
            ))),
        }
    })
}

use std::path::Path;
use std::time::Duration;

use reqwest::{Certificate, Client, ClientBuilder, Identity, redirect};

use crate::args::HttpVersion;
use crate::config::{ClientPolicy, TlsMaterial};
use crate::error::{AppError, AppResult, HttpError, RedirectBlocked, ValidationError};

/// Builds the HTTP client a load session issues its requests through.
///
/// Every session owns its client so connections are never shared across
/// sessions.
///
/// # Errors
///
/// Returns an error when TLS material is incomplete, unreadable, or invalid,
/// or when the client cannot be constructed.
pub fn build_client(policy: &ClientPolicy) -> AppResult<Client> {
    let mut client_builder = Client::builder().timeout(policy.request_timeout);

    client_builder = if policy.allow_redirects {
        client_builder.redirect(redirect::Policy::default())
    } else {
        client_builder.redirect(redirect::Policy::custom(|attempt| {
            attempt.error(RedirectBlocked)
        }))
    };

    if policy.disable_keepalive {
        client_builder = client_builder
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    if policy.disable_compression {
        client_builder = client_builder.no_gzip().no_brotli().no_deflate();
    }

    client_builder = apply_tls_material(client_builder, &policy.tls)?;

    if policy.insecure {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder = match policy.http_version {
        Some(HttpVersion::V1_1) => client_builder.http1_only(),
        Some(HttpVersion::V2) => client_builder.http2_prior_knowledge(),
        None => client_builder,
    };

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

fn apply_tls_material(
    mut client_builder: ClientBuilder,
    tls: &TlsMaterial,
) -> AppResult<ClientBuilder> {
    match (tls.cert.as_deref(), tls.key.as_deref()) {
        (Some(cert_path), Some(key_path)) => {
            client_builder = client_builder.identity(load_identity(cert_path, key_path)?);
        }
        (Some(_), None) => return Err(AppError::validation(ValidationError::CertRequiresKey)),
        (None, Some(_)) => return Err(AppError::validation(ValidationError::KeyRequiresCert)),
        (None, None) => {}
    }

    if let Some(path) = tls.cacert.as_deref() {
        let bytes = std::fs::read(path).map_err(|err| {
            AppError::http(HttpError::ReadCacert {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        let cert = Certificate::from_pem(&bytes).map_err(|err| {
            AppError::http(HttpError::InvalidCacert {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        client_builder = client_builder.add_root_certificate(cert);
    }

    Ok(client_builder)
}

fn load_identity(cert_path: &Path, key_path: &Path) -> AppResult<Identity> {
    let cert_bytes = std::fs::read(cert_path).map_err(|err| {
        AppError::http(HttpError::ReadCert {
            path: cert_path.to_path_buf(),
            source: err,
        })
    })?;
    let key_bytes = std::fs::read(key_path).map_err(|err| {
        AppError::http(HttpError::ReadKey {
            path: key_path.to_path_buf(),
            source: err,
        })
    })?;
    Identity::from_pkcs8_pem(&cert_bytes, &key_bytes)
        .map_err(|err| AppError::http(HttpError::InvalidIdentity { source: err }))
}

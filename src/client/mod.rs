//! Build service HTTP client.
//!
//! Submits resolved package options to the remote generator and relays
//! publish requests for already-built artifacts. The generate path
//! retries exactly once through the safe-URL proxy when the service
//! reports that it could not fetch the referenced images directly
//! (connection refused upstream, or an HTTP 403).

use std::time::Duration;

use bytes::Bytes;
use log::{debug, info, warn};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Endpoints;
use crate::error::{AgpackError, Result, ValidationError};
use crate::options::{validate, PackageOptions};

/// How long a single build or publish request may take end to end.
///
/// Package builds are slow but bounded; requests that outlive this are
/// failed rather than left hanging.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Maximum submission attempts per generate call: the original request
/// plus at most one safe-URL retry.
const MAX_BUILD_ATTEMPTS: u32 = 2;

/// Marker the build service embeds in its error body when an upstream
/// image fetch was refused.
const CONNECTION_REFUSED_MARKER: &str = "ECONNREFUSED";

/// Payload for publishing an already-built artifact to the gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishApk {
    /// Destination-service client id.
    pub client_id: String,
    /// Destination-service client secret.
    pub client_key: String,
    /// Target application id in the gallery.
    pub app_id: String,
    /// Base64-encoded APK to publish.
    pub apk: String,
}

impl PublishApk {
    /// Credential fields that must be present before anything is sent.
    fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.is_empty() {
            missing.push("client_id");
        }
        if self.client_key.is_empty() {
            missing.push("client_key");
        }
        if self.app_id.is_empty() {
            missing.push("app_id");
        }
        missing
    }
}

/// Client for the package generator and publish services.
#[derive(Debug, Clone)]
pub struct BuildClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl BuildClient {
    /// Create a client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        Self::with_timeout(endpoints, REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoints })
    }

    /// The endpoint set this client talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Generate a package from resolved options, returning the artifact
    /// bytes.
    ///
    /// Validation runs first; invalid options never reach the network.
    /// When the service answers 403 or reports a refused upstream image
    /// fetch, and the options are not already routed through the
    /// safe-URL proxy, the external URL fields are rewritten to the
    /// proxy and the request is resubmitted once. Any other failure, or
    /// a failure after the retry, surfaces as
    /// [`AgpackError::BuildService`].
    ///
    /// # Errors
    ///
    /// [`AgpackError::Validation`] for unsubmittable options,
    /// [`AgpackError::Http`] for transport failures, and
    /// [`AgpackError::BuildService`] for service rejections.
    pub async fn generate(&self, options: &PackageOptions) -> Result<Bytes> {
        let errors = validate(options);
        if !errors.is_empty() {
            return Err(AgpackError::Validation(errors));
        }

        let url = format!("{}/build_apk", self.endpoints.package_generator);
        let mut options = options.clone();
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(
                "submitting package options for {} to {url} (attempt {attempts})",
                options.package_id
            );

            let response = self.http.post(&url).json(&options).send().await?;
            let status = response.status();

            if status == StatusCode::OK {
                let artifact = response.bytes().await?;
                info!(
                    "package generated for {} ({} bytes)",
                    options.package_id,
                    artifact.len()
                );
                return Ok(artifact);
            }

            let status_text = status
                .canonical_reason()
                .unwrap_or("unknown")
                .to_owned();
            let body = response.text().await.unwrap_or_default();

            let images_blocked =
                body.contains(CONNECTION_REFUSED_MARKER) || status == StatusCode::FORBIDDEN;
            let can_retry = attempts < MAX_BUILD_ATTEMPTS
                && images_blocked
                && !uses_safe_urls(&options, &self.endpoints.safe_url_fetcher);

            if can_retry {
                warn!(
                    "package generation failed with blocked image fetches \
                     (status {status}); retrying with safe URLs"
                );
                options = with_safe_urls(options, &self.endpoints.safe_url_fetcher);
                continue;
            }

            return Err(AgpackError::BuildService {
                status: status.as_u16(),
                status_text,
                body,
            });
        }
    }

    /// Publish an already-built artifact, returning the service's
    /// response body.
    ///
    /// A payload missing any credential field is rejected locally:
    /// nothing is sent and `Ok(None)` is returned. A non-200 response
    /// surfaces as [`AgpackError::BuildService`], matching the generate
    /// path.
    pub async fn publish(&self, payload: &PublishApk) -> Result<Option<Bytes>> {
        let missing = payload.missing_credentials();
        if !missing.is_empty() {
            warn!("publish rejected: empty {}", missing.join(", "));
            return Ok(None);
        }

        let url = format!("{}/publish_apk", self.endpoints.package_generator);
        debug!("publishing app {} via {url}", payload.app_id);

        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            info!("app {} published", payload.app_id);
            return Ok(Some(response.bytes().await?));
        }

        let status_text = status.canonical_reason().unwrap_or("unknown").to_owned();
        let body = response.text().await.unwrap_or_default();
        Err(AgpackError::BuildService {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// True when the options' primary icon already routes through the proxy.
fn uses_safe_urls(options: &PackageOptions, safe_url_fetcher: &str) -> bool {
    !safe_url_fetcher.is_empty() && options.icon_url.contains(safe_url_fetcher)
}

/// Rewrite every externally hosted URL field to fetch through the
/// safe-URL proxy.
fn with_safe_urls(mut options: PackageOptions, safe_url_fetcher: &str) -> PackageOptions {
    for field in options.external_url_fields_mut() {
        if !field.is_empty() {
            *field = safe_url(field, safe_url_fetcher);
        }
    }
    options
}

fn safe_url(original: &str, safe_url_fetcher: &str) -> String {
    let encoded = utf8_percent_encode(original, NON_ALPHANUMERIC);
    format!("{safe_url_fetcher}?url={encoded}")
}

/// Local credential check used by publish; exported for reuse by
/// front ends that want to pre-validate a payload.
pub fn validate_publish_payload(payload: &PublishApk) -> Vec<ValidationError> {
    payload
        .missing_credentials()
        .into_iter()
        .map(|field| ValidationError::new(field, "must not be empty"))
        .collect()
}

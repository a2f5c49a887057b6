//! Google Workspace detection over DNS and HTTP
//!
//! Two probes, each a single outbound request with a bounded wait:
//! - MX lookup for the email's domain, matched against Google's mail exchangers
//! - HTTP GET of the Workspace sign-in endpoint for a domain
//!
//! Failures never escape as errors: they become a negative result with the
//! underlying fault attached.

use crate::extract::extract_domain;
use hickory_resolver::{
    config::{ResolverConfig, ResolverOpts},
    TokioAsyncResolver,
};
use serde::{Serialize, Serializer};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Substring present in every Google Workspace MX exchange host
pub const GOOGLE_MX_MARKER: &str = "aspmx.l.google.com";

/// Base of the Workspace probe URL; the domain and `/acs` are appended
pub const GOOGLE_APPS_PROBE_BASE: &str = "https://www.google.com/a";

/// Probe timeouts and resolver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Upper bound on one MX lookup, in milliseconds
    pub dns_timeout_ms: u64,
    /// Upper bound on the Workspace HTTP request, in milliseconds
    pub http_timeout_ms: u64,
    /// Resolver attempts per query
    pub dns_attempts: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            dns_timeout_ms: 2000,
            http_timeout_ms: 5000,
            dns_attempts: 2,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("probe timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("DNS lookup failed: {0}")]
    Dns(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl Serialize for ProbeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub status: bool,
    pub err: Option<ProbeError>,
}

impl ProbeResult {
    fn ok(status: bool) -> Self {
        Self { status, err: None }
    }

    fn failed(err: ProbeError) -> Self {
        Self {
            status: false,
            err: Some(err),
        }
    }
}

/// Await `fut`, giving up after `limit`
pub async fn bounded<F: Future>(limit: Duration, fut: F) -> Result<F::Output, ProbeError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| ProbeError::Timeout {
            after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        })
}

/// Whether any MX exchange host belongs to Google, case-insensitively
pub fn has_google_exchange<I, S>(exchanges: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    exchanges
        .into_iter()
        .any(|host| host.as_ref().to_lowercase().contains(GOOGLE_MX_MARKER))
}

/// DNS and HTTP clients for the Google Workspace probes
pub struct GoogleProbe {
    resolver: TokioAsyncResolver,
    http: reqwest::Client,
    config: ProbeConfig,
}

impl GoogleProbe {
    /// Build the probe clients
    ///
    /// # Returns
    /// * `Err(ProbeError::Http)` if the HTTP client cannot be constructed
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_millis(config.dns_timeout_ms);
        opts.attempts = config.dns_attempts;

        let resolver = TokioAsyncResolver::tokio(ResolverConfig::cloudflare(), opts);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .build()
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        info!(
            "Google probes initialized - dns timeout: {}ms, http timeout: {}ms",
            config.dns_timeout_ms, config.http_timeout_ms
        );

        Ok(Self {
            resolver,
            http,
            config,
        })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Whether the email's domain receives mail through Google, with the
    /// configured DNS timeout
    pub async fn is_google_email(&self, email: &str) -> ProbeResult {
        self.is_google_email_with_timeout(email, Duration::from_millis(self.config.dns_timeout_ms))
            .await
    }

    /// Whether the email's domain receives mail through Google
    ///
    /// The MX lookup is abandoned after `limit`, yielding
    /// `ProbeError::Timeout`.
    #[instrument(skip_all, fields(domain = tracing::field::Empty))]
    pub async fn is_google_email_with_timeout(&self, email: &str, limit: Duration) -> ProbeResult {
        let domain = match extract_domain(email) {
            Ok(domain) => domain,
            Err(_) => return ProbeResult::failed(ProbeError::InvalidEmail),
        };
        tracing::Span::current().record("domain", domain.as_str());

        debug!("Looking up MX records for: {}", domain);

        match bounded(limit, self.resolver.mx_lookup(domain.as_str())).await {
            Ok(Ok(lookup)) => {
                let exchanges: Vec<String> =
                    lookup.iter().map(|mx| mx.exchange().to_utf8()).collect();
                let status = has_google_exchange(&exchanges);
                debug!("Domain {} has {} MX record(s), google: {}", domain, exchanges.len(), status);
                ProbeResult::ok(status)
            }
            Ok(Err(e)) => {
                debug!("MX record lookup failed for {}: {}", domain, e);
                ProbeResult::failed(ProbeError::Dns(e.to_string()))
            }
            Err(timeout) => {
                warn!("MX record lookup for {} timed out", domain);
                ProbeResult::failed(timeout)
            }
        }
    }

    /// Whether `domain` is a Google Workspace domain
    ///
    /// True only for an HTTP 200 with an empty body. Other statuses are a
    /// plain negative; transport failures carry the error.
    #[instrument(skip(self))]
    pub async fn is_google_apps_domain(&self, domain: &str) -> ProbeResult {
        let url = format!("{}/{}/acs", GOOGLE_APPS_PROBE_BASE, domain.trim());
        debug!("Probing Workspace endpoint: {}", url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Workspace probe for {} timed out", domain);
                return ProbeResult::failed(ProbeError::Timeout {
                    after_ms: self.config.http_timeout_ms,
                });
            }
            Err(e) => {
                debug!("Workspace probe for {} failed: {}", domain, e);
                return ProbeResult::failed(ProbeError::Http(e.to_string()));
            }
        };

        let is_ok = response.status() == reqwest::StatusCode::OK;
        match response.text().await {
            Ok(body) => {
                debug!("Workspace probe for {}: ok={}, body_len={}", domain, is_ok, body.len());
                ProbeResult::ok(is_ok && body.is_empty())
            }
            Err(e) => ProbeResult::failed(ProbeError::Http(e.to_string())),
        }
    }
}

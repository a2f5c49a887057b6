//! Email domain extraction and registrable-domain resolution
//!
//! Syntax checking is delegated to the `email_address` crate and public-suffix
//! handling to the embedded list in `psl`. Both entry points lowercase their
//! output so every later set lookup sees a single casing.

use crate::ClassifyError;
use email_address::{EmailAddress, Options};
use tracing::debug;

/// A domain with its subdomains stripped, e.g. `koan.co` for `us.koan.co`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrableDomain {
    domain: String,
    public_suffix: String,
}

impl RegistrableDomain {
    /// The registrable domain itself, e.g. `koan.co.uk`
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The public suffix part, e.g. `co.uk`
    pub fn public_suffix(&self) -> &str {
        &self.public_suffix
    }

    /// First label of the domain, the canonical short brand token
    pub fn base_label(&self) -> &str {
        self.domain.split('.').next().unwrap_or_default()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.domain.split('.')
    }
}

fn email_options() -> Options {
    Options::default()
        .with_required_tld()
        .without_domain_literal()
        .without_display_text()
}

/// Validate an email address and return its fully-qualified domain
///
/// The domain is the text after the last `@`, trimmed and lowercased.
///
/// # Returns
/// * `Ok(fqdn)` if the address is syntactically valid
/// * `Err(ClassifyError::InvalidEmail)` otherwise
///
/// # Example
/// ```rust
/// use vanitizer_core::extract_domain;
///
/// assert_eq!(extract_domain("asdf@Us.Koan.co").unwrap(), "us.koan.co");
/// assert!(extract_domain("koan.co").is_err());
/// ```
pub fn extract_domain(email: &str) -> Result<String, ClassifyError> {
    if let Err(e) = EmailAddress::parse_with_options(email, email_options()) {
        debug!("Rejected email syntax: {}", e);
        return Err(ClassifyError::InvalidEmail);
    }

    let (_, host) = email.rsplit_once('@').ok_or(ClassifyError::InvalidEmail)?;
    let fqdn = host.trim().to_lowercase();

    if fqdn.is_empty() {
        return Err(ClassifyError::InvalidEmail);
    }

    Ok(fqdn)
}

/// Split a fully-qualified domain into registrable domain and public suffix
///
/// # Returns
/// * `Err(ClassifyError::InvalidTld)` if the host name is malformed or its
///   suffix is not on the public suffix list
/// * `Err(ClassifyError::NoRegistrableDomain)` if the host is itself a public
///   suffix (e.g. `co.uk`)
pub fn resolve_registrable_domain(fqdn: &str) -> Result<RegistrableDomain, ClassifyError> {
    let fqdn = fqdn.trim().trim_end_matches('.').to_lowercase();

    if !is_valid_hostname(&fqdn) {
        debug!("Host name failed format validation: {}", fqdn);
        return Err(ClassifyError::InvalidTld);
    }

    let known_suffix = psl::suffix(fqdn.as_bytes()).is_some_and(|suffix| suffix.is_known());
    if !known_suffix {
        debug!("Unknown public suffix for: {}", fqdn);
        return Err(ClassifyError::InvalidTld);
    }

    let domain = psl::domain(fqdn.as_bytes()).ok_or(ClassifyError::NoRegistrableDomain)?;
    let registrable = String::from_utf8_lossy(domain.as_bytes()).into_owned();
    let public_suffix = String::from_utf8_lossy(domain.suffix().as_bytes()).into_owned();

    if registrable.is_empty() || public_suffix.is_empty() || registrable == public_suffix {
        return Err(ClassifyError::NoRegistrableDomain);
    }

    debug!("Resolved {} -> {} (suffix {})", fqdn, registrable, public_suffix);

    Ok(RegistrableDomain {
        domain: registrable,
        public_suffix,
    })
}

/// Basic host name format validation
fn is_valid_hostname(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    for label in domain.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }

        // Labels cannot start or end with hyphen
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

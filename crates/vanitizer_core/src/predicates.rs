//! Boolean predicates over the static reference lists
//!
//! These ignore every per-call override: they answer only whether the email's
//! exact domain is on the disposable or free-mail list.

use crate::{
    extract::{extract_domain, resolve_registrable_domain},
    lists::ListRegistry,
    ClassifyError,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredicateResult {
    pub status: bool,
    pub error: Option<ClassifyError>,
}

impl PredicateResult {
    fn from_domain(email: &str, test: impl FnOnce(&str) -> bool) -> Self {
        match extract_domain(email) {
            Ok(domain) => Self {
                status: test(&domain),
                error: None,
            },
            Err(e) => Self {
                status: false,
                error: Some(e),
            },
        }
    }
}

/// Whether the email's domain is a known disposable-mail domain
pub fn is_disposable_email(lists: &ListRegistry, email: &str) -> PredicateResult {
    PredicateResult::from_domain(email, |domain| lists.disposable().contains(domain))
}

/// Whether the email's domain is a known free-mail provider
pub fn is_free_email(lists: &ListRegistry, email: &str) -> PredicateResult {
    PredicateResult::from_domain(email, |domain| lists.free().contains(domain))
}

/// Whether the email's domain is neither disposable nor free
pub fn is_work_email(lists: &ListRegistry, email: &str) -> PredicateResult {
    PredicateResult::from_domain(email, |domain| {
        !(lists.disposable().contains(domain) || lists.free().contains(domain))
    })
}

/// Registrable domain of an email address, e.g. `ibm.com` for `asdf@usa.ibm.com`
pub fn get_sub_level_domain(email: &str) -> Result<String, ClassifyError> {
    let fqdn = extract_domain(email)?;
    let registrable = resolve_registrable_domain(&fqdn)?;
    Ok(registrable.domain().to_string())
}

//! Cascade orchestrator turning an email address into accepted brand candidates
//!
//! Steps, short-circuiting on the first failure:
//! 1. extract the FQDN from the address
//! 2. classify the FQDN against the domain lists
//! 3. resolve the registrable domain
//! 4. gate on the base candidate (offensive word / word blacklist)
//! 5. generate and classify every candidate, logging the rejected ones

use crate::{
    candidates::generate_candidates,
    cascade::{classify_candidate, classify_domain, Reason, Verdict},
    extract::{extract_domain, resolve_registrable_domain},
    lists::{ListRegistry, ReferenceSet},
    ClassifyError,
};
use serde::{Serialize, Serializer};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn, Span};

/// Callback receiving one message per rejected candidate
pub type Logger = Arc<dyn Fn(&str) + Send + Sync>;

/// Per-call overrides for [`get_domains`]
///
/// Every list defaults to empty. Without a logger, rejections are emitted as
/// `tracing` debug events under the `vanitizer` target.
#[derive(Clone, Default)]
pub struct CascadeConfig {
    pub word_whitelist: ReferenceSet,
    pub word_blacklist: ReferenceSet,
    pub domain_whitelist: ReferenceSet,
    pub domain_blacklist: ReferenceSet,
    pub logger: Option<Logger>,
}

impl CascadeConfig {
    pub fn with_word_whitelist(mut self, words: impl Into<ReferenceSet>) -> Self {
        self.word_whitelist = words.into();
        self
    }

    pub fn with_word_blacklist(mut self, words: impl Into<ReferenceSet>) -> Self {
        self.word_blacklist = words.into();
        self
    }

    pub fn with_domain_whitelist(mut self, domains: impl Into<ReferenceSet>) -> Self {
        self.domain_whitelist = domains.into();
        self
    }

    pub fn with_domain_blacklist(mut self, domains: impl Into<ReferenceSet>) -> Self {
        self.domain_blacklist = domains.into();
        self
    }

    pub fn with_logger(mut self, logger: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    fn log_rejection(&self, verdict: &Verdict) {
        let candidate = verdict.subject.as_deref().unwrap_or_default();
        let reason = verdict.reason.map_or("unknown", |r| r.as_str());
        let message = format!("{candidate} rejected due to: {reason}");

        match &self.logger {
            Some(logger) => {
                // callback panics stay contained here
                if panic::catch_unwind(AssertUnwindSafe(|| logger(&message))).is_err() {
                    warn!("Rejection logger panicked while reporting '{}'", candidate);
                }
            }
            None => debug!(target: "vanitizer", "{}", message),
        }
    }
}

impl fmt::Debug for CascadeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CascadeConfig")
            .field("word_whitelist", &self.word_whitelist.len())
            .field("word_blacklist", &self.word_blacklist.len())
            .field("domain_whitelist", &self.domain_whitelist.len())
            .field("domain_blacklist", &self.domain_blacklist.len())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Why [`get_domains`] returned `status: false`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("rejected: {0}")]
    Rejected(Reason),
}

impl CascadeError {
    /// Stable code reported in the `err` field
    pub fn code(&self) -> &'static str {
        match self {
            CascadeError::Classify(e) => e.code(),
            CascadeError::Rejected(reason) => reason.as_str(),
        }
    }
}

impl Serialize for CascadeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Outcome of [`get_domains`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeResult {
    /// Accepted candidates, shortest first; `None` when `status` is false
    pub domains: Option<Vec<String>>,
    pub status: bool,
    pub err: Option<CascadeError>,
}

impl CascadeResult {
    fn accepted(domains: Vec<String>) -> Self {
        Self {
            domains: Some(domains),
            status: true,
            err: None,
        }
    }

    fn failed(err: impl Into<CascadeError>) -> Self {
        let err = err.into();
        debug!("Cascade stopped: {}", err.code());
        Self {
            domains: None,
            status: false,
            err: Some(err),
        }
    }
}

/// Run the full cascade on an email address
///
/// `status` is false only when extraction, the domain check, resolution, or
/// the base-candidate gate fails. Once candidates are generated the result
/// is `status: true`, even if every candidate was rejected.
///
/// # Example
/// ```rust
/// use vanitizer_core::{get_domains, CascadeConfig, ListRegistry};
///
/// let lists = ListRegistry::bundled()?;
/// let result = get_domains(&lists, "asdf@koan.co.uk", &CascadeConfig::default());
/// assert_eq!(result.domains.unwrap(), vec!["koan", "koan-co", "koan-co-uk"]);
/// # Ok::<(), vanitizer_core::lists::ListError>(())
/// ```
#[instrument(skip_all, fields(domain = tracing::field::Empty))]
pub fn get_domains(lists: &ListRegistry, email: &str, config: &CascadeConfig) -> CascadeResult {
    let fqdn = match extract_domain(email) {
        Ok(fqdn) => fqdn,
        Err(e) => return CascadeResult::failed(e),
    };
    Span::current().record("domain", fqdn.as_str());

    let domain_check = classify_domain(
        &fqdn,
        lists,
        &config.domain_whitelist,
        &config.domain_blacklist,
    );
    if let Some(reason) = domain_check.rejection() {
        return CascadeResult::failed(CascadeError::Rejected(reason));
    }

    let registrable = match resolve_registrable_domain(&fqdn) {
        Ok(registrable) => registrable,
        Err(e) => return CascadeResult::failed(e),
    };

    let base_candidate = registrable.base_label();
    if !config.word_whitelist.contains(base_candidate) && lists.bad_words().contains(base_candidate)
    {
        return CascadeResult::failed(CascadeError::Rejected(Reason::BadWord));
    }
    if config.word_blacklist.contains(base_candidate) {
        return CascadeResult::failed(CascadeError::Rejected(Reason::Blacklist));
    }

    let verdicts: Vec<Verdict> = generate_candidates(registrable.domain())
        .iter()
        .map(|candidate| {
            classify_candidate(
                candidate,
                lists,
                &config.word_whitelist,
                &config.word_blacklist,
            )
        })
        .collect();

    for verdict in verdicts.iter().filter(|v| !v.accepted) {
        config.log_rejection(verdict);
    }

    let domains: Vec<String> = verdicts
        .into_iter()
        .filter(|v| v.accepted)
        .filter_map(|v| v.subject)
        .collect();

    debug!("Accepted {} candidate(s) for {}", domains.len(), registrable.domain());
    CascadeResult::accepted(domains)
}

/// Alias of [`get_domains`]
pub fn get_domain_candidates(
    lists: &ListRegistry,
    email: &str,
    config: &CascadeConfig,
) -> CascadeResult {
    get_domains(lists, email, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn lists() -> ListRegistry {
        ListRegistry::bundled().unwrap()
    }

    fn domains(result: &CascadeResult) -> Vec<&str> {
        result
            .domains
            .as_ref()
            .map(|d| d.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_company_domain() {
        let result = get_domains(&lists(), "asdf@koan.co", &CascadeConfig::default());
        assert!(result.status);
        assert_eq!(result.err, None);
        assert_eq!(domains(&result), vec!["koan", "koan-co"]);
    }

    #[test]
    fn test_subdomain_is_stripped() {
        let result = get_domains(&lists(), "asdf@us.koan.co", &CascadeConfig::default());
        assert_eq!(domains(&result), vec!["koan", "koan-co"]);
    }

    #[test]
    fn test_multi_label_suffix() {
        let result = get_domains(&lists(), "asdf@koan.co.uk", &CascadeConfig::default());
        assert_eq!(domains(&result), vec!["koan", "koan-co", "koan-co-uk"]);
    }

    #[test]
    fn test_invalid_email() {
        for email in ["koan.co", "koan"] {
            let result = get_domains(&lists(), email, &CascadeConfig::default());
            assert_eq!(
                result,
                CascadeResult {
                    domains: None,
                    status: false,
                    err: Some(CascadeError::Classify(ClassifyError::InvalidEmail)),
                }
            );
        }
    }

    #[test]
    fn test_unresolvable_domains() {
        let cases = [
            ("asdf@co.uk", ClassifyError::NoRegistrableDomain),
            ("asdf@koan.notarealtld", ClassifyError::InvalidTld),
        ];
        for (email, expected) in cases {
            let result = get_domains(&lists(), email, &CascadeConfig::default());
            assert_eq!(
                result,
                CascadeResult {
                    domains: None,
                    status: false,
                    err: Some(CascadeError::Classify(expected)),
                },
                "{email}"
            );
        }
    }

    #[test]
    fn test_free_and_disposable_domains() {
        let result = get_domains(&lists(), "asdf@gmail.com", &CascadeConfig::default());
        assert!(!result.status);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::Free)));

        let result = get_domains(&lists(), "asdf@mailinator.com", &CascadeConfig::default());
        assert!(!result.status);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::Disposable)));
    }

    #[test]
    fn test_domain_whitelist_overrides_free() {
        let config = CascadeConfig::default().with_domain_whitelist(["gmail.com"]);
        let result = get_domains(&lists(), "asdf@gmail.com", &config);
        assert!(result.status);
        assert_eq!(domains(&result), vec!["gmail", "gmail-com"]);
    }

    #[test]
    fn test_domain_blacklist() {
        let config = CascadeConfig::default().with_domain_blacklist(["koan.co"]);
        let result = get_domains(&lists(), "asdf@koan.co", &config);
        assert!(!result.status);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::Blacklist)));
    }

    #[test]
    fn test_domain_blacklist_beats_whitelist() {
        let config = CascadeConfig::default()
            .with_domain_whitelist(["koan.co"])
            .with_domain_blacklist(["koan.co"]);
        let result = get_domains(&lists(), "asdf@koan.co", &config);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::Blacklist)));
    }

    #[test]
    fn test_domain_check_uses_full_host() {
        // Only the exact FQDN is checked against the domain lists
        let config = CascadeConfig::default().with_domain_blacklist(["koan.co"]);
        let result = get_domains(&lists(), "asdf@us.koan.co", &config);
        assert!(result.status);
    }

    #[test]
    fn test_bad_word_base_candidate() {
        let result = get_domains(&lists(), "asdf@shit.com", &CascadeConfig::default());
        assert!(!result.status);
        assert_eq!(result.domains, None);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::BadWord)));
    }

    #[test]
    fn test_word_whitelist_allows_bad_word() {
        let config = CascadeConfig::default().with_word_whitelist(["shit"]);
        let result = get_domains(&lists(), "asdf@shit.com", &config);
        assert!(result.status);
        assert_eq!(domains(&result), vec!["shit", "shit-com"]);
    }

    #[test]
    fn test_word_blacklist_base_candidate() {
        let config = CascadeConfig::default().with_word_blacklist(["koan"]);
        let result = get_domains(&lists(), "asdf@koan.co", &config);
        assert!(!result.status);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::Blacklist)));
    }

    #[test]
    fn test_word_blacklist_beats_whitelist_for_base_candidate() {
        let config = CascadeConfig::default()
            .with_word_whitelist(["koan"])
            .with_word_blacklist(["koan"]);
        let result = get_domains(&lists(), "asdf@koan.co", &config);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::Blacklist)));
    }

    #[test]
    fn test_rejected_later_candidates_are_filtered() {
        let config = CascadeConfig::default().with_word_blacklist(["koan-co"]);
        let result = get_domains(&lists(), "asdf@koan.co.uk", &config);
        assert!(result.status);
        assert_eq!(domains(&result), vec!["koan", "koan-co-uk"]);
    }

    #[test]
    fn test_only_base_candidate_survives() {
        let lists = ListRegistry::new(
            ReferenceSet::new(),
            ReferenceSet::new(),
            ReferenceSet::new(),
        );
        let config = CascadeConfig::default().with_word_blacklist(["widgets-com"]);
        let result = get_domains(&lists, "asdf@widgets.com", &config);
        assert!(result.status);
        assert_eq!(domains(&result), vec!["widgets"]);
    }

    #[test]
    fn test_offensive_longer_candidate_is_filtered() {
        let lists = ListRegistry::new(
            ReferenceSet::new(),
            ReferenceSet::new(),
            ReferenceSet::from(["crap-co"]),
        );
        let result = get_domains(&lists, "asdf@crap.co", &CascadeConfig::default());
        assert!(result.status);
        assert_eq!(domains(&result), vec!["crap"]);
    }

    #[test]
    fn test_logger_receives_rejections_only() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let config = CascadeConfig::default()
            .with_word_blacklist(["koan-co"])
            .with_logger(move |msg| sink.lock().unwrap().push(msg.to_string()));

        let result = get_domains(&lists(), "asdf@koan.co.uk", &config);
        assert!(result.status);
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["koan-co rejected due to: blacklist".to_string()]
        );
    }

    #[test]
    fn test_panicking_logger_does_not_affect_result() {
        let config = CascadeConfig::default()
            .with_word_blacklist(["koan-co"])
            .with_logger(|_| panic!("logger failure"));

        let result = get_domains(&lists(), "asdf@koan.co", &config);
        assert!(result.status);
        assert_eq!(domains(&result), vec!["koan"]);
    }

    #[test]
    fn test_overrides_are_case_insensitive() {
        let config = CascadeConfig::default().with_domain_blacklist(["KOAN.CO"]);
        let result = get_domains(&lists(), "asdf@Koan.Co", &config);
        assert_eq!(result.err, Some(CascadeError::Rejected(Reason::Blacklist)));
    }

    #[test]
    fn test_alias() {
        let config = CascadeConfig::default();
        assert_eq!(
            get_domain_candidates(&lists(), "asdf@koan.co", &config),
            get_domains(&lists(), "asdf@koan.co", &config)
        );
    }

    #[test]
    fn test_result_serialization() {
        let result = get_domains(&lists(), "asdf@koan.co", &CascadeConfig::default());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({ "domains": ["koan", "koan-co"], "status": true, "err": null })
        );

        let result = get_domains(&lists(), "koan.co", &CascadeConfig::default());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({ "domains": null, "status": false, "err": "invalid_email" })
        );
    }
}

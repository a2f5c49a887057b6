//! # vanitizer_core
//!
//! Email domain screening: decide whether an address looks like it belongs to a
//! real company, and derive the brand tokens used to match it against a company
//! registry.
//!
//! ## Features
//!
//! - **Tiered classification** of a domain as corporate, free-mail, disposable,
//!   or blocked by per-deployment overrides
//! - **Candidate generation** of hyphen-joined label prefixes of the
//!   registrable domain (`koan.co.uk` -> `koan`, `koan-co`, `koan-co-uk`)
//! - **Static membership predicates** for disposable, free and work addresses
//! - **Google Workspace probes** over DNS MX and HTTP with bounded waits
//!
//! ## Example
//!
//! ```rust
//! use vanitizer_core::{CascadeConfig, Classifier};
//!
//! let classifier = Classifier::bundled()?;
//! let result = classifier.get_domains("asdf@us.koan.co", &CascadeConfig::default());
//! assert!(result.status);
//! assert_eq!(result.domains, Some(vec!["koan".to_string(), "koan-co".to_string()]));
//! # Ok::<(), vanitizer_core::lists::ListError>(())
//! ```
//!
//! ## Reference lists
//!
//! The lists embedded by [`ListRegistry::bundled`] are small samples. Production
//! deployments should load full disposable, free-mail and bad-word lists with
//! [`ListRegistry::from_files`] (or the service's `lists.*_path` settings).

pub mod candidates;
pub mod cascade;
pub mod classifier;
pub mod extract;
pub mod lists;
pub mod pipeline;
pub mod predicates;
pub mod privacy;
pub mod probes;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Failures turning an email address into a registrable domain
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifyError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("domain does not end in a known public suffix")]
    InvalidTld,
    #[error("no registrable domain or public suffix")]
    NoRegistrableDomain,
}

impl ClassifyError {
    /// Stable code reported to callers in `err` / `error` fields
    pub fn code(&self) -> &'static str {
        match self {
            ClassifyError::InvalidEmail => "invalid_email",
            ClassifyError::InvalidTld => "invalid_tld",
            ClassifyError::NoRegistrableDomain => "no_domain_or_publicSuffix",
        }
    }
}

impl Serialize for ClassifyError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// Re-export main types
pub use candidates::generate_candidates;
pub use cascade::{classify_candidate, classify_domain, Reason, Verdict};
pub use classifier::Classifier;
pub use extract::{extract_domain, resolve_registrable_domain, RegistrableDomain};
pub use lists::{ListRegistry, ReferenceSet};
pub use pipeline::{get_domain_candidates, get_domains, CascadeConfig, CascadeError, CascadeResult};
pub use predicates::{
    get_sub_level_domain, is_disposable_email, is_free_email, is_work_email, PredicateResult,
};
pub use probes::{GoogleProbe, ProbeConfig, ProbeError, ProbeResult};

//! Classification cascade for candidates and whole domains
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! explicit blacklist, then explicit whitelist, then the static denylists.
//! A deployment can therefore override any static classification.

use crate::lists::{ListRegistry, ReferenceSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a verdict was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Blacklist,
    Whitelist,
    BadWord,
    Disposable,
    Free,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Blacklist => "blacklist",
            Reason::Whitelist => "whitelist",
            Reason::BadWord => "bad_word",
            Reason::Disposable => "disposable",
            Reason::Free => "free",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one candidate or domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// The accepted candidate or domain; `None` for rejected domains
    pub subject: Option<String>,
    pub accepted: bool,
    pub reason: Option<Reason>,
}

impl Verdict {
    fn accept(subject: &str, reason: Option<Reason>) -> Self {
        Self {
            subject: Some(subject.to_string()),
            accepted: true,
            reason,
        }
    }

    fn reject(subject: Option<&str>, reason: Reason) -> Self {
        Self {
            subject: subject.map(str::to_string),
            accepted: false,
            reason: Some(reason),
        }
    }

    /// The rejection reason, if this verdict is a rejection
    pub fn rejection(&self) -> Option<Reason> {
        if self.accepted {
            None
        } else {
            self.reason
        }
    }
}

/// Classify one candidate brand token against the word lists
pub fn classify_candidate(
    candidate: &str,
    lists: &ListRegistry,
    word_whitelist: &ReferenceSet,
    word_blacklist: &ReferenceSet,
) -> Verdict {
    if word_blacklist.contains(candidate) {
        return Verdict::reject(Some(candidate), Reason::Blacklist);
    }
    if word_whitelist.contains(candidate) {
        return Verdict::accept(candidate, Some(Reason::Whitelist));
    }
    if lists.bad_words().contains(candidate) {
        return Verdict::reject(Some(candidate), Reason::BadWord);
    }
    Verdict::accept(candidate, None)
}

/// Classify a whole domain against the domain lists
///
/// Rejected verdicts carry no subject.
pub fn classify_domain(
    domain: &str,
    lists: &ListRegistry,
    domain_whitelist: &ReferenceSet,
    domain_blacklist: &ReferenceSet,
) -> Verdict {
    if domain_blacklist.contains(domain) {
        return Verdict::reject(None, Reason::Blacklist);
    }
    if domain_whitelist.contains(domain) {
        return Verdict::accept(domain, Some(Reason::Whitelist));
    }
    if lists.disposable().contains(domain) {
        return Verdict::reject(None, Reason::Disposable);
    }
    if lists.free().contains(domain) {
        return Verdict::reject(None, Reason::Free);
    }
    Verdict::accept(domain, None)
}

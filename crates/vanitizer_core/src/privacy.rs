//! Privacy utilities for logging email addresses
//!
//! Screening requests carry full addresses. Logs only ever see the domain and
//! a salted hash of the local part, which still lets an operator correlate
//! repeated requests for the same address.

use sha2::{Digest, Sha256};
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hasher};
use tracing::debug;

/// Number of hex characters of the hash kept in redacted output
const REDACTED_PREFIX_LEN: usize = 12;

/// Salted hashing of email local parts
#[derive(Clone)]
pub struct PrivacyProcessor {
    salt: Vec<u8>,
}

impl PrivacyProcessor {
    pub fn new(salt: Vec<u8>) -> Self {
        debug!("Privacy processor initialized with {}-byte salt", salt.len());
        Self { salt }
    }

    /// Create a privacy processor with a random salt
    ///
    /// # Warning
    /// Hashes will not be consistent across restarts. Use `new()` with a
    /// persistent salt when logs from several instances must correlate.
    pub fn with_random_salt() -> Self {
        let mut salt = Vec::with_capacity(32);
        while salt.len() < 32 {
            let mut hasher = RandomState::new().build_hasher();
            hasher.write_usize(salt.len());
            salt.extend_from_slice(&hasher.finish().to_be_bytes());
        }
        Self::new(salt)
    }

    /// Hex-encoded SHA-256 of the salted local part
    pub fn hash_local_part(&self, local_part: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update(local_part.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Replace the local part of an address with a short hash prefix
    ///
    /// # Example
    /// ```rust
    /// use vanitizer_core::privacy::PrivacyProcessor;
    ///
    /// let processor = PrivacyProcessor::new(b"salt".to_vec());
    /// let redacted = processor.redact_email("john.doe@koan.co");
    /// assert!(redacted.ends_with("@koan.co"));
    /// assert!(!redacted.contains("john"));
    /// ```
    pub fn redact_email(&self, email: &str) -> String {
        match email.rsplit_once('@') {
            Some((local, domain)) => {
                let hash = self.hash_local_part(local);
                format!("{}@{}", &hash[..REDACTED_PREFIX_LEN], domain.trim())
            }
            None => {
                let hash = self.hash_local_part(email);
                format!("<no-domain:{}>", &hash[..REDACTED_PREFIX_LEN])
            }
        }
    }
}

impl fmt::Debug for PrivacyProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivacyProcessor")
            .field("salt_len", &self.salt.len())
            .finish()
    }
}

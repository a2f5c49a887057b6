//! Reference lists used by the classification cascade
//!
//! Three static tables ship with the crate (disposable domains, free-mail
//! providers, offensive words). Each is a flat JSON object mapping a lowercase
//! key to `true`. Deployments may replace them with their own files at startup.
//! Nothing here is mutated after load, so a registry can be shared freely
//! behind an `Arc`.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const BUNDLED_DISPOSABLE: &str = include_str!("../data/disposable.json");
const BUNDLED_FREE: &str = include_str!("../data/free.json");
const BUNDLED_BAD_WORDS: &str = include_str!("../data/badwords.json");

/// Errors raised while loading reference lists
#[derive(Error, Debug)]
pub enum ListError {
    #[error("failed to read reference list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed reference list '{name}': {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable set of lowercase domains or words
///
/// Keys are trimmed and lowercased on the way in, and lookups lowercase their
/// argument, so membership is case-insensitive end to end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    entries: HashSet<String>,
}

impl ReferenceSet {
    /// An empty set, the default for every override list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat `{ "key": true }` JSON table
    ///
    /// Keys mapped to `false` are not members.
    ///
    /// # Arguments
    /// * `name` - Label used in error messages (e.g. "disposable")
    /// * `json` - The JSON text
    pub fn from_json(name: &str, json: &str) -> Result<Self, ListError> {
        let table: HashMap<String, bool> =
            serde_json::from_str(json).map_err(|source| ListError::Json {
                name: name.to_string(),
                source,
            })?;

        let set: Self = table
            .into_iter()
            .filter_map(|(key, member)| member.then_some(key))
            .collect();

        debug!("Parsed reference list '{}' with {} entries", name, set.len());
        Ok(set)
    }

    /// Read and parse a JSON table from disk
    pub fn from_json_file(name: &str, path: impl AsRef<Path>) -> Result<Self, ListError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(name, &json)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(&*normalize(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .filter_map(|key| {
                let key = key.as_ref().trim();
                (!key.is_empty()).then(|| key.to_lowercase())
            })
            .collect();
        Self { entries }
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for ReferenceSet {
    fn from(keys: [S; N]) -> Self {
        keys.into_iter().collect()
    }
}

fn normalize(key: &str) -> Cow<'_, str> {
    let key = key.trim();
    if key.chars().any(char::is_uppercase) {
        Cow::Owned(key.to_lowercase())
    } else {
        Cow::Borrowed(key)
    }
}

/// Locations of replacement reference lists on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPaths {
    pub disposable: PathBuf,
    pub free: PathBuf,
    pub bad_words: PathBuf,
}

/// Sizes of the loaded lists, for startup logs and monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListStats {
    pub disposable_domains: usize,
    pub free_domains: usize,
    pub bad_words: usize,
}

/// The static reference lists consulted by the cascade and the predicates
#[derive(Debug, Clone, Default)]
pub struct ListRegistry {
    disposable: ReferenceSet,
    free: ReferenceSet,
    bad_words: ReferenceSet,
}

impl ListRegistry {
    pub fn new(disposable: ReferenceSet, free: ReferenceSet, bad_words: ReferenceSet) -> Self {
        let registry = Self {
            disposable,
            free,
            bad_words,
        };
        let stats = registry.stats();
        info!(
            "Reference lists loaded: {} disposable domains, {} free domains, {} offensive words",
            stats.disposable_domains, stats.free_domains, stats.bad_words
        );
        registry
    }

    /// Load the lists embedded in the crate
    pub fn bundled() -> Result<Self, ListError> {
        Self::from_json(BUNDLED_DISPOSABLE, BUNDLED_FREE, BUNDLED_BAD_WORDS)
    }

    /// Build a registry from three JSON tables
    pub fn from_json(disposable: &str, free: &str, bad_words: &str) -> Result<Self, ListError> {
        Ok(Self::new(
            ReferenceSet::from_json("disposable", disposable)?,
            ReferenceSet::from_json("free", free)?,
            ReferenceSet::from_json("bad_words", bad_words)?,
        ))
    }

    /// Build a registry from three JSON files
    pub fn from_files(paths: &ListPaths) -> Result<Self, ListError> {
        info!("Loading reference lists from {}", paths.disposable.display());
        Ok(Self::new(
            ReferenceSet::from_json_file("disposable", &paths.disposable)?,
            ReferenceSet::from_json_file("free", &paths.free)?,
            ReferenceSet::from_json_file("bad_words", &paths.bad_words)?,
        ))
    }

    pub fn disposable(&self) -> &ReferenceSet {
        &self.disposable
    }

    pub fn free(&self) -> &ReferenceSet {
        &self.free
    }

    pub fn bad_words(&self) -> &ReferenceSet {
        &self.bad_words
    }

    pub fn stats(&self) -> ListStats {
        ListStats {
            disposable_domains: self.disposable.len(),
            free_domains: self.free.len(),
            bad_words: self.bad_words.len(),
        }
    }
}

//! Reference lists bundled with every screening operation

use crate::{
    lists::{ListError, ListRegistry},
    pipeline::{self, CascadeConfig, CascadeResult},
    predicates::{self, PredicateResult},
    ClassifyError,
};
use std::sync::Arc;

/// Shared handle over a loaded [`ListRegistry`]
///
/// Cloning is cheap; every clone reads the same immutable lists.
#[derive(Debug, Clone)]
pub struct Classifier {
    lists: Arc<ListRegistry>,
}

impl Classifier {
    pub fn new(lists: Arc<ListRegistry>) -> Self {
        Self { lists }
    }

    /// A classifier over the lists embedded in the crate
    pub fn bundled() -> Result<Self, ListError> {
        Ok(Self::new(Arc::new(ListRegistry::bundled()?)))
    }

    pub fn lists(&self) -> &ListRegistry {
        &self.lists
    }

    pub fn get_domains(&self, email: &str, config: &CascadeConfig) -> CascadeResult {
        pipeline::get_domains(&self.lists, email, config)
    }

    pub fn get_domain_candidates(&self, email: &str, config: &CascadeConfig) -> CascadeResult {
        self.get_domains(email, config)
    }

    pub fn is_disposable_email(&self, email: &str) -> PredicateResult {
        predicates::is_disposable_email(&self.lists, email)
    }

    pub fn is_free_email(&self, email: &str) -> PredicateResult {
        predicates::is_free_email(&self.lists, email)
    }

    pub fn is_work_email(&self, email: &str) -> PredicateResult {
        predicates::is_work_email(&self.lists, email)
    }

    pub fn get_sub_level_domain(&self, email: &str) -> Result<String, ClassifyError> {
        predicates::get_sub_level_domain(email)
    }
}

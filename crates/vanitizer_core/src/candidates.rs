//! Brand-token candidates derived from a registrable domain

/// Join growing label prefixes of `registrable_domain` with hyphens
///
/// For a domain of `n` labels this yields exactly `n` candidates, shortest
/// first. The first element is the canonical short brand token.
///
/// # Example
/// ```rust
/// use vanitizer_core::generate_candidates;
///
/// assert_eq!(generate_candidates("koan.co.uk"), vec!["koan", "koan-co", "koan-co-uk"]);
/// ```
pub fn generate_candidates(registrable_domain: &str) -> Vec<String> {
    let labels: Vec<&str> = registrable_domain.split('.').collect();
    (1..=labels.len()).map(|k| labels[..k].join("-")).collect()
}

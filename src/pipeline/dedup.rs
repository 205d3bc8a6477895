//! Hostname deduplication
//!
//! Collapses a multi-source domain list into a unique-by-hostname set.
//! First occurrence wins, including its provenance; later duplicates from
//! other providers are discarded.

use crate::models::Domain;
use std::collections::HashSet;

/// Deduplicate by exact, case-sensitive hostname match, preserving the
/// input order of first occurrences. Entries with an empty hostname are
/// dropped silently.
pub fn dedupe(domains: Vec<Domain>) -> Vec<Domain> {
    let mut seen = HashSet::with_capacity(domains.len());
    let mut unique = Vec::with_capacity(domains.len());

    for domain in domains {
        if domain.hostname.is_empty() {
            continue;
        }
        if seen.insert(domain.hostname.clone()) {
            unique.push(domain);
        }
    }

    unique
}

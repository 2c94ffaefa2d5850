//! Public client address selection from a forwarded chain.

use crate::config::PRIVATE_IP_PREFIXES;

/// Whether `candidate` looks like a private-network address.
///
/// A plain prefix check: `10.`, `172.` and `192.168.`. The whole `172.`
/// range is treated as private, not only `172.16.0.0/12`.
pub fn is_private_candidate(candidate: &str) -> bool {
    PRIVATE_IP_PREFIXES
        .iter()
        .any(|prefix| candidate.starts_with(prefix))
}

/// First non-private entry of a comma-separated `X-Forwarded-For` style chain.
///
/// Entries are trimmed and empty ones dropped. Returns `None` when every
/// entry is private or the chain is empty.
pub fn select_public_ip(forwarded_for: &str) -> Option<&str> {
    forwarded_for
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .find(|candidate| !is_private_candidate(candidate))
}

//! Reference resolution
//!
//! Workflows accept human-given references: either a canonical
//! identifier or a (possibly partial) resource name. A reference that
//! already looks like an identifier is used as-is without touching the
//! network; anything else is matched against a candidate list fetched
//! from the provider's list endpoint.

use crate::error::{CoreError, Result};

/// Candidate resource from a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    /// Creation timestamp as reported by the provider. Compared
    /// lexicographically (RFC 3339 order); `None` sorts oldest.
    pub created_at: Option<String>,
}

/// Whether `reference` matches the canonical identifier syntax
/// (8-4-4-4-12 hyphenated hexadecimal).
pub fn is_canonical_id(reference: &str) -> bool {
    let bytes = reference.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// Pick the candidate a reference points at.
///
/// Matching: case-insensitive exact name match first; only when no
/// exact match exists, case-insensitive substring match. An empty
/// surviving set is [`CoreError::NotFound`]. Several survivors are
/// disambiguated by most recent creation timestamp (ties keep input
/// order) with an informational note naming what was discarded — a
/// best-effort policy, not a uniqueness guarantee.
pub fn pick(reference: &str, candidates: &[Candidate]) -> Result<Candidate> {
    let lowered = reference.to_lowercase();

    let exact: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.name.to_lowercase() == lowered)
        .collect();
    let matched: Vec<&Candidate> = if exact.is_empty() {
        candidates
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&lowered))
            .collect()
    } else {
        exact
    };

    match matched.as_slice() {
        [] => Err(CoreError::NotFound(reference.to_string())),
        [only] => Ok((*only).clone()),
        _ => {
            let mut sorted = matched;
            // 安定ソート: created_at が等しい場合は入力順を保つ
            sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let chosen = sorted[0];
            let discarded: Vec<&str> = sorted[1..].iter().map(|c| c.name.as_str()).collect();
            tracing::info!(
                reference,
                chosen_id = %chosen.id,
                discarded_count = discarded.len(),
                discarded = ?discarded,
                "ambiguous reference, picked most recently created candidate"
            );
            Ok(chosen.clone())
        }
    }
}

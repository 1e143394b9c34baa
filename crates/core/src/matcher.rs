//! Suggestion matcher: free-text lookup over the diagnosis catalog.

use crate::catalog::DiagnosisEntry;

/// Filter the catalog down to entries matching a free-text query.
///
/// The query is matched case-insensitively as a substring of the term, the
/// NAMASTE code, or the ICD-11 code. Catalog order is preserved; entries are
/// not re-ranked by confidence. A blank query yields no suggestions.
pub fn suggest<'a>(query: &str, entries: &'a [DiagnosisEntry]) -> Vec<&'a DiagnosisEntry> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let needle = trimmed.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry.term.to_lowercase().contains(&needle)
                || entry.namaste_code.to_lowercase().contains(&needle)
                || entry.icd11_code.to_lowercase().contains(&needle)
        })
        .collect()
}

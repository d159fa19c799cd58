use crate::model::{normalize_for_match, ExtensionRecord};

/// Hard cap handed to the presentation layer.
pub const MAX_RESULTS: usize = 10;

/// Order-preserving substring filter over the candidate list. The query is
/// matched case-insensitively against the display name; an empty query
/// matches everything. No scoring: first N in candidate order win.
pub fn match_query(
    candidates: &[ExtensionRecord],
    query: &str,
    limit: usize,
) -> Vec<ExtensionRecord> {
    let cap = if limit == 0 { MAX_RESULTS } else { limit };

    let needle = normalize_for_match(query);
    candidates
        .iter()
        .filter(|record| needle.is_empty() || record.normalized_name().contains(&needle))
        .take(cap)
        .cloned()
        .collect()
}

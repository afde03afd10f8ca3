//! Post-merge filters.

use tracing::debug;

use crate::location::FieldLocation;

/// Drops locations seen fewer than `min_occurrence` times.
#[must_use]
pub fn filter_min_occurrence(locations: Vec<FieldLocation>, min_occurrence: usize) -> Vec<FieldLocation> {
    let before = locations.len();
    let kept: Vec<FieldLocation> = locations
        .into_iter()
        .filter(|loc| loc.count >= min_occurrence)
        .collect();
    debug!(before, after = kept.len(), min_occurrence, "filtered by occurrence");
    kept
}

/// Drops locations whose examples never vary.
#[must_use]
pub fn remove_static(locations: Vec<FieldLocation>) -> Vec<FieldLocation> {
    let before = locations.len();
    let kept: Vec<FieldLocation> = locations.into_iter().filter(|loc| !loc.is_static()).collect();
    debug!(before, after = kept.len(), "removed static fields");
    kept
}
